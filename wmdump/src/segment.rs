use std::time::Duration;

use serde::Serialize;
use tracing::debug;
use wiigee_gesture::{Acceleration, Gesture};

use crate::{Report, Result, WmdumpError};

/// Button bit that gates recording (the trigger, "B").
pub const TRIGGER: u16 = 0x0004;

/// Default downsampling period, 10 samples per second.
pub const DEFAULT_PERIOD: Duration = Duration::from_millis(100);

/// An acceleration reading with its capture time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimedSample {
    pub acc: Acceleration,
    pub at: Option<Duration>,
}

/// Splits a report stream into recordings.
///
/// Acc reports are collected while the trigger bit is held. A button
/// report of `0000` (everything released) closes the current recording.
#[derive(Debug, Clone)]
pub struct Segmenter {
    trigger: u16,
    buttons: u16,
    current: Vec<TimedSample>,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Segmenter {
    pub fn new() -> Self {
        Self::with_trigger(TRIGGER)
    }

    /// Uses `mask` instead of [`TRIGGER`] as the recording button.
    pub fn with_trigger(mask: u16) -> Self {
        Self {
            trigger: mask,
            buttons: 0,
            current: Vec::new(),
        }
    }

    /// Feeds one report; returns a recording when it closes one.
    pub fn feed(&mut self, report: &Report) -> Option<Vec<TimedSample>> {
        match *report {
            Report::Button { buttons } => {
                self.buttons = buttons;
                if buttons == 0 {
                    return self.take();
                }
            }
            Report::Acc { x, y, z, at } if self.buttons & self.trigger != 0 => {
                self.current.push(TimedSample {
                    acc: Acceleration::new(x as f64, y as f64, z as f64),
                    at,
                });
            }
            _ => {}
        }
        None
    }

    /// Returns the recording still open at the end of the log, if any.
    pub fn finish(&mut self) -> Option<Vec<TimedSample>> {
        self.take()
    }

    fn take(&mut self) -> Option<Vec<TimedSample>> {
        if self.current.is_empty() {
            return None;
        }
        debug!(samples = self.current.len(), "segmenter: recording closed");
        Some(std::mem::take(&mut self.current))
    }
}

/// Splits `reports` into recordings with a default [`Segmenter`].
pub fn segment<'a, I>(reports: I) -> Vec<Vec<TimedSample>>
where
    I: IntoIterator<Item = &'a Report>,
{
    let mut s = Segmenter::new();
    let mut out: Vec<_> = reports.into_iter().filter_map(|r| s.feed(r)).collect();
    out.extend(s.finish());
    out
}

/// Resamples a recording to one averaged reading per `period`.
///
/// Each reading holds its value until the next reading's timestamp
/// (constant interpolation). The output value of a bucket is the
/// time-weighted mean over it; the last reading is extended to fill the
/// final bucket. An empty recording gives an empty gesture.
pub fn downsample(samples: &[TimedSample], period: Duration) -> Result<Gesture> {
    let p = period.as_micros() as f64;
    if p <= 0.0 {
        return Err(WmdumpError::ZeroPeriod);
    }

    let mut times = Vec::with_capacity(samples.len());
    for (index, s) in samples.iter().enumerate() {
        times.push(s.at.ok_or(WmdumpError::MissingTimestamp { index })?);
    }

    let mut out = Gesture::new();
    let Some(last) = samples.last() else {
        return Ok(out);
    };

    let mut sum = [0.0f64; 3];
    let mut filled = 0.0f64;
    let emit = |sum: &mut [f64; 3], out: &mut Gesture| {
        out.push(Acceleration::new(sum[0] / p, sum[1] / p, sum[2] / p));
        *sum = [0.0; 3];
    };
    let add = |sum: &mut [f64; 3], a: &Acceleration, dt: f64| {
        sum[0] += a.x * dt;
        sum[1] += a.y * dt;
        sum[2] += a.z * dt;
    };

    for (i, pair) in samples.windows(2).enumerate() {
        let a = &pair[0].acc;
        let mut dt = times[i + 1]
            .checked_sub(times[i])
            .ok_or(WmdumpError::TimeWentBackwards { index: i + 1 })?
            .as_micros() as f64;

        let mut missing = p - filled;
        while missing <= dt {
            add(&mut sum, a, missing);
            dt -= missing;
            emit(&mut sum, &mut out);
            filled = 0.0;
            missing = p;
        }
        add(&mut sum, a, dt);
        filled += dt;
    }

    add(&mut sum, &last.acc, p - filled);
    emit(&mut sum, &mut out);

    debug!(input = samples.len(), output = out.len(), "downsampled recording");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acc(x: i32, ms: u64) -> Report {
        Report::Acc {
            x,
            y: 0,
            z: 0,
            at: Some(Duration::from_millis(ms)),
        }
    }

    fn button(buttons: u16) -> Report {
        Report::Button { buttons }
    }

    fn timed(x: f64, ms: u64) -> TimedSample {
        TimedSample {
            acc: Acceleration::new(x, 0.0, 0.0),
            at: Some(Duration::from_millis(ms)),
        }
    }

    fn xs(g: &Gesture) -> Vec<f64> {
        g.samples().iter().map(|a| a.x).collect()
    }

    #[test]
    fn records_only_while_trigger_held() {
        let reports = [
            acc(1, 0),
            button(0x0004),
            acc(2, 10),
            acc(3, 20),
            button(0x0008),
            acc(4, 30),
            button(0),
            button(0),
            button(0x000c),
            acc(5, 40),
        ];
        let recs = segment(&reports);
        assert_eq!(recs.len(), 2);
        let first: Vec<f64> = recs[0].iter().map(|s| s.acc.x).collect();
        assert_eq!(first, vec![2.0, 3.0]);
        assert_eq!(recs[1].len(), 1);
        assert_eq!(recs[1][0].acc.x, 5.0);
    }

    #[test]
    fn custom_trigger() {
        let mut s = Segmenter::with_trigger(0x0008);
        assert_eq!(s.feed(&button(0x0004)), None);
        s.feed(&acc(1, 0));
        s.feed(&button(0x0008));
        s.feed(&acc(2, 10));
        let rec = s.feed(&button(0)).unwrap();
        assert_eq!(rec.len(), 1);
        assert_eq!(s.finish(), None);
    }

    #[test]
    fn downsample_time_weighted_buckets() {
        let samples = [timed(10.0, 0), timed(20.0, 50), timed(0.0, 250)];
        let g = downsample(&samples, DEFAULT_PERIOD).unwrap();
        assert_eq!(xs(&g), vec![15.0, 20.0, 10.0]);
    }

    #[test]
    fn downsample_single_reading_fills_one_bucket() {
        let g = downsample(&[timed(7.0, 1000)], DEFAULT_PERIOD).unwrap();
        assert_eq!(xs(&g), vec![7.0]);
        assert!(downsample(&[], DEFAULT_PERIOD).unwrap().is_empty());
    }

    #[test]
    fn downsample_errors() {
        let backwards = [timed(1.0, 100), timed(2.0, 50)];
        assert!(matches!(
            downsample(&backwards, DEFAULT_PERIOD),
            Err(WmdumpError::TimeWentBackwards { index: 1 })
        ));

        let untimed = [timed(1.0, 0), TimedSample { acc: Acceleration::default(), at: None }];
        assert!(matches!(
            downsample(&untimed, DEFAULT_PERIOD),
            Err(WmdumpError::MissingTimestamp { index: 1 })
        ));

        assert!(matches!(
            downsample(&[timed(1.0, 0)], Duration::ZERO),
            Err(WmdumpError::ZeroPeriod)
        ));
    }
}
