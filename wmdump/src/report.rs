use std::io::BufRead;
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use wiigee_gesture::Acceleration;

use crate::{Result, WmdumpError};

static ACC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^Acc Report: x=(-?\d+), y=(-?\d+), z=(-?\d+)(?:\s+(\d+)\s+(\d+))?$").unwrap()
});

static BUTTON_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Button Report: ([0-9A-Fa-f]{1,4})$").unwrap());

static STATUS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Status Report: battery=(\d+) extension=(.*)$").unwrap());

/// One line of a wmdump log.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Report {
    Status { battery: u8, extension: String },

    /// Bitmask of the buttons held down.
    Button { buttons: u16 },

    Acc {
        x: i32,
        y: i32,
        z: i32,
        /// Wall-clock capture time, when the log carries one.
        at: Option<Duration>,
    },

    /// IR, extension and unknown reports; kept verbatim.
    Other { text: String },
}

impl Report {
    /// The acceleration of an `Acc` report.
    pub fn acceleration(&self) -> Option<Acceleration> {
        match *self {
            Report::Acc { x, y, z, .. } => Some(Acceleration::new(x as f64, y as f64, z as f64)),
            _ => None,
        }
    }
}

fn malformed(kind: &'static str, text: &str) -> WmdumpError {
    WmdumpError::Malformed {
        kind,
        text: text.to_string(),
    }
}

/// Parses one log line.
///
/// Blank lines give `None`. Lines that do not start with a known report
/// prefix become [`Report::Other`]; lines that do but fail to parse are an
/// error.
pub fn parse_line(line: &str) -> Result<Option<Report>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    if line.starts_with("Acc Report:") {
        let caps = ACC_RE.captures(line).ok_or_else(|| malformed("acc", line))?;
        let num = |i: usize| caps[i].parse::<i32>().map_err(|_| malformed("acc", line));
        let at = match (caps.get(4), caps.get(5)) {
            (Some(s), Some(us)) => {
                let secs = s.as_str().parse::<u64>().map_err(|_| malformed("acc", line))?;
                let micros = us.as_str().parse::<u64>().map_err(|_| malformed("acc", line))?;
                if micros >= 1_000_000 {
                    return Err(malformed("acc", line));
                }
                Some(Duration::from_secs(secs) + Duration::from_micros(micros))
            }
            _ => None,
        };
        return Ok(Some(Report::Acc {
            x: num(1)?,
            y: num(2)?,
            z: num(3)?,
            at,
        }));
    }

    if line.starts_with("Button Report:") {
        let caps = BUTTON_RE.captures(line).ok_or_else(|| malformed("button", line))?;
        let buttons = u16::from_str_radix(&caps[1], 16).map_err(|_| malformed("button", line))?;
        return Ok(Some(Report::Button { buttons }));
    }

    if line.starts_with("Status Report:") {
        let caps = STATUS_RE.captures(line).ok_or_else(|| malformed("status", line))?;
        let battery = caps[1].parse::<u8>().map_err(|_| malformed("status", line))?;
        return Ok(Some(Report::Status {
            battery,
            extension: caps[2].to_string(),
        }));
    }

    Ok(Some(Report::Other {
        text: line.to_string(),
    }))
}

/// Reads every report of a log. Errors carry their 1-based line number.
pub fn read_reports<R: BufRead>(reader: R) -> Result<Vec<Report>> {
    let mut reports = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        match parse_line(&line) {
            Ok(Some(r)) => reports.push(r),
            Ok(None) => {}
            Err(e) => {
                return Err(WmdumpError::AtLine {
                    line: i + 1,
                    source: Box::new(e),
                });
            }
        }
    }
    Ok(reports)
}

/// Returns the acceleration of every acc report, in log order.
pub fn extract_accelerations<R: BufRead>(reader: R) -> Result<Vec<Acceleration>> {
    Ok(read_reports(reader)?
        .iter()
        .filter_map(Report::acceleration)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acc_without_timestamp() {
        let r = parse_line("Acc Report: x=130, y=-4, z=155").unwrap().unwrap();
        assert_eq!(
            r,
            Report::Acc {
                x: 130,
                y: -4,
                z: 155,
                at: None
            }
        );
    }

    #[test]
    fn acc_with_timestamp() {
        let r = parse_line("Acc Report: x=1, y=2, z=3   1244671200 250000\n")
            .unwrap()
            .unwrap();
        let Report::Acc { at, .. } = r else {
            panic!("expected acc report, got {r:?}");
        };
        assert_eq!(at, Some(Duration::new(1_244_671_200, 250_000_000)));
    }

    #[test]
    fn button_is_hex() {
        assert_eq!(
            parse_line("Button Report: 0004").unwrap(),
            Some(Report::Button { buttons: 4 })
        );
        assert_eq!(
            parse_line("Button Report: 080C").unwrap(),
            Some(Report::Button { buttons: 0x080c })
        );
    }

    #[test]
    fn status_and_other() {
        assert_eq!(
            parse_line("Status Report: battery=112 extension=Classic Controller").unwrap(),
            Some(Report::Status {
                battery: 112,
                extension: "Classic Controller".into()
            })
        );
        assert_eq!(
            parse_line("IR Report: elided").unwrap(),
            Some(Report::Other {
                text: "IR Report: elided".into()
            })
        );
        assert_eq!(parse_line("   ").unwrap(), None);
    }

    #[test]
    fn malformed_reports() {
        assert!(matches!(
            parse_line("Acc Report: x=1, y=2"),
            Err(WmdumpError::Malformed { kind: "acc", .. })
        ));
        assert!(matches!(
            parse_line("Acc Report: x=1, y=2, z=3 12 1000000"),
            Err(WmdumpError::Malformed { kind: "acc", .. })
        ));
        assert!(matches!(
            parse_line("Button Report: XYZ"),
            Err(WmdumpError::Malformed { kind: "button", .. })
        ));
        assert!(matches!(
            parse_line("Status Report: battery=999 extension=none"),
            Err(WmdumpError::Malformed { kind: "status", .. })
        ));
    }

    #[test]
    fn read_reports_names_the_line() {
        let log = "Button Report: 0004\n\nAcc Report: broken\n";
        match read_reports(log.as_bytes()) {
            Err(WmdumpError::AtLine { line, .. }) => assert_eq!(line, 3),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn extract_keeps_only_acc() {
        let log = "\
Put Wiimote in discoverable mode now (press 1+2)...
Status Report: battery=112 extension=none
Button Report: 0004
Acc Report: x=130, y=131, z=155
Acc Report: x=128, y=129, z=150
Button Report: 0000
";
        let accs = extract_accelerations(log.as_bytes()).unwrap();
        assert_eq!(accs.len(), 2);
        assert_eq!(accs[1].to_array(), [128.0, 129.0, 150.0]);
    }
}
