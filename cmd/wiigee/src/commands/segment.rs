//! wmdump log segmentation command.

use std::time::Duration;

use clap::Args;
use serde::Serialize;
use wiigee_gesture::Gesture;
use wiigee_quantizer::Quantizer;
use wiigee_wmdump::{downsample, read_reports, segment};

use super::{get_config, get_output, open_input};
use crate::Cli;

/// Split a wmdump log into trigger-held recordings.
///
/// Each recording is downsampled to a fixed period, quantized with a
/// fresh quantizer and reported with its observation sequence.
#[derive(Args)]
pub struct SegmentCommand {
    /// wmdump log (`-` for stdin)
    log: String,

    /// Downsampling period in milliseconds
    #[arg(long)]
    period_ms: Option<u64>,

    /// HMM state count; the minimum sequence length
    #[arg(long)]
    states: Option<usize>,

    /// Keep raw samples; for logs without timestamps
    #[arg(long)]
    raw: bool,
}

#[derive(Serialize)]
struct Recording {
    index: usize,
    samples: usize,
    resampled: usize,
    sequence: Vec<usize>,
}

impl SegmentCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let cfg = get_config(cli)?;
        let period = Duration::from_millis(self.period_ms.unwrap_or(cfg.period_ms));
        let states = self.states.unwrap_or(cfg.states);

        let reports = read_reports(open_input(&self.log)?)?;
        let mut out = Vec::new();
        for (index, rec) in segment(&reports).into_iter().enumerate() {
            let gesture = if self.raw {
                Gesture::from_samples(rec.iter().map(|s| s.acc))
            } else {
                downsample(&rec, period)?
            };

            let mut quantizer = Quantizer::new(states);
            quantizer.train(&gesture)?;
            out.push(Recording {
                index,
                samples: rec.len(),
                resampled: gesture.len(),
                sequence: quantizer.observation_sequence(&gesture)?,
            });
        }
        tracing::debug!(recordings = out.len(), "segmented log");

        get_output(cli).write(&out)
    }
}
