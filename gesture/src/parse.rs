use std::io::BufRead;

use crate::{Acceleration, Gesture, GestureError, Result};

/// Reads whitespace-separated `x y z` lines into a gesture.
///
/// Blank lines are skipped. Extra columns after the third are ignored.
/// Returns [`GestureError::Empty`] if no sample was read.
pub fn parse_triples<R: BufRead>(reader: R) -> Result<Gesture> {
    let mut gesture = Gesture::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let values: Vec<f64> = trimmed
            .split_whitespace()
            .take(3)
            .map_while(|f| f.parse::<f64>().ok())
            .collect();
        if values.len() != 3 {
            return Err(GestureError::Parse {
                line: idx + 1,
                found: values.len(),
                text: trimmed.to_string(),
            });
        }

        gesture.push(Acceleration::new(values[0], values[1], values[2]));
    }

    if gesture.is_empty() {
        return Err(GestureError::Empty);
    }
    Ok(gesture)
}
