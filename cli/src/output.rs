//! Output utilities for CLI tools.

use std::{fs::File, io::Write};

use serde::Serialize;

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// YAML format (default).
    #[default]
    Yaml,
    /// JSON format.
    Json,
}

/// Output configuration.
pub struct Output {
    pub format: OutputFormat,
    pub file: Option<String>,
}

impl Output {
    /// Creates a new output configuration.
    pub fn new(format: OutputFormat, file: Option<String>) -> Self {
        Self { format, file }
    }

    /// Builds the output from the global `--json` and `-o` flags.
    pub fn from_flags(json: bool, file: Option<&str>) -> Self {
        let format = if json { OutputFormat::Json } else { OutputFormat::Yaml };
        Self::new(format, file.map(str::to_string))
    }

    /// Renders a value in the configured format.
    pub fn render<T: Serialize>(&self, value: &T) -> anyhow::Result<String> {
        Ok(match self.format {
            OutputFormat::Yaml => serde_yaml::to_string(value)?,
            OutputFormat::Json => serde_json::to_string_pretty(value)? + "\n",
        })
    }

    /// Outputs the result.
    pub fn write<T: Serialize>(&self, value: &T) -> anyhow::Result<()> {
        let output = self.render(value)?;
        self.write_text(&output)
    }

    /// Outputs pre-formatted text as is.
    pub fn write_text(&self, text: &str) -> anyhow::Result<()> {
        match &self.file {
            Some(path) => {
                let mut file = File::create(path)?;
                file.write_all(text.as_bytes())?;
            }
            None => {
                print!("{}", text);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use tempfile::tempdir;

    #[derive(Serialize)]
    struct Point {
        x: i32,
        labels: Vec<usize>,
    }

    #[test]
    fn render_formats() {
        let p = Point { x: 3, labels: vec![0, 1] };
        let yaml = Output::from_flags(false, None).render(&p).unwrap();
        assert_eq!(yaml, "x: 3\nlabels:\n- 0\n- 1\n");
        let json = Output::from_flags(true, None).render(&p).unwrap();
        assert!(json.starts_with("{\n  \"x\": 3,"));
        assert!(json.ends_with("}\n"));
    }

    #[test]
    fn write_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");
        let out = Output::from_flags(true, path.to_str());
        out.write(&Point { x: 1, labels: vec![] }).unwrap();
        let back: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back["x"], 1);
    }
}
