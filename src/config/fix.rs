use crate::params::RectifyParams;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Clone, Debug, Deserialize)]
pub struct FixToolConfig {
    pub input: PathBuf,
    pub output: FixOutputConfig,
    /// Write the original next to the corrected image instead of the result alone.
    #[serde(default)]
    pub show_original: bool,
    /// Print per-phase progress bars to stdout.
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub params: RectifyParams,
}

#[derive(Clone, Debug, Deserialize)]
pub struct FixOutputConfig {
    pub image: PathBuf,
    #[serde(default)]
    pub report_json: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let json = r#"{ "input": "in.jpg", "output": { "image": "out.png" } }"#;
        let cfg: FixToolConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.input, PathBuf::from("in.jpg"));
        assert!(cfg.output.report_json.is_none());
        assert!(!cfg.show_original && !cfg.verbose);
        assert_eq!(cfg.params.focal_length, 1.0);
    }

    #[test]
    fn missing_output_is_an_error() {
        let json = r#"{ "input": "in.jpg" }"#;
        assert!(serde_json::from_str::<FixToolConfig>(json).is_err());
    }
}
