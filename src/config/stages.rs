use crate::params::RectifyParams;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Clone, Debug, Deserialize)]
pub struct StagesToolConfig {
    pub input: PathBuf,
    pub output: StagesOutputConfig,
    #[serde(default)]
    pub params: RectifyParams,
}

/// Every stage image lands in `dir`; the summary goes to `summary_json`.
#[derive(Clone, Debug, Deserialize)]
pub struct StagesOutputConfig {
    pub dir: PathBuf,
    pub summary_json: PathBuf,
}
