use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::Result;

/// Options handed over by the build pipeline. Accepted as an arbitrary JSON
/// object and kept around untouched; the pass doesn't read them yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginOptions {
    #[serde(flatten)]
    pub inputs: Map<String, Value>,
}

impl PluginOptions {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
