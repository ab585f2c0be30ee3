use std::{path::PathBuf, time::Duration};

use crate::error::{TryOnError, TryOnResult};

/// Runtime settings. Loaded from JSON; every field is optional in the file.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Origin used when building share links.
    pub base_url: String,
    pub processing_delay_ms: u64,
    /// Where the relay slot lives between invocations.
    pub state_dir: PathBuf,
    /// Root that server-relative image paths resolve against.
    pub asset_root: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            processing_delay_ms: 2000,
            state_dir: PathBuf::from(".virtual-mirror"),
            asset_root: PathBuf::from("public"),
        }
    }
}

impl Config {
    pub fn from_json_str(s: &str) -> TryOnResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| TryOnError::config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &std::path::Path) -> TryOnResult<Self> {
        let s = std::fs::read_to_string(path)
            .map_err(|e| TryOnError::config(format!("read '{}': {e}", path.display())))?;
        Self::from_json_str(&s)
    }

    pub fn validate(&self) -> TryOnResult<()> {
        url::Url::parse(&self.base_url)
            .map_err(|e| TryOnError::config(format!("base_url '{}': {e}", self.base_url)))?;
        if self.base_url.contains('?') || self.base_url.contains('#') {
            let msg = "base_url must not carry a query or fragment";
            return Err(TryOnError::config(msg));
        }
        Ok(())
    }

    pub fn processing_delay(&self) -> Duration {
        Duration::from_millis(self.processing_delay_ms)
    }
}
