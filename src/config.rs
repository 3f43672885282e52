// File: src/config.rs
use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "https://api.emojitell.com";

/// Runtime settings. Defaults, then `EMOJITELL_*` environment variables,
/// then whatever the caller (usually the CLI) sets on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub timeout_ms: u64,
    /// Translation input is cut to this many characters before sending.
    pub max_text_chars: usize,
    /// Same, for the legacy recommendation query.
    pub max_query_chars: usize,
    /// Saved translations kept; older ones are evicted.
    pub history_capacity: usize,
    pub data_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_ms: 30_000,
            max_text_chars: 1000,
            max_query_chars: 100,
            history_capacity: 20,
            data_dir: default_data_dir(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(url) = lookup("EMOJITELL_API_URL").filter(|v| !v.trim().is_empty()) {
            config.api_url = url.trim().to_string();
        }
        if let Some(raw) = lookup("EMOJITELL_TIMEOUT_MS") {
            match raw.trim().parse() {
                Ok(ms) => config.timeout_ms = ms,
                Err(_) => tracing::warn!(value = %raw, "ignoring invalid EMOJITELL_TIMEOUT_MS"),
            }
        }
        if let Some(dir) = lookup("EMOJITELL_DATA_DIR").filter(|v| !v.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }
        config
    }

    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join("saved_messages.json")
    }

    pub fn overlay_path(&self) -> PathBuf {
        self.data_dir.join("custom_emojis.json")
    }
}

fn default_data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    path.push("emojitell");
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn env_overrides_defaults() {
        let vars: HashMap<&str, &str> = [
            ("EMOJITELL_API_URL", "http://127.0.0.1:9000"),
            ("EMOJITELL_TIMEOUT_MS", "250"),
            ("EMOJITELL_DATA_DIR", "/tmp/emo"),
        ]
        .into_iter()
        .collect();
        let config = Config::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.api_url, "http://127.0.0.1:9000");
        assert_eq!(config.timeout_ms, 250);
        assert_eq!(config.history_path(), PathBuf::from("/tmp/emo/saved_messages.json"));
        assert_eq!(config.max_text_chars, 1000);
        assert_eq!(config.history_capacity, 20);
    }

    #[test]
    fn bad_timeout_keeps_default() {
        let config = Config::from_lookup(|k| (k == "EMOJITELL_TIMEOUT_MS").then(|| "soon".to_string()));
        assert_eq!(config.timeout_ms, 30_000);
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }
}
