use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub backend: Option<BackendConfig>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendConfig {
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub pdf_cache_capacity: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub theme: Option<String>,
}

/// Platform config directory path: `<config_dir>/pdf-genie/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("pdf-genie").join("config.toml"))
}

/// Load config by cascading CWD `.pdf-genie.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(&PathBuf::from(".pdf-genie.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

fn load_from_path(path: &PathBuf) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

/// Merge two configs: `overlay` values take precedence over `base`.
fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        backend: Some(BackendConfig {
            base_url: overlay
                .backend
                .as_ref()
                .and_then(|b| b.base_url.clone())
                .or_else(|| base.backend.as_ref().and_then(|b| b.base_url.clone())),
            request_timeout_secs: overlay
                .backend
                .as_ref()
                .and_then(|b| b.request_timeout_secs)
                .or_else(|| base.backend.as_ref().and_then(|b| b.request_timeout_secs)),
            pdf_cache_capacity: overlay
                .backend
                .as_ref()
                .and_then(|b| b.pdf_cache_capacity)
                .or_else(|| base.backend.as_ref().and_then(|b| b.pdf_cache_capacity)),
        }),
        display: Some(DisplayConfig {
            theme: overlay
                .display
                .as_ref()
                .and_then(|d| d.theme.clone())
                .or_else(|| base.display.as_ref().and_then(|d| d.theme.clone())),
        }),
    }
}
