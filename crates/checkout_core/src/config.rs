use std::{collections::HashMap, fs, path::Path};

use anyhow::Context;
use tracing::warn;
use url::Url;

pub const DEFAULT_SETTINGS_FILE: &str = "checkout.toml";

#[derive(Debug, Default)]
pub struct Settings {
    pub order_endpoint_url: Option<String>,
}

/// Loads settings from `checkout.toml` in the working directory (if present)
/// and then applies environment overrides.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    match read_settings_file(Path::new(DEFAULT_SETTINGS_FILE)) {
        Ok(Some(file_cfg)) => apply_file_settings(&mut settings, &file_cfg),
        Ok(None) => {}
        Err(err) => warn!(error = %err, "ignoring unreadable settings file"),
    }

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    settings
}

pub fn read_settings_file(path: &Path) -> anyhow::Result<Option<HashMap<String, String>>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read '{}'", path.display()))
        }
    };

    let file_cfg = toml::from_str::<HashMap<String, String>>(&raw)
        .with_context(|| format!("failed to parse '{}'", path.display()))?;
    Ok(Some(file_cfg))
}

fn apply_file_settings(settings: &mut Settings, file_cfg: &HashMap<String, String>) {
    if let Some(v) = file_cfg.get("order_endpoint_url") {
        settings.order_endpoint_url = Some(v.clone());
    }
}

fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("ORDER_ENDPOINT_URL") {
        settings.order_endpoint_url = Some(v);
    }
    if let Some(v) = lookup("APP__ORDER_ENDPOINT_URL") {
        settings.order_endpoint_url = Some(v);
    }
}

impl Settings {
    pub fn endpoint(&self) -> Option<Url> {
        resolve_endpoint(self.order_endpoint_url.as_deref())
    }
}

/// Blank, unparseable, or non-http(s) values resolve to `None`.
pub fn resolve_endpoint(raw: Option<&str>) -> Option<Url> {
    let raw = raw.map(str::trim).filter(|v| !v.is_empty())?;

    match Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Some(url),
        Ok(url) => {
            warn!(scheme = url.scheme(), "order endpoint must use http or https");
            None
        }
        Err(err) => {
            warn!(error = %err, "order endpoint is not a valid url");
            None
        }
    }
}
