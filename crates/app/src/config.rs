use std::path::Path;

use anyhow::Context;
use quiz_core::{GameSettings, GameSettingsDraft};

/// Parse a TOML settings file; absent keys keep their defaults.
pub fn parse_draft(raw: &str) -> Result<GameSettingsDraft, toml::de::Error> {
    toml::from_str(raw)
}

/// Build validated settings from an optional config file and CLI overrides.
pub fn load(path: Option<&Path>, round_seconds: Option<u16>) -> anyhow::Result<GameSettings> {
    let mut draft = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            parse_draft(&raw).with_context(|| format!("parsing config {}", path.display()))?
        }
        None => GameSettingsDraft::new(),
    };

    if let Some(seconds) = round_seconds {
        draft.round_seconds = Some(seconds);
    }

    let settings = draft.validate().context("invalid game settings")?;
    tracing::debug!(?settings, "settings loaded");
    Ok(settings)
}
