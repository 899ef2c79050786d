use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use pdp2i86::driver::{Fallback, SkipAt};
use pdp2i86::{Summary, TranslatorConfig};

/// JSON run report: what was translated and what needs a human.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub input: String,
    pub config: TranslatorConfig,
    pub lines: usize,
    pub translated: usize,
    pub fallbacks: Vec<Fallback>,
    pub skips: Vec<SkipAt>,
}

impl Report {
    pub fn new(input: &str, config: TranslatorConfig, summary: Summary) -> Self {
        Self {
            input: input.to_string(),
            config,
            lines: summary.lines,
            translated: summary.translated,
            fallbacks: summary.fallbacks,
            skips: summary.skips,
        }
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).with_context(|| format!("writing report {}", path.display()))
    }
}

pub fn load_config(path: &Path) -> Result<TranslatorConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let cfg = TranslatorConfig::from_json(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(cfg)
}
