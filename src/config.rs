use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::catalog::Language;
use crate::provider::ProviderSettings;

pub const CONFIG_FILENAME: &str = "chain-translator.toml";
pub const CONFIG_ENV_VAR: &str = "CHAIN_TRANSLATOR_CONFIG";

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub chain: ChainSection,
    #[serde(default)]
    pub provider: ProviderSettings,
    #[serde(default)]
    pub catalog: CatalogSection,
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct ChainSection {
    #[serde(default)]
    pub input: Option<PathBuf>,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub base_language: Option<String>,
    /// Use only the first N catalog languages. Unset or 0 means all of them.
    #[serde(default)]
    pub num_languages: Option<usize>,
    #[serde(default)]
    pub num_cycles: Option<usize>,

    /// When set, the text after every successful hop is dumped here.
    #[serde(default)]
    pub trace_dir: Option<PathBuf>,
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct CatalogSection {
    /// Replaces the built-in language table when non-empty.
    #[serde(default)]
    pub languages: Vec<Language>,
}

pub fn find_file_upwards(start_dir: &Path, filename: &str, max_levels: usize) -> Option<PathBuf> {
    let mut dir = start_dir;
    for _ in 0..=max_levels {
        let candidate = dir.join(filename);
        if candidate.exists() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
    None
}

pub fn find_default_config(workdir: &Path, filename: &str) -> Option<PathBuf> {
    if let Ok(cwd) = std::env::current_dir() {
        if let Some(p) = find_file_upwards(&cwd, filename, 8) {
            return Some(p);
        }
    }
    if let Some(p) = find_file_upwards(workdir, filename, 8) {
        return Some(p);
    }
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            if let Some(p) = find_file_upwards(dir, filename, 10) {
                return Some(p);
            }
        }
    }
    None
}

pub fn load_config(path: &Path) -> anyhow::Result<AppConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config: {}", path.display()))?;
    parse_config(&text).with_context(|| format!("config: {}", path.display()))
}

pub fn parse_config(text: &str) -> anyhow::Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(text).context("parse config toml")?;
    Ok(cfg)
}

/// Writes a commented default config into `dir`. An existing file is kept unless `force`.
pub fn init_default_config(dir: &Path, force: bool) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create config dir: {}", dir.display()))?;
    let cfg_path = dir.join(CONFIG_FILENAME);
    if cfg_path.exists() && !force {
        return Ok(cfg_path);
    }
    std::fs::write(&cfg_path, DEFAULT_CONFIG_TOML)
        .with_context(|| format!("write config: {}", cfg_path.display()))?;
    Ok(cfg_path)
}

const DEFAULT_CONFIG_TOML: &str = r#"[chain]
input = "input.txt"
output = "output.txt"
base_language = "en"

# Use only the first N languages of the catalog (0 or unset = all).
# num_languages = 5

# Full passes over the catalog before translating back to the base language.
num_cycles = 1

# Dump the text after every successful hop (hop_001.es.txt, ...).
# trace_dir = "_trace"

[provider]
endpoint = "https://translate.googleapis.com/translate_a/single"
timeout_secs = 10
# Longer texts are split at sentence boundaries and sent in pieces.
max_chars = 5000
# Pause between requests; raise this if the provider starts rejecting requests.
min_interval_ms = 0

# Replace the built-in catalog. Order matters; the base language must be listed.
# [[catalog.languages]]
# code = "en"
# name = "English"
#
# [[catalog.languages]]
# code = "ja"
# name = "Japanese"
"#;
