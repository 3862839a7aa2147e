use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};

use crate::catalog::{Language, LanguageCatalog, BASE_LANGUAGE};
use crate::config::{
    find_default_config, load_config, AppConfig, CONFIG_ENV_VAR, CONFIG_FILENAME,
};
use crate::provider::ProviderSettings;

pub const DEFAULT_INPUT: &str = "input.txt";
pub const DEFAULT_OUTPUT: &str = "output.txt";

/// Values given on the command line. Each one wins over the config file.
#[derive(Clone, Debug, Default)]
pub struct ChainOverrides {
    pub config_path: Option<PathBuf>,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub base_language: Option<String>,
    pub num_languages: Option<usize>,
    pub num_cycles: Option<usize>,
}

#[derive(Clone, Debug)]
pub struct ChainConfig {
    pub config_path: Option<PathBuf>,
    pub input: PathBuf,
    pub output: PathBuf,
    pub base_language: String,
    pub num_languages: Option<usize>,
    pub num_cycles: usize,
    pub catalog: LanguageCatalog,
    pub provider: ProviderSettings,
    pub trace_dir: Option<PathBuf>,
}

impl ChainConfig {
    pub fn from_args(overrides: ChainOverrides) -> anyhow::Result<Self> {
        let env_path = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
        let workdir = input_workdir(overrides.input.as_deref());
        let cfg_path = locate_config(overrides.config_path.as_deref(), env_path, &workdir)?;
        let file_cfg = match cfg_path.as_ref() {
            Some(p) => load_config(p)?,
            None => AppConfig::default(),
        };
        Self::resolve(overrides, file_cfg, cfg_path)
    }

    /// Layers CLI values over the config file over built-in defaults.
    pub fn resolve(
        overrides: ChainOverrides,
        file_cfg: AppConfig,
        config_path: Option<PathBuf>,
    ) -> anyhow::Result<Self> {
        let config_dir = config_path
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf);
        let from_config_dir = |p: PathBuf| match config_dir.as_ref() {
            Some(dir) if p.is_relative() => dir.join(p),
            _ => p,
        };

        let input = overrides
            .input
            .or_else(|| file_cfg.chain.input.clone().map(&from_config_dir))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT));
        let output = overrides
            .output
            .or_else(|| file_cfg.chain.output.clone().map(&from_config_dir))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

        let base_language = overrides
            .base_language
            .or_else(|| file_cfg.chain.base_language.clone())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| BASE_LANGUAGE.to_string());

        let catalog = if file_cfg.catalog.languages.is_empty() {
            LanguageCatalog::builtin()
        } else {
            let entries: Vec<Language> = file_cfg.catalog.languages.clone();
            LanguageCatalog::from_entries(entries, &base_language).context("catalog.languages")?
        };
        if !catalog.contains(&base_language) {
            return Err(anyhow!(
                "base language {base_language} is not in the language catalog"
            ));
        }

        let num_languages = overrides
            .num_languages
            .or(file_cfg.chain.num_languages)
            .filter(|n| *n > 0);
        let num_cycles = overrides
            .num_cycles
            .or(file_cfg.chain.num_cycles)
            .unwrap_or(1)
            .max(1);

        let output_dir = output
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let trace_dir = file_cfg.chain.trace_dir.clone().map(|p| {
            if p.is_absolute() {
                p
            } else {
                output_dir.join(p)
            }
        });

        Ok(Self {
            config_path,
            input,
            output,
            base_language,
            num_languages,
            num_cycles,
            catalog,
            provider: file_cfg.provider,
            trace_dir,
        })
    }

    pub fn selected_languages(&self) -> Vec<Language> {
        self.catalog.select(self.num_languages)
    }
}

/// Directory of the input file; the config search starts there after the working directory.
fn input_workdir(input: Option<&Path>) -> PathBuf {
    let input = input.unwrap_or_else(|| Path::new(DEFAULT_INPUT));
    let workdir = input
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    workdir.canonicalize().unwrap_or(workdir)
}

/// `--config` first, then the env var, then an upward search. A named file that is missing is an error.
fn locate_config(
    explicit: Option<&Path>,
    env_path: Option<PathBuf>,
    workdir: &Path,
) -> anyhow::Result<Option<PathBuf>> {
    if let Some(p) = explicit {
        if !p.exists() {
            return Err(anyhow!("config not found: {}", p.display()));
        }
        return Ok(Some(p.to_path_buf()));
    }
    if let Some(p) = env_path.filter(|p| !p.as_os_str().is_empty()) {
        if !p.exists() {
            return Err(anyhow!(
                "config not found: {} (from {CONFIG_ENV_VAR})",
                p.display()
            ));
        }
        return Ok(Some(p));
    }
    Ok(find_default_config(workdir, CONFIG_FILENAME))
}
