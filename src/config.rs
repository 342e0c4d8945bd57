use std::{
    env,
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::domain::InputMode;

pub const CONFIG_ENV: &str = "YAMLFM_CONFIG";

const CANDIDATES: [&str; 8] = [
    "yamlfm.toml",
    "yamlfm.yaml",
    "yamlfm.yml",
    "yamlfm.json",
    ".yamlfmrc.toml",
    ".yamlfmrc.yaml",
    ".yamlfmrc.yml",
    ".yamlfmrc.json",
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub input_mode: InputMode,
    pub verify: bool,
    /// When set, escaped values are printed as `key: value` lines.
    pub key: Option<String>,
}

#[derive(Deserialize, Debug)]
struct FileConfig {
    input_mode: Option<InputMode>,
    verify: Option<bool>,
    key: Option<String>,
}

pub fn load_config(cli_path: Option<&PathBuf>) -> Result<Config> {
    let env_path = env::var(CONFIG_ENV).ok().map(PathBuf::from);
    load_config_in(cli_path, env_path, Path::new("."))
}

/// Resolves the config path (CLI, then env, then well-known files in `dir`)
/// and layers it over the defaults.
pub fn load_config_in(
    cli_path: Option<&PathBuf>,
    env_path: Option<PathBuf>,
    dir: &Path,
) -> Result<Config> {
    let mut cfg = Config::default();

    let path = if let Some(p) = cli_path {
        Some(p.clone())
    } else if let Some(p) = env_path {
        Some(p)
    } else {
        CANDIDATES.iter().map(|c| dir.join(c)).find(|p| p.exists())
    };

    let Some(p) = path else {
        debug!("no config file found, using defaults");
        return Ok(cfg);
    };
    debug!(path = %p.display(), "loading config");

    let ext = p.extension().and_then(OsStr::to_str).unwrap_or("");
    let contents =
        fs::read_to_string(&p).with_context(|| format!("Reading config at {}", p.display()))?;
    let fc: FileConfig = match ext.to_ascii_lowercase().as_str() {
        "json" => serde_json::from_str(&contents)
            .with_context(|| format!("Parsing JSON config at {}", p.display()))?,
        "yaml" | "yml" => serde_yaml::from_str(&contents)
            .with_context(|| format!("Parsing YAML config at {}", p.display()))?,
        "toml" => toml::from_str(&contents)
            .with_context(|| format!("Parsing TOML config at {}", p.display()))?,
        other => return Err(anyhow!("Unsupported config extension: {}", other)),
    };

    if let Some(m) = fc.input_mode {
        cfg.input_mode = m;
    }
    if let Some(v) = fc.verify {
        cfg.verify = v;
    }
    if let Some(k) = fc.key {
        cfg.key = Some(k);
    }

    Ok(cfg)
}
