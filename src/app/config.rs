use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};
use serde::Deserialize;
use thiserror::Error;

use crate::app::cli::Cli;
use crate::app::models::Config;

#[derive(Deserialize, Debug)]
struct PresetsFile {
    #[serde(flatten)]
    presets: HashMap<String, Preset>,
}

/// Defaults a preset may supply; every CLI flag wins over its preset value.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case")]
struct Preset {
    out: Option<PathBuf>,
    postfix_time: Option<String>,
    postfix_name: Option<String>,
    ignore: Option<String>,
    only: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("input file {0} does not exist or is not a file")]
    InputNotFound(PathBuf),
    #[error("no output directory given; pass --out or use --list")]
    OutputDirRequired,
    #[error("output directory {0} does not exist and --force was not used")]
    OutputDirMissing(PathBuf),
    #[error("could not create output directory {path}")]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid --postfix-time pattern {0:?}")]
    BadTimePattern(String),
    #[error("could not read presets file {path}")]
    ReadPresets {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse presets file {path}")]
    ParsePresets {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    /// Mistakes the usage text can help with, as opposed to resource
    /// failures while acting on an otherwise valid invocation.
    pub fn shows_usage(&self) -> bool {
        matches!(
            self,
            Self::InputNotFound(_)
                | Self::OutputDirRequired
                | Self::OutputDirMissing(_)
                | Self::BadTimePattern(_)
        )
    }
}

/// Where presets live for the current user: `~/.config/dumpsplit/presets.toml`.
pub fn default_presets_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| {
        home.join(".config")
            .join("dumpsplit")
            .join("presets.toml")
    })
}

fn load_presets_file(path: &Path) -> Result<HashMap<String, Preset>, ConfigError> {
    if !path.exists() {
        return Ok(HashMap::new());
    }

    let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadPresets {
        path: path.to_path_buf(),
        source,
    })?;

    let parsed: PresetsFile =
        toml::from_str(&content).map_err(|source| ConfigError::ParsePresets {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(parsed.presets)
}

/// Render a strftime pattern against `now`. A pattern chrono cannot
/// parse is rejected here rather than producing garbage in a filename.
fn render_time(pattern: &str, now: DateTime<Local>) -> Result<String, ConfigError> {
    let pattern = pattern.trim();
    let items: Vec<Item> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(ConfigError::BadTimePattern(pattern.to_string()));
    }
    Ok(now.format_with_items(items.into_iter()).to_string())
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Split a comma-separated table list. No per-name trimming: names are
/// matched exactly as the marker-line extraction produces them.
fn split_names(value: Option<String>) -> HashSet<String> {
    match value {
        Some(list) => list.split(',').map(str::to_string).collect(),
        None => HashSet::new(),
    }
}

/// Resolve the final configuration. `now` and `presets_path` are passed
/// in rather than read here so tests can pin the instant and point the
/// presets lookup away from the real home directory.
pub fn resolve_config(
    cli: Cli,
    now: DateTime<Local>,
    presets_path: Option<&Path>,
) -> Result<Config, ConfigError> {
    if !cli.input.is_file() {
        return Err(ConfigError::InputNotFound(cli.input));
    }

    // Determine preset to use: CLI flag > dump file stem > none
    let presets = match presets_path {
        Some(path) => load_presets_file(path)?,
        None => HashMap::new(),
    };
    let preset_key = cli
        .preset
        .clone()
        .or_else(|| cli.input.file_stem().map(|s| s.to_string_lossy().into_owned()));
    let preset = preset_key
        .and_then(|k| presets.get(&k).cloned())
        .unwrap_or_default();

    let output_dir = cli.output.or(preset.out);
    if !cli.list {
        match &output_dir {
            None => return Err(ConfigError::OutputDirRequired),
            Some(dir) if !dir.is_dir() => {
                if !cli.force {
                    return Err(ConfigError::OutputDirMissing(dir.clone()));
                }
                fs::create_dir_all(dir).map_err(|source| ConfigError::CreateOutputDir {
                    path: dir.clone(),
                    source,
                })?;
                log::info!("created output directory {}", dir.display());
            }
            Some(_) => {}
        }
    }

    let postfix_name = trimmed(cli.postfix_name.or(preset.postfix_name));
    let postfix_time = match cli.postfix_time.or(preset.postfix_time) {
        Some(pattern) => trimmed(Some(render_time(&pattern, now)?)),
        None => None,
    };

    // A non-empty --only forces --ignore empty, so the two filters can
    // never both apply.
    let only = split_names(cli.only.or(preset.only));
    let ignore = if only.is_empty() {
        split_names(cli.ignore.or(preset.ignore))
    } else {
        HashSet::new()
    };

    Ok(Config {
        dump_path: cli.input,
        output_dir,
        list_only: cli.list,
        force: cli.force,
        postfix_name,
        postfix_time,
        only,
        ignore,
    })
}
