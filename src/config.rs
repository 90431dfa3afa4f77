use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::engine::{JaroWinkler, KeyRanker, Levenshtein};
use crate::styles::StyleTable;

/// Similarity measure used to rank keys for a mistyped citation key.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RankerKind {
    /// Edit distance
    #[default]
    Levenshtein,
    /// Jaro-Winkler similarity, favouring shared prefixes
    JaroWinkler,
}

impl KeyRanker for RankerKind {
    fn score(&self, bad_key: &str, candidate: &str) -> f64 {
        match self {
            Self::Levenshtein => Levenshtein.score(bad_key, candidate),
            Self::JaroWinkler => JaroWinkler.score(bad_key, candidate),
        }
    }
}

/// What to show next to each key when listing completion candidates.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CandidateAnnotation {
    None,
    #[default]
    Year,
    Title,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Command used when a citation has no style or an unknown one.
    pub default_command: String,
    /// Style token overrides, merged over the built-in table.
    pub styles: BTreeMap<String, String>,
    pub ranker: RankerKind,
    pub candidate_annotation: CandidateAnnotation,
    /// Upper bound on the suggestions offered for a mistyped key.
    pub max_suggestions: usize,
    /// Bibliography files. Relative paths are resolved against the directory
    /// of the config file they were read from.
    pub bibliography: Vec<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_command: "\\citep".to_string(),
            styles: BTreeMap::new(),
            ranker: RankerKind::default(),
            candidate_annotation: CandidateAnnotation::default(),
            max_suggestions: 10,
            bibliography: Vec::new(),
        }
    }
}

impl Config {
    pub fn style_table(&self) -> StyleTable {
        StyleTable::with_overrides(self.default_command.as_str(), &self.styles)
    }

    fn resolve_paths(mut self, base: &Path) -> Self {
        for path in &mut self.bibliography {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
        self
    }
}

#[derive(Default, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn default_command(mut self, command: impl Into<String>) -> Self {
        self.config.default_command = command.into();
        self
    }

    pub fn style(mut self, token: impl Into<String>, command: impl Into<String>) -> Self {
        self.config.styles.insert(token.into(), command.into());
        self
    }

    pub fn ranker(mut self, ranker: RankerKind) -> Self {
        self.config.ranker = ranker;
        self
    }

    pub fn candidate_annotation(mut self, annotation: CandidateAnnotation) -> Self {
        self.config.candidate_annotation = annotation;
        self
    }

    pub fn max_suggestions(mut self, max: usize) -> Self {
        self.config.max_suggestions = max;
        self
    }

    pub fn bibliography(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.bibliography.push(path.into());
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

const CANDIDATE_NAMES: &[&str] = &[".citedit.toml", "citedit.toml"];

fn parse_config_str(s: &str, path: &Path) -> io::Result<Config> {
    toml::from_str::<Config>(s).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("invalid config {}: {e}", path.display()),
        )
    })
}

fn read_config(path: &Path) -> io::Result<Config> {
    log::debug!("Reading config from: {}", path.display());
    let s = fs::read_to_string(path)?;
    let config = parse_config_str(&s, path)?;
    log::info!("Loaded config from: {}", path.display());

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    Ok(config.resolve_paths(base))
}

fn find_in_tree(start_dir: &Path) -> Option<PathBuf> {
    for dir in start_dir.ancestors() {
        for name in CANDIDATE_NAMES {
            let p = dir.join(name);
            if p.is_file() {
                return Some(p);
            }
        }
    }
    None
}

fn xdg_config_path() -> Option<PathBuf> {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        let p = Path::new(&xdg).join("citedit").join("config.toml");
        if p.is_file() {
            return Some(p);
        }
    }
    if let Ok(home) = env::var("HOME") {
        let p = Path::new(&home)
            .join(".config")
            .join("citedit")
            .join("config.toml");
        if p.is_file() {
            return Some(p);
        }
    }
    None
}

/// Read a config found by discovery. A broken file is reported and skipped so
/// the next candidate (or the defaults) apply.
fn read_discovered(path: PathBuf) -> Option<(Config, Option<PathBuf>)> {
    match read_config(&path) {
        Ok(cfg) => Some((cfg, Some(path))),
        Err(err) => {
            log::warn!("Ignoring config {}: {err}", path.display());
            None
        }
    }
}

/// Load configuration with precedence:
/// 1) explicit path (error if unreadable/invalid)
/// 2) walk up from start_dir: .citedit.toml, citedit.toml
/// 3) XDG: $XDG_CONFIG_HOME/citedit/config.toml or ~/.config/citedit/config.toml
/// 4) default config
pub fn load(explicit: Option<&Path>, start_dir: &Path) -> io::Result<(Config, Option<PathBuf>)> {
    if let Some(path) = explicit {
        let cfg = read_config(path)?;
        return Ok((cfg, Some(path.to_path_buf())));
    }

    let discovered = find_in_tree(start_dir)
        .and_then(read_discovered)
        .or_else(|| xdg_config_path().and_then(read_discovered));

    Ok(discovered.unwrap_or_else(|| {
        log::debug!("No usable config file found, using defaults");
        (Config::default(), None)
    }))
}
