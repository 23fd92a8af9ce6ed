use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILENAME: &str = "bugsmith.toml";

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct LogConfig {
    pub level: Option<String>,
    pub color: Option<bool>, // None = auto-detect (semantic)
}

impl LogConfig {
    pub fn level(&self) -> &str {
        self.level.as_deref().unwrap_or("info")
    }

    pub fn color(&self) -> Option<bool> {
        self.color // None has semantic meaning (auto-detect)
    }

    pub fn to_effective(&self) -> Self {
        Self {
            level: Some(self.level().to_string()),
            color: self.color,
        }
    }
}

/// Relative sampling weights per severity tier. Not required to sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct SeverityWeights {
    pub minor: f64,
    pub moderate: f64,
    pub severe: f64,
}

impl Default for SeverityWeights {
    fn default() -> Self {
        Self {
            minor: 0.5,
            moderate: 0.3,
            severe: 0.2,
        }
    }
}

/// Eligibility and selection rules consumed by the file selector.
#[derive(Debug, Clone)]
pub struct SelectionRules {
    /// Glob patterns matched against file names.
    pub excluded_files: Vec<String>,
    /// Directory components pruned during traversal.
    pub excluded_directories: Vec<String>,
    /// Accepted file name suffixes.
    pub file_extensions: Vec<String>,
    /// Independent per-file inclusion probability.
    pub selection_probability: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    pub excluded_files: Option<Vec<String>>,
    pub excluded_directories: Option<Vec<String>>,
    pub file_extensions: Option<Vec<String>>,
    pub max_defects_per_file: Option<u32>,
    pub file_selection_probability: Option<f64>,
    pub branch_prefix: Option<String>,

    // Nested sections
    pub severity_weights: Option<SeverityWeights>,
    pub log: Option<LogConfig>,
}

impl Config {
    pub fn excluded_files(&self) -> Vec<String> {
        self.excluded_files.clone().unwrap_or_else(|| {
            [".gitignore", "README.md", "LICENSE", "*.lock"]
                .iter()
                .map(|s| s.to_string())
                .collect()
        })
    }

    pub fn excluded_directories(&self) -> Vec<String> {
        self.excluded_directories.clone().unwrap_or_else(|| {
            ["node_modules", "venv", ".git", ".github", "target", "__pycache__"]
                .iter()
                .map(|s| s.to_string())
                .collect()
        })
    }

    pub fn file_extensions(&self) -> Vec<String> {
        self.file_extensions.clone().unwrap_or_else(|| {
            [".py", ".js", ".ts", ".java", ".cpp", ".c", ".h"]
                .iter()
                .map(|s| s.to_string())
                .collect()
        })
    }

    pub fn max_defects_per_file(&self) -> u32 {
        self.max_defects_per_file.unwrap_or(2)
    }

    pub fn file_selection_probability(&self) -> f64 {
        self.file_selection_probability.unwrap_or(0.3)
    }

    pub fn branch_prefix(&self) -> &str {
        self.branch_prefix.as_deref().unwrap_or("review/defects-")
    }

    pub fn severity_weights(&self) -> SeverityWeights {
        self.severity_weights.unwrap_or_default()
    }

    pub fn log(&self) -> LogConfig {
        self.log.clone().unwrap_or_default()
    }

    pub fn selection_rules(&self) -> SelectionRules {
        SelectionRules {
            excluded_files: self.excluded_files(),
            excluded_directories: self.excluded_directories(),
            file_extensions: self.file_extensions(),
            selection_probability: self.file_selection_probability(),
        }
    }

    pub fn to_effective(&self) -> Self {
        Self {
            excluded_files: Some(self.excluded_files()),
            excluded_directories: Some(self.excluded_directories()),
            file_extensions: Some(self.file_extensions()),
            max_defects_per_file: Some(self.max_defects_per_file()),
            file_selection_probability: Some(self.file_selection_probability()),
            branch_prefix: Some(self.branch_prefix().to_string()),
            severity_weights: Some(self.severity_weights()),
            log: Some(self.log().to_effective()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub log_level: Option<String>,
    pub log_color: Option<String>, // "on" | "off"
}

static CONFIG: OnceCell<Config> = OnceCell::new();

pub fn config() -> &'static Config {
    CONFIG.get_or_init(|| {
        let mut cfg = Config::default();
        // Apply nearest config file found by walking up from cwd
        if let Some(path) = find_nearest_config_file()
            && let Some(file_cfg) = read_config_file(&path)
        {
            apply_file_config(&mut cfg, &file_cfg);
        }
        cfg
    })
}

pub fn init_with_overrides(overrides: &CliOverrides) {
    let mut cfg = Config::default();

    // 1) Config file: walk up from cwd and use the first config file found
    if let Some(path) = find_nearest_config_file()
        && let Some(file_cfg) = read_config_file(&path)
    {
        apply_file_config(&mut cfg, &file_cfg);
    }

    // 2) CLI arguments (highest priority). Only override if user specified.
    apply_cli_overrides(&mut cfg, overrides);

    let _ = CONFIG.set(cfg);
}

fn read_config_file(path: &Path) -> Option<Config> {
    match fs::read_to_string(path) {
        Ok(contents) => toml::from_str::<Config>(&contents).ok(),
        Err(_) => None,
    }
}

fn apply_file_config(cfg: &mut Config, file: &Config) {
    // Per-key override semantics: a key present in the file replaces the
    // built-in default wholesale.
    if file.excluded_files.is_some() {
        cfg.excluded_files = file.excluded_files.clone();
    }
    if file.excluded_directories.is_some() {
        cfg.excluded_directories = file.excluded_directories.clone();
    }
    if file.file_extensions.is_some() {
        cfg.file_extensions = file.file_extensions.clone();
    }
    if file.max_defects_per_file.is_some() {
        cfg.max_defects_per_file = file.max_defects_per_file;
    }
    if file.file_selection_probability.is_some() {
        cfg.file_selection_probability = file.file_selection_probability;
    }
    if file.branch_prefix.is_some() {
        cfg.branch_prefix = file.branch_prefix.clone();
    }
    if file.severity_weights.is_some() {
        cfg.severity_weights = file.severity_weights;
    }

    // Merge log section
    if let Some(file_log) = &file.log {
        let mut log = cfg.log.clone().unwrap_or_default();
        if file_log.level.is_some() {
            log.level = file_log.level.clone();
        }
        if file_log.color.is_some() {
            log.color = file_log.color;
        }
        cfg.log = Some(log);
    }
}

fn apply_cli_overrides(cfg: &mut Config, overrides: &CliOverrides) {
    let mut log = cfg.log.clone().unwrap_or_default();
    if let Some(level) = &overrides.log_level
        && !level.trim().is_empty()
    {
        log.level = Some(level.trim().to_string());
    }
    if let Some(color_str) = &overrides.log_color {
        match color_str.to_lowercase().as_str() {
            "on" => log.color = Some(true),
            "off" => log.color = Some(false),
            _ => {}
        }
    }
    if overrides.log_level.is_some() || overrides.log_color.is_some() {
        cfg.log = Some(log);
    }
}

fn find_nearest_config_file() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    for dir in cwd.ancestors() {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.exists() {
            return Some(candidate);
        }
    }
    None
}

pub fn colors_enabled() -> bool {
    match config().log().color() {
        Some(force) => force,
        None => console::colors_enabled(),
    }
}
