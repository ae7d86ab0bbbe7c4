//! Configuration management utilities.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use dirs_next::config_dir;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static DEFAULT_CONFIG: Lazy<&'static str> =
    Lazy::new(|| include_str!("../../assets/default-config.toml"));

/// Layered configuration loaded from defaults, user config, an explicit file, and env.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub locations: Locations,
    #[serde(default)]
    pub launcher: Launcher,
    #[serde(default)]
    pub timing: Timing,
    #[serde(default)]
    pub ui: Ui,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defaults {
    #[serde(default)]
    confirm_threshold: Option<usize>,
    #[serde(default)]
    unattributed_display_cap: Option<usize>,
    #[serde(default)]
    unresolved_display_cap: Option<usize>,
    #[serde(default)]
    report_unresolved_packages: Option<bool>,
    #[serde(default)]
    attribute: Option<String>,
}

impl Defaults {
    fn default_confirm_threshold() -> usize {
        10
    }

    fn default_display_cap() -> usize {
        30
    }

    fn default_report_unresolved() -> bool {
        true
    }

    fn default_attribute() -> &'static str {
        "user.SYS:PACKAGE_FILE"
    }

    /// Selections larger than this ask for confirmation.
    pub fn confirm_threshold(&self) -> usize {
        self.confirm_threshold
            .unwrap_or_else(Self::default_confirm_threshold)
    }

    pub fn unattributed_display_cap(&self) -> usize {
        self.unattributed_display_cap
            .unwrap_or_else(Self::default_display_cap)
    }

    pub fn unresolved_display_cap(&self) -> usize {
        self.unresolved_display_cap
            .unwrap_or_else(Self::default_display_cap)
    }

    pub fn report_unresolved_packages(&self) -> bool {
        self.report_unresolved_packages
            .unwrap_or_else(Self::default_report_unresolved)
    }

    /// Extended attribute holding the origin package file name.
    pub fn attribute(&self) -> String {
        self.attribute
            .clone()
            .unwrap_or_else(|| Self::default_attribute().to_owned())
    }
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            confirm_threshold: Some(Self::default_confirm_threshold()),
            unattributed_display_cap: Some(Self::default_display_cap()),
            unresolved_display_cap: Some(Self::default_display_cap()),
            report_unresolved_packages: Some(Self::default_report_unresolved()),
            attribute: Some(Self::default_attribute().to_owned()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Locations {
    /// Directories holding installed package files, searched in order.
    #[serde(default)]
    pub package_dirs: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Launcher {
    /// Program and leading arguments used to open a package. Empty selects the platform opener.
    #[serde(default)]
    pub command: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timing {
    #[serde(default)]
    settle_base_ms: Option<u64>,
    #[serde(default)]
    settle_per_package_ms: Option<u64>,
}

impl Timing {
    fn default_settle_base_ms() -> u64 {
        300
    }

    fn default_settle_per_package_ms() -> u64 {
        100
    }

    pub fn settle_base_ms(&self) -> u64 {
        self.settle_base_ms
            .unwrap_or_else(Self::default_settle_base_ms)
    }

    pub fn settle_per_package_ms(&self) -> u64 {
        self.settle_per_package_ms
            .unwrap_or_else(Self::default_settle_per_package_ms)
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            settle_base_ms: Some(Self::default_settle_base_ms()),
            settle_per_package_ms: Some(Self::default_settle_per_package_ms()),
        }
    }
}

/// Which alert front-end to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PresenterKind {
    /// Native dialogs when not attached to a terminal, terminal prompts otherwise.
    #[default]
    Auto,
    Terminal,
    Desktop,
}

impl PresenterKind {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "terminal" | "tty" => Some(Self::Terminal),
            "desktop" | "gui" => Some(Self::Desktop),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Ui {
    #[serde(default)]
    presenter: Option<PresenterKind>,
}

impl Ui {
    pub fn presenter(&self) -> PresenterKind {
        self.presenter.unwrap_or_default()
    }
}

/// Environment overrides for the host-specific settings.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    package_dirs: Option<String>,
    open_command: Option<String>,
    presenter: Option<String>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            package_dirs: env::var("ORIGIN_PACKAGE_DIRS").ok(),
            open_command: env::var("ORIGIN_PACKAGE_OPEN_COMMAND").ok(),
            presenter: env::var("ORIGIN_PACKAGE_PRESENTER").ok(),
        }
    }

    #[cfg(test)]
    fn for_tests(package_dirs: &str, open_command: &str) -> Self {
        Self {
            package_dirs: Some(package_dirs.to_owned()),
            open_command: Some(open_command.to_owned()),
            presenter: None,
        }
    }
}

impl Config {
    /// Load configuration from defaults, the user config, an optional explicit file, and env
    /// overrides.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit
            && !path.exists()
        {
            bail!("config file not found: {}", path.display());
        }
        let env = EnvOverrides::from_env();
        Self::load_with_layers(global_config_path(), explicit.map(Path::to_path_buf), env)
    }

    fn load_with_layers(
        global: Option<PathBuf>,
        explicit: Option<PathBuf>,
        env_overrides: EnvOverrides,
    ) -> Result<Self> {
        let mut layers: Vec<Config> = Vec::new();

        layers.push(Self::from_str(&DEFAULT_CONFIG)?);

        if let Some(global_path) = global.filter(|path| path.exists()) {
            layers.push(Self::from_file(&global_path)?);
        }

        if let Some(explicit_path) = explicit.filter(|path| path.exists()) {
            layers.push(Self::from_file(&explicit_path)?);
        }

        let merged = layers.into_iter().reduce(Config::merge).unwrap_or_default();
        Ok(apply_env_overrides(merged, env_overrides))
    }

    fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&data)
            .with_context(|| format!("invalid config file: {}", path.display()))
    }

    fn from_str(contents: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(contents).with_context(|| "failed to parse TOML config".to_string())?;
        Ok(config)
    }

    fn merge(self, other: Self) -> Self {
        Self {
            defaults: merge_defaults(self.defaults, other.defaults),
            locations: merge_locations(self.locations, other.locations),
            launcher: merge_launcher(self.launcher, other.launcher),
            timing: merge_timing(self.timing, other.timing),
            ui: merge_ui(self.ui, other.ui),
        }
    }
}

fn merge_defaults(mut base: Defaults, overlay: Defaults) -> Defaults {
    if let Some(value) = overlay.confirm_threshold {
        base.confirm_threshold = Some(value);
    }
    if let Some(value) = overlay.unattributed_display_cap {
        base.unattributed_display_cap = Some(value);
    }
    if let Some(value) = overlay.unresolved_display_cap {
        base.unresolved_display_cap = Some(value);
    }
    if let Some(value) = overlay.report_unresolved_packages {
        base.report_unresolved_packages = Some(value);
    }
    if let Some(value) = overlay.attribute {
        base.attribute = Some(value);
    }
    base
}

fn merge_locations(mut base: Locations, overlay: Locations) -> Locations {
    for dir in overlay.package_dirs {
        if !base.package_dirs.contains(&dir) {
            base.package_dirs.push(dir);
        }
    }
    base
}

fn merge_launcher(base: Launcher, overlay: Launcher) -> Launcher {
    if overlay.command.is_empty() {
        base
    } else {
        overlay
    }
}

fn merge_timing(mut base: Timing, overlay: Timing) -> Timing {
    if let Some(value) = overlay.settle_base_ms {
        base.settle_base_ms = Some(value);
    }
    if let Some(value) = overlay.settle_per_package_ms {
        base.settle_per_package_ms = Some(value);
    }
    base
}

fn merge_ui(mut base: Ui, overlay: Ui) -> Ui {
    if let Some(value) = overlay.presenter {
        base.presenter = Some(value);
    }
    base
}

fn global_config_path() -> Option<PathBuf> {
    config_dir().map(|base| base.join("origin-package/config.toml"))
}

fn apply_env_overrides(mut config: Config, env: EnvOverrides) -> Config {
    if let Some(dirs) = env.package_dirs.filter(|value| !value.trim().is_empty()) {
        config.locations.package_dirs = env::split_paths(&dirs)
            .filter(|path| !path.as_os_str().is_empty())
            .collect();
    }
    if let Some(command) = env.open_command {
        let parts: Vec<String> = command.split_whitespace().map(str::to_owned).collect();
        if !parts.is_empty() {
            config.launcher.command = parts;
        }
    }
    if let Some(presenter) = env.presenter {
        match PresenterKind::parse(&presenter) {
            Some(kind) => config.ui.presenter = Some(kind),
            None => tracing::warn!(value = %presenter, "ignoring unknown presenter"),
        }
    }
    config
}
