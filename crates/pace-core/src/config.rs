use crate::error::{PaceError, Result};
use crate::paths;
use crate::types::Priority;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// EstimationUnit
// ---------------------------------------------------------------------------

/// Working hours in one estimation day.
pub const HOURS_PER_DAY: f64 = 8.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimationUnit {
    #[default]
    Hours,
    Days,
}

impl EstimationUnit {
    /// Convert an amount in this unit to hours.
    pub fn to_hours(self, amount: f64) -> f64 {
        match self {
            EstimationUnit::Hours => amount,
            EstimationUnit::Days => amount * HOURS_PER_DAY,
        }
    }

    /// Convert an amount in hours to this unit.
    pub fn from_hours(self, hours: f64) -> f64 {
        match self {
            EstimationUnit::Hours => hours,
            EstimationUnit::Days => hours / HOURS_PER_DAY,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EstimationUnit::Hours => "hours",
            EstimationUnit::Days => "days",
        }
    }
}

impl fmt::Display for EstimationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EstimationUnit {
    type Err = PaceError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hours" => Ok(EstimationUnit::Hours),
            "days" => Ok(EstimationUnit::Days),
            _ => Err(PaceError::InvalidEstimationUnit(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// DefaultSettings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultSettings {
    #[serde(default)]
    pub priority: Priority,
    #[serde(default = "default_estimation")]
    pub estimation: f64,
    #[serde(default)]
    pub estimation_unit: EstimationUnit,
}

fn default_estimation() -> f64 {
    8.0
}

impl Default for DefaultSettings {
    fn default() -> Self {
        Self {
            priority: Priority::default(),
            estimation: default_estimation(),
            estimation_unit: EstimationUnit::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// ProjectConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default = "default_project_name")]
    pub name: String,
    /// Leading part of generated task ids.
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

fn default_project_name() -> String {
    "PACE Project".to_string()
}

fn default_prefix() -> String {
    "PACE".to_string()
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: default_project_name(),
            prefix: default_prefix(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Directory with template overrides; embedded defaults fill the gaps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_dir: Option<PathBuf>,
    #[serde(default)]
    pub team_members: Vec<String>,
    #[serde(default)]
    pub defaults: DefaultSettings,
}

fn default_version() -> u32 {
    1
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(paths::DEFAULT_OUTPUT_DIR)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            project: ProjectConfig::default(),
            output_dir: default_output_dir(),
            template_dir: None,
            team_members: Vec::new(),
            defaults: DefaultSettings::default(),
        }
    }
}

impl Config {
    pub fn new(project_name: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            project: ProjectConfig {
                name: project_name.into(),
                prefix: prefix.into(),
            },
            ..Self::default()
        }
    }

    /// Load `pace.config.yaml` from `root`, falling back to defaults when the
    /// file does not exist.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    pub fn output_path(&self, root: &Path) -> PathBuf {
        paths::resolve(root, &self.output_dir)
    }

    pub fn template_path(&self, root: &Path) -> Option<PathBuf> {
        self.template_dir
            .as_deref()
            .map(|dir| paths::resolve(root, dir))
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        // 1. Prefix must produce ids that pass task id validation
        let prefix = self.project.prefix.trim();
        if prefix.is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "project.prefix is empty".to_string(),
            });
        } else if !prefix.chars().all(|c| c.is_ascii_uppercase()) {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "project.prefix '{prefix}' is not all upper-case letters; \
                     generated task ids will not pass id validation"
                ),
            });
        }

        // 2. Output directory
        if self.output_dir.as_os_str().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "output_dir is empty".to_string(),
            });
        }

        // 3. Team
        if self.team_members.is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "team_members is empty; assignees must be typed in".to_string(),
            });
        }

        // 4. Estimation default
        if self.defaults.estimation <= 0.0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!(
                    "defaults.estimation must be positive, got {}",
                    self.defaults.estimation
                ),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
