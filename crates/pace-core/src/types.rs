use crate::error::PaceError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// Level
// ---------------------------------------------------------------------------

/// Task ownership level. The numeral is the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Level {
    Standardized = 1,
    Integration = 2,
    Architecture = 3,
    Innovation = 4,
}

impl Level {
    /// Declaration order. Tie-breaks iterate this slice literally.
    pub fn all() -> &'static [Level] {
        &[
            Level::Standardized,
            Level::Integration,
            Level::Architecture,
            Level::Innovation,
        ]
    }

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn index(self) -> usize {
        self as usize - 1
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Standardized => "standardized implementation",
            Level::Integration => "integration and coordination",
            Level::Architecture => "architecture design",
            Level::Innovation => "innovation and exploration",
        }
    }

    /// "Level 2 integration and coordination"
    pub fn display_name(self) -> String {
        format!("Level {} {}", self.number(), self.as_str())
    }

    pub fn ownership(self) -> &'static str {
        match self {
            Level::Standardized => "AI-led",
            Level::Integration => "human-AI collaboration",
            Level::Architecture | Level::Innovation => "human-led",
        }
    }

    /// One-line summary used in rendered task cards.
    pub fn summary(self) -> &'static str {
        match self {
            Level::Standardized => "AI-led standardized implementation task",
            Level::Integration => "human-AI collaborative integration task",
            Level::Architecture => "human-led architecture design task",
            Level::Innovation => "human-led innovation and exploration task",
        }
    }

    /// Final line of a classification's reasoning trail.
    pub fn recommendation(self) -> &'static str {
        match self {
            Level::Standardized => {
                "recommend Level 1: suited to AI-led standardized implementation"
            }
            Level::Integration => {
                "recommend Level 2: needs human-AI collaboration to integrate and coordinate"
            }
            Level::Architecture => "recommend Level 3: needs human-led architecture design",
            Level::Innovation => "recommend Level 4: needs human-led innovation and exploration",
        }
    }

    pub fn examples(self) -> &'static str {
        match self {
            Level::Standardized => "component development, CRUD operations, form handling, page layout",
            Level::Integration => "service integration, data sync, workflow integration, state management",
            Level::Architecture => "system architecture, technology selection, performance tuning, refactoring plans",
            Level::Innovation => "new technology research, proofs of concept, user research, product innovation",
        }
    }

    pub fn workflow(self) -> &'static str {
        match self {
            Level::Standardized => "AI writes the code; humans confirm requirements and review quality",
            Level::Integration => "humans design the integration; AI helps implement; both debug",
            Level::Architecture => "humans analyse and design; AI helps validate and fill in details",
            Level::Innovation => "humans drive the ideas; AI helps gather information and prototype",
        }
    }

    /// Template file name, e.g. `level-3-architecture.md`.
    pub fn template_file(self) -> &'static str {
        match self {
            Level::Standardized => "level-1-standardized.md",
            Level::Integration => "level-2-integration.md",
            Level::Architecture => "level-3-architecture.md",
            Level::Innovation => "level-4-innovation.md",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Level {}", self.number())
    }
}

impl TryFrom<u8> for Level {
    type Error = PaceError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(Level::Standardized),
            2 => Ok(Level::Integration),
            3 => Ok(Level::Architecture),
            4 => Ok(Level::Innovation),
            _ => Err(PaceError::InvalidLevel(n.to_string())),
        }
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> u8 {
        level.number()
    }
}

impl std::str::FromStr for Level {
    type Err = PaceError;

    /// Accepts `2`, `L2` and `level2` (any case).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let digits = lower
            .strip_prefix("level")
            .or_else(|| lower.strip_prefix('l'))
            .unwrap_or(lower.as_str())
            .trim();
        digits
            .parse::<u8>()
            .map_err(|_| PaceError::InvalidLevel(s.to_string()))
            .and_then(Level::try_from)
            .map_err(|_| PaceError::InvalidLevel(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    P0,
    #[default]
    P1,
    P2,
    P3,
}

impl Priority {
    pub fn all() -> &'static [Priority] {
        &[Priority::P0, Priority::P1, Priority::P2, Priority::P3]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::P0 => "P0",
            Priority::P1 => "P1",
            Priority::P2 => "P2",
            Priority::P3 => "P3",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::P0 => "P0 - highest (blocking)",
            Priority::P1 => "P1 - high (important feature)",
            Priority::P2 => "P2 - medium (regular feature)",
            Priority::P3 => "P3 - low (enhancement)",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Priority {
    type Err = PaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "P0" => Ok(Priority::P0),
            "P1" => Ok(Priority::P1),
            "P2" => Ok(Priority::P2),
            "P3" => Ok(Priority::P3),
            _ => Err(PaceError::InvalidPriority(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Card sub-records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalRequirement {
    pub category: String,
    pub description: String,
    #[serde(default)]
    pub required: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileAction {
    View,
    #[default]
    Modify,
    Create,
}

impl FileAction {
    pub fn as_str(self) -> &'static str {
        match self {
            FileAction::View => "view",
            FileAction::Modify => "modify",
            FileAction::Create => "create",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            FileAction::View => "👀",
            FileAction::Modify => "✏️",
            FileAction::Create => "📝",
        }
    }
}

impl std::str::FromStr for FileAction {
    type Err = PaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "view" => Ok(FileAction::View),
            "modify" => Ok(FileAction::Modify),
            "create" => Ok(FileAction::Create),
            _ => Err(PaceError::InvalidFileAction(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedFile {
    pub path: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub action: FileAction,
}

impl RelatedFile {
    /// Parse `path:description:action`. Missing description is empty,
    /// missing action is `modify`.
    pub fn parse_line(line: &str) -> Result<Self, PaceError> {
        let parts: Vec<&str> = line.split(':').map(str::trim).collect();
        let action = match parts.get(2) {
            Some(a) if !a.is_empty() => a.parse()?,
            _ => FileAction::default(),
        };
        Ok(Self {
            path: parts.first().copied().unwrap_or_default().to_string(),
            description: parts.get(1).copied().unwrap_or_default().to_string(),
            action,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskRating {
    High,
    #[default]
    Medium,
    Low,
}

impl RiskRating {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskRating::High => "high",
            RiskRating::Medium => "medium",
            RiskRating::Low => "low",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            RiskRating::High => "🔴",
            RiskRating::Medium => "🟡",
            RiskRating::Low => "🟢",
        }
    }
}

impl std::str::FromStr for RiskRating {
    type Err = PaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(RiskRating::High),
            "medium" => Ok(RiskRating::Medium),
            "low" => Ok(RiskRating::Low),
            _ => Err(PaceError::InvalidRiskRating(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskItem {
    pub description: String,
    #[serde(default)]
    pub impact: RiskRating,
    #[serde(default)]
    pub probability: RiskRating,
    #[serde(default)]
    pub mitigation: String,
}

impl RiskItem {
    /// Parse `description:impact:probability:mitigation`. Missing ratings
    /// default to `medium`.
    pub fn parse_line(line: &str) -> Result<Self, PaceError> {
        let parts: Vec<&str> = line.split(':').map(str::trim).collect();
        let rating = |i: usize| -> Result<RiskRating, PaceError> {
            match parts.get(i) {
                Some(r) if !r.is_empty() => r.parse(),
                _ => Ok(RiskRating::default()),
            }
        };
        Ok(Self {
            description: parts.first().copied().unwrap_or_default().to_string(),
            impact: rating(1)?,
            probability: rating(2)?,
            mitigation: parts.get(3).copied().unwrap_or_default().to_string(),
        })
    }
}

/// Split free text into trimmed, non-empty lines.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// TaskDraft
// ---------------------------------------------------------------------------

/// A partially filled task card: one batch record, or the answers collected
/// by the interactive front end.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskDraft {
    pub task_id: Option<String>,
    pub task_title: Option<String>,
    pub task_type: Option<Level>,
    pub priority: Option<Priority>,
    pub estimation: Option<f64>,
    pub assignee: Option<String>,
    pub due_date: Option<String>,

    pub business_goal: Option<String>,
    pub user_value: Option<String>,
    pub business_rules: Option<Vec<String>>,
    pub acceptance_criteria: Option<Vec<String>>,

    pub functional_description: Option<String>,
    pub technical_requirements: Option<Vec<TechnicalRequirement>>,
    pub interface_definition: Option<String>,
    pub data_model: Option<String>,
    pub constraints: Option<Vec<String>>,

    pub implementation_approach: Option<String>,
    pub code_examples: Option<Vec<String>>,
    pub best_practices: Option<Vec<String>>,
    pub considerations: Option<Vec<String>>,

    pub related_files: Option<Vec<RelatedFile>>,

    pub test_strategy: Option<String>,
    pub validation_checklist: Option<Vec<String>>,
    pub risk_assessment: Option<Vec<RiskItem>>,
    pub rollback_plan: Option<String>,

    pub custom_fields: Option<BTreeMap<String, serde_json::Value>>,
}

impl TaskDraft {
    /// Title for log lines, falling back to the id.
    pub fn label(&self) -> String {
        self.task_title
            .clone()
            .or_else(|| self.task_id.clone())
            .unwrap_or_else(|| "<untitled>".to_string())
    }
}

// ---------------------------------------------------------------------------
// TaskCard
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCard {
    pub task_id: String,
    pub task_title: String,
    pub task_type: Level,
    pub priority: Priority,
    pub estimation: f64,
    pub assignee: String,
    pub created_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,

    pub business_goal: String,
    pub user_value: String,
    pub business_rules: Vec<String>,
    pub acceptance_criteria: Vec<String>,

    pub functional_description: String,
    pub technical_requirements: Vec<TechnicalRequirement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface_definition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_model: Option<String>,
    pub constraints: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implementation_approach: Option<String>,
    pub code_examples: Vec<String>,
    pub best_practices: Vec<String>,
    pub considerations: Vec<String>,

    pub related_files: Vec<RelatedFile>,

    pub test_strategy: String,
    pub validation_checklist: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_assessment: Option<Vec<RiskItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rollback_plan: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<BTreeMap<String, serde_json::Value>>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
