use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaceError {
    #[error("invalid level '{0}': must be 1, 2, 3 or 4")]
    InvalidLevel(String),

    #[error("invalid priority '{0}': must be one of P0, P1, P2, P3")]
    InvalidPriority(String),

    #[error("invalid file action '{0}': must be view, modify or create")]
    InvalidFileAction(String),

    #[error("invalid risk rating '{0}': must be high, medium or low")]
    InvalidRiskRating(String),

    #[error("invalid estimation unit '{0}': must be hours or days")]
    InvalidEstimationUnit(String),

    #[error("task card validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("no level given for '{0}' and auto-classification is disabled")]
    MissingLevel(String),

    #[error("template not found: {0}")]
    TemplateNotFound(String),

    #[error("failed to load template {path}: {source}")]
    TemplateLoad {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Render(#[from] minijinja::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PaceError>;
