use crate::types::Level;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// File constants
// ---------------------------------------------------------------------------

pub const CONFIG_FILE: &str = "pace.config.yaml";
pub const DEFAULT_OUTPUT_DIR: &str = "specs";
pub const DEFAULT_TEMPLATE_DIR: &str = "templates/task-cards";

const SLUG_MAX_CHARS: usize = 50;

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// Resolve `dir` against `root` unless it is already absolute.
pub fn resolve(root: &Path, dir: &Path) -> PathBuf {
    if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        root.join(dir)
    }
}

// ---------------------------------------------------------------------------
// Task ids
// ---------------------------------------------------------------------------

static TASK_ID_RE: OnceLock<Regex> = OnceLock::new();

fn task_id_re() -> &'static Regex {
    TASK_ID_RE.get_or_init(|| Regex::new(r"^[A-Z]+-L[1-4]-[A-Z0-9]+-[0-9]+$").unwrap())
}

/// `PREFIX-L<level>-MODULE-NUMBER`, e.g. `PROJ-L2-AUTH-001`.
pub fn is_valid_task_id(id: &str) -> bool {
    task_id_re().is_match(id)
}

/// Third dash-separated part of a task id, lower-cased; `general` when the
/// id is too short to have one.
pub fn module_from_task_id(id: &str) -> String {
    let parts: Vec<&str> = id.split('-').collect();
    if parts.len() >= 3 {
        parts[2].to_lowercase()
    } else {
        "general".to_string()
    }
}

// ---------------------------------------------------------------------------
// File names
// ---------------------------------------------------------------------------

static SLUG_SEP_RE: OnceLock<Regex> = OnceLock::new();

fn slug_sep_re() -> &'static Regex {
    SLUG_SEP_RE.get_or_init(|| Regex::new(r"[^A-Za-z0-9_\x{4e00}-\x{9fff}]+").unwrap())
}

/// Lower-case `text`, collapse every run of characters other than ASCII word
/// characters and CJK ideographs into `-`, trim dashes and keep at most 50
/// characters.
pub fn slugify(text: &str) -> String {
    let lower = text.to_lowercase();
    let dashed = slug_sep_re().replace_all(&lower, "-");
    dashed
        .trim_matches('-')
        .chars()
        .take(SLUG_MAX_CHARS)
        .collect()
}

/// `L<level>-<module>-<slug>.md`
pub fn card_file_name(level: Level, task_id: &str, title: &str) -> String {
    format!(
        "L{}-{}-{}.md",
        level.number(),
        module_from_task_id(task_id),
        slugify(title)
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
