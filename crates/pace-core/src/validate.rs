use crate::config::EstimationUnit;
use crate::paths;
use crate::types::{TaskCard, TaskDraft};
use serde::{Deserialize, Serialize};

/// Estimations above this many hours on a draft get a split suggestion.
const DRAFT_SPLIT_HOURS: f64 = 40.0;
/// Completed cards use a tighter threshold.
const CARD_SPLIT_HOURS: f64 = 32.0;
const MIN_ACCEPTANCE_CRITERIA: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Check a draft before it is completed into a card.
pub fn validate_draft(draft: &TaskDraft, unit: EstimationUnit) -> ValidationReport {
    let mut report = ValidationReport::default();

    if is_blank(draft.task_title.as_deref()) {
        report.errors.push("missing task title".to_string());
    }
    if is_blank(draft.business_goal.as_deref()) {
        report.errors.push("missing business goal".to_string());
    }
    if is_blank(draft.functional_description.as_deref()) {
        report.errors.push("missing functional description".to_string());
    }
    if is_blank(draft.assignee.as_deref()) {
        report.warnings.push("no assignee specified".to_string());
    }

    if let Some(id) = draft.task_id.as_deref().filter(|id| !id.is_empty()) {
        if !paths::is_valid_task_id(id) {
            report.warnings.push(format!(
                "task id '{id}' should look like PREFIX-L<level>-MODULE-NUMBER (e.g. PROJ-L2-AUTH-001)"
            ));
        }
    }

    if draft
        .estimation
        .is_some_and(|e| unit.to_hours(e) > DRAFT_SPLIT_HOURS)
    {
        report.suggestions.push(format!(
            "estimation is over {} {unit}; consider splitting the task",
            unit.from_hours(DRAFT_SPLIT_HOURS)
        ));
    }

    if let Some(criteria) = &draft.acceptance_criteria {
        if criteria.len() < MIN_ACCEPTANCE_CRITERIA {
            report.suggestions.push(format!(
                "add more concrete acceptance criteria (at least {MIN_ACCEPTANCE_CRITERIA})"
            ));
        }
    }

    report
}

/// Quality check on a completed card. Never produces errors.
pub fn validate_card(card: &TaskCard, unit: EstimationUnit) -> ValidationReport {
    let mut report = ValidationReport::default();

    if card.user_value.trim().is_empty() {
        report.warnings.push("missing user value".to_string());
    }
    if card.acceptance_criteria.is_empty() {
        report.warnings.push("missing acceptance criteria".to_string());
    }
    if card.related_files.is_empty() {
        report
            .suggestions
            .push("consider listing related files".to_string());
    }
    if unit.to_hours(card.estimation) > CARD_SPLIT_HOURS {
        report.suggestions.push(format!(
            "estimation is over {} {unit}; consider splitting the task",
            unit.from_hours(CARD_SPLIT_HOURS)
        ));
    }

    report
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Level, Priority, RelatedFile};

    fn complete_draft() -> TaskDraft {
        TaskDraft {
            task_title: Some("Login form".to_string()),
            business_goal: Some("let users sign in".to_string()),
            functional_description: Some("create a login form".to_string()),
            assignee: Some("alice".to_string()),
            ..TaskDraft::default()
        }
    }

    fn card() -> TaskCard {
        TaskCard {
            task_id: "PACE-L1-TASK-000001".to_string(),
            task_title: "Login form".to_string(),
            task_type: Level::Standardized,
            priority: Priority::P1,
            estimation: 8.0,
            assignee: "alice".to_string(),
            created_date: "2024-01-05".to_string(),
            due_date: None,
            business_goal: "let users sign in".to_string(),
            user_value: "fast sign in".to_string(),
            business_rules: vec![],
            acceptance_criteria: vec!["renders".to_string()],
            functional_description: "create a login form".to_string(),
            technical_requirements: vec![],
            interface_definition: None,
            data_model: None,
            constraints: vec![],
            implementation_approach: None,
            code_examples: vec![],
            best_practices: vec![],
            considerations: vec![],
            related_files: vec![RelatedFile::parse_line("src/login.tsx").unwrap()],
            test_strategy: String::new(),
            validation_checklist: vec![],
            risk_assessment: None,
            rollback_plan: None,
            custom_fields: None,
        }
    }

    #[test]
    fn complete_draft_is_clean() {
        let report = validate_draft(&complete_draft(), EstimationUnit::Hours);
        assert!(report.is_valid());
        assert!(report.warnings.is_empty());
        assert!(report.suggestions.is_empty());
    }

    #[test]
    fn missing_required_fields_are_errors() {
        let report = validate_draft(&TaskDraft::default(), EstimationUnit::Hours);
        assert!(!report.is_valid());
        assert_eq!(
            report.errors,
            vec![
                "missing task title",
                "missing business goal",
                "missing functional description",
            ]
        );
        assert_eq!(report.warnings, vec!["no assignee specified"]);
    }

    #[test]
    fn blank_strings_count_as_missing() {
        let mut draft = complete_draft();
        draft.business_goal = Some("   ".to_string());
        let report = validate_draft(&draft, EstimationUnit::Hours);
        assert_eq!(report.errors, vec!["missing business goal"]);
    }

    #[test]
    fn malformed_task_id_is_a_warning() {
        let mut draft = complete_draft();
        draft.task_id = Some("auth-1".to_string());
        let report = validate_draft(&draft, EstimationUnit::Hours);
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("auth-1"));

        draft.task_id = Some("PROJ-L2-AUTH-001".to_string());
        assert!(validate_draft(&draft, EstimationUnit::Hours).warnings.is_empty());
    }

    #[test]
    fn large_estimation_and_few_criteria_are_suggestions() {
        let mut draft = complete_draft();
        draft.estimation = Some(41.0);
        draft.acceptance_criteria = Some(vec!["renders".to_string()]);
        let report = validate_draft(&draft, EstimationUnit::Hours);
        assert!(report.is_valid());
        assert_eq!(report.suggestions.len(), 2);

        draft.estimation = Some(40.0);
        draft.acceptance_criteria = None;
        assert!(validate_draft(&draft, EstimationUnit::Hours).suggestions.is_empty());
    }

    #[test]
    fn card_quality_checks() {
        let mut c = card();
        assert_eq!(validate_card(&c, EstimationUnit::Hours), ValidationReport::default());

        c.user_value.clear();
        c.acceptance_criteria.clear();
        c.related_files.clear();
        c.estimation = 33.0;
        let report = validate_card(&c, EstimationUnit::Hours);
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 2);
        assert_eq!(report.suggestions.len(), 2);
    }

    #[test]
    fn split_thresholds_follow_the_estimation_unit() {
        let mut draft = complete_draft();
        draft.estimation = Some(6.0);
        let report = validate_draft(&draft, EstimationUnit::Days);
        assert_eq!(
            report.suggestions,
            vec!["estimation is over 5 days; consider splitting the task"]
        );
        assert!(validate_draft(&draft, EstimationUnit::Hours)
            .suggestions
            .is_empty());

        let mut c = card();
        c.estimation = 5.0;
        assert_eq!(
            validate_card(&c, EstimationUnit::Days).suggestions,
            vec!["estimation is over 4 days; consider splitting the task"]
        );
        c.estimation = 4.0;
        assert!(validate_card(&c, EstimationUnit::Days).suggestions.is_empty());
    }
}
