//! Tunable thresholds shared by the risk classifier and the workflows.
//!
//! The overload gate and the scoring weights are deliberately absent: they
//! are fixed constants in [`crate::workload::domain`].

use serde::{Deserialize, Serialize};

/// Default template used to write a handoff document when a manager
/// reassigns a task manually without supplying one.
pub const DEFAULT_MANUAL_HANDOFF_TEMPLATE: &str = "\
Handoff: {{ title }}

{{ from_name }} is handing this task to {{ to_name }}.
Priority: {{ priority }}. Status: {{ status }}. Due {{ deadline }}.
Project: {{ project }}.
{% if description %}
{{ description }}
{% endif %}{% if notes %}
Notes: {{ notes }}
{% endif %}";

/// Configuration for coverage decisions.
///
/// # Examples
///
/// ```
/// use coverly::policy::CoveragePolicy;
///
/// let policy = CoveragePolicy::default();
/// assert_eq!(policy.min_feedback_length, 10);
///
/// let loaded = CoveragePolicy::from_json_str(r#"{"todo_risk_horizon_days": 5}"#)
///     .expect("valid policy");
/// assert_eq!(loaded.todo_risk_horizon_days, 5);
/// assert_eq!(loaded.overload_risk_horizon_days, 7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoveragePolicy {
    /// Days before a deadline within which an overloaded assignee puts the
    /// task at risk.
    pub overload_risk_horizon_days: i64,
    /// Days before a deadline within which an unstarted task is at risk.
    pub todo_risk_horizon_days: i64,
    /// Minimum trimmed character count for completion rejection feedback.
    pub min_feedback_length: usize,
    /// Number of recent comments attached to each suggestion request.
    pub recent_comment_limit: usize,
    /// `minijinja` template for manual-override handoff documents.
    pub manual_handoff_template: String,
}

impl Default for CoveragePolicy {
    fn default() -> Self {
        Self {
            overload_risk_horizon_days: 7,
            todo_risk_horizon_days: 3,
            min_feedback_length: 10,
            recent_comment_limit: 5,
            manual_handoff_template: DEFAULT_MANUAL_HANDOFF_TEMPLATE.to_owned(),
        }
    }
}

impl CoveragePolicy {
    /// Creates a stricter policy that flags risk earlier and demands longer
    /// review feedback.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            overload_risk_horizon_days: 14,
            todo_risk_horizon_days: 5,
            min_feedback_length: 40,
            ..Self::default()
        }
    }

    /// Parses a policy from JSON, filling omitted fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] when the document is not valid JSON or a
    /// field has the wrong type.
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}
