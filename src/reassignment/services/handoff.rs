//! Handoff text for manual reassignments.

use crate::team::domain::{Member, Task};
use minijinja::Environment;
use serde_json::json;

/// Reasoning recorded when a manager picks the assignee directly.
pub const MANUAL_REASONING: &str = "Manual reassignment by a manager.";

/// Renders a handoff document for a manual reassignment.
///
/// `from` is `None` when the previous assignee's record no longer exists.
///
/// # Errors
///
/// Returns a [`minijinja::Error`] when the template is invalid.
pub fn render_manual_handoff(
    template: &str,
    task: &Task,
    from: Option<&Member>,
    to: &Member,
) -> Result<String, minijinja::Error> {
    let context = json!({
        "title": task.title(),
        "from_name": from.map_or("the previous assignee", Member::display_name),
        "to_name": to.display_name(),
        "priority": task.priority().as_str(),
        "status": task.status().as_str(),
        "deadline": task.deadline().to_string(),
        "project": task.project(),
        "description": task.description(),
        "notes": task.notes(),
    });
    let rendered = Environment::new().render_str(template, context)?;
    Ok(rendered.trim().to_owned())
}
