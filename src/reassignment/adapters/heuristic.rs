//! Deterministic suggestion generator that needs no language model.
//!
//! Picks the top-ranked eligible candidate for each task and writes the
//! reasoning and handoff text from templates. Used as the offline fallback
//! and as the reference behaviour for the generator port.

use async_trait::async_trait;
use minijinja::Environment;
use serde_json::{Value, json};

use crate::reassignment::{
    domain::{
        CandidateProfile, Confidence, RawSuggestion, SuggestionRequest, TaskContext,
        coverage_window,
    },
    ports::{SuggestionGenerator, SuggestionGeneratorError, SuggestionGeneratorResult},
};

/// Default template for the reasoning text.
pub const DEFAULT_REASONING_TEMPLATE: &str = "\
{{ name }} is at {{ score }}/100 ({{ level }}) with {{ open_tasks }} open task(s)\
{% if skill %}{% if skill_match %} and has the {{ skill }} skill\
{% else %} but does not list the {{ skill }} skill{% endif %}{% endif %}.\
{% if unavailable %} {{ name }} is also unavailable before the deadline; nobody better was free.{% endif %}\
{% if overloaded %} Everyone else is overloaded too.{% endif %}";

/// Default template for the handoff document.
pub const DEFAULT_HANDOFF_TEMPLATE: &str = "\
Handoff: {{ title }}

Priority {{ priority }}, currently {{ status }}, due {{ deadline }} ({{ project }}).
{% if description %}
{{ description }}
{% endif %}{% if notes %}
Notes: {{ notes }}
{% endif %}{% if comments %}
Recent comments:
{% for comment in comments %}- {{ comment }}
{% endfor %}{% endif %}";

/// Rule-based [`SuggestionGenerator`].
#[derive(Debug, Clone)]
pub struct HeuristicSuggestionGenerator {
    reasoning_template: String,
    handoff_template: String,
}

impl Default for HeuristicSuggestionGenerator {
    fn default() -> Self {
        Self {
            reasoning_template: DEFAULT_REASONING_TEMPLATE.to_owned(),
            handoff_template: DEFAULT_HANDOFF_TEMPLATE.to_owned(),
        }
    }
}

impl HeuristicSuggestionGenerator {
    /// Creates a generator with the default templates.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces both `minijinja` templates.
    #[must_use]
    pub fn with_templates(
        mut self,
        reasoning_template: impl Into<String>,
        handoff_template: impl Into<String>,
    ) -> Self {
        self.reasoning_template = reasoning_template.into();
        self.handoff_template = handoff_template.into();
        self
    }

    fn suggest(
        &self,
        environment: &Environment<'_>,
        request: &SuggestionRequest,
        context: &TaskContext,
    ) -> SuggestionGeneratorResult<Option<RawSuggestion>> {
        let Some(candidate) = context
            .ranked_candidates
            .first()
            .and_then(|id| request.candidate(*id))
        else {
            return Ok(None);
        };
        let facts = CandidateFacts::assess(request, context, candidate);
        let reasoning = render(environment, &self.reasoning_template, facts.template_context())?;
        let handoff = render(environment, &self.handoff_template, handoff_context(context))?;
        Ok(Some(RawSuggestion::new(
            context.task.id(),
            candidate.member,
            reasoning.trim(),
            handoff.trim(),
            facts.confidence().value(),
        )))
    }
}

struct CandidateFacts<'a> {
    candidate: &'a CandidateProfile,
    skill: Option<&'a str>,
    skill_match: bool,
    unavailable: bool,
}

impl<'a> CandidateFacts<'a> {
    fn assess(
        request: &SuggestionRequest,
        context: &'a TaskContext,
        candidate: &'a CandidateProfile,
    ) -> Self {
        let skill = context.task.skill_required();
        let window = coverage_window(&context.task, request.as_of);
        Self {
            candidate,
            skill,
            skill_match: skill.is_some_and(|tag| candidate.has_skill(tag)),
            unavailable: candidate.is_unavailable_during(&window),
        }
    }

    fn confidence(&self) -> Confidence {
        let mut score = 90;
        if self.unavailable {
            score -= 30;
        }
        if self.skill.is_some() && !self.skill_match {
            score -= 20;
        }
        if self.candidate.is_overloaded() {
            score -= 30;
        }
        Confidence::clamped(score.max(10))
    }

    fn template_context(&self) -> Value {
        let workload = &self.candidate.workload;
        json!({
            "name": self.candidate.display_name,
            "score": workload.score.value(),
            "level": workload.level.label(),
            "open_tasks": workload.open_task_count,
            "skill": self.skill,
            "skill_match": self.skill_match,
            "unavailable": self.unavailable,
            "overloaded": self.candidate.is_overloaded(),
        })
    }
}

fn handoff_context(context: &TaskContext) -> Value {
    let task = &context.task;
    let comments: Vec<&str> = context
        .recent_comments
        .iter()
        .map(|comment| comment.body.as_str())
        .collect();
    json!({
        "title": task.title(),
        "priority": task.priority().as_str(),
        "status": task.status().as_str(),
        "deadline": task.deadline().to_string(),
        "project": task.project(),
        "description": task.description(),
        "notes": task.notes(),
        "comments": comments,
    })
}

fn render(
    environment: &Environment<'_>,
    template: &str,
    context: Value,
) -> SuggestionGeneratorResult<String> {
    environment
        .render_str(template, context)
        .map_err(SuggestionGeneratorError::new)
}

#[async_trait]
impl SuggestionGenerator for HeuristicSuggestionGenerator {
    async fn generate(
        &self,
        request: &SuggestionRequest,
    ) -> SuggestionGeneratorResult<Vec<RawSuggestion>> {
        let environment = Environment::new();
        let mut suggestions = Vec::with_capacity(request.tasks.len());
        for context in &request.tasks {
            if let Some(suggestion) = self.suggest(&environment, request, context)? {
                suggestions.push(suggestion);
            }
        }
        Ok(suggestions)
    }
}
