//! Prompt templates for the interview actions.
//!
//! Templates use `{{variable}}` placeholders. The registry built by
//! [`PromptRegistry::interview_defaults`] holds one template per
//! [`GatewayAction`], and [`PromptRegistry::render_request`] turns a gateway
//! request into a ready-to-send [`LlmRequest`].

use crate::backend::LlmRequest;
use crate::error::PromptError;
use interview_coach_core::{GatewayAction, GatewayRequest};
use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// Sampling temperature used for every interview prompt.
pub const TEMPERATURE: f32 = 0.2;
/// Top-k sampling cutoff.
pub const TOP_K: u32 = 40;
/// Nucleus sampling cutoff.
pub const TOP_P: f32 = 0.95;
/// Output token budget.
pub const MAX_OUTPUT_TOKENS: u32 = 1024;

const QUESTIONS_TEMPLATE: &str = "\
Generate 3 challenging and relevant interview questions for a {{role}} position.
First, interpret what skills and knowledge are required for this profession.
The interview type is \"{{interview_type}}\".
Make sure the questions are specific to this exact profession, not generic.
Format the response as a JSON array of objects with 'id' and 'text' properties.";

const FEEDBACK_TEMPLATE: &str = "\
You are an expert interview coach specializing in {{role}} positions.

Analyze this interview answer:

Question: {{question}}
Answer: {{answer}}

Provide constructive feedback specific to this profession. Include strengths, areas for improvement, and an overall score out of 100.
Format the response as a JSON object with these properties:
- 'feedbackText' (string): Overall feedback
- 'strengths' (array of strings): Main strengths
- 'improvements' (array of strings): Areas to improve
- 'score' (number): Score between 0-100";

const ANALYTICS_TEMPLATE: &str = "\
Analyze the following interview data for a {{role}} position to provide performance insights:

Role: {{role}}
Interview Type: {{interview_type}}
Past Questions: {{past_questions}}
Feedback History: {{feedback_history}}

Generate a comprehensive analysis including:
1. Overall performance trends
2. Key strengths demonstrated specific to this profession
3. Specific improvement areas relevant to this career path
4. Recommendations for future interviews in this field

Format the response as a JSON object with:
- 'summary' (string): Overall analysis
- 'metrics' (object): Numerical scores for different aspects
- 'recommendations' (array of strings): Specific action items";

/// Definition of a template variable.
#[derive(Debug, Clone)]
pub struct VariableDefinition {
    /// Whether this variable is required.
    pub required: bool,
    /// Default value if not provided.
    pub default: Option<JsonValue>,
}

impl VariableDefinition {
    /// Creates a required variable definition.
    #[must_use]
    pub fn required() -> Self {
        Self {
            required: true,
            default: None,
        }
    }

    /// Creates an optional variable with a default value.
    #[must_use]
    pub fn with_default(default: JsonValue) -> Self {
        Self {
            required: false,
            default: Some(default),
        }
    }
}

/// A named prompt template.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// Template name (used for lookup).
    pub name: String,
    /// Template content with placeholders.
    pub content: String,
    /// Variable definitions.
    pub variables: HashMap<String, VariableDefinition>,
}

impl PromptTemplate {
    /// Creates a new prompt template.
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            variables: HashMap::new(),
        }
    }

    /// Adds a variable definition.
    #[must_use]
    pub fn with_variable(
        mut self,
        name: impl Into<String>,
        definition: VariableDefinition,
    ) -> Self {
        self.variables.insert(name.into(), definition);
        self
    }

    /// Renders the template with the given variables.
    ///
    /// Strings are substituted verbatim; any other JSON value is substituted
    /// as compact JSON. Defaults fill placeholders left after substitution.
    #[must_use]
    pub fn render(&self, variables: &HashMap<String, JsonValue>) -> String {
        let mut result = self.content.clone();

        for (name, value) in variables {
            result = substitute(&result, name, value);
        }

        for (name, def) in &self.variables {
            if let Some(default) = &def.default {
                result = substitute(&result, name, default);
            }
        }

        result
    }

    /// Validates that all required variables are provided.
    ///
    /// # Errors
    ///
    /// Returns the sorted names of the missing variables.
    pub fn validate_variables(
        &self,
        variables: &HashMap<String, JsonValue>,
    ) -> Result<(), Vec<String>> {
        let mut missing: Vec<String> = self
            .variables
            .iter()
            .filter(|(_, def)| def.required && def.default.is_none())
            .filter(|(name, _)| !variables.contains_key(*name))
            .map(|(name, _)| name.clone())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            missing.sort();
            Err(missing)
        }
    }
}

fn substitute(template: &str, name: &str, value: &JsonValue) -> String {
    let placeholder = format!("{{{{{name}}}}}");
    let replacement = match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    };
    template.replace(&placeholder, &replacement)
}

/// Registry of prompt templates.
#[derive(Debug, Clone, Default)]
pub struct PromptRegistry {
    templates: HashMap<String, PromptTemplate>,
}

impl PromptRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the three interview templates.
    #[must_use]
    pub fn interview_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(
            PromptTemplate::new(
                template_name(GatewayAction::GenerateQuestions),
                QUESTIONS_TEMPLATE,
            )
            .with_variable("role", VariableDefinition::required())
            .with_variable("interview_type", VariableDefinition::required()),
        );

        registry.register(
            PromptTemplate::new(
                template_name(GatewayAction::GenerateFeedback),
                FEEDBACK_TEMPLATE,
            )
            .with_variable("question", VariableDefinition::required())
            .with_variable("answer", VariableDefinition::required())
            .with_variable(
                "role",
                VariableDefinition::with_default(JsonValue::from("professional")),
            ),
        );

        registry.register(
            PromptTemplate::new(
                template_name(GatewayAction::GenerateAnalytics),
                ANALYTICS_TEMPLATE,
            )
            .with_variable("role", VariableDefinition::required())
            .with_variable("interview_type", VariableDefinition::required())
            .with_variable("past_questions", VariableDefinition::required())
            .with_variable("feedback_history", VariableDefinition::required()),
        );

        registry
    }

    /// Registers a template.
    pub fn register(&mut self, template: PromptTemplate) {
        self.templates.insert(template.name.clone(), template);
    }

    /// Gets a template by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PromptTemplate> {
        self.templates.get(name)
    }

    /// Renders the template for a gateway request into an LLM request.
    ///
    /// # Errors
    ///
    /// Returns an error if the action has no registered template or a
    /// required variable is missing.
    pub fn render_request(&self, request: &GatewayRequest) -> Result<LlmRequest, PromptError> {
        let name = template_name(request.action());
        let template = self.get(name).ok_or_else(|| PromptError::TemplateNotFound {
            name: name.to_string(),
        })?;

        let variables = request_variables(request);
        template
            .validate_variables(&variables)
            .map_err(|missing| PromptError::MissingVariables {
                template: name.to_string(),
                variables: missing,
            })?;

        Ok(LlmRequest::new(template.render(&variables))
            .with_temperature(TEMPERATURE)
            .with_sampling(TOP_K, TOP_P)
            .with_max_tokens(MAX_OUTPUT_TOKENS))
    }
}

/// Returns the registry name of the template serving `action`.
#[must_use]
pub const fn template_name(action: GatewayAction) -> &'static str {
    match action {
        GatewayAction::GenerateQuestions => "generate_questions",
        GatewayAction::GenerateFeedback => "generate_feedback",
        GatewayAction::GenerateAnalytics => "generate_analytics",
    }
}

fn request_variables(request: &GatewayRequest) -> HashMap<String, JsonValue> {
    let mut vars = HashMap::new();
    match request {
        GatewayRequest::GenerateQuestions(params) => {
            vars.insert("role".to_string(), JsonValue::from(params.role.as_str()));
            vars.insert(
                "interview_type".to_string(),
                JsonValue::from(params.interview_type.as_str()),
            );
        }
        GatewayRequest::GenerateFeedback(params) => {
            vars.insert(
                "question".to_string(),
                JsonValue::from(params.question.as_str()),
            );
            vars.insert("answer".to_string(), JsonValue::from(params.answer.as_str()));
            if let Some(role) = params.role.as_deref()
                && !role.trim().is_empty()
            {
                vars.insert("role".to_string(), JsonValue::from(role));
            }
        }
        GatewayRequest::GenerateAnalytics(params) => {
            vars.insert("role".to_string(), JsonValue::from(params.role.as_str()));
            vars.insert(
                "interview_type".to_string(),
                JsonValue::from(params.interview_type.as_str()),
            );
            vars.insert(
                "past_questions".to_string(),
                JsonValue::Array(params.past_questions.clone()),
            );
            vars.insert(
                "feedback_history".to_string(),
                JsonValue::Array(params.feedback_history.clone()),
            );
        }
    }
    vars
}

#[cfg(test)]
mod tests {
    use super::*;
    use interview_coach_core::{AnalyticsParams, FeedbackParams, InterviewType, QuestionParams};
    use serde_json::json;

    #[test]
    fn template_with_defaults() {
        let template = PromptTemplate::new("greeting", "Hello, {{name}}! Your role is {{role}}.")
            .with_variable("name", VariableDefinition::required())
            .with_variable("role", VariableDefinition::with_default(json!("guest")));

        let mut vars = HashMap::new();
        vars.insert("name".to_string(), json!("Alice"));

        assert_eq!(template.render(&vars), "Hello, Alice! Your role is guest.");
    }

    #[test]
    fn template_validation_lists_missing() {
        let template = PromptTemplate::new("test", "{{b}} {{a}}")
            .with_variable("a", VariableDefinition::required())
            .with_variable("b", VariableDefinition::required());

        let result = template.validate_variables(&HashMap::new());
        assert_eq!(result.unwrap_err(), vec!["a", "b"]);
    }

    #[test]
    fn registry_holds_one_template_per_action() {
        let registry = PromptRegistry::interview_defaults();
        for action in [
            GatewayAction::GenerateQuestions,
            GatewayAction::GenerateFeedback,
            GatewayAction::GenerateAnalytics,
        ] {
            assert!(registry.get(template_name(action)).is_some());
        }
    }

    #[test]
    fn questions_prompt_mentions_role_and_type() {
        let request = PromptRegistry::interview_defaults()
            .render_request(&GatewayRequest::GenerateQuestions(QuestionParams {
                role: "Data Engineer".to_string(),
                interview_type: InterviewType::Technical,
            }))
            .expect("render");

        assert!(request.prompt.contains("for a Data Engineer position"));
        assert!(request.prompt.contains("\"technical\""));
        assert_eq!(request.temperature, Some(TEMPERATURE));
        assert_eq!(request.max_tokens, Some(MAX_OUTPUT_TOKENS));
    }

    #[test]
    fn feedback_prompt_defaults_role() {
        let request = PromptRegistry::interview_defaults()
            .render_request(&GatewayRequest::GenerateFeedback(FeedbackParams {
                question: "Why this job?".to_string(),
                answer: "I like it.".to_string(),
                role: Some("   ".to_string()),
            }))
            .expect("render");

        assert!(request.prompt.contains("specializing in professional positions"));
        assert!(request.prompt.contains("Question: Why this job?"));
        assert!(!request.prompt.contains("{{"));
    }

    #[test]
    fn analytics_prompt_embeds_history_as_json() {
        let request = PromptRegistry::interview_defaults()
            .render_request(&GatewayRequest::GenerateAnalytics(AnalyticsParams {
                role: "Pilot".to_string(),
                interview_type: InterviewType::Leadership,
                past_questions: vec![json!({"id": 1, "text": "Q"})],
                feedback_history: vec![json!({"score": 70})],
            }))
            .expect("render");

        assert!(request.prompt.contains(r#"Past Questions: [{"id":1,"text":"Q"}]"#));
        assert!(request.prompt.contains(r#"Feedback History: [{"score":70}]"#));
    }

    #[test]
    fn empty_registry_reports_missing_template() {
        let err = PromptRegistry::new()
            .render_request(&GatewayRequest::GenerateQuestions(QuestionParams {
                role: "Nurse".to_string(),
                interview_type: InterviewType::Behavioral,
            }))
            .unwrap_err();
        assert_eq!(
            err,
            PromptError::TemplateNotFound {
                name: "generate_questions".to_string()
            }
        );
    }
}
