//! Deterministic stand-ins for AI output.
//!
//! Used whenever the gateway call or extraction fails. These are pure
//! functions of their arguments and cannot fail.

use interview_coach_core::{
    AnalyticsResult, FeedbackResult, InterviewType, NEUTRAL_SCORE, Question,
};
use std::collections::BTreeMap;

fn templates(interview_type: InterviewType, role: &str) -> [String; 3] {
    match interview_type {
        InterviewType::Behavioral => [
            format!("Tell me about a time when you had to adapt to a significant change at work as a {role}."),
            format!("Describe a situation where you had to resolve a conflict within your team during your {role} work."),
            format!("As a {role}, tell me about a time when you failed at something. How did you handle it?"),
        ],
        InterviewType::Technical => [
            format!("Explain how you would approach solving a complex problem in your role as a {role}."),
            format!("Describe a technically challenging project you worked on as a {role} and how you overcame obstacles."),
            format!("How do you stay updated with the latest technologies and methodologies in your field as a {role}?"),
        ],
        InterviewType::Leadership => [
            format!("Tell me about a time when you had to lead a team through a difficult situation in your {role} position."),
            format!("As a {role}, how do you motivate team members who are struggling with their tasks?"),
            format!("Describe a situation where you had to make an unpopular decision as a {role}."),
        ],
    }
}

/// Three questions for `role`, ids 1 to 3.
#[must_use]
pub fn default_questions(role: &str, interview_type: InterviewType) -> Vec<Question> {
    templates(interview_type, role)
        .into_iter()
        .zip(1..)
        .map(|(text, id)| Question::new(id, text))
        .collect()
}

/// Generic feedback with a neutral score.
#[must_use]
pub fn default_feedback() -> FeedbackResult {
    FeedbackResult {
        feedback_text: "Your answer demonstrated good knowledge and structure, but could use more specific examples.".to_string(),
        strengths: vec!["Clear communication".to_string(), "Good structure".to_string()],
        improvements: vec![
            "Add more specific examples".to_string(),
            "Quantify your achievements".to_string(),
        ],
        score: NEUTRAL_SCORE,
    }
}

/// Generic analytics for `role`.
#[must_use]
pub fn default_analytics(role: &str) -> AnalyticsResult {
    let metrics = BTreeMap::from([
        ("communication".to_string(), 78.0),
        ("content".to_string(), 85.0),
        ("confidence".to_string(), 65.0),
        ("clarity".to_string(), 82.0),
        ("structure".to_string(), 90.0),
    ]);

    AnalyticsResult {
        summary: format!(
            "You've shown consistent improvement in your {role} interview skills, particularly in communication and technical knowledge."
        ),
        metrics,
        recommendations: vec![
            format!("Practice more {role}-specific examples"),
            "Focus on quantifying your achievements".to_string(),
            "Improve your storytelling skills".to_string(),
            "Prepare better for follow-up questions".to_string(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_questions_per_type_mentioning_role() {
        for interview_type in InterviewType::ALL {
            let questions = default_questions("Paramedic", interview_type);
            assert_eq!(questions.len(), 3);
            assert_eq!(
                questions.iter().map(|q| q.id).collect::<Vec<_>>(),
                vec![1, 2, 3]
            );
            assert!(questions.iter().all(|q| q.text.contains("Paramedic")));
        }
    }

    #[test]
    fn questions_are_deterministic() {
        assert_eq!(
            default_questions("Chef", InterviewType::Leadership),
            default_questions("Chef", InterviewType::Leadership)
        );
    }

    #[test]
    fn templates_differ_across_types() {
        let behavioral = default_questions("Chef", InterviewType::Behavioral);
        let technical = default_questions("Chef", InterviewType::Technical);
        assert_ne!(behavioral, technical);
        assert_eq!(
            technical[0].text,
            "Explain how you would approach solving a complex problem in your role as a Chef."
        );
    }

    #[test]
    fn feedback_defaults() {
        let feedback = default_feedback();
        assert_eq!(feedback.score, 75);
        assert_eq!(feedback.strengths, vec!["Clear communication", "Good structure"]);
        assert_eq!(feedback.improvements.len(), 2);
    }

    #[test]
    fn analytics_defaults_interpolate_role() {
        let analytics = default_analytics("Pilot");
        assert!(analytics.summary.contains("your Pilot interview skills"));
        assert_eq!(analytics.metrics.len(), 5);
        assert_eq!(analytics.metrics.get("structure"), Some(&90.0));
        assert_eq!(analytics.recommendations.len(), 4);
        assert_eq!(
            analytics.recommendations[0],
            "Practice more Pilot-specific examples"
        );
    }
}
