//! Prompt templates for the interview flow

use crate::conversation::entities::Turn;

/// Opening line shown before the respondent says anything.
const GREETING: &str = "Hello! I am here to learn about consumer experiences, specifically a recent \
negative experience you may have had with a product or service. It could be a disappointing \
purchase, poor customer service, a defective product, or anything else that frustrated you as a \
consumer. Could you start by telling me about a recent negative experience you have had?";

/// Shown when every generation attempt for a turn has failed.
const APOLOGY: &str = "I apologize, but I am experiencing technical difficulties. Could you \
please try again in a moment?";

/// Templates for every prompt the interview sends
pub struct InterviewPrompts;

impl InterviewPrompts {
    pub fn greeting() -> &'static str {
        GREETING
    }

    pub fn apology() -> &'static str {
        APOLOGY
    }

    /// Instruction for the main interviewer agent
    pub fn main_system() -> &'static str {
        r#"You are an empathetic interviewer researching negative consumer experiences.

1. Stay strictly on the topic of a recent negative consumer experience the user had.
2. Find out what happened, when and where, how it made them feel, what they expected versus what they received, and how it was resolved (if at all).
3. Ask exactly one focused question at a time and keep each reply to 2-3 sentences.
4. If the user drifts off topic, acknowledge it politely and steer back: "I understand, but I'd like to focus on your consumer experience. Can you tell me more about..."
5. Probe into emotions, expectations and outcomes.
6. Close the interview naturally once you have gathered comprehensive detail.

Be conversational and empathetic. Do not discuss other topics."#
    }

    /// Instruction for the clarification agent
    pub fn clarification_system() -> &'static str {
        r#"You gather specific details that were missing from the user's previous answer about a negative consumer experience.

1. Ask one short, direct question (1-2 sentences) aimed only at the missing information.
2. Be empathetic but focused; ask for concrete facts, not general impressions.
3. Good examples:
   - "What specific product or service was this about?"
   - "Can you describe exactly what went wrong?"
   - "How did this situation make you feel?"
   - "What were you expecting to happen instead?"
   - "When and where did this happen?""#
    }

    /// Instruction for the hidden assessment agent
    pub fn assessment_system() -> &'static str {
        r#"You analyze a user's answer in an interview about a negative consumer experience and decide whether it needs clarification.

A complete account covers:
- the specific product or service involved
- what exactly went wrong
- when and where it happened
- how it made them feel
- what they expected versus what they received
- any attempts at resolution

Be strict: if the answer is vague, very short, or any of these points is vague or absent, it is "insufficient".

Reply with exactly one JSON object and nothing else:
{
  "assessment": "sufficient" or "insufficient",
  "reasoning": "one sentence explaining the verdict",
  "missing_info": ["each", "missing", "detail"],
  "next_action": "continue_interview" or "request_clarification"
}"#
    }

    /// Flatten recent turns into the narrative context the assessment
    /// agent reads.
    pub fn assessment_context(recent: &[Turn]) -> String {
        let mut context =
            String::from("This is an interview about negative consumer experiences. ");
        if !recent.is_empty() {
            context.push_str("Recent conversation: ");
            for turn in recent {
                context.push_str(&format!(
                    "{}: {} ",
                    turn.role().narrative_label(),
                    turn.content()
                ));
            }
        }
        format!("Conversation context: {}", context)
    }

    /// The respondent text under analysis
    pub fn assessment_subject(response: &str) -> String {
        format!("User response to analyze: \"{}\"", response)
    }

    /// Directive appended after the history when the clarification agent
    /// is active.
    pub fn clarification_directive(missing_info: &[String], reasoning: &str) -> String {
        let missing = if missing_info.is_empty() {
            "specific details".to_string()
        } else {
            missing_info.join(", ")
        };
        format!(
            "The user's last response needs clarification. Missing information: {}. \
Reason: {}. Ask one specific question that targets exactly these gaps in their negative \
consumer experience.",
            missing, reasoning
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assessment_context_labels_speakers() {
        let turns = vec![Turn::assistant("What went wrong?"), Turn::user("bad")];
        let context = InterviewPrompts::assessment_context(&turns);
        assert!(context.starts_with("Conversation context: This is an interview"));
        assert!(context.contains("Recent conversation: Bot: What went wrong? User: bad "));
    }

    #[test]
    fn test_assessment_context_without_history() {
        let context = InterviewPrompts::assessment_context(&[]);
        assert!(!context.contains("Recent conversation"));
    }

    #[test]
    fn test_clarification_directive_names_gaps() {
        let directive = InterviewPrompts::clarification_directive(
            &["what happened".to_string(), "when".to_string()],
            "too short",
        );
        assert!(directive.contains("Missing information: what happened, when."));
        assert!(directive.contains("Reason: too short."));
    }

    #[test]
    fn test_assessment_prompt_requests_json_keys() {
        let prompt = InterviewPrompts::assessment_system();
        for key in ["assessment", "reasoning", "missing_info", "next_action"] {
            assert!(prompt.contains(key), "missing key {key}");
        }
    }
}
