use async_trait::async_trait;
use tracing::debug;

use crate::domain::category::PetitionCategory;
use crate::domain::chat::{ChatMessage, ChatRole};
use crate::domain::draft::ParsedDraft;
use crate::domain::prediction::offline_prediction;
use crate::error::AppResult;
use crate::parser::extract_draft_from_response;
use crate::prompt::{PREDICTION_SYSTEM_PROMPT, TIPS_SYSTEM_PROMPT};
use crate::services::{CompletionRequest, LanguageModelService};

const CLARIFYING_REPLIES: [&str; 2] = [
    "That's a great issue to address! Can you tell me more about your company and who specifically should be targeted with this petition? (CEO, HR Director, Board of Directors, etc.)",
    "I understand. Let me help you craft a compelling petition. What specific changes or outcomes are you hoping to achieve? Be as specific as possible.",
];

/// Canned responses for running without an API key.
#[derive(Debug, Default)]
pub struct OfflineClient;

impl OfflineClient {
    pub fn new() -> Self {
        Self
    }

    fn chat_reply(messages: &[ChatMessage]) -> String {
        // Prior turns, not counting the system prompt or the new user message.
        // One question per prior turn, then the draft.
        let prior = messages
            .iter()
            .filter(|m| m.role != ChatRole::System)
            .count()
            .saturating_sub(1);

        match CLARIFYING_REPLIES.get(prior) {
            Some(reply) => reply.to_string(),
            None => format!(
                "Perfect! Based on what you've told me, here's a draft for your petition:\n\n{}\n\nWould you like me to refine this further?",
                sample_draft().to_draft_block()
            ),
        }
    }

    fn prediction_reply(messages: &[ChatMessage]) -> AppResult<String> {
        let category = messages
            .iter()
            .rev()
            .find(|m| m.role == ChatRole::User)
            .and_then(|m| extract_draft_from_response(&m.content).category)
            .unwrap_or(PetitionCategory::Other);
        let mut prediction = offline_prediction(category);
        // The wire format carries the score on a 0-100 scale.
        prediction.score = (prediction.score * 100.0).round();
        Ok(serde_json::to_string(&prediction)?)
    }

    fn tips_reply() -> AppResult<String> {
        let tips = offline_prediction(PetitionCategory::Other).tips;
        Ok(serde_json::to_string(&tips)?)
    }
}

fn sample_draft() -> ParsedDraft {
    ParsedDraft {
        title: Some("Employees Demand Better Work-Life Balance".to_string()),
        target: Some("Human Resources Director".to_string()),
        category: Some(PetitionCategory::RemoteWork),
        description: Some(
            "We, the employees, are calling for flexible work arrangements that support both productivity and personal well-being. Studies show that flexible work options increase employee satisfaction and retention while maintaining or improving productivity."
                .to_string(),
        ),
    }
}

#[async_trait]
impl LanguageModelService for OfflineClient {
    async fn complete(&self, request: CompletionRequest) -> AppResult<String> {
        let system = request
            .messages
            .iter()
            .find(|m| m.role == ChatRole::System)
            .map(|m| m.content.as_str());

        debug!(messages = request.messages.len(), "answering offline");

        match system {
            Some(PREDICTION_SYSTEM_PROMPT) => Self::prediction_reply(&request.messages),
            Some(TIPS_SYSTEM_PROMPT) => Self::tips_reply(),
            _ => Ok(Self::chat_reply(&request.messages)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::prediction::{parse_prediction, parse_strategy_tips};
    use crate::parser::has_draft_markers;

    fn chat(messages: Vec<ChatMessage>) -> CompletionRequest {
        CompletionRequest {
            messages,
            temperature: 0.7,
            max_tokens: 800,
            json_mode: false,
        }
    }

    #[tokio::test]
    async fn asks_questions_before_drafting() {
        let client = OfflineClient::new();
        let first = client
            .complete(chat(vec![
                ChatMessage::system("prompt"),
                ChatMessage::user("We need remote work"),
            ]))
            .await
            .unwrap();
        assert_eq!(first, CLARIFYING_REPLIES[0]);
        assert!(!has_draft_markers(&first));

        let third = client
            .complete(chat(vec![
                ChatMessage::system("prompt"),
                ChatMessage::user("a"),
                ChatMessage::assistant("b"),
                ChatMessage::user("c"),
                ChatMessage::assistant("d"),
                ChatMessage::user("e"),
            ]))
            .await
            .unwrap();
        assert!(has_draft_markers(&third));
        assert_eq!(extract_draft_from_response(&third), sample_draft());
    }

    #[tokio::test]
    async fn drafts_after_two_prior_messages() {
        let client = OfflineClient::new();
        let second = client
            .complete(chat(vec![
                ChatMessage::system("prompt"),
                ChatMessage::user("a"),
                ChatMessage::user("b"),
            ]))
            .await
            .unwrap();
        assert_eq!(second, CLARIFYING_REPLIES[1]);

        let draft = client
            .complete(chat(vec![
                ChatMessage::system("prompt"),
                ChatMessage::user("a"),
                ChatMessage::assistant("b"),
                ChatMessage::user("c"),
            ]))
            .await
            .unwrap();
        assert!(has_draft_markers(&draft));
    }

    #[tokio::test]
    async fn answers_prediction_prompts_with_json() {
        let client = OfflineClient::new();
        let reply = client
            .complete(CompletionRequest {
                messages: vec![
                    ChatMessage::system(PREDICTION_SYSTEM_PROMPT),
                    ChatMessage::user("Title: Safety\nCategory: WORKPLACE_SAFETY\n"),
                ],
                temperature: 0.5,
                max_tokens: 400,
                json_mode: true,
            })
            .await
            .unwrap();
        let prediction = parse_prediction(&reply);
        assert!((prediction.score - 0.72).abs() < 1e-9);
        assert_eq!(prediction.tips.len(), 3);
    }

    #[tokio::test]
    async fn answers_tip_prompts_with_array() {
        let client = OfflineClient::new();
        let reply = client
            .complete(chat(vec![
                ChatMessage::system(TIPS_SYSTEM_PROMPT),
                ChatMessage::user("Progress: 1/10"),
            ]))
            .await
            .unwrap();
        assert_eq!(parse_strategy_tips(&reply).len(), 3);
    }
}
