use serde::Serialize;
use tracing::{debug, info};

use crate::context::AppContext;
use crate::domain::chat::{ChatMessage, ChatRole};
use crate::domain::draft::ParsedDraft;
use crate::error::{AppError, AppResult};
use crate::parser::{extract_draft_from_response, has_draft_markers};
use crate::prompt::draft_system_prompt;
use crate::services::CompletionRequest;

const DRAFT_TEMPERATURE: f32 = 0.7;
const DRAFT_MAX_TOKENS: u32 = 800;
const EMPTY_REPLY: &str = "I apologize, I encountered an error. Please try again.";

#[derive(Debug, Clone, Serialize)]
pub struct DraftReply {
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_draft: Option<ParsedDraft>,
}

/// Conversation so far plus the draft assembled from every suggestion.
#[derive(Debug, Clone, Default)]
pub struct DraftSession {
    pub messages: Vec<ChatMessage>,
    pub draft: ParsedDraft,
}

impl DraftSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_exchange(&mut self, user_message: &str, reply: &DraftReply) {
        self.messages.push(ChatMessage::user(user_message));
        self.messages.push(ChatMessage::assistant(reply.response.clone()));
        if let Some(suggestion) = &reply.suggested_draft {
            self.draft.merge(suggestion);
        }
    }

    /// Sends one user message and folds the reply into the session.
    pub async fn send(&mut self, ctx: &AppContext, user_message: &str) -> AppResult<DraftReply> {
        let reply = process_draft_message(ctx, user_message, &self.messages).await?;
        self.record_exchange(user_message, &reply);
        Ok(reply)
    }
}

pub async fn process_draft_message(
    ctx: &AppContext,
    user_message: &str,
    history: &[ChatMessage],
) -> AppResult<DraftReply> {
    let user_message = user_message.trim();
    if user_message.is_empty() {
        return Err(AppError::Validation("message is required".to_string()));
    }

    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ChatMessage::system(draft_system_prompt()));
    messages.extend(
        history
            .iter()
            .filter(|m| m.role != ChatRole::System)
            .cloned(),
    );
    messages.push(ChatMessage::user(user_message));

    let completion = ctx
        .language_model
        .complete(CompletionRequest {
            messages,
            temperature: DRAFT_TEMPERATURE,
            max_tokens: DRAFT_MAX_TOKENS,
            json_mode: false,
        })
        .await?;

    let response = if completion.trim().is_empty() {
        EMPTY_REPLY.to_string()
    } else {
        completion
    };

    let suggested_draft = if has_draft_markers(&response) {
        let draft = extract_draft_from_response(&response);
        info!(
            title = draft.title.is_some(),
            target = draft.target.is_some(),
            category = draft.category.map(|c| c.as_str()),
            description = draft.description.is_some(),
            "assistant suggested a draft"
        );
        Some(draft)
    } else {
        debug!("assistant reply has no draft markers");
        None
    };

    Ok(DraftReply {
        response,
        suggested_draft,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::*;
    use crate::config::{AppConfig, StoredConfig};
    use crate::domain::category::PetitionCategory;
    use crate::services::LanguageModelService;

    /// Replays scripted replies and records what it was asked.
    struct ScriptedModel {
        replies: Mutex<Vec<String>>,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl ScriptedModel {
        fn new(replies: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.iter().rev().map(|r| r.to_string()).collect()),
                requests: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl LanguageModelService for ScriptedModel {
        async fn complete(&self, request: CompletionRequest) -> AppResult<String> {
            self.requests.lock().unwrap().push(request);
            Ok(self.replies.lock().unwrap().pop().unwrap_or_default())
        }
    }

    fn context(model: Arc<ScriptedModel>) -> AppContext {
        let config = AppConfig::resolve(StoredConfig::default(), "/tmp/igotyou".into(), |_| None);
        AppContext::new(config, model)
    }

    #[tokio::test]
    async fn conversational_reply_has_no_suggestion() {
        let model = ScriptedModel::new(&["Who should receive this petition?"]);
        let ctx = context(model.clone());

        let reply = process_draft_message(&ctx, "Our office is freezing", &[])
            .await
            .unwrap();

        assert_eq!(reply.response, "Who should receive this petition?");
        assert!(reply.suggested_draft.is_none());

        let requests = model.requests.lock().unwrap();
        let sent = &requests[0];
        assert_eq!(sent.messages.len(), 2);
        assert_eq!(sent.messages[0].role, ChatRole::System);
        assert_eq!(sent.messages[1], ChatMessage::user("Our office is freezing"));
        assert_eq!(sent.max_tokens, DRAFT_MAX_TOKENS);
        assert!(!sent.json_mode);
    }

    #[tokio::test]
    async fn session_accumulates_partial_drafts() {
        let model = ScriptedModel::new(&[
            "Here's a start:\nTitle: Heat the Office\nTarget: Facilities",
            "---DRAFT---\nTitle: Heat the Office Properly\nCategory: WORKPLACE_SAFETY\nDescription:\nIt is 14C at our desks.\n---END DRAFT---",
        ]);
        let ctx = context(model.clone());
        let mut session = DraftSession::new();

        session.send(&ctx, "Our office is freezing").await.unwrap();
        session.send(&ctx, "Make the title stronger").await.unwrap();

        assert_eq!(session.messages.len(), 4);
        assert_eq!(session.draft.title.as_deref(), Some("Heat the Office Properly"));
        assert_eq!(session.draft.target.as_deref(), Some("Facilities"));
        assert_eq!(session.draft.category, Some(PetitionCategory::WorkplaceSafety));
        assert_eq!(session.draft.description.as_deref(), Some("It is 14C at our desks."));

        let requests = model.requests.lock().unwrap();
        assert_eq!(requests[1].messages.len(), 4);
        assert_eq!(requests[1].messages[2].role, ChatRole::Assistant);
    }

    #[tokio::test]
    async fn empty_completion_becomes_apology() {
        let ctx = context(ScriptedModel::new(&[""]));
        let reply = process_draft_message(&ctx, "hello", &[]).await.unwrap();
        assert_eq!(reply.response, EMPTY_REPLY);
        assert!(reply.suggested_draft.is_none());
    }

    #[tokio::test]
    async fn blank_message_is_rejected() {
        let model = ScriptedModel::new(&[]);
        let ctx = context(model.clone());
        let result = process_draft_message(&ctx, "   ", &[]).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(model.requests.lock().unwrap().is_empty());
    }
}
