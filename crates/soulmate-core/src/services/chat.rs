//! Conversation loading and the message-send flow.

use std::sync::Arc;

use anyhow::Context;
use soulmate_ai::{CompletionRequest, LlmClient};
use tracing::{debug, info, warn};

use crate::models::{Message, MessageRole};
use crate::prompt::system_prompt;
use crate::services::{approaches, profile, themes};
use crate::{AppCore, Result, SoulmateError};

/// Which conversation a request is about.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationScope {
    pub user_id: String,
    /// Only messages created at or after this instant belong to the live
    /// conversation.
    pub session_started_at: i64,
    pub theme_id: String,
    pub approach_id: Option<String>,
}

impl ConversationScope {
    fn matches(&self, message: &Message) -> bool {
        message.theme_id == self.theme_id
            && self
                .approach_id
                .as_ref()
                .is_none_or(|approach_id| message.approach_id.as_ref() == Some(approach_id))
    }
}

/// Messages of the live conversation, oldest first.
pub async fn load_conversation(core: &Arc<AppCore>, scope: &ConversationScope) -> Result<Vec<Message>> {
    let messages = core
        .storage
        .messages
        .list_by_user_since(&scope.user_id, scope.session_started_at)
        .with_context(|| format!("Failed to load conversation for {}", scope.user_id))?;

    Ok(messages.into_iter().filter(|m| scope.matches(m)).collect())
}

/// Store the user's message, ask the assistant, store its reply and return
/// the refreshed conversation.
///
/// The user's message is kept even when the completion call fails.
pub async fn send_message(
    core: &Arc<AppCore>,
    llm: &dyn LlmClient,
    scope: &ConversationScope,
    content: &str,
) -> Result<Vec<Message>> {
    let content = content.trim();
    if content.is_empty() {
        return Err(SoulmateError::validation("content", "Message is empty"));
    }

    let theme = themes::get_theme(core, &scope.theme_id).await?;
    let approach = match &scope.approach_id {
        Some(id) => Some(approaches::get_approach(core, id).await?),
        None => None,
    };

    let history = load_conversation(core, scope).await?;

    let user_message = Message::new(
        &scope.user_id,
        MessageRole::User,
        content,
        &scope.theme_id,
        scope.approach_id.clone(),
    );
    core.storage
        .messages
        .append(&user_message)
        .context("Failed to store user message")?;
    debug!(message_id = %user_message.id, theme_id = %scope.theme_id, "User message stored");

    if let Err(e) = profile::increment_prompt_count(core, &scope.user_id).await {
        warn!(user_id = %scope.user_id, error = %e, "Failed to increment prompt count");
    }

    let mut prompt = Vec::with_capacity(history.len() + 2);
    prompt.push(soulmate_ai::Message::system(system_prompt(&theme, approach.as_ref())));
    prompt.extend(history.iter().map(Message::to_llm_message));
    prompt.push(user_message.to_llm_message());

    let request = CompletionRequest::new(prompt)
        .with_temperature(core.settings.chat.temperature)
        .with_max_tokens(core.settings.chat.max_tokens);

    let response = llm.complete(request).await.map_err(|e| {
        warn!(
            provider = llm.provider(),
            model = llm.model(),
            error = %e,
            "Completion request failed"
        );
        SoulmateError::Upstream(e)
    })?;

    let created_at = chrono::Utc::now()
        .timestamp_millis()
        .max(user_message.created_at + 1);
    let reply = Message::new(
        &scope.user_id,
        MessageRole::Assistant,
        response.text(),
        &scope.theme_id,
        scope.approach_id.clone(),
    )
    .with_created_at(created_at);
    core.storage
        .messages
        .append(&reply)
        .context("Failed to store assistant message")?;

    info!(
        user_id = %scope.user_id,
        theme_id = %scope.theme_id,
        tokens = response.usage.as_ref().map(|u| u.total_tokens).unwrap_or(0),
        "Assistant replied"
    );

    load_conversation(core, scope).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::approaches::create_approach;
    use crate::test_support::test_core;
    use soulmate_ai::{MockLlmClient, MockStep, Role};

    const THEME_ID: &str = "00000000-0000-0000-0000-000000000004";

    fn scope(started_at: i64) -> ConversationScope {
        ConversationScope {
            user_id: "u-1".to_string(),
            session_started_at: started_at,
            theme_id: THEME_ID.to_string(),
            approach_id: None,
        }
    }

    #[tokio::test]
    async fn test_send_stores_both_messages_and_counts_prompt() {
        let (core, _temp_dir) = test_core().await;
        let llm = MockLlmClient::from_steps("mock", vec![MockStep::text("大丈夫ですよ")]);

        let conversation = send_message(&core, &llm, &scope(0), "  転職に悩んでいます ")
            .await
            .unwrap();

        assert_eq!(conversation.len(), 2);
        assert_eq!(conversation[0].role, MessageRole::User);
        assert_eq!(conversation[0].content, "転職に悩んでいます");
        assert_eq!(conversation[1].role, MessageRole::Assistant);
        assert_eq!(conversation[1].content, "大丈夫ですよ");
        assert!(conversation[1].created_at > conversation[0].created_at);

        let profile = core.storage.profiles.get("u-1").unwrap().unwrap();
        assert_eq!(profile.prompt_count, 1);

        let requests = llm.requests().await;
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.temperature, Some(0.7));
        assert_eq!(request.max_tokens, Some(1000));
        assert_eq!(request.messages[0].role, Role::System);
        assert!(request.messages[0].content.contains("仕事・就職のカウンセラー"));
        assert_eq!(request.messages[1].content, "転職に悩んでいます");
    }

    #[tokio::test]
    async fn test_history_is_sent_with_next_message() {
        let (core, _temp_dir) = test_core().await;
        let llm = MockLlmClient::from_steps(
            "mock",
            vec![MockStep::text("first reply"), MockStep::text("second reply")],
        );

        send_message(&core, &llm, &scope(0), "one").await.unwrap();
        let conversation = send_message(&core, &llm, &scope(0), "two").await.unwrap();
        assert_eq!(conversation.len(), 4);

        let requests = llm.requests().await;
        let contents: Vec<_> = requests[1].messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(&contents[1..], &["one", "first reply", "two"]);
        assert_eq!(requests[1].messages[2].role, Role::Assistant);
    }

    #[tokio::test]
    async fn test_completion_failure_keeps_user_message() {
        let (core, _temp_dir) = test_core().await;
        let llm = MockLlmClient::from_steps("mock", vec![MockStep::error("service down")]);

        let result = send_message(&core, &llm, &scope(0), "hello").await;
        assert!(matches!(result, Err(SoulmateError::Upstream(_))));

        let conversation = load_conversation(&core, &scope(0)).await.unwrap();
        assert_eq!(conversation.len(), 1);
        assert!(conversation[0].is_user());
        assert_eq!(core.storage.profiles.get("u-1").unwrap().unwrap().prompt_count, 1);
    }

    #[tokio::test]
    async fn test_empty_completion_stores_empty_reply() {
        let (core, _temp_dir) = test_core().await;
        let llm = MockLlmClient::from_steps("mock", vec![MockStep::Empty]);

        let conversation = send_message(&core, &llm, &scope(0), "hello").await.unwrap();
        assert_eq!(conversation.len(), 2);
        assert_eq!(conversation[1].content, "");
    }

    #[tokio::test]
    async fn test_rejects_blank_content_and_unknown_theme() {
        let (core, _temp_dir) = test_core().await;
        let llm = MockLlmClient::new("mock");

        let blank = send_message(&core, &llm, &scope(0), "   ").await;
        assert!(matches!(blank, Err(SoulmateError::Validation(_))));

        let mut unknown = scope(0);
        unknown.theme_id = "missing".to_string();
        let result = send_message(&core, &llm, &unknown, "hi").await;
        assert!(matches!(result, Err(SoulmateError::NotFound(_))));

        assert!(llm.requests().await.is_empty());
        assert_eq!(core.storage.messages.count_by_user("u-1").unwrap(), 0);
    }

    #[tokio::test]
    async fn test_conversation_respects_session_start_and_scope() {
        let (core, _temp_dir) = test_core().await;
        let other_theme = "00000000-0000-0000-0000-000000000001";

        let old = Message::new("u-1", MessageRole::User, "old", THEME_ID, None).with_created_at(1_000);
        let current = Message::new("u-1", MessageRole::User, "current", THEME_ID, None)
            .with_created_at(5_000);
        let elsewhere = Message::new("u-1", MessageRole::User, "elsewhere", other_theme, None)
            .with_created_at(6_000);
        for message in [&old, &current, &elsewhere] {
            core.storage.messages.append(message).unwrap();
        }

        let conversation = load_conversation(&core, &scope(5_000)).await.unwrap();
        assert_eq!(conversation.len(), 1);
        assert_eq!(conversation[0].content, "current");
    }

    #[tokio::test]
    async fn test_approach_filters_and_shapes_prompt() {
        let (core, _temp_dir) = test_core().await;
        let approach = create_approach(&core, "傾聴", "共感を重視します").await.unwrap();
        let llm = MockLlmClient::from_steps(
            "mock",
            vec![MockStep::text("plain"), MockStep::text("styled")],
        );

        send_message(&core, &llm, &scope(0), "no style").await.unwrap();

        let mut styled = scope(0);
        styled.approach_id = Some(approach.id.clone());
        let conversation = send_message(&core, &llm, &styled, "with style").await.unwrap();

        assert_eq!(conversation.len(), 2);
        assert!(
            conversation
                .iter()
                .all(|m| m.approach_id.as_deref() == Some(approach.id.as_str()))
        );
        let requests = llm.requests().await;
        assert!(requests[1].messages[0].content.contains("対話のスタイル：傾聴"));

        // Without an approach every message of the theme is shown.
        assert_eq!(load_conversation(&core, &scope(0)).await.unwrap().len(), 4);

        styled.approach_id = Some("missing".to_string());
        let result = send_message(&core, &llm, &styled, "x").await;
        assert!(matches!(result, Err(SoulmateError::NotFound(_))));
    }
}
