use std::sync::Arc;

use soulmate_ai::{MockLlmClient, MockStep};
use soulmate_core::services::chat::{ConversationScope, load_conversation, send_message};
use soulmate_core::services::{auth, history, profile};
use soulmate_core::{AppCore, CoreSettings};

const THEME_ID: &str = "00000000-0000-0000-0000-000000000003";

async fn core(dir: &tempfile::TempDir) -> Arc<AppCore> {
    let db_path = dir.path().join("soulmate.db");
    Arc::new(
        AppCore::new(db_path.to_str().unwrap(), CoreSettings::default())
            .await
            .unwrap(),
    )
}

#[tokio::test]
async fn sign_in_chat_restart_and_review_history() {
    let dir = tempfile::tempdir().unwrap();
    let core = core(&dir).await;

    auth::sign_up(&core, "hanako@example.com", "secret1", Some("secret1"))
        .await
        .unwrap();
    let signed_in = auth::sign_in(&core, "hanako@example.com", "secret1")
        .await
        .unwrap();
    let context = auth::authenticate(&core, &signed_in.token).await.unwrap();

    let llm = MockLlmClient::from_steps(
        "mock",
        vec![MockStep::text("貯金の目標を決めましょう"), MockStep::text("いいですね")],
    );
    let scope = ConversationScope {
        user_id: context.user_id.clone(),
        session_started_at: context.session_started_at,
        theme_id: THEME_ID.to_string(),
        approach_id: None,
    };

    send_message(&core, &llm, &scope, "貯金が苦手です").await.unwrap();
    let conversation = send_message(&core, &llm, &scope, "月一万円から始めます")
        .await
        .unwrap();
    assert_eq!(conversation.len(), 4);

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    auth::restart_session(&core, &context.session_id).await.unwrap();
    let context = auth::authenticate(&core, &signed_in.token).await.unwrap();
    let fresh = ConversationScope {
        session_started_at: context.session_started_at,
        ..scope
    };
    assert!(load_conversation(&core, &fresh).await.unwrap().is_empty());

    let sessions = history::load_history(&core, &context.user_id).await.unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].theme_name, "お金に関して");
    assert_eq!(sessions[0].exchanges.len(), 2);
    assert_eq!(sessions[0].more_count, 1);
    assert_eq!(
        sessions[0].exchanges[0].reply.as_ref().unwrap().content,
        "貯金の目標を決めましょう"
    );

    let view = profile::get_profile(&core, &context.user_id).await.unwrap();
    assert_eq!(view.profile.prompt_count, 2);
    assert!(view.needs_setup);
}
