//! System prompt construction for the counselor assistant.

use crate::models::{Approach, Theme};

/// Build the system prompt for a theme and an optional approach.
pub fn system_prompt(theme: &Theme, approach: Option<&Approach>) -> String {
    let mut prompt = format!(
        "あなたは{}のカウンセラーとして対話を行うアシスタントです。\n\n\
         役割：{}\n\n\
         以下の点に注意して応答してください：\n\
         1. ユーザーの感情や状況に配慮しながら、適切なアドバイスを提供してください\n\
         2. 応答は必ず日本語で行ってください\n\
         3. 専門用語を使用する場合は、わかりやすく説明を加えてください",
        theme.name, theme.description
    );

    if let Some(approach) = approach {
        prompt.push_str(&format!(
            "\n\n対話のスタイル：{}\n{}",
            approach.name, approach.description
        ));
    }

    prompt
}
