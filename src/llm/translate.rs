use async_trait::async_trait;
use reqwest::{ Client as HttpClient, header::{ HeaderMap, HeaderValue, CONTENT_TYPE, AUTHORIZATION } };
use serde::{ Deserialize, Serialize };

use super::EndpointConfig;
use crate::error::TranslateError;
use crate::models::chat::ConversationEntry;

/// The behavior lives entirely in this instruction: detect which of the two
/// languages the input is in and emit only the translation into the other one.
pub const TRANSLATOR_INSTRUCTION: &str =
    "You are an expert translator. Your task is to receive text and \
     determine if it is French or English. If it is French, translate it to English. \
     If it is English, translate it to French. Do not add any commentary, pleasantries, or \
     explanations. Just provide the raw translation.";

#[async_trait]
pub trait TranslationClient: Send + Sync {
    /// Translate the latest user utterance. `turns` is the role-tagged context
    /// sent alongside the fixed instruction; the caller decides whether that
    /// is the single new utterance or the whole conversation.
    async fn translate(&self, turns: &[ConversationEntry]) -> Result<String, TranslateError>;
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

fn build_messages(turns: &[ConversationEntry]) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(turns.len() + 1);
    messages.push(ChatMessage {
        role: "system".to_string(),
        content: TRANSLATOR_INSTRUCTION.to_string(),
    });
    for turn in turns {
        messages.push(ChatMessage {
            role: turn.role.as_str().to_string(),
            content: turn.content.clone(),
        });
    }
    messages
}

pub struct OpenAiTranslationClient {
    http: HttpClient,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiTranslationClient {
    pub fn new(config: &EndpointConfig) -> Result<Self, TranslateError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let http = HttpClient::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| TranslateError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            model: config.chat_model.clone(),
            base_url: config.base_url.clone(),
        })
    }
}

#[async_trait]
impl TranslationClient for OpenAiTranslationClient {
    async fn translate(&self, turns: &[ConversationEntry]) -> Result<String, TranslateError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let req = ChatRequest {
            model: self.model.clone(),
            messages: build_messages(turns),
            temperature: 1.0,
        };

        let resp = self.http
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&req)
            .send().await
            .map_err(TranslateError::from_http)?
            .error_for_status()
            .map_err(TranslateError::from_http)?
            .json::<ChatResponse>().await
            .map_err(TranslateError::from_http)?;

        let content = resp.choices
            .first()
            .ok_or_else(|| {
                TranslateError::Upstream("translation endpoint returned no choices".to_string())
            })?
            .message.content.clone();

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chat::Role;

    #[test]
    fn instruction_leads_the_message_list() {
        let turns = vec![ConversationEntry::user("Hello")];
        let messages = build_messages(&turns);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[0].content, TRANSLATOR_INSTRUCTION);
        assert_eq!(messages[1].role, "user");
        assert_eq!(messages[1].content, "Hello");
    }

    #[test]
    fn full_history_keeps_role_tags_in_order() {
        let turns = vec![
            ConversationEntry::user("Hello"),
            ConversationEntry::assistant("Bonjour"),
            ConversationEntry::user("Good night")
        ];
        let messages = build_messages(&turns);
        let roles: Vec<&str> = messages
            .iter()
            .map(|m| m.role.as_str())
            .collect();
        assert_eq!(roles, vec!["system", "user", "assistant", "user"]);
        assert_eq!(turns[1].role, Role::Assistant);
    }

    #[test]
    fn no_language_parameters_appear_in_the_request() {
        let json = serde_json
            ::to_string(
                &(ChatRequest {
                    model: "gpt-4o".to_string(),
                    messages: build_messages(&[ConversationEntry::user("Bonjour")]),
                    temperature: 1.0,
                })
            )
            .unwrap();
        assert!(!json.contains("source_language"));
        assert!(!json.contains("target_language"));
    }
}
