use async_trait::async_trait;
use reqwest::{ Client as HttpClient, header::{ HeaderMap, HeaderValue, CONTENT_TYPE, AUTHORIZATION } };
use serde::Serialize;

use super::EndpointConfig;
use crate::error::TranslateError;

#[async_trait]
pub trait SpeechClient: Send + Sync {
    /// Synthesize spoken audio for a translation. Returns encoded bytes in a
    /// playable format (mp3).
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, TranslateError>;
}

#[derive(Serialize)]
struct SpeechRequest {
    model: String,
    input: String,
    voice: String,
    response_format: String,
}

pub struct OpenAiSpeechClient {
    http: HttpClient,
    api_key: String,
    model: String,
    voice: String,
    base_url: String,
}

impl OpenAiSpeechClient {
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
            model: config.speech_model.clone(),
            voice: config.voice.clone(),
            base_url: config.base_url.clone(),
        })
    }
}

#[async_trait]
impl SpeechClient for OpenAiSpeechClient {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, TranslateError> {
        let url = format!("{}/v1/audio/speech", self.base_url);
        let req = SpeechRequest {
            model: self.model.clone(),
            input: text.to_string(),
            voice: self.voice.clone(),
            response_format: "mp3".to_string(),
        };

        let bytes = self.http
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&req)
            .send().await
            .map_err(TranslateError::from_http)?
            .error_for_status()
            .map_err(TranslateError::from_http)?
            .bytes().await
            .map_err(TranslateError::from_http)?;

        Ok(bytes.to_vec())
    }
}
