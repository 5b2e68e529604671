use async_trait::async_trait;
use reqwest::{ Client as HttpClient, header::AUTHORIZATION, multipart };
use serde::Deserialize;

use super::EndpointConfig;
use crate::error::TranslateError;

#[async_trait]
pub trait TranscriptionClient: Send + Sync {
    /// Turn raw audio bytes into the spoken text. The filename only carries a
    /// suffix so the endpoint can infer the container format.
    async fn transcribe(&self, audio: Vec<u8>, filename: &str) -> Result<String, TranslateError>;
}

#[derive(Deserialize)]
struct TranscriptionResponse {
    text: String,
}

pub struct OpenAiTranscriptionClient {
    http: HttpClient,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiTranscriptionClient {
    pub fn new(config: &EndpointConfig) -> Result<Self, TranslateError> {
        let http = HttpClient::builder()
            .build()
            .map_err(|e| TranslateError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            model: config.transcription_model.clone(),
            base_url: config.base_url.clone(),
        })
    }
}

#[async_trait]
impl TranscriptionClient for OpenAiTranscriptionClient {
    async fn transcribe(&self, audio: Vec<u8>, filename: &str) -> Result<String, TranslateError> {
        let url = format!("{}/v1/audio/transcriptions", self.base_url);
        let file_part = multipart::Part
            ::bytes(audio)
            .file_name(filename.to_string());
        let form = multipart::Form
            ::new()
            .part("file", file_part)
            .text("model", self.model.clone());

        let resp = self.http
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .multipart(form)
            .send().await
            .map_err(TranslateError::from_http)?
            .error_for_status()
            .map_err(TranslateError::from_http)?
            .json::<TranscriptionResponse>().await
            .map_err(TranslateError::from_http)?;

        Ok(resp.text)
    }
}
