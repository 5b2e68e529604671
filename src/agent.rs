use std::sync::Arc;

use log::info;

use crate::cli::Args;
use crate::error::TranslateError;
use crate::llm::EndpointConfig;
use crate::llm::speech::{ OpenAiSpeechClient, SpeechClient };
use crate::llm::transcribe::{ OpenAiTranscriptionClient, TranscriptionClient };
use crate::llm::translate::{ OpenAiTranslationClient, TranslationClient };

/// Shared bundle of hosted-endpoint clients plus the two behavior switches.
/// Built once at startup; every session holds an `Arc` of it.
pub struct TranslatorAgent {
    translation_client: Arc<dyn TranslationClient>,
    transcription_client: Arc<dyn TranscriptionClient>,
    speech_client: Arc<dyn SpeechClient>,
    chat_model: String,
    enable_speech: bool,
    history_context: bool,
}

impl TranslatorAgent {
    pub fn new(args: &Args) -> Result<Self, TranslateError> {
        let config = EndpointConfig::from_args(args)?;

        let translation_client = OpenAiTranslationClient::new(&config)?;
        let transcription_client = OpenAiTranscriptionClient::new(&config)?;
        let speech_client = OpenAiSpeechClient::new(&config)?;

        info!(
            "Endpoint clients configured: BaseURL={}, Chat={}, Transcription={}, Speech={}/{}",
            config.base_url,
            config.chat_model,
            config.transcription_model,
            config.speech_model,
            config.voice
        );

        Ok(Self {
            translation_client: Arc::new(translation_client),
            transcription_client: Arc::new(transcription_client),
            speech_client: Arc::new(speech_client),
            chat_model: config.chat_model,
            enable_speech: args.enable_speech,
            history_context: args.history_context,
        })
    }

    /// Assemble an agent from pre-built clients. Used by tests to substitute
    /// fakes for the hosted endpoints.
    pub fn with_clients(
        translation_client: Arc<dyn TranslationClient>,
        transcription_client: Arc<dyn TranscriptionClient>,
        speech_client: Arc<dyn SpeechClient>,
        enable_speech: bool,
        history_context: bool
    ) -> Self {
        Self {
            translation_client,
            transcription_client,
            speech_client,
            chat_model: "test".to_string(),
            enable_speech,
            history_context,
        }
    }

    pub fn translation_client(&self) -> Arc<dyn TranslationClient> {
        self.translation_client.clone()
    }

    pub fn transcription_client(&self) -> Arc<dyn TranscriptionClient> {
        self.transcription_client.clone()
    }

    pub fn speech_client(&self) -> Arc<dyn SpeechClient> {
        self.speech_client.clone()
    }

    pub fn chat_model(&self) -> &str {
        &self.chat_model
    }

    pub fn speech_enabled(&self) -> bool {
        self.enable_speech
    }

    pub fn history_context(&self) -> bool {
        self.history_context
    }
}
