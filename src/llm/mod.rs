pub mod speech;
pub mod transcribe;
pub mod translate;

use crate::cli::Args;
use crate::error::TranslateError;

/// Connection settings shared by the three hosted-endpoint clients.
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    pub api_key: String,
    pub base_url: String,
    pub chat_model: String,
    pub transcription_model: String,
    pub speech_model: String,
    pub voice: String,
}

impl EndpointConfig {
    /// Fails with a credential error when no API key is configured. This is
    /// checked before any listener starts.
    pub fn from_args(args: &Args) -> Result<Self, TranslateError> {
        if args.openai_api_key.trim().is_empty() {
            return Err(
                TranslateError::Credential(
                    "OPENAI_API_KEY is not set; refusing to start".to_string()
                )
            );
        }
        Ok(Self {
            api_key: args.openai_api_key.clone(),
            base_url: args.openai_base_url.trim_end_matches('/').to_string(),
            chat_model: args.chat_model.clone(),
            transcription_model: args.transcription_model.clone(),
            speech_model: args.speech_model.clone(),
            voice: args.voice.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args_with_key(key: &str) -> Args {
        Args::parse_from(["traducteur", "--openai-api-key", key])
    }

    #[test]
    fn missing_api_key_is_a_credential_error() {
        let err = EndpointConfig::from_args(&args_with_key("")).unwrap_err();
        assert_eq!(err.category(), "credential");
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let mut args = args_with_key("sk-test");
        args.openai_base_url = "https://api.openai.com/".to_string();
        let config = EndpointConfig::from_args(&args).unwrap();
        assert_eq!(config.base_url, "https://api.openai.com");
    }
}
