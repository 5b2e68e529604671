use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Host address and port for the WebSocket session server to listen on.
    #[arg(long, env = "SERVER_ADDR", default_value = "127.0.0.1:4000")]
    pub server_addr: String,

    /// Port for the HTTP server that serves the chat page and health endpoint.
    #[arg(long, env = "HTTP_PORT", default_value = "3000")]
    pub http_port: u16,

    /// API key for the hosted translation/transcription/speech endpoints.
    /// Startup refuses to proceed without it.
    #[arg(long, env = "OPENAI_API_KEY", default_value = "")]
    pub openai_api_key: String,

    /// Base URL for the hosted endpoints.
    #[arg(long, env = "OPENAI_BASE_URL", default_value = "https://api.openai.com")]
    pub openai_base_url: String,

    /// Model name for the translation chat completion.
    #[arg(long, env = "CHAT_MODEL", default_value = "gpt-4o")]
    pub chat_model: String,

    /// Model name for audio transcription.
    #[arg(long, env = "TRANSCRIPTION_MODEL", default_value = "whisper-1")]
    pub transcription_model: String,

    /// Model name for speech synthesis of translations.
    #[arg(long, env = "SPEECH_MODEL", default_value = "tts-1")]
    pub speech_model: String,

    /// Voice identifier for speech synthesis.
    #[arg(long, env = "SPEECH_VOICE", default_value = "alloy")]
    pub voice: String,

    /// Synthesize and send audio for each successful translation.
    #[arg(long, env = "ENABLE_SPEECH", default_value = "false")]
    pub enable_speech: bool,

    /// Send the full accumulated conversation as context to the translation
    /// call instead of only the latest utterance.
    #[arg(long, env = "HISTORY_CONTEXT", default_value = "false")]
    pub history_context: bool,
}
