use std::sync::Arc;

use log::warn;

use crate::agent::TranslatorAgent;
use crate::error::TranslateError;
use crate::models::chat::{ Conversation, ConversationEntry, InputMode };

/// Everything one interaction produced: the entries appended to the
/// conversation, optional synthesized audio, and the error if a step failed.
/// Failures are surfaced here rather than propagated so the session stays
/// usable for the next input.
pub struct Outcome {
    pub entries: Vec<ConversationEntry>,
    pub speech: Option<Vec<u8>>,
    pub error: Option<TranslateError>,
}

impl Outcome {
    fn failed(error: TranslateError) -> Self {
        Self { entries: Vec::new(), speech: None, error: Some(error) }
    }
}

/// One user's interactive session. Owns the append-only conversation and the
/// cosmetic active-mode indicator; constructed when the connection opens and
/// dropped when it closes. There is no terminal state, the session idles
/// between inputs.
pub struct Session {
    agent: Arc<TranslatorAgent>,
    conversation: Conversation,
    active_mode: InputMode,
}

impl Session {
    pub fn new(agent: Arc<TranslatorAgent>, id: String) -> Self {
        Self {
            agent,
            conversation: Conversation::new(id),
            active_mode: InputMode::Text,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn active_mode(&self) -> InputMode {
        self.active_mode
    }

    /// Typed-text interaction: the user entry is appended before the
    /// translation call, so it survives a translation failure.
    pub async fn submit_text(&mut self, text: &str) -> Outcome {
        self.active_mode = InputMode::Text;

        let user = ConversationEntry::user(text);
        self.conversation.push(user.clone());

        match self.translate_latest().await {
            Ok((assistant, speech)) =>
                Outcome { entries: vec![user, assistant], speech, error: None },
            Err(e) => Outcome { entries: vec![user], speech: None, error: Some(e) },
        }
    }

    /// Audio interaction (upload or recording). Transcription failure aborts
    /// before anything is appended; translation failure leaves the
    /// transcription entry in place with no assistant entry.
    pub async fn submit_audio(
        &mut self,
        audio: Vec<u8>,
        filename: &str,
        mode: InputMode
    ) -> Outcome {
        self.active_mode = mode;

        let transcript = match
            self.agent.transcription_client().transcribe(audio, filename).await
        {
            Ok(text) => text,
            Err(e) => {
                return Outcome::failed(e);
            }
        };

        let user = ConversationEntry::transcribed_user(&transcript);
        self.conversation.push(user.clone());

        match self.translate_latest().await {
            Ok((assistant, speech)) =>
                Outcome { entries: vec![user, assistant], speech, error: None },
            Err(e) => Outcome { entries: vec![user], speech: None, error: Some(e) },
        }
    }

    /// Translate with the latest user entry already in the conversation.
    /// Context mode decides whether the call carries the whole conversation
    /// or only that single utterance. A speech-synthesis failure never undoes
    /// the recorded translation, it only suppresses playback.
    async fn translate_latest(
        &mut self
    ) -> Result<(ConversationEntry, Option<Vec<u8>>), TranslateError> {
        let translation_client = self.agent.translation_client();
        let translated = {
            let entries = self.conversation.entries();
            let turns = if self.agent.history_context() {
                entries
            } else {
                &entries[entries.len() - 1..]
            };
            translation_client.translate(turns).await?
        };

        let assistant = ConversationEntry::assistant(&translated);
        self.conversation.push(assistant.clone());

        let speech = if self.agent.speech_enabled() {
            match self.agent.speech_client().synthesize(&translated).await {
                Ok(bytes) => Some(bytes),
                Err(e) => {
                    warn!(
                        "Speech synthesis failed for conversation {}, playback skipped: {}",
                        self.conversation.id,
                        e
                    );
                    None
                }
            }
        } else {
            None
        };

        Ok((assistant, speech))
    }
}
