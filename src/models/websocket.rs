use serde::{ Serialize, Deserialize };

use super::chat::{ ConversationEntry, InputMode, Role };

#[derive(Serialize, Deserialize, Debug)]
#[serde(tag = "type")]
pub enum ClientMessage {
    #[serde(rename = "text")] Text {
        content: String,
    },
    /// One audio interaction, whether from the file picker or the microphone
    /// recorder. `data` is base64-encoded bytes; `filename` exists only so the
    /// transcription endpoint can infer the container format.
    #[serde(rename = "audio")] Audio {
        data: String,
        filename: String,
        mode: InputMode,
    },
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(tag = "type")]
pub enum ServerMessage {
    #[serde(rename = "entry")] Entry {
        role: Role,
        content: String,
        transcribed: bool,
        timestamp: i64,
    },
    /// Base64-encoded synthesized audio for the latest translation.
    #[serde(rename = "speech")] Speech {
        data: String,
    },
    #[serde(rename = "mode")] Mode {
        mode: InputMode,
    },
    #[serde(rename = "error")] Error {
        category: String,
        message: String,
    },
    #[serde(rename = "processing")]
    Processing,
}

impl ServerMessage {
    pub fn entry(entry: &ConversationEntry) -> Self {
        ServerMessage::Entry {
            role: entry.role,
            content: entry.content.clone(),
            transcribed: entry.transcribed,
            timestamp: entry.timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_text_message_parses() {
        let raw = r#"{"type":"text","content":"Bonjour"}"#;
        match serde_json::from_str::<ClientMessage>(raw) {
            Ok(ClientMessage::Text { content }) => assert_eq!(content, "Bonjour"),
            other => panic!("unexpected parse result: {:?}", other),
        }
    }

    #[test]
    fn client_audio_message_parses() {
        let raw = r#"{"type":"audio","data":"AAAA","filename":"clip.webm","mode":"recording"}"#;
        match serde_json::from_str::<ClientMessage>(raw) {
            Ok(ClientMessage::Audio { data, filename, mode }) => {
                assert_eq!(data, "AAAA");
                assert_eq!(filename, "clip.webm");
                assert_eq!(mode, InputMode::Recording);
            }
            other => panic!("unexpected parse result: {:?}", other),
        }
    }

    #[test]
    fn server_entry_message_serializes_with_tag() {
        let entry = ConversationEntry::transcribed_user("Good morning");
        let json = serde_json::to_string(&ServerMessage::entry(&entry)).unwrap();
        assert!(json.contains(r#""type":"entry""#));
        assert!(json.contains(r#""role":"user""#));
        assert!(json.contains(r#""transcribed":true"#));
    }

    #[test]
    fn server_error_message_carries_category() {
        let msg = ServerMessage::Error {
            category: "upstream".to_string(),
            message: "quota exceeded".to_string(),
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains(r#""category":"upstream""#));
    }
}
