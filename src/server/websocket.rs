use crate::agent::TranslatorAgent;
use crate::models::chat::InputMode;
use crate::models::websocket::{ ClientMessage, ServerMessage };
use crate::session::{ Outcome, Session };

use std::error::Error;
use std::net::SocketAddr;
use std::num::NonZeroU32;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::io::{ AsyncRead, AsyncWrite };

use tokio_tungstenite::{ accept_async, WebSocketStream };
use tokio_tungstenite::tungstenite::protocol::Message;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use lazy_static::lazy_static;
use governor::{ RateLimiter, Quota, state::{ InMemoryState, NotKeyed }, clock::DefaultClock };

use log::{ info, warn, error };
use futures::stream::SplitSink;
use futures::{ SinkExt, StreamExt };
use uuid::Uuid;

// Audio interactions arrive base64-encoded inside a JSON text frame, so the
// cap has to admit a few minutes of compressed audio.
const MAX_MESSAGE_SIZE: usize = 8 * 1024 * 1024;

lazy_static! {
    static ref CONNECTION_LIMITER: RateLimiter<NotKeyed, InMemoryState, DefaultClock> =
        RateLimiter::direct(Quota::per_second(NonZeroU32::new(10).unwrap()));
}

pub async fn start_ws_server(
    addr: &str,
    agent: Arc<TranslatorAgent>
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let listener = TcpListener::bind(addr).await?;
    info!("WS session server listening on: {}", addr);

    loop {
        let (stream, peer) = listener.accept().await?;

        if CONNECTION_LIMITER.check().is_err() {
            warn!("Global connection rate limit exceeded for {}. Dropping connection.", peer);
            continue;
        }

        info!("Incoming connection from: {}", peer);
        let agent_clone = Arc::clone(&agent);

        tokio::spawn(async move {
            match accept_async(stream).await {
                Ok(ws) => {
                    handle_connection(peer, ws, agent_clone).await;
                }
                Err(e) => {
                    error!("Handshake failed for {}: {}", peer, e);
                }
            }
        });
    }
}

async fn send_message<S>(
    tx: &mut SplitSink<WebSocketStream<S>, Message>,
    peer: SocketAddr,
    msg: &ServerMessage
) -> bool
    where S: AsyncRead + AsyncWrite + Unpin
{
    let json = match serde_json::to_string(msg) {
        Ok(j) => j,
        Err(e) => {
            error!("Failed to serialize server message for {}: {}", peer, e);
            return false;
        }
    };
    if let Err(e) = tx.send(Message::Text(json)).await {
        error!("Error sending message to {}: {}", peer, e);
        return false;
    }
    true
}

async fn send_outcome<S>(
    tx: &mut SplitSink<WebSocketStream<S>, Message>,
    peer: SocketAddr,
    outcome: &Outcome,
    active_mode: InputMode
) -> bool
    where S: AsyncRead + AsyncWrite + Unpin
{
    for entry in &outcome.entries {
        if !send_message(tx, peer, &ServerMessage::entry(entry)).await {
            return false;
        }
    }
    if let Some(audio) = &outcome.speech {
        let msg = ServerMessage::Speech { data: BASE64.encode(audio) };
        if !send_message(tx, peer, &msg).await {
            return false;
        }
    }
    if !send_message(tx, peer, &(ServerMessage::Mode { mode: active_mode })).await {
        return false;
    }
    if let Some(err) = &outcome.error {
        let msg = ServerMessage::Error {
            category: err.category().to_string(),
            message: err.to_string(),
        };
        if !send_message(tx, peer, &msg).await {
            return false;
        }
    }
    true
}

/// One connection is one session: the conversation is created here and dropped
/// when the loop exits.
pub async fn handle_connection<S>(
    peer: SocketAddr,
    websocket: WebSocketStream<S>,
    agent: Arc<TranslatorAgent>
)
    where S: AsyncRead + AsyncWrite + Unpin
{
    info!("New WebSocket connection: {}", peer);

    let (mut tx, mut rx) = websocket.split();
    let session_id = Uuid::new_v4().to_string();
    info!("Assigned session ID {} to {}", session_id, peer);
    let mut session = Session::new(agent, session_id.clone());

    while let Some(msg) = rx.next().await {
        match msg {
            Ok(message) => {
                if message.len() > MAX_MESSAGE_SIZE {
                    warn!(
                        "Message from {} exceeds size limit ({} > {})",
                        peer,
                        message.len(),
                        MAX_MESSAGE_SIZE
                    );
                    let error_msg = ServerMessage::Error {
                        category: "request".to_string(),
                        message: "Message too large".to_string(),
                    };
                    let _ = send_message(&mut tx, peer, &error_msg).await;
                    break;
                }

                match message {
                    Message::Text(text) => {
                        match serde_json::from_str::<ClientMessage>(&text) {
                            Ok(ClientMessage::Text { content }) => {
                                if !send_message(&mut tx, peer, &ServerMessage::Processing).await {
                                    break;
                                }
                                let outcome = session.submit_text(&content).await;
                                if
                                    !send_outcome(
                                        &mut tx,
                                        peer,
                                        &outcome,
                                        session.active_mode()
                                    ).await
                                {
                                    break;
                                }
                            }
                            Ok(ClientMessage::Audio { data, filename, mode }) => {
                                let audio = match BASE64.decode(&data) {
                                    Ok(bytes) => bytes,
                                    Err(e) => {
                                        warn!("Bad audio payload from {}: {}", peer, e);
                                        let error_msg = ServerMessage::Error {
                                            category: "request".to_string(),
                                            message: format!("Invalid audio encoding: {}", e),
                                        };
                                        if !send_message(&mut tx, peer, &error_msg).await {
                                            break;
                                        }
                                        continue;
                                    }
                                };
                                if !send_message(&mut tx, peer, &ServerMessage::Processing).await {
                                    break;
                                }
                                let outcome = session.submit_audio(audio, &filename, mode).await;
                                if
                                    !send_outcome(
                                        &mut tx,
                                        peer,
                                        &outcome,
                                        session.active_mode()
                                    ).await
                                {
                                    break;
                                }
                            }
                            Err(e) => {
                                error!("Failed to parse message from {}: {}", peer, e);
                                let error_msg = ServerMessage::Error {
                                    category: "request".to_string(),
                                    message: format!("Failed to parse message: {}", e),
                                };
                                if !send_message(&mut tx, peer, &error_msg).await {
                                    break;
                                }
                            }
                        }
                    }
                    Message::Close(_) => {
                        info!("Received close frame from {}", peer);
                        break;
                    }
                    Message::Ping(ping_data) => {
                        if tx.send(Message::Pong(ping_data)).await.is_err() {
                            error!("Failed to send pong to {}", peer);
                            break;
                        }
                    }
                    Message::Pong(_) => {/* Usually ignore pongs */}
                    Message::Binary(_) => {
                        warn!("Ignoring binary message from {}", peer);
                    }
                    Message::Frame(_) => {/* Usually ignore raw frames */}
                }
            }
            Err(e) => {
                match e {
                    | tokio_tungstenite::tungstenite::Error::ConnectionClosed
                    | tokio_tungstenite::tungstenite::Error::Protocol(_)
                    | tokio_tungstenite::tungstenite::Error::Utf8 => {
                        info!("WebSocket connection closed or protocol error for {}: {}", peer, e);
                    }
                    tokio_tungstenite::tungstenite::Error::Io(ref io_err) if
                        io_err.kind() == std::io::ErrorKind::ConnectionReset
                    => {
                        info!("WebSocket connection reset by peer {}", peer);
                    }
                    _ => {
                        error!("Error receiving message from {}: {}", peer, e);
                    }
                }
                break;
            }
        }
    }
    info!("WebSocket connection closed for {} (Session ID: {})", peer, session_id);
}
