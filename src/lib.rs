pub mod agent;
pub mod cli;
pub mod error;
pub mod llm;
pub mod models;
pub mod server;
pub mod session;

use agent::TranslatorAgent;
use cli::Args;
use log::info;
use server::Server;
use std::error::Error;
use std::sync::Arc;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    info!("--- Core Configuration ---");
    info!("Session Server Address: {}", args.server_addr);
    info!("HTTP Port: {}", args.http_port);
    info!("Endpoint Base URL: {}", args.openai_base_url);
    info!("Chat Model: {}", args.chat_model);
    info!("Transcription Model: {}", args.transcription_model);
    info!("Speech Model: {}", args.speech_model);
    info!("Speech Voice: {}", args.voice);
    info!("Speech Enabled: {}", args.enable_speech);
    info!("History Context: {}", args.history_context);
    info!("-------------------------");

    let agent = Arc::new(TranslatorAgent::new(&args)?);
    let addr = args.server_addr.clone();
    info!("Starting server on: {}", addr);
    let server = Server::new(addr, agent, args);
    server.run().await?;

    Ok(())
}
