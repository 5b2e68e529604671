pub mod api;
pub mod websocket;

use crate::agent::TranslatorAgent;
use crate::cli::Args;
use std::error::Error;
use std::sync::Arc;

pub struct Server {
    addr: String,
    agent: Arc<TranslatorAgent>,
    args: Args,
}

impl Server {
    pub fn new(addr: String, agent: Arc<TranslatorAgent>, args: Args) -> Self {
        Self { addr, agent, args }
    }

    pub async fn run(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        api::start_http_server(self.args.http_port, self.agent.clone()).await?;
        websocket::start_ws_server(&self.addr, self.agent.clone()).await?;
        Ok(())
    }
}
