use crate::agent::TranslatorAgent;
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use axum::{ routing::get, Router, extract::State, response::{ Html, IntoResponse } };
use serde::Serialize;
use tower_http::cors::{ Any, CorsLayer };
use log::{ info, error };

const CHAT_PAGE: &str = include_str!("../../assets/index.html");

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    chat_model: String,
    speech_enabled: bool,
}

#[derive(Clone)]
struct AppState {
    agent: Arc<TranslatorAgent>,
}

pub async fn start_http_server(
    http_port: u16,
    agent: Arc<TranslatorAgent>
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let addr = format!("0.0.0.0:{}", http_port).parse::<SocketAddr>()?;
    info!("Starting HTTP server on: http://{}", addr);

    let app_state = AppState { agent };

    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    let app = Router::new()
        .route("/", get(chat_page_handler))
        .route("/api/health", get(health_handler))
        .layer(cors)
        .with_state(app_state);

    tokio::spawn(async move {
        match tokio::net::TcpListener::bind(addr).await {
            Ok(listener) => {
                if let Err(e) = axum::serve(listener, app.into_make_service()).await {
                    error!("HTTP server error: {}", e);
                }
            }
            Err(e) => {
                error!("Failed to bind HTTP server to {}: {}. Try a different port.", addr, e);
            }
        }
    });

    info!("HTTP server started");
    Ok(())
}

async fn chat_page_handler() -> impl IntoResponse {
    Html(CHAT_PAGE)
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    axum::Json(HealthResponse {
        status: "ok",
        chat_model: state.agent.chat_model().to_string(),
        speech_enabled: state.agent.speech_enabled(),
    })
}
