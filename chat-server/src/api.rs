//! HTTP routes for the chat page
//!
//! `GET /` renders an empty conversation, `POST /chat` renders one exchange.
//! The built `chat-ui` package and any other assets live under `/static`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::{Form, Json, Router};
use serde_json::json;
use shared_types::{ChatForm, Transcript, CHAT_ROUTE};
use tower_http::services::ServeDir;

use crate::app_state::AppState;
use crate::page::render_page;

pub fn router(state: AppState) -> Router {
    let static_files = ServeDir::new(state.static_dir());
    Router::new()
        .route("/", get(index))
        .route(CHAT_ROUTE, get(index).post(chat))
        .route("/health", get(health_check))
        .nest_service("/static", static_files)
        .with_state(state)
}

pub async fn index() -> Html<String> {
    Html(render_page(&Transcript::default()))
}

/// Ask the backend for a reply and render the exchange. Provider failures
/// still render a page, with the error in place of the reply.
pub async fn chat(State(state): State<AppState>, Form(form): Form<ChatForm>) -> Html<String> {
    let user_message = form.user_message;
    if user_message.trim().is_empty() {
        return index().await;
    }

    let reply = match state.backend().reply(&user_message).await {
        Ok(reply) => {
            tracing::debug!(chars = reply.len(), "Reply received");
            reply
        }
        Err(e) => {
            tracing::warn!(error = %e, "Chat completion failed");
            format!("Error: {e}")
        }
    };

    Html(render_page(&Transcript::exchange(user_message, reply)))
}

pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "chat-server",
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
}
