//! HTTP API
//!
//! Thin axum surface over the cascade, sampler, and reply chain. The store
//! is immutable and shared without coordination; per-session conversation
//! history is the only state behind a lock.

use crate::dataset::DestinationView;
use crate::error::AppError;
use crate::reply::{build_greeting, build_prompt, ReplyChain, MENTIONED_LIMIT};
use crate::search::SearchCascade;
use crate::session::{new_session_id, ConversationHistory, Role};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// Results requested from the cascade per chat turn
const CHAT_RESULTS: usize = 8;
/// Featured destinations shown in a greeting
const GREETING_FEATURED: usize = 6;

/// Shared application state
pub struct AppState {
    cascade: SearchCascade,
    replier: ReplyChain,
    sessions: Mutex<HashMap<String, ConversationHistory>>,
}

impl AppState {
    pub fn new(cascade: SearchCascade, replier: ReplyChain) -> Self {
        Self {
            cascade,
            replier,
            sessions: Mutex::new(HashMap::new()),
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/greet", post(greet))
        .route("/api/chat", post(chat))
        .route("/api/search", get(search))
        .route("/api/featured", get(featured))
        .with_state(state)
}

/// Serve the API until the process is stopped
pub async fn serve(state: Arc<AppState>, host: &str, port: u16) -> anyhow::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    info!("destinos API listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

#[derive(Debug, Deserialize)]
struct GreetRequest {
    session_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct GreetResponse {
    success: bool,
    session_id: String,
    message: String,
    mentioned_products: Vec<DestinationView>,
}

async fn greet(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GreetRequest>,
) -> Result<Json<GreetResponse>, ApiError> {
    let session_id = request.session_id.unwrap_or_else(new_session_id);

    let destinations = state.cascade.featured(GREETING_FEATURED);
    let greeting = build_greeting(state.cascade.destination_count(), &destinations);

    let mut sessions = state.sessions.lock().await;
    sessions
        .entry(session_id.clone())
        .or_default()
        .push(Role::Assistant, greeting.clone());

    Ok(Json(GreetResponse {
        success: true,
        session_id,
        message: greeting,
        mentioned_products: destinations,
    }))
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    session_id: Option<String>,
    message: String,
}

#[derive(Debug, Serialize)]
struct ChatResponse {
    success: bool,
    session_id: String,
    response: String,
    description: String,
    mentioned_products: Vec<DestinationView>,
}

async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let session_id = request.session_id.unwrap_or_else(new_session_id);
    let user_msg = request.message.trim().to_string();
    if user_msg.is_empty() {
        return Err(AppError::InvalidInput("message cannot be empty".to_string()).into());
    }

    let outcome = state.cascade.search(&user_msg, CHAT_RESULTS)?;

    // Record the turn and snapshot the recent window without holding the
    // lock across the provider call
    let recent = {
        let mut sessions = state.sessions.lock().await;
        let history = sessions.entry(session_id.clone()).or_default();
        history.push(Role::User, user_msg.clone());
        history.recent().to_vec()
    };

    let prompt = build_prompt(&user_msg, &recent, &outcome.destinations);
    let reply = state.replier.reply(&prompt).await?;

    {
        let mut sessions = state.sessions.lock().await;
        sessions
            .entry(session_id.clone())
            .or_default()
            .push(Role::Assistant, reply.clone());
    }

    let mut mentioned = outcome.destinations;
    mentioned.truncate(MENTIONED_LIMIT);

    Ok(Json(ChatResponse {
        success: true,
        session_id,
        response: reply,
        description: outcome.label,
        mentioned_products: mentioned,
    }))
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    q: Option<String>,
    limit: Option<usize>,
}

#[derive(Debug, Serialize)]
struct SearchResponse {
    success: bool,
    description: String,
    results: Vec<DestinationView>,
}

async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = params.q.unwrap_or_default();
    let limit = params.limit.unwrap_or(CHAT_RESULTS);

    let outcome = state.cascade.search(&query, limit)?;
    Ok(Json(SearchResponse {
        success: true,
        description: outcome.label,
        results: outcome.destinations,
    }))
}

#[derive(Debug, Deserialize)]
struct FeaturedParams {
    count: Option<usize>,
}

async fn featured(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FeaturedParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let count = params.count.unwrap_or(GREETING_FEATURED);
    Ok(Json(SearchResponse {
        success: true,
        description: "Destinos destacados de Colombia".to_string(),
        results: state.cascade.featured(count),
    }))
}

/// AppError wrapper carrying the HTTP mapping
#[derive(Debug)]
pub struct ApiError(AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = serde_json::json!({
            "success": false,
            "error": {
                "code": self.0.error_code(),
                "message": self.0.message(),
            },
        });
        (status, Json(body)).into_response()
    }
}
