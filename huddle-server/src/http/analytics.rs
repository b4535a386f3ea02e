use crate::recorder::{OnlineUser, SessionRow, StatsCounters};
use crate::room::RoomSnapshot;
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use tracing::error;

#[derive(Debug, Serialize)]
pub struct AnalyticsStats {
    #[serde(flatten)]
    pub counters: StatsCounters,
    #[serde(rename = "uniqueUsers")]
    pub unique_users: usize,
    #[serde(rename = "currentOnlineCount")]
    pub current_online_count: usize,
    #[serde(rename = "activeRooms")]
    pub active_rooms: usize,
}

#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    pub sessions: Vec<SessionRow>,
    pub stats: AnalyticsStats,
    #[serde(rename = "currentOnline")]
    pub current_online: Vec<OnlineUser>,
    pub rooms: Vec<RoomSnapshot>,
    pub timestamp: DateTime<Utc>,
}

pub async fn admin_analytics(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if !state.admin.is_authenticated(&headers) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Unauthorized" })),
        )
            .into_response();
    }

    let rooms = match state.hub.snapshot().await {
        Ok(rooms) => rooms,
        Err(e) => {
            error!("Analytics: room snapshot failed: {}", e);
            return internal_error();
        }
    };

    let summary = match state.recorder.summary().await {
        Ok(summary) => summary,
        Err(e) => {
            error!("Analytics: recorder summary failed: {}", e);
            return internal_error();
        }
    };

    let response = AnalyticsResponse {
        stats: AnalyticsStats {
            counters: summary.stats,
            unique_users: summary.unique_users,
            current_online_count: summary.online.len(),
            active_rooms: rooms.len(),
        },
        sessions: summary.sessions,
        current_online: summary.online,
        rooms,
        timestamp: Utc::now(),
    };

    Json(response).into_response()
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal Server Error" })),
    )
        .into_response()
}
