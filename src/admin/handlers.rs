use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

use crate::admin::AdminState;
use crate::routing::RouteSummary;

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub routes: usize,
    pub enabled_routes: usize,
}

pub async fn get_status(State(state): State<AdminState>) -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        routes: state.router.len(),
        enabled_routes: state.router.enabled_count(),
    })
}

pub async fn get_routes(State(state): State<AdminState>) -> Json<Vec<RouteSummary>> {
    Json(state.router.summaries())
}

pub async fn get_route_health(
    State(state): State<AdminState>,
    Path(index): Path<usize>,
) -> Response {
    let Some(route) = state.router.get(index) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Route not found", "index": index })),
        )
            .into_response();
    };

    Json(state.prober.probe(route).await).into_response()
}
