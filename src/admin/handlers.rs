use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::Value;
use crate::admin::AdminState;
use crate::orchestrator::{Action, ActionRequest, ActionResponse};

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
}

pub async fn get_health() -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
    })
}

/// `POST /dr/action` with `{"draction": "..."}`.
///
/// Malformed bodies still get a structured 400 from the orchestrator.
pub async fn post_action(
    State(state): State<AdminState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> (StatusCode, Json<ActionResponse>) {
    let request = match payload {
        Ok(Json(body)) => ActionRequest::from_value(&body),
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Malformed action request body");
            ActionRequest::default()
        }
    };
    let draction = request.draction.unwrap_or_default();
    let response = state.orchestrator.execute(&draction).await;
    into_reply(response)
}

/// `GET /dr/status`, same as posting `{"draction": "status"}`.
pub async fn get_dr_status(
    State(state): State<AdminState>,
) -> (StatusCode, Json<ActionResponse>) {
    let response = state.orchestrator.dispatch(Action::Status).await;
    into_reply(response)
}

fn into_reply(response: ActionResponse) -> (StatusCode, Json<ActionResponse>) {
    let status = StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(response))
}
