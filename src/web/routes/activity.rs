use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::services::activities_service::{self, SignupError, UnregisterError};
use crate::store::ActivityStore;

#[derive(Debug, Deserialize)]
pub struct ParticipantQuery {
    pub email: String,
}

fn error_body(status: StatusCode, detail: String) -> (StatusCode, Json<Value>) {
    // The frontend reads `detail` from error payloads.
    (status, Json(serde_json::json!({ "detail": detail })))
}

pub async fn signup_handler(
    Path(activity_name): Path<String>,
    Query(query): Query<ParticipantQuery>,
    State(store): State<ActivityStore>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match activities_service::signup(&store, &activity_name, &query.email) {
        Ok(message) => Ok(Json(serde_json::json!({ "message": message }))),
        Err(e) => {
            warn!(activity = %activity_name, email = %query.email, "signup rejected: {}", e);
            let status = match e {
                SignupError::ActivityNotFound => StatusCode::NOT_FOUND,
                SignupError::AlreadyRegistered | SignupError::Full => StatusCode::BAD_REQUEST,
            };
            Err(error_body(status, e.to_string()))
        }
    }
}

pub async fn unregister_handler(
    Path(activity_name): Path<String>,
    Query(query): Query<ParticipantQuery>,
    State(store): State<ActivityStore>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match activities_service::unregister(&store, &activity_name, &query.email) {
        Ok(message) => Ok(Json(serde_json::json!({ "message": message }))),
        Err(e) => {
            warn!(activity = %activity_name, email = %query.email, "unregister rejected: {}", e);
            let status = match e {
                UnregisterError::ActivityNotFound | UnregisterError::NotRegistered => {
                    StatusCode::NOT_FOUND
                }
            };
            Err(error_body(status, e.to_string()))
        }
    }
}
