use axum::{extract::State, http::StatusCode, response::IntoResponse, response::Response, Json};
use std::sync::Arc;
use tracing::info;

use crate::server::types::{registrar_error_to_response, AppState, EnrollmentRequest};

/// POST /enroll
pub async fn post_enroll(
    State(s): State<Arc<AppState>>,
    Json(body): Json<EnrollmentRequest>,
) -> Response {
    info!("POST /enroll - {} into {}", body.student_id, body.course);

    match s.registrar.enroll(&body.student_id, &body.course) {
        Ok(receipt) => (StatusCode::OK, Json(receipt)).into_response(),
        Err(e) => registrar_error_to_response(e),
    }
}

/// POST /drop
pub async fn post_drop(
    State(s): State<Arc<AppState>>,
    Json(body): Json<EnrollmentRequest>,
) -> Response {
    info!("POST /drop - {} from {}", body.student_id, body.course);

    match s.registrar.drop_course(&body.student_id, &body.course) {
        Ok(receipt) => (StatusCode::OK, Json(receipt)).into_response(),
        Err(e) => registrar_error_to_response(e),
    }
}
