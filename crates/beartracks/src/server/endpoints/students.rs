use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::server::types::{registrar_error_to_response, AppState, NewStudentRequest};

/// GET /students/:id/courses
pub async fn get_student_courses(
    Path(id): Path<String>,
    State(s): State<Arc<AppState>>,
) -> Response {
    info!("GET /students/{}/courses", id);

    match s.registrar.enrolled_courses(&id) {
        Ok(courses) => (
            StatusCode::OK,
            Json(json!({ "student_id": id.trim(), "courses": courses })),
        )
            .into_response(),
        Err(e) => registrar_error_to_response(e),
    }
}

/// POST /students
pub async fn post_student(
    State(s): State<Arc<AppState>>,
    Json(body): Json<NewStudentRequest>,
) -> Response {
    info!("POST /students - {}", body.student_id);

    match s
        .registrar
        .add_student(&body.student_id, &body.faculty, &body.name)
    {
        Ok(student) => (StatusCode::CREATED, Json(student)).into_response(),
        Err(e) => registrar_error_to_response(e),
    }
}

/// DELETE /students/:id
///
/// Enrollment rows held by the student are kept.
pub async fn delete_student(Path(id): Path<String>, State(s): State<Arc<AppState>>) -> Response {
    info!("DELETE /students/{}", id);

    match s.registrar.remove_student(&id) {
        Ok(student) => (StatusCode::OK, Json(student)).into_response(),
        Err(e) => registrar_error_to_response(e),
    }
}
