use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::server::types::{registrar_error_to_response, AppState};
use crate::timetable::render_timetable;

/// GET /students/:id/timetable
///
/// Returns the structured timetable together with its text rendering.
pub async fn get_timetable(Path(id): Path<String>, State(s): State<Arc<AppState>>) -> Response {
    info!("GET /students/{}/timetable", id);

    match s.registrar.timetable(&id) {
        Ok((student, timetable)) => {
            let response = json!({
                "student": student,
                "rendered": render_timetable(&timetable),
                "warnings": timetable.warnings(),
                "timetable": timetable,
            });
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => registrar_error_to_response(e),
    }
}

/// GET /courses
///
/// Lists the catalog with the seats still open in each course.
pub async fn get_courses(State(s): State<Arc<AppState>>) -> Response {
    info!("GET /courses");

    match s.registrar.course_listing() {
        Ok(listing) => (StatusCode::OK, Json(listing)).into_response(),
        Err(e) => registrar_error_to_response(e),
    }
}
