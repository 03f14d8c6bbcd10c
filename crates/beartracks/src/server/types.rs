use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{error, info, Level};

use crate::error::RegistrarError;
use crate::registrar::Registrar;
use crate::store::RecordStore;

/// Store type the HTTP front end runs against.
pub type SharedStore = Box<dyn RecordStore + Send>;

/// State shared by every request handler.
pub struct AppState {
    pub registrar: Registrar<SharedStore>,
}

impl AppState {
    pub fn new(registrar: Registrar<SharedStore>) -> Self {
        Self { registrar }
    }
}

/// Body returned for every failed request.
#[derive(Debug, Serialize)]
pub struct ApiErrorType {
    #[serde(skip)]
    status: StatusCode,
    error: ApiErrorBody,
}

#[derive(Debug, Serialize)]
struct ApiErrorBody {
    status: u16,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl From<(StatusCode, &str, Option<String>)> for ApiErrorType {
    fn from((status, message, details): (StatusCode, &str, Option<String>)) -> Self {
        Self {
            status,
            error: ApiErrorBody {
                status: status.as_u16(),
                message: message.to_string(),
                details,
            },
        }
    }
}

impl IntoResponse for ApiErrorType {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Maps a registrar error onto its HTTP status.
pub fn registrar_error_status(error: &RegistrarError) -> StatusCode {
    match error {
        RegistrarError::UnknownCourse { .. } | RegistrarError::UnknownStudent { .. } => {
            StatusCode::NOT_FOUND
        }
        RegistrarError::ScheduleConflict { .. }
        | RegistrarError::AtCapacity { .. }
        | RegistrarError::AlreadyEnrolled { .. }
        | RegistrarError::NotEnrolled { .. }
        | RegistrarError::DuplicateStudent { .. } => StatusCode::CONFLICT,
        RegistrarError::InvalidStudentId { .. }
        | RegistrarError::UnknownFaculty { .. }
        | RegistrarError::InvalidName { .. } => StatusCode::BAD_REQUEST,
        RegistrarError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Level a failed request is logged at: store failures are errors, the rest
/// are ordinary outcomes of user input.
pub fn registrar_error_level(error: &RegistrarError) -> Level {
    match error {
        RegistrarError::Store(_) => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Converts a registrar error into an API response.
pub fn registrar_error_to_response(error: RegistrarError) -> Response {
    let status = registrar_error_status(&error);
    if registrar_error_level(&error) == Level::ERROR {
        error!("Request failed: {}", error);
    } else {
        info!("Request rejected with {}: {}", status, error);
    }
    let message = match &error {
        RegistrarError::Store(_) => "Record store failure",
        e if e.is_not_found() => "Not found",
        e if e.is_rejection() => "Request rejected",
        _ => "Invalid request",
    };

    ApiErrorType::from((status, message, Some(error.to_string()))).into_response()
}

/// Body of `POST /enroll` and `POST /drop`.
#[derive(Debug, Clone, Deserialize)]
pub struct EnrollmentRequest {
    pub student_id: String,
    pub course: String,
}

/// Body of `POST /students`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewStudentRequest {
    pub student_id: String,
    pub faculty: String,
    pub name: String,
}
