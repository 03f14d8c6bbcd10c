use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::server::endpoints::{enrollment, status, students, timetable};

mod endpoints;
mod types;

pub use types::{AppState, EnrollmentRequest, NewStudentRequest, SharedStore};

/// Builds the API router.
///
/// # Parameters
/// - `app_state`: Shared registrar state handed to every handler.
///
/// # Returns
/// The router, with state applied.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let student_router = Router::new()
        .route("/students", post(students::post_student))
        .route("/students/:id", delete(students::delete_student))
        .route("/students/:id/courses", get(students::get_student_courses))
        .route("/students/:id/timetable", get(timetable::get_timetable));

    Router::new()
        .route("/health", get(status::get_health))
        .route("/courses", get(timetable::get_courses))
        .route("/enroll", post(enrollment::post_enroll))
        .route("/drop", post(enrollment::post_drop))
        .merge(student_router)
        .with_state(app_state)
}

/// Serves the API on `addr` until Ctrl+C is received.
pub async fn serve(app_state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, create_router(app_state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received, stopping server");
}
