use axum::http::StatusCode;

pub async fn health_handler() -> (StatusCode, &'static str) {
    (StatusCode::OK, "Service is healthy!")
}
