use axum::response::{IntoResponse, Json};

pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "service": "mango-n1ql",
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
