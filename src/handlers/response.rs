use axum::http::StatusCode;
use axum::response::Json;
use serde::Serialize;

/// Body of every successful API response.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

pub type ApiJson<T> = Json<ApiResponse<T>>;

pub fn ok<T: Serialize>(data: T) -> ApiJson<T> {
    Json(ApiResponse {
        data,
        message: None,
    })
}

pub fn ok_with_message<T: Serialize>(data: T, message: impl Into<String>) -> ApiJson<T> {
    Json(ApiResponse {
        data,
        message: Some(message.into()),
    })
}

pub fn created<T: Serialize>(data: T, message: impl Into<String>) -> (StatusCode, ApiJson<T>) {
    (StatusCode::CREATED, ok_with_message(data, message))
}
