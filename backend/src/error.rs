//! Error handling for the R4C robot factory
//!
//! Provides consistent error responses in English and Russian

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::FieldErrors;
use thiserror::Error;

use crate::services::serial_pool::SerialPoolError;

/// Field key under which serial allocation failures are reported
pub const SERIAL_FILE_FIELD: &str = "serial_file";

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Invalid input: {0:?}")]
    InvalidInput(FieldErrors),

    #[error("Invalid request body: {0}")]
    InvalidRequestBody(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Serial allocation errors
    #[error("Serial code allocation failed: {0}")]
    SerialFile(#[from] SerialPoolError),

    // Reporting errors
    #[error("Weekly report is not available")]
    ReportUnavailable,

    // Database errors
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message_en: String,
    pub message_ru: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldErrors>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::InvalidInput(fields) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message_en: "Robot data is invalid".to_string(),
                    message_ru: "Некорректные данные о роботе".to_string(),
                    fields: Some(fields.clone()),
                },
            ),
            AppError::InvalidRequestBody(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "INVALID_REQUEST_BODY".to_string(),
                    message_en: format!("Request body could not be read: {}", msg),
                    message_ru: format!("Ошибка конвертации данных запроса: {}", msg),
                    fields: None,
                },
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "NOT_FOUND".to_string(),
                    message_en: format!("{} not found", resource),
                    message_ru: format!("{} не найден", resource),
                    fields: None,
                },
            ),
            AppError::SerialFile(err) => {
                let (message_en, message_ru) = match err {
                    SerialPoolError::Missing { .. } => (
                        "Robot was not registered: the serial code file was not found",
                        "Не удалось зарегистрировать робота, так как не найден файл с серийными номерами.",
                    ),
                    SerialPoolError::Exhausted => (
                        "Robot was not registered: no serial codes are left",
                        "Не удалось зарегистрировать робота, так как закончились серийные номера.",
                    ),
                    _ => (
                        "Robot was not registered: the serial code file could not be read",
                        "Не удалось зарегистрировать робота, так как файл с серийными номерами повреждён.",
                    ),
                };
                let mut fields = FieldErrors::new();
                fields.insert(SERIAL_FILE_FIELD.to_string(), vec![message_en.to_string()]);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorDetail {
                        code: "SERIAL_FILE_ERROR".to_string(),
                        message_en: message_en.to_string(),
                        message_ru: message_ru.to_string(),
                        fields: Some(fields),
                    },
                )
            }
            AppError::ReportUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorDetail {
                    code: "REPORT_UNAVAILABLE".to_string(),
                    message_en: "The weekly production report could not be generated".to_string(),
                    message_ru: "Ошибка при формировании недельного отчёта".to_string(),
                    fields: None,
                },
            ),
            AppError::DatabaseError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "DATABASE_ERROR".to_string(),
                    message_en: "A database error occurred".to_string(),
                    message_ru: "Ошибка базы данных".to_string(),
                    fields: None,
                },
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message_en: msg.clone(),
                    message_ru: "Внутренняя ошибка сервера".to_string(),
                    fields: None,
                },
            ),
        };

        // Log the error for debugging
        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::debug!("Rejected request: {:?}", self);
        }

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
