//! Sistema de manejo de errores
//!
//! Este módulo define los tipos de error del sistema y su conversión a
//! respuestas HTTP. Los fallos de validación y de reglas de negocio llevan
//! un mensaje específico; los fallos del store se loguean en el borde y se
//! devuelven como error genérico, sin filtrar detalles internos.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    /// Campos faltantes o mal formados; acumula todos los mensajes aplicables.
    #[error("The provided data is invalid")]
    Validation(Vec<String>),

    /// Violación de exclusividad: el conductor o el vehículo ya tienen una
    /// asignación abierta.
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    /// Intento de cerrar un registro que ya estaba cerrado. Closed es terminal.
    #[error("This register was already closed at {due_date}.")]
    AlreadyClosed { due_date: String },

    /// Una asignación no puede terminar antes de empezar.
    #[error("Caution: due_date must be greater or equal than start_date.")]
    DueDateBeforeStart { start_date: String, due_date: String },

    /// Foreign key colgante reportada por el store al insertar.
    #[error("Foreign key constraint violation, {reference} with id {id} does not exist.")]
    ReferenceNotFound { reference: &'static str, id: i64 },

    /// Fallo de infraestructura; el detalle solo va al log.
    #[error("Database error: {0}")]
    Database(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::Validation(errors) => {
                warn!("Validation failed: {:?}", errors);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ErrorResponse {
                        error: "Validation Error".to_string(),
                        message: "The provided data is invalid".to_string(),
                        details: Some(json!({ "errors": errors })),
                        code: Some("VALIDATION_ERROR".to_string()),
                    },
                )
            }

            AppError::Conflict(msg) => {
                warn!("Conflict: {}", msg);
                (
                    StatusCode::FORBIDDEN,
                    ErrorResponse {
                        error: "Conflict".to_string(),
                        message: msg,
                        details: None,
                        code: Some("CONFLICT".to_string()),
                    },
                )
            }

            AppError::NotFound(msg) => {
                warn!("Resource not found: {}", msg);
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse {
                        error: "Not Found".to_string(),
                        message: msg,
                        details: None,
                        code: Some("NOT_FOUND".to_string()),
                    },
                )
            }

            AppError::AlreadyClosed { due_date } => {
                warn!("Register already closed at {}", due_date);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ErrorResponse {
                        error: "Validation Error".to_string(),
                        message: format!("This register was already closed at {}.", due_date),
                        details: Some(json!({ "due_date": due_date })),
                        code: Some("ALREADY_CLOSED".to_string()),
                    },
                )
            }

            AppError::DueDateBeforeStart { start_date, due_date } => {
                warn!(
                    "due_date {} is earlier than start_date {}",
                    due_date, start_date
                );
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ErrorResponse {
                        error: "Validation Error".to_string(),
                        message: "Caution: due_date must be greater or equal than start_date."
                            .to_string(),
                        details: Some(json!({
                            "start_date": start_date,
                            "due_date": due_date,
                        })),
                        code: Some("DUE_DATE_BEFORE_START".to_string()),
                    },
                )
            }

            AppError::ReferenceNotFound { reference, id } => {
                error!("Dangling foreign key: {} with id {}", reference, id);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Foreign Key Violation".to_string(),
                        message: format!(
                            "Foreign key constraint violation, {} with id {} does not exist.",
                            reference, id
                        ),
                        details: None,
                        code: Some("FOREIGN_KEY_VIOLATION".to_string()),
                    },
                )
            }

            AppError::Database(msg) => {
                error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Internal Server Error".to_string(),
                        message: "Internal Server Error".to_string(),
                        details: None,
                        code: Some("INTERNAL_ERROR".to_string()),
                    },
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;
