//! Validador de asignaciones
//!
//! Chequeos de forma y temporales para abrir y cerrar asignaciones. Todos
//! los chequeos aplicables corren y acumulan sus mensajes en orden, así el
//! caller ve cada violación en una sola respuesta en lugar de descubrirlas
//! de a una. El chequeo `due_date >= start_date` no vive acá: necesita la
//! fila existente y por eso lo hace el service después del fetch.

use chrono::{DateTime, Utc};

use crate::dto::assignment_dto::{CloseAssignmentRequest, OpenAssignmentRequest};
use crate::utils::validation::parse_datetime;

/// Payload de apertura ya validado y parseado
#[derive(Debug, Clone)]
pub struct ValidatedOpen {
    pub driver_id: i64,
    pub vehicle_id: i64,
    pub start_date: DateTime<Utc>,
    pub reason: String,
}

/// Payload de cierre ya validado y parseado
#[derive(Debug, Clone, Copy)]
pub struct ValidatedClose {
    pub id: i64,
    pub due_date: DateTime<Utc>,
}

/// Validar un request de apertura. Sin efectos; devuelve el payload parseado
/// o la lista ordenada de mensajes.
pub fn validate_open(request: &OpenAssignmentRequest) -> Result<ValidatedOpen, Vec<String>> {
    let mut errors = Vec::new();

    if request.driver_id.is_none() {
        errors.push("You must inform a valid driver_id.".to_string());
    }
    if request.vehicle_id.is_none() {
        errors.push("You must inform a valid vehicle_id.".to_string());
    }

    let start_date = request.start_date.as_deref().and_then(parse_datetime);
    if start_date.is_none() {
        errors.push("You must inform a valid start_date.".to_string());
    }

    let reason = request
        .reason
        .as_deref()
        .map(str::trim)
        .filter(|reason| !reason.is_empty());
    if reason.is_none() {
        errors.push("You must inform a reason".to_string());
    }

    match (request.driver_id, request.vehicle_id, start_date, reason) {
        (Some(driver_id), Some(vehicle_id), Some(start_date), Some(reason)) => Ok(ValidatedOpen {
            driver_id,
            vehicle_id,
            start_date,
            reason: reason.to_string(),
        }),
        _ => Err(errors),
    }
}

/// Validar un request de cierre. El chequeo "no más tarde que ahora" va acá
/// porque depende solo del input y del reloj, no de la fila objetivo.
pub fn validate_close(request: &CloseAssignmentRequest) -> Result<ValidatedClose, Vec<String>> {
    let mut errors = Vec::new();

    if request.id.is_none() {
        errors.push("You must inform a vehicle's id.".to_string());
    }

    let due_date = request.due_date.as_deref().and_then(parse_datetime);
    match due_date {
        None => errors.push("You must inform a valid due_date.".to_string()),
        Some(due_date) if due_date > Utc::now() => {
            errors.push("Caution: due_date must be shorter or equal than current date.".to_string());
        }
        Some(_) => {}
    }

    match (request.id, due_date) {
        (Some(id), Some(due_date)) if errors.is_empty() => Ok(ValidatedClose { id, due_date }),
        _ => Err(errors),
    }
}
