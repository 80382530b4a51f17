use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::vehicle::Vehicle;

// Request para abrir una asignación (POST /vehicle_driver)
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAssignmentRequest {
    pub driver_id: Option<i64>,
    pub vehicle_id: Option<i64>,
    pub start_date: Option<String>,
    pub reason: Option<String>,
}

// Request para cerrar una asignación (PATCH /vehicle_driver)
#[derive(Debug, Clone, Deserialize)]
pub struct CloseAssignmentRequest {
    pub id: Option<i64>,
    pub due_date: Option<String>,
}

// Resumen del conductor embebido en el historial
#[derive(Debug, Serialize)]
pub struct DriverSummary {
    pub name: String,
}

// Fila del historial con el conductor y el vehículo embebidos, como la
// devuelve GET /vehicle_driver.
#[derive(Debug, Serialize)]
pub struct AssignmentDetailResponse {
    pub id: i64,
    pub driver_id: i64,
    pub vehicle_id: i64,
    pub start_date: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
    pub reason: String,
    pub created_at: DateTime<Utc>,
    pub driver: DriverSummary,
    pub vehicle: Vehicle,
}
