//! Modelo de Assignment
//!
//! Mapea a la tabla `vehicle_driver`: una fila por cada uso de un vehículo
//! por un conductor. `due_date` ausente significa que la asignación sigue
//! abierta; una vez cerrada, la fila no vuelve a abrirse.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Assignment {
    pub id: i64,
    pub driver_id: i64,
    pub vehicle_id: i64,
    pub start_date: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

impl Assignment {
    /// El vehículo sigue en uso por el conductor
    pub fn is_open(&self) -> bool {
        self.due_date.is_none()
    }

    /// Predicado de exclusividad: basta con que coincida el conductor O el
    /// vehículo para bloquear una asignación nueva.
    pub fn conflicts_with(&self, driver_id: i64, vehicle_id: i64) -> bool {
        self.driver_id == driver_id || self.vehicle_id == vehicle_id
    }
}
