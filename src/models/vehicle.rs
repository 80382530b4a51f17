//! Modelo de Vehicle
//!
//! Mapea a la tabla `vehicle` del registro maestro de vehículos. La placa
//! respeta los formatos XXX1111 / XXX1X11 y es única a nivel de aplicación.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: i64,
    pub brand: String,
    pub color: String,
    pub plate: String,
    pub created_at: DateTime<Utc>,
}
