//! Modelo de Driver
//!
//! Mapea a la tabla `driver` del registro maestro de conductores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Driver {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
