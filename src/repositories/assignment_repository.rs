use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::error::ErrorKind;
use sqlx::PgPool;

use crate::models::assignment::Assignment;
use crate::services::assignment_service::AssignmentStore;
use crate::utils::errors::{AppError, AppResult};

/// Fila plana del historial con los datos del conductor y del vehículo ya
/// unidos. El controller la convierte al formato anidado de la respuesta.
#[derive(Debug, sqlx::FromRow)]
pub struct AssignmentDetailRow {
    pub id: i64,
    pub driver_id: i64,
    pub vehicle_id: i64,
    pub start_date: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
    pub reason: String,
    pub created_at: DateTime<Utc>,
    pub driver_name: String,
    pub vehicle_brand: String,
    pub vehicle_color: String,
    pub vehicle_plate: String,
    pub vehicle_created_at: DateTime<Utc>,
}

pub struct AssignmentRepository {
    pool: PgPool,
}

impl AssignmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Historial completo con driver y vehicle incluidos.
    pub async fn find_all_with_details(&self) -> AppResult<Vec<AssignmentDetailRow>> {
        let result = sqlx::query_as::<_, AssignmentDetailRow>(
            r#"
            SELECT vd.id, vd.driver_id, vd.vehicle_id, vd.start_date, vd.due_date,
                   vd.reason, vd.created_at,
                   d.name AS driver_name,
                   v.brand AS vehicle_brand, v.color AS vehicle_color,
                   v.plate AS vehicle_plate, v.created_at AS vehicle_created_at
            FROM vehicle_driver vd
            JOIN driver d ON d.id = vd.driver_id
            JOIN vehicle v ON v.id = vd.vehicle_id
            ORDER BY vd.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error listing assignment history: {}", e)))?;

        Ok(result)
    }
}

/// Traduce violaciones de integridad del INSERT a errores de dominio. Las
/// foreign keys colgantes se reconocen por el nombre del constraint; la
/// violación del índice único parcial es la carrera de dos opens simultáneos
/// y se reporta igual que el conflicto detectado por el chequeo previo.
fn translate_insert_error(e: sqlx::Error, driver_id: i64, vehicle_id: i64) -> AppError {
    if let sqlx::Error::Database(db) = &e {
        match db.kind() {
            ErrorKind::ForeignKeyViolation => match db.constraint() {
                Some("vehicle_driver_driver_id_fkey") => {
                    return AppError::ReferenceNotFound { reference: "driver", id: driver_id };
                }
                Some("vehicle_driver_vehicle_id_fkey") => {
                    return AppError::ReferenceNotFound { reference: "vehicle", id: vehicle_id };
                }
                _ => {}
            },
            ErrorKind::UniqueViolation => {
                return AppError::Conflict("This vehicle is already on use by a driver!".to_string());
            }
            _ => {}
        }
    }

    AppError::Database(format!("Error creating assignment: {}", e))
}

#[async_trait]
impl AssignmentStore for AssignmentRepository {
    async fn find_open_conflict(
        &self,
        driver_id: i64,
        vehicle_id: i64,
    ) -> AppResult<Option<Assignment>> {
        // Solo filas abiertas; con los índices parciales puede haber a lo
        // sumo una por conductor y una por vehículo.
        let result = sqlx::query_as::<_, Assignment>(
            r#"
            SELECT * FROM vehicle_driver
            WHERE due_date IS NULL AND (driver_id = $1 OR vehicle_id = $2)
            LIMIT 1
            "#,
        )
        .bind(driver_id)
        .bind(vehicle_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error checking availability: {}", e)))?;

        Ok(result)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Assignment>> {
        let result = sqlx::query_as::<_, Assignment>("SELECT * FROM vehicle_driver WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error finding assignment: {}", e)))?;

        Ok(result)
    }

    async fn insert(
        &self,
        driver_id: i64,
        vehicle_id: i64,
        start_date: DateTime<Utc>,
        reason: &str,
    ) -> AppResult<Assignment> {
        let result = sqlx::query_as::<_, Assignment>(
            r#"
            INSERT INTO vehicle_driver (driver_id, vehicle_id, start_date, reason)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(driver_id)
        .bind(vehicle_id)
        .bind(start_date)
        .bind(reason)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| translate_insert_error(e, driver_id, vehicle_id))?;

        Ok(result)
    }

    async fn set_due_date(&self, id: i64, due_date: DateTime<Utc>) -> AppResult<Assignment> {
        let result = sqlx::query_as::<_, Assignment>(
            r#"
            UPDATE vehicle_driver
            SET due_date = $2
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(due_date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error closing assignment: {}", e)))?;

        result.ok_or_else(|| {
            AppError::NotFound("Register not found by id, unable to update.".to_string())
        })
    }
}
