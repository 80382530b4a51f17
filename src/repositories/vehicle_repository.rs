use crate::models::vehicle::Vehicle;
use crate::utils::errors::{AppError, AppResult};
use sqlx::PgPool;

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lista vehículos. Los filtros por marca y color son opcionales y se
    /// combinan (ambos deben cumplirse cuando vienen los dos).
    pub async fn find_all(&self, brand: Option<&str>, color: Option<&str>) -> AppResult<Vec<Vehicle>> {
        let result = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT * FROM vehicle
            WHERE ($1::text IS NULL OR brand ILIKE '%' || $1 || '%')
              AND ($2::text IS NULL OR color ILIKE '%' || $2 || '%')
            ORDER BY id
            "#,
        )
        .bind(brand)
        .bind(color)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error listing vehicles: {}", e)))?;

        Ok(result)
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Vehicle>> {
        let result = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicle WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error finding vehicle: {}", e)))?;

        Ok(result)
    }

    /// Busca por patente exacta, para el chequeo de unicidad.
    pub async fn find_by_plate(&self, plate: &str) -> AppResult<Option<Vehicle>> {
        let result = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicle WHERE plate = $1")
            .bind(plate)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error finding vehicle by plate: {}", e)))?;

        Ok(result)
    }

    pub async fn create(&self, brand: &str, color: &str, plate: &str) -> AppResult<Vehicle> {
        let result = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicle (brand, color, plate)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(brand)
        .bind(color)
        .bind(plate)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error creating vehicle: {}", e)))?;

        Ok(result)
    }

    pub async fn update(
        &self,
        id: i64,
        brand: &str,
        color: &str,
        plate: &str,
    ) -> AppResult<Option<Vehicle>> {
        let result = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicle
            SET brand = $2, color = $3, plate = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(brand)
        .bind(color)
        .bind(plate)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error updating vehicle: {}", e)))?;

        Ok(result)
    }

    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM vehicle WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error deleting vehicle: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}
