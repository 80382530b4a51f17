use crate::models::driver::Driver;
use crate::utils::errors::{AppError, AppResult};
use sqlx::PgPool;

pub struct DriverRepository {
    pool: PgPool,
}

impl DriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lista conductores, con filtro opcional por nombre (parcial, sin
    /// distinguir mayúsculas).
    pub async fn find_all(&self, name: Option<&str>) -> AppResult<Vec<Driver>> {
        let result = sqlx::query_as::<_, Driver>(
            r#"
            SELECT * FROM driver
            WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%')
            ORDER BY id
            "#,
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error listing drivers: {}", e)))?;

        Ok(result)
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Driver>> {
        let result = sqlx::query_as::<_, Driver>("SELECT * FROM driver WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error finding driver: {}", e)))?;

        Ok(result)
    }

    pub async fn create(&self, name: &str) -> AppResult<Driver> {
        let result =
            sqlx::query_as::<_, Driver>("INSERT INTO driver (name) VALUES ($1) RETURNING *")
                .bind(name)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AppError::Database(format!("Error creating driver: {}", e)))?;

        Ok(result)
    }

    pub async fn update_name(&self, id: i64, name: &str) -> AppResult<Option<Driver>> {
        let result =
            sqlx::query_as::<_, Driver>("UPDATE driver SET name = $2 WHERE id = $1 RETURNING *")
                .bind(id)
                .bind(name)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| AppError::Database(format!("Error updating driver: {}", e)))?;

        Ok(result)
    }

    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM driver WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error deleting driver: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}
