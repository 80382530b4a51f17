//! Motor de ciclo de vida de asignaciones
//!
//! Este módulo orquesta la apertura y el cierre de asignaciones
//! vehículo-conductor: validación, chequeo de disponibilidad, persistencia y
//! traducción de errores del store a errores de dominio. Es el único
//! componente del motor con efectos. El store queda detrás de un trait para
//! poder ejercitar las reglas sin PostgreSQL.
//!
//! Máquina de estados por asignación: `Open --close--> Closed`. `Closed` es
//! terminal; acá no existe reapertura ni borrado.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::dto::assignment_dto::{CloseAssignmentRequest, OpenAssignmentRequest};
use crate::models::assignment::Assignment;
use crate::services::assignment_validator::{validate_close, validate_open};
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::format_datetime;

/// Contrato con el Record Store de asignaciones.
///
/// `find_open_conflict` es el chequeo de disponibilidad: devuelve alguna fila
/// abierta que involucre al conductor O al vehículo candidatos, si existe.
/// `insert` debe fallar con `Conflict` ante una violación del índice único
/// parcial (dos opens concurrentes) y con `ReferenceNotFound` ante una
/// foreign key colgante.
#[async_trait]
pub trait AssignmentStore: Send + Sync {
    async fn find_open_conflict(
        &self,
        driver_id: i64,
        vehicle_id: i64,
    ) -> AppResult<Option<Assignment>>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Assignment>>;

    async fn insert(
        &self,
        driver_id: i64,
        vehicle_id: i64,
        start_date: DateTime<Utc>,
        reason: &str,
    ) -> AppResult<Assignment>;

    async fn set_due_date(&self, id: i64, due_date: DateTime<Utc>) -> AppResult<Assignment>;
}

pub struct AssignmentService<S> {
    store: S,
}

impl<S: AssignmentStore> AssignmentService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Abrir una asignación: el conductor toma el vehículo.
    pub async fn open(&self, request: OpenAssignmentRequest) -> AppResult<Assignment> {
        let input = validate_open(&request).map_err(AppError::Validation)?;

        // Chequeo de disponibilidad: cualquiera de los dos ya comprometido
        // bloquea la apertura.
        if let Some(conflict) = self
            .store
            .find_open_conflict(input.driver_id, input.vehicle_id)
            .await?
        {
            debug_assert!(conflict.is_open());
            debug_assert!(conflict.conflicts_with(input.driver_id, input.vehicle_id));
            debug!(
                "open rejected: assignment {} still open for driver {} / vehicle {}",
                conflict.id, conflict.driver_id, conflict.vehicle_id
            );
            return Err(AppError::Conflict(
                "This vehicle is already on use by a driver!".to_string(),
            ));
        }

        self.store
            .insert(input.driver_id, input.vehicle_id, input.start_date, &input.reason)
            .await
    }

    /// Cerrar una asignación abierta fijando su due_date.
    pub async fn close(&self, request: CloseAssignmentRequest) -> AppResult<Assignment> {
        // El chequeo "no más tarde que ahora" corre acá adentro, antes de
        // tocar el store.
        let input = validate_close(&request).map_err(AppError::Validation)?;

        let current = self.store.find_by_id(input.id).await?.ok_or_else(|| {
            AppError::NotFound("Register not found by id, unable to update.".to_string())
        })?;

        // Closed es terminal: el due_date guardado no se pisa por esta vía.
        if let Some(closed_at) = current.due_date {
            return Err(AppError::AlreadyClosed { due_date: format_datetime(closed_at) });
        }

        if input.due_date < current.start_date {
            return Err(AppError::DueDateBeforeStart {
                start_date: format_datetime(current.start_date),
                due_date: format_datetime(input.due_date),
            });
        }

        self.store.set_due_date(input.id, input.due_date).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Mutex;

    /// Doble del Record Store: el scan lineal sobre filas abiertas y las
    /// mismas reglas de integridad que impone el schema (foreign keys e
    /// índices únicos parciales).
    struct InMemoryStore {
        rows: Mutex<Vec<Assignment>>,
        next_id: AtomicI64,
        driver_ids: Vec<i64>,
        vehicle_ids: Vec<i64>,
    }

    impl InMemoryStore {
        fn new(driver_ids: &[i64], vehicle_ids: &[i64]) -> Self {
            Self {
                rows: Mutex::new(Vec::new()),
                next_id: AtomicI64::new(1),
                driver_ids: driver_ids.to_vec(),
                vehicle_ids: vehicle_ids.to_vec(),
            }
        }

        fn row(&self, id: i64) -> Option<Assignment> {
            self.rows.lock().unwrap().iter().find(|row| row.id == id).cloned()
        }
    }

    #[async_trait]
    impl AssignmentStore for InMemoryStore {
        async fn find_open_conflict(
            &self,
            driver_id: i64,
            vehicle_id: i64,
        ) -> AppResult<Option<Assignment>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|row| row.is_open())
                .find(|row| row.conflicts_with(driver_id, vehicle_id))
                .cloned())
        }

        async fn find_by_id(&self, id: i64) -> AppResult<Option<Assignment>> {
            Ok(self.row(id))
        }

        async fn insert(
            &self,
            driver_id: i64,
            vehicle_id: i64,
            start_date: DateTime<Utc>,
            reason: &str,
        ) -> AppResult<Assignment> {
            if !self.driver_ids.contains(&driver_id) {
                return Err(AppError::ReferenceNotFound { reference: "driver", id: driver_id });
            }
            if !self.vehicle_ids.contains(&vehicle_id) {
                return Err(AppError::ReferenceNotFound { reference: "vehicle", id: vehicle_id });
            }

            let mut rows = self.rows.lock().unwrap();
            // vehicle_driver_open_driver_key / vehicle_driver_open_vehicle_key
            if rows.iter().any(|row| row.is_open() && row.conflicts_with(driver_id, vehicle_id)) {
                return Err(AppError::Conflict(
                    "This vehicle is already on use by a driver!".to_string(),
                ));
            }

            let assignment = Assignment {
                id: self.next_id.fetch_add(1, Ordering::SeqCst),
                driver_id,
                vehicle_id,
                start_date,
                due_date: None,
                reason: reason.to_string(),
                created_at: Utc::now(),
            };
            rows.push(assignment.clone());
            Ok(assignment)
        }

        async fn set_due_date(&self, id: i64, due_date: DateTime<Utc>) -> AppResult<Assignment> {
            let mut rows = self.rows.lock().unwrap();
            let row = rows
                .iter_mut()
                .find(|row| row.id == id)
                .ok_or_else(|| AppError::Database("row vanished".to_string()))?;
            row.due_date = Some(due_date);
            Ok(row.clone())
        }
    }

    fn service(driver_ids: &[i64], vehicle_ids: &[i64]) -> AssignmentService<InMemoryStore> {
        AssignmentService::new(InMemoryStore::new(driver_ids, vehicle_ids))
    }

    fn open_request(driver_id: i64, vehicle_id: i64) -> OpenAssignmentRequest {
        OpenAssignmentRequest {
            driver_id: Some(driver_id),
            vehicle_id: Some(vehicle_id),
            start_date: Some("2022-01-01".to_string()),
            reason: Some("trip".to_string()),
        }
    }

    fn close_request(id: i64, due_date: &str) -> CloseAssignmentRequest {
        CloseAssignmentRequest { id: Some(id), due_date: Some(due_date.to_string()) }
    }

    #[tokio::test]
    async fn open_creates_an_open_row() {
        let service = service(&[1], &[2]);

        let created = service.open(open_request(1, 2)).await.expect("open succeeds");

        assert_eq!(created.driver_id, 1);
        assert_eq!(created.vehicle_id, 2);
        assert!(created.is_open());
        assert_eq!(created.reason, "trip");
    }

    #[tokio::test]
    async fn open_rejects_engaged_driver_even_with_free_vehicle() {
        let service = service(&[1], &[2, 3]);
        service.open(open_request(1, 2)).await.expect("first open succeeds");

        let err = service.open(open_request(1, 3)).await.expect_err("driver 1 is engaged");
        match err {
            AppError::Conflict(message) => {
                assert_eq!(message, "This vehicle is already on use by a driver!");
            }
            other => panic!("expected Conflict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn open_rejects_engaged_vehicle_even_with_free_driver() {
        let service = service(&[1, 9], &[2]);
        service.open(open_request(1, 2)).await.expect("first open succeeds");

        let err = service.open(open_request(9, 2)).await.expect_err("vehicle 2 is engaged");
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn open_reports_dangling_driver_reference() {
        let service = service(&[1], &[2]);

        let err = service.open(open_request(999, 2)).await.expect_err("driver 999 does not exist");
        match err {
            AppError::ReferenceNotFound { reference, id } => {
                assert_eq!(reference, "driver");
                assert_eq!(id, 999);
            }
            other => panic!("expected ReferenceNotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn open_reports_dangling_vehicle_reference() {
        let service = service(&[1], &[2]);

        let err = service.open(open_request(1, 888)).await.expect_err("vehicle 888 does not exist");
        assert!(matches!(err, AppError::ReferenceNotFound { reference: "vehicle", id: 888 }));
    }

    #[tokio::test]
    async fn open_accumulates_validation_errors() {
        let service = service(&[1], &[2]);
        let request = OpenAssignmentRequest {
            driver_id: None,
            vehicle_id: None,
            start_date: Some("not-a-date".to_string()),
            reason: None,
        };

        let err = service.open(request).await.expect_err("request is invalid");
        match err {
            AppError::Validation(errors) => assert_eq!(errors.len(), 4),
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn close_sets_the_due_date() {
        let service = service(&[1], &[2]);
        let created = service.open(open_request(1, 2)).await.expect("open succeeds");

        let closed = service
            .close(close_request(created.id, "2022-01-05"))
            .await
            .expect("close succeeds");

        assert_eq!(closed.id, created.id);
        assert!(!closed.is_open());
        assert_eq!(format_datetime(closed.due_date.expect("due_date set")), "2022-01-05 00:00:00");
    }

    #[tokio::test]
    async fn close_frees_driver_and_vehicle_for_new_assignments() {
        let service = service(&[1], &[2]);
        let created = service.open(open_request(1, 2)).await.expect("open succeeds");
        service.close(close_request(created.id, "2022-01-05")).await.expect("close succeeds");

        let reopened = service.open(open_request(1, 2)).await.expect("pair is free again");
        assert!(reopened.is_open());
        assert_ne!(reopened.id, created.id);
    }

    #[tokio::test]
    async fn close_unknown_id_is_not_found() {
        let service = service(&[1], &[2]);

        let err = service.close(close_request(42, "2022-01-05")).await.expect_err("no such row");
        match err {
            AppError::NotFound(message) => {
                assert_eq!(message, "Register not found by id, unable to update.");
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn future_due_date_fails_before_the_row_is_fetched() {
        let service = service(&[1], &[2]);
        let tomorrow = (Utc::now() + Duration::days(1)).format("%Y-%m-%dT%H:%M:%S").to_string();

        // id 42 no existe; si el fetch corriera primero esto sería NotFound.
        let err = service
            .close(CloseAssignmentRequest { id: Some(42), due_date: Some(tomorrow) })
            .await
            .expect_err("due_date is in the future");
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn due_date_before_start_date_echoes_both_dates() {
        let service = service(&[1], &[2]);
        let created = service.open(open_request(1, 2)).await.expect("open succeeds");

        let err = service
            .close(close_request(created.id, "2021-12-31"))
            .await
            .expect_err("due_date is before start_date");
        match err {
            AppError::DueDateBeforeStart { start_date, due_date } => {
                assert_eq!(start_date, "2022-01-01 00:00:00");
                assert_eq!(due_date, "2021-12-31 00:00:00");
            }
            other => panic!("expected DueDateBeforeStart, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn closed_rows_cannot_be_closed_again() {
        let service = service(&[1], &[2]);
        let created = service.open(open_request(1, 2)).await.expect("open succeeds");
        service.close(close_request(created.id, "2022-01-05")).await.expect("close succeeds");

        // Ni con la misma fecha ni con una anterior: el due_date guardado no
        // cambia.
        let err = service
            .close(close_request(created.id, "2022-01-03"))
            .await
            .expect_err("row is already closed");
        match err {
            AppError::AlreadyClosed { due_date } => assert_eq!(due_date, "2022-01-05 00:00:00"),
            other => panic!("expected AlreadyClosed, got {:?}", other),
        }

        let stored = service.store.row(created.id).expect("row exists");
        assert_eq!(format_datetime(stored.due_date.expect("still closed")), "2022-01-05 00:00:00");
    }

    #[tokio::test]
    async fn insert_guard_rejects_concurrent_duplicate_open() {
        // Simula la carrera check-then-insert: dos requests pasaron el
        // chequeo de disponibilidad y el índice único parcial corta el
        // segundo insert.
        let store = InMemoryStore::new(&[1], &[2, 3]);
        let start = Utc::now() - Duration::days(1);
        store.insert(1, 2, start, "first").await.expect("first insert succeeds");

        let err = store.insert(1, 3, start, "racing").await.expect_err("driver 1 already open");
        assert!(matches!(err, AppError::Conflict(_)));
    }
}
