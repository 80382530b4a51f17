mod config;
mod controllers;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod state;
mod utils;

use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use config::environment::EnvironmentConfig;
use database::DatabaseConnection;
use middleware::cors::{cors_middleware, cors_middleware_with_origins};
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("🚗 Fleet Records - historial de uso de vehículos por conductor");
    info!("==============================================================");

    let config = EnvironmentConfig::from_env();
    info!("Entorno: {}", config.environment);

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    // Aplicar migraciones pendientes
    db_connection.run_migrations().await?;

    let pool = db_connection.pool().clone();

    // CORS abierto en desarrollo; restringido si hay orígenes configurados
    let cors = if config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(config.cors_origins.clone())
    };

    let addr: SocketAddr = config.server_url().parse()?;
    let app_state = AppState::new(pool, config);

    let app = Router::new()
        .route("/test", get(test_endpoint))
        .nest("/api/drivers", routes::driver_routes::create_driver_router())
        .nest("/api/vehicles", routes::vehicle_routes::create_vehicle_router())
        .nest("/api/vehicle_driver", routes::assignment_routes::create_assignment_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /test - Endpoint de prueba");
    info!("🧍 Endpoints - Drivers:");
    info!("   GET    /api/drivers - Listar conductores (filtro ?name=)");
    info!("   GET    /api/drivers/getOne?id= - Obtener conductor por id");
    info!("   POST   /api/drivers - Crear conductor");
    info!("   PATCH  /api/drivers - Actualizar conductor");
    info!("   DELETE /api/drivers - Eliminar conductor");
    info!("🚙 Endpoints - Vehicles:");
    info!("   GET    /api/vehicles - Listar vehículos (filtros ?brand= y ?color=)");
    info!("   GET    /api/vehicles/getOne?id= - Obtener vehículo por id");
    info!("   POST   /api/vehicles - Crear vehículo");
    info!("   PATCH  /api/vehicles - Actualizar vehículo");
    info!("   DELETE /api/vehicles - Eliminar vehículo");
    info!("📒 Endpoints - Vehicle driver history:");
    info!("   GET   /api/vehicle_driver - Historial completo");
    info!("   POST  /api/vehicle_driver - Abrir asignación (conductor toma vehículo)");
    info!("   PATCH /api/vehicle_driver - Cerrar asignación (fija due_date)");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Endpoint de prueba simple
async fn test_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "message": "¡API de flota funcionando correctamente!",
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
