use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use bus_booking::config::database::DatabaseConfig;
use bus_booking::config::environment::EnvironmentConfig;
use bus_booking::database::schema;
use bus_booking::middleware::cors::cors_middleware;
use bus_booking::routes;
use bus_booking::services::qr_service::{QrService, QrServiceConfig};
use bus_booking::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚌 Bus Booking - Plataforma de reservas de asientos");
    info!("===================================================");

    let config = EnvironmentConfig::default();

    // Inicializar base de datos
    let pool = match DatabaseConfig::default().create_pool().await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    // Aprovisionar tablas e índices (incluye el índice único parcial de
    // asientos Active)
    if let Err(e) = schema::init_database(&pool).await {
        error!("❌ Error aprovisionando el schema: {}", e);
        return Err(anyhow::anyhow!("Error de schema: {}", e));
    }
    info!("✅ Schema de base de datos verificado");

    // Servicio de artefactos QR post-commit
    let qr_service = QrService::new(QrServiceConfig::from(&config));

    // Crear router de la API
    let app_state = AppState::new(pool, config.clone(), qr_service);

    let app = Router::new()
        .route("/health", get(health_endpoint))
        .nest("/api/auth", routes::auth_routes::create_auth_router(app_state.clone()))
        .nest("/api/search", routes::search_routes::create_search_router())
        .nest("/api/directory", routes::directory_routes::create_directory_router())
        .nest("/api/booking", routes::booking_routes::create_booking_router(app_state.clone()))
        .nest("/api/bus", routes::bus_routes::create_bus_router(app_state.clone()))
        .nest("/api/route", routes::route_routes::create_route_router(app_state.clone()))
        .nest("/api/conductor", routes::conductor_routes::create_conductor_router(app_state.clone()))
        .layer(cors_middleware())
        .with_state(app_state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🔐 Auth:");
    info!("   POST /api/auth/register - Registrar usuario");
    info!("   POST /api/auth/login - Login");
    info!("   GET  /api/auth/me - Usuario actual");
    info!("🧭 Directorio:");
    info!("   GET  /api/directory/start-points - Puntos de partida");
    info!("   GET  /api/directory/end-points - Puntos de llegada");
    info!("   GET  /api/directory/buses - Buses de una ruta");
    info!("🔎 Búsqueda:");
    info!("   POST /api/search - Buses con asientos disponibles");
    info!("🎟 Reservas:");
    info!("   POST /api/booking - Crear reserva multi-asiento");
    info!("   GET  /api/booking/mine - Mis reservas");
    info!("   GET  /api/booking/seats - Asientos ocupados de un bus");
    info!("   GET  /api/booking/:id - Detalle de reserva");
    info!("   POST /api/booking/:id/complete - Completar (conductor/admin)");
    info!("   POST /api/booking/:id/cancel - Cancelar");
    info!("🚍 Flota:");
    info!("   POST /api/bus - Registrar bus (admin)");
    info!("   POST /api/route - Crear ruta (admin)");
    info!("   POST /api/conductor/assign - Asignar conductor (admin)");

    // Iniciar servidor con apagado graceful
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            anyhow::anyhow!(e)
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Health check simple
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "bus-booking",
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
