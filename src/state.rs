//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. El pool se inyecta acá: ningún componente
//! usa un singleton global de conexiones.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::services::qr_service::QrService;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub qr: Arc<QrService>,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig, qr: QrService) -> Self {
        Self {
            pool,
            config,
            qr: Arc::new(qr),
        }
    }
}
