//! Servicio de códigos QR (artefactos post-commit)
//!
//! Genera el código QR de una reserva, lo sube al almacenamiento durable y
//! escribe la URL resultante sobre la reserva. Corre después del commit de
//! la transacción de reserva: su falla nunca invalida la reserva.
//!
//! La operación es idempotente: el payload es determinístico en función de
//! (booking_id, user_id) y la key del objeto es fija por reserva, así que
//! un reintento sobreescribe el mismo artefacto en lugar de duplicarlo.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::config::environment::EnvironmentConfig;

/// Errores del attacher. Nunca se propagan al request de reserva:
/// se loggean y el QR queda pendiente de reintento.
#[derive(Error, Debug)]
pub enum QrError {
    #[error("QR render failed: {0}")]
    Render(String),

    #[error("Artifact upload failed: {0}")]
    Upload(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Configuración del servicio de QR
#[derive(Debug, Clone)]
pub struct QrServiceConfig {
    pub render_url: String,
    pub storage_url: String,
    pub public_url: String,
    pub storage_token: Option<String>,
}

impl From<&EnvironmentConfig> for QrServiceConfig {
    fn from(config: &EnvironmentConfig) -> Self {
        Self {
            render_url: config.qr_render_url.clone(),
            storage_url: config.artifact_storage_url.clone(),
            public_url: config.artifact_public_url.clone(),
            storage_token: config.artifact_storage_token.clone(),
        }
    }
}

pub struct QrService {
    client: reqwest::Client,
    config: QrServiceConfig,
}

impl QrService {
    pub fn new(config: QrServiceConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    /// Payload determinístico del ticket: mismos inputs, mismo payload.
    /// La firma md5 ata el par (booking, user) para la validación a bordo;
    /// el JSON viaja en base64 dentro del QR y se decodifica en la app.
    pub fn ticket_payload(booking_id: Uuid, user_id: Uuid) -> String {
        let signature = md5::compute(format!("{}:{}", booking_id, user_id));
        let ticket = format!(
            r#"{{"booking_id":"{}","user_id":"{}","sig":"{:x}"}}"#,
            booking_id, user_id, signature
        );
        STANDARD.encode(ticket)
    }

    /// Key fija por reserva: un reintento sobreescribe, no duplica
    pub fn object_key(booking_id: Uuid) -> String {
        format!("bookings/{}.png", booking_id)
    }

    /// Renderizar el QR como PNG vía el servicio externo
    async fn render(&self, payload: &str) -> Result<Vec<u8>, QrError> {
        let url = format!(
            "{}?size=300x300&data={}",
            self.config.render_url,
            urlencoding::encode(payload)
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| QrError::Render(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(QrError::Render(format!("render service returned {}", status)));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| QrError::Render(e.to_string()))?;

        Ok(bytes.to_vec())
    }

    /// Subir el PNG bajo la key determinística y devolver la URL pública
    async fn upload(&self, key: &str, image: Vec<u8>) -> Result<String, QrError> {
        let upload_url = format!("{}/{}", self.config.storage_url.trim_end_matches('/'), key);

        let mut request = self
            .client
            .put(&upload_url)
            .header("Content-Type", "image/png")
            .body(image);

        if let Some(token) = &self.config.storage_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| QrError::Upload(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(QrError::Upload(format!("storage returned {}", status)));
        }

        Ok(format!(
            "{}/{}",
            self.config.public_url.trim_end_matches('/'),
            key
        ))
    }

    /// Generar, subir y enlazar el artefacto de una reserva
    pub async fn attach(
        &self,
        pool: &PgPool,
        booking_id: Uuid,
        user_id: Uuid,
    ) -> Result<String, QrError> {
        let payload = Self::ticket_payload(booking_id, user_id);
        let image = self.render(&payload).await?;
        let artifact_url = self.upload(&Self::object_key(booking_id), image).await?;

        sqlx::query("UPDATE bookings SET qr_code = $2 WHERE booking_id = $1")
            .bind(booking_id)
            .bind(&artifact_url)
            .execute(pool)
            .await?;

        log::info!("🎫 QR adjuntado a la reserva {}: {}", booking_id, artifact_url);

        Ok(artifact_url)
    }

    /// Attach con reintentos acotados. Cada intento fallido se loggea;
    /// el error final queda en manos del caller, que también solo loggea.
    pub async fn attach_with_retry(
        &self,
        pool: &PgPool,
        booking_id: Uuid,
        user_id: Uuid,
        attempts: u32,
    ) -> Result<String, QrError> {
        let mut last_error = QrError::Render("no attempts made".to_string());

        for attempt in 1..=attempts.max(1) {
            match self.attach(pool, booking_id, user_id).await {
                Ok(url) => return Ok(url),
                Err(e) => {
                    log::warn!(
                        "⚠️ Intento {}/{} de adjuntar QR a la reserva {} falló: {}",
                        attempt,
                        attempts,
                        booking_id,
                        e
                    );
                    last_error = e;
                }
            }

            if attempt < attempts {
                tokio::time::sleep(std::time::Duration::from_millis(500 * attempt as u64)).await;
            }
        }

        Err(last_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_payload_is_deterministic() {
        let booking_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();

        let first = QrService::ticket_payload(booking_id, user_id);
        let second = QrService::ticket_payload(booking_id, user_id);
        assert_eq!(first, second);
    }

    #[test]
    fn test_ticket_payload_differs_per_booking() {
        let user_id = Uuid::new_v4();

        let a = QrService::ticket_payload(Uuid::new_v4(), user_id);
        let b = QrService::ticket_payload(Uuid::new_v4(), user_id);
        assert_ne!(a, b);
    }

    #[test]
    fn test_object_key_is_stable() {
        let booking_id = Uuid::new_v4();

        assert_eq!(
            QrService::object_key(booking_id),
            QrService::object_key(booking_id)
        );
        assert!(QrService::object_key(booking_id).starts_with("bookings/"));
        assert!(QrService::object_key(booking_id).ends_with(".png"));
    }
}
