//! Modelo de Bus
//!
//! Este módulo contiene el struct Bus y la clase de servicio usada como
//! filtro de búsqueda.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Clase de servicio del bus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceClass {
    Normal,
    Luxury,
    SemiLuxury,
    ExpressLuxury,
}

impl ServiceClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceClass::Normal => "Normal",
            ServiceClass::Luxury => "Luxury",
            ServiceClass::SemiLuxury => "Semi-Luxury",
            ServiceClass::ExpressLuxury => "Express-Luxury",
        }
    }

    pub fn parse(value: &str) -> Option<ServiceClass> {
        // Normaliza mayúsculas, espacios y guiones antes de comparar
        let normalized: String = value
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "normal" => Some(ServiceClass::Normal),
            "luxury" => Some(ServiceClass::Luxury),
            "semiluxury" => Some(ServiceClass::SemiLuxury),
            "expressluxury" => Some(ServiceClass::ExpressLuxury),
            _ => None,
        }
    }
}

/// Bus principal - mapea exactamente a la tabla buses
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Bus {
    pub bus_id: Uuid,
    pub registration_number: String,
    pub route_id: Uuid,
    pub owner_id: Option<Uuid>,
    pub seat_count: i32,
    pub service: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Bus {
    pub fn service_class(&self) -> Option<ServiceClass> {
        ServiceClass::parse(&self.service)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_class_parse() {
        assert_eq!(ServiceClass::parse("Normal"), Some(ServiceClass::Normal));
        assert_eq!(ServiceClass::parse("luxury"), Some(ServiceClass::Luxury));
        assert_eq!(ServiceClass::parse("Semi-Luxury"), Some(ServiceClass::SemiLuxury));
        assert_eq!(ServiceClass::parse("semi luxury"), Some(ServiceClass::SemiLuxury));
        assert_eq!(ServiceClass::parse("Express-luxury"), Some(ServiceClass::ExpressLuxury));
        assert_eq!(ServiceClass::parse("first-class"), None);
    }

    #[test]
    fn test_service_class_round_trip() {
        for class in [
            ServiceClass::Normal,
            ServiceClass::Luxury,
            ServiceClass::SemiLuxury,
            ServiceClass::ExpressLuxury,
        ] {
            assert_eq!(ServiceClass::parse(class.as_str()), Some(class));
        }
    }
}
