//! Modelo de Booking
//!
//! Una reserva nunca se borra físicamente: la cancelación es un cambio de
//! estado. Solo las reservas Active cuentan contra la disponibilidad de
//! asientos.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Estado de una reserva. Active es el único estado inicial;
/// Completed y Cancelled son terminales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    Active,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Active => "Active",
            BookingStatus::Completed => "Completed",
            BookingStatus::Cancelled => "Cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<BookingStatus> {
        match value.to_ascii_lowercase().as_str() {
            "active" => Some(BookingStatus::Active),
            "completed" => Some(BookingStatus::Completed),
            "cancelled" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }

    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        matches!(
            (self, next),
            (BookingStatus::Active, BookingStatus::Completed)
                | (BookingStatus::Active, BookingStatus::Cancelled)
        )
    }
}

/// Booking principal - mapea exactamente a la tabla bookings
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub booking_id: Uuid,
    pub user_id: Uuid,
    pub bus_id: Uuid,
    pub seat_number: i32,
    pub travel_date: NaiveDate,
    pub price: Decimal,
    pub status: String,
    pub qr_code: Option<String>,
    pub booking_date: DateTime<Utc>,
}

impl Booking {
    pub fn status(&self) -> Option<BookingStatus> {
        BookingStatus::parse(&self.status)
    }

    pub fn is_active(&self) -> bool {
        self.status() == Some(BookingStatus::Active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse() {
        assert_eq!(BookingStatus::parse("Active"), Some(BookingStatus::Active));
        assert_eq!(BookingStatus::parse("completed"), Some(BookingStatus::Completed));
        assert_eq!(BookingStatus::parse("CANCELLED"), Some(BookingStatus::Cancelled));
        // Vocabularios de estado ajenos al canónico no se aceptan
        assert_eq!(BookingStatus::parse("confirmed"), None);
        assert_eq!(BookingStatus::parse("pending"), None);
    }

    #[test]
    fn test_active_is_the_only_non_terminal_state() {
        assert!(!BookingStatus::Active.is_terminal());
        assert!(BookingStatus::Completed.is_terminal());
        assert!(BookingStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_valid_transitions() {
        assert!(BookingStatus::Active.can_transition_to(BookingStatus::Completed));
        assert!(BookingStatus::Active.can_transition_to(BookingStatus::Cancelled));
    }

    #[test]
    fn test_no_transition_out_of_terminal_states() {
        for terminal in [BookingStatus::Completed, BookingStatus::Cancelled] {
            assert!(!terminal.can_transition_to(BookingStatus::Active));
            assert!(!terminal.can_transition_to(BookingStatus::Completed));
            assert!(!terminal.can_transition_to(BookingStatus::Cancelled));
        }
    }
}
