//! Aprovisionamiento del schema
//!
//! Crea las tablas del sistema si no existen. El índice único parcial sobre
//! los asientos activos es el respaldo a nivel de storage del invariante
//! central: nunca dos reservas Active para el mismo (bus, fecha, asiento).

use sqlx::PgPool;

const USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    user_id UUID PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    email VARCHAR(255) UNIQUE NOT NULL,
    password_hash VARCHAR(255) NOT NULL,
    role VARCHAR(20) NOT NULL DEFAULT 'User',
    nic VARCHAR(20),
    phone_no VARCHAR(20),
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const ROUTES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS routes (
    route_id UUID PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    start_point VARCHAR(255) NOT NULL,
    end_point VARCHAR(255) NOT NULL,
    price NUMERIC(10, 2) NOT NULL,
    distance_km NUMERIC(10, 2) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    UNIQUE (start_point, end_point)
)
"#;

const BUSES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS buses (
    bus_id UUID PRIMARY KEY,
    registration_number VARCHAR(50) UNIQUE NOT NULL,
    route_id UUID NOT NULL REFERENCES routes (route_id),
    owner_id UUID,
    seat_count INT NOT NULL CHECK (seat_count > 0),
    service VARCHAR(30) NOT NULL DEFAULT 'Normal',
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const BOOKINGS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS bookings (
    booking_id UUID PRIMARY KEY,
    user_id UUID NOT NULL REFERENCES users (user_id),
    bus_id UUID NOT NULL REFERENCES buses (bus_id),
    seat_number INT NOT NULL CHECK (seat_number > 0),
    travel_date DATE NOT NULL,
    price NUMERIC(10, 2) NOT NULL,
    status VARCHAR(20) NOT NULL DEFAULT 'Active',
    qr_code VARCHAR(500),
    booking_date TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const CONDUCTOR_BUS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS conductor_bus (
    id UUID PRIMARY KEY,
    conductor_id UUID NOT NULL REFERENCES users (user_id),
    bus_id UUID NOT NULL REFERENCES buses (bus_id),
    assigned_by UUID NOT NULL REFERENCES users (user_id),
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    assigned_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

// Solo las reservas Active participan del invariante; las Cancelled/Completed
// liberan el asiento sin borrarse.
const ACTIVE_SEAT_INDEX: &str = r#"
CREATE UNIQUE INDEX IF NOT EXISTS idx_bookings_active_seat
ON bookings (bus_id, travel_date, seat_number)
WHERE status = 'Active'
"#;

const BOOKING_LOOKUP_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS idx_bookings_bus_date_status
ON bookings (bus_id, travel_date, status)
"#;

/// Crear las tablas e índices del sistema si no existen
pub async fn init_database(pool: &PgPool) -> Result<(), sqlx::Error> {
    let statements = [
        USERS_TABLE,
        ROUTES_TABLE,
        BUSES_TABLE,
        BOOKINGS_TABLE,
        CONDUCTOR_BUS_TABLE,
        ACTIVE_SEAT_INDEX,
        BOOKING_LOOKUP_INDEX,
    ];

    for statement in statements {
        sqlx::query(statement).execute(pool).await?;
    }

    Ok(())
}
