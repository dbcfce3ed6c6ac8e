use axum::{
    extract::{Path, Query, State},
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::controllers::booking_controller::BookingController;
use crate::dto::booking_dto::{
    BookingDetailResponse, BookingStatusResponse, BookingSummary, CreateBookingRequest,
    CreateBookingResponse,
};
use crate::middleware::auth::{auth_middleware, AuthenticatedUser};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_booking_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(create_booking))
        .route("/mine", get(my_bookings))
        .route("/seats", get(booked_seats))
        .route("/:id", get(booking_detail))
        .route("/:id/complete", post(complete_booking))
        .route("/:id/cancel", post(cancel_booking))
        .layer(middleware::from_fn_with_state(state, auth_middleware))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BookedSeatsQuery {
    bus_id: Uuid,
    date: String,
}

async fn create_booking(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<Json<CreateBookingResponse>, AppError> {
    let controller = BookingController::new(state.pool.clone(), state.qr.clone());
    let response = controller.create(&user, request).await?;
    Ok(Json(response))
}

async fn my_bookings(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<BookingSummary>>, AppError> {
    let controller = BookingController::new(state.pool.clone(), state.qr.clone());
    let response = controller.my_bookings(&user).await?;
    Ok(Json(response))
}

async fn booked_seats(
    State(state): State<AppState>,
    Query(query): Query<BookedSeatsQuery>,
) -> Result<Json<Vec<i32>>, AppError> {
    let controller = BookingController::new(state.pool.clone(), state.qr.clone());
    let response = controller.booked_seats(query.bus_id, &query.date).await?;
    Ok(Json(response))
}

async fn booking_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingDetailResponse>, AppError> {
    let controller = BookingController::new(state.pool.clone(), state.qr.clone());
    let response = controller.detail(id).await?;
    Ok(Json(response))
}

async fn complete_booking(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingStatusResponse>, AppError> {
    let controller = BookingController::new(state.pool.clone(), state.qr.clone());
    let response = controller.complete(id, &user).await?;
    Ok(Json(response))
}

async fn cancel_booking(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingStatusResponse>, AppError> {
    let controller = BookingController::new(state.pool.clone(), state.qr.clone());
    let response = controller.cancel(id, &user).await?;
    Ok(Json(response))
}
