//! Integration tests del núcleo de reservas.
//!
//! Requieren una base PostgreSQL descartable apuntada por DATABASE_URL;
//! por eso están marcados #[ignore]. Correr con:
//!
//!   DATABASE_URL=postgres://... cargo test -- --ignored

use chrono::{Duration, NaiveDate, Utc};
use futures::future::join_all;
use rust_decimal::Decimal;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use bus_booking::controllers::booking_controller::BookingController;
use bus_booking::controllers::conductor_controller::ConductorController;
use bus_booking::controllers::search_controller::SearchController;
use bus_booking::database::schema;
use bus_booking::dto::booking_dto::CreateBookingRequest;
use bus_booking::dto::bus_dto::{CreateBusRequest, CreateRouteRequest};
use bus_booking::dto::conductor_dto::AssignConductorRequest;
use bus_booking::dto::search_dto::SearchRequest;
use bus_booking::middleware::auth::AuthenticatedUser;
use bus_booking::models::user::Role;
use bus_booking::repositories::booking_repository::BookingRepository;
use bus_booking::repositories::bus_repository::BusRepository;
use bus_booking::repositories::route_repository::RouteRepository;
use bus_booking::repositories::user_repository::UserRepository;
use bus_booking::services::qr_service::{QrService, QrServiceConfig};
use bus_booking::utils::errors::AppError;

async fn test_pool() -> PgPool {
    let url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must point at a disposable test database");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&url)
        .await
        .expect("failed to connect to the test database");

    schema::init_database(&pool)
        .await
        .expect("failed to provision the test schema");

    pool
}

fn future_date() -> NaiveDate {
    Utc::now().date_naive() + Duration::days(30)
}

fn price() -> Decimal {
    Decimal::new(150000, 2) // 1500.00
}

async fn seed_user(pool: &PgPool, role: Role) -> Uuid {
    let repo = UserRepository::new(pool.clone());
    let user = repo
        .create(
            format!("Test {}", role.as_str()),
            format!("{}@test.example", Uuid::new_v4()),
            "$2b$12$testhashtesthashtesthashtesthash".to_string(),
            role,
            None,
            None,
        )
        .await
        .expect("failed to seed user");

    user.user_id
}

/// Ruta + bus nuevos por test, con puntos únicos para no chocar con otros tests
async fn seed_route_and_bus(pool: &PgPool, seat_count: i32) -> (String, String, Uuid) {
    let suffix = Uuid::new_v4().simple().to_string();
    let start = format!("Start-{}", &suffix[..8]);
    let end = format!("End-{}", &suffix[..8]);

    let route = RouteRepository::new(pool.clone())
        .create(CreateRouteRequest {
            name: format!("{} - {}", start, end),
            start_point: start.clone(),
            end_point: end.clone(),
            price: price(),
            distance_km: Decimal::new(12050, 2),
        })
        .await
        .expect("failed to seed route");

    let bus = BusRepository::new(pool.clone())
        .create(
            CreateBusRequest {
                registration_number: format!("BUS-{}", &suffix[..10]),
                route_id: route.route_id,
                owner_id: None,
                seat_count,
                service: "Normal".to_string(),
            },
            "Normal",
        )
        .await
        .expect("failed to seed bus");

    (start, end, bus.bus_id)
}

fn booking_controller(pool: &PgPool) -> BookingController {
    let qr = QrService::new(QrServiceConfig {
        render_url: "http://localhost:1/qr".to_string(),
        storage_url: "http://localhost:1/storage".to_string(),
        public_url: "http://localhost:1/cdn".to_string(),
        storage_token: None,
    });

    BookingController::new(pool.clone(), std::sync::Arc::new(qr))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore]
async fn concurrent_requests_for_the_same_seat_book_it_exactly_once() {
    let pool = test_pool().await;
    let (_, _, bus_id) = seed_route_and_bus(&pool, 40).await;
    let date = future_date();

    let mut handles = Vec::new();
    for _ in 0..4 {
        let pool = pool.clone();
        handles.push(tokio::spawn(async move {
            let user_id = seed_user(&pool, Role::User).await;
            BookingRepository::new(pool.clone())
                .create_bookings(user_id, bus_id, date, &[7], price())
                .await
        }));
    }

    let results: Vec<_> = join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.expect("task panicked"))
        .collect();

    let successes = results.iter().filter(|r| r.is_ok()).count();
    let conflicts = results
        .iter()
        .filter(|r| matches!(r, Err(AppError::Conflict(_))))
        .count();

    assert_eq!(successes, 1, "exactly one booking must win the seat");
    assert_eq!(conflicts, 3, "every loser must observe a Conflict");

    let seats = BookingRepository::new(pool.clone())
        .booked_seats(bus_id, date)
        .await
        .unwrap();
    assert_eq!(seats, vec![7]);
}

#[tokio::test]
#[ignore]
async fn a_partial_conflict_books_nothing() {
    let pool = test_pool().await;
    let (_, _, bus_id) = seed_route_and_bus(&pool, 40).await;
    let date = future_date();
    let repo = BookingRepository::new(pool.clone());

    let first_user = seed_user(&pool, Role::User).await;
    repo.create_bookings(first_user, bus_id, date, &[6], price())
        .await
        .unwrap();

    let second_user = seed_user(&pool, Role::User).await;
    let result = repo
        .create_bookings(second_user, bus_id, date, &[5, 6, 7], price())
        .await;

    match result {
        Err(AppError::Conflict(message)) => {
            assert!(message.contains('6'), "the conflict must name seat 6")
        }
        other => panic!("expected Conflict, got {:?}", other.map(|_| ())),
    }

    // Los asientos 5 y 7 siguen libres: nada de la request fallida se escribió
    let seats = repo.booked_seats(bus_id, date).await.unwrap();
    assert_eq!(seats, vec![6]);
}

#[tokio::test]
#[ignore]
async fn availability_counts_only_active_bookings() {
    let pool = test_pool().await;
    let (start, end, bus_id) = seed_route_and_bus(&pool, 40).await;
    let date = future_date();
    let repo = BookingRepository::new(pool.clone());
    let user_id = seed_user(&pool, Role::User).await;

    // 14 reservas; una se cancela y otra se completa, quedando 12 Active
    let seats: Vec<i32> = (1..=14).collect();
    let ids = repo
        .create_bookings(user_id, bus_id, date, &seats, price())
        .await
        .unwrap();

    repo.cancel(ids[12]).await.unwrap();
    assert_eq!(repo.complete(ids[13]).await.unwrap(), 1);

    let response = SearchController::new(pool.clone())
        .search(SearchRequest {
            from: start,
            to: end,
            date: date.format("%Y-%m-%d").to_string(),
            number_of_seats: 1,
            service: None,
        })
        .await
        .unwrap();

    assert_eq!(response.available_buses.len(), 1);
    assert_eq!(response.available_buses[0].available_seats, 28);
    assert!(response.message.is_none());
}

#[tokio::test]
#[ignore]
async fn missing_route_and_exhausted_route_are_distinguishable() {
    let pool = test_pool().await;
    let controller = SearchController::new(pool.clone());
    let date_str = future_date().format("%Y-%m-%d").to_string();

    // Ruta inexistente -> NotFound
    let missing = controller
        .search(SearchRequest {
            from: format!("Nowhere-{}", Uuid::new_v4().simple()),
            to: "Anywhere".to_string(),
            date: date_str.clone(),
            number_of_seats: 1,
            service: None,
        })
        .await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));

    // Ruta existente sin capacidad -> Ok con mensaje y lista vacía
    let (start, end, bus_id) = seed_route_and_bus(&pool, 1).await;
    let user_id = seed_user(&pool, Role::User).await;
    BookingRepository::new(pool.clone())
        .create_bookings(user_id, bus_id, future_date(), &[1], price())
        .await
        .unwrap();

    let exhausted = controller
        .search(SearchRequest {
            from: start,
            to: end,
            date: date_str,
            number_of_seats: 1,
            service: None,
        })
        .await
        .unwrap();

    assert!(exhausted.available_buses.is_empty());
    assert!(exhausted.message.is_some());
}

#[tokio::test]
#[ignore]
async fn complete_is_guarded_by_role_and_current_status() {
    let pool = test_pool().await;
    let (_, _, bus_id) = seed_route_and_bus(&pool, 40).await;
    let controller = booking_controller(&pool);

    let passenger_id = seed_user(&pool, Role::User).await;
    let passenger = AuthenticatedUser {
        user_id: passenger_id,
        role: Role::User,
    };
    let conductor = AuthenticatedUser {
        user_id: seed_user(&pool, Role::Conductor).await,
        role: Role::Conductor,
    };

    let ids = BookingRepository::new(pool.clone())
        .create_bookings(passenger_id, bus_id, future_date(), &[4], price())
        .await
        .unwrap();
    let booking_id = ids[0];

    // Un pasajero no puede completar
    assert!(matches!(
        controller.complete(booking_id, &passenger).await,
        Err(AppError::Forbidden(_))
    ));

    // El conductor sí; la segunda vez el guard de estado rechaza
    let completed = controller.complete(booking_id, &conductor).await.unwrap();
    assert_eq!(completed.status, "Completed");

    assert!(matches!(
        controller.complete(booking_id, &conductor).await,
        Err(AppError::InvalidState(_))
    ));

    // Una reserva inexistente es NotFound, no InvalidState
    assert!(matches!(
        controller.complete(Uuid::new_v4(), &conductor).await,
        Err(AppError::NotFound(_))
    ));

    // El estado no cambió con los intentos fallidos
    let booking = BookingRepository::new(pool.clone())
        .find_by_id(booking_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(booking.status, "Completed");
}

#[tokio::test]
#[ignore]
async fn a_cancelled_seat_is_immediately_bookable_again() {
    let pool = test_pool().await;
    let (_, _, bus_id) = seed_route_and_bus(&pool, 40).await;
    let date = future_date();
    let repo = BookingRepository::new(pool.clone());

    let first_user = seed_user(&pool, Role::User).await;
    let ids = repo
        .create_bookings(first_user, bus_id, date, &[3], price())
        .await
        .unwrap();

    repo.cancel(ids[0]).await.unwrap();

    // El mismo asiento vuelve a estar disponible para otro usuario
    let second_user = seed_user(&pool, Role::User).await;
    let rebooked = repo
        .create_bookings(second_user, bus_id, date, &[3], price())
        .await
        .unwrap();
    assert_eq!(rebooked.len(), 1);

    // La reserva cancelada sigue existiendo como registro histórico
    let cancelled = repo.find_by_id(ids[0]).await.unwrap().unwrap();
    assert_eq!(cancelled.status, "Cancelled");
}

#[tokio::test]
#[ignore]
async fn booking_ids_follow_seat_order_and_seats_are_sorted() {
    let pool = test_pool().await;
    let (_, _, bus_id) = seed_route_and_bus(&pool, 40).await;
    let date = future_date();
    let repo = BookingRepository::new(pool.clone());
    let user_id = seed_user(&pool, Role::User).await;

    let ids = repo
        .create_bookings(user_id, bus_id, date, &[2, 5, 9], price())
        .await
        .unwrap();
    assert_eq!(ids.len(), 3);

    let seats = repo.booked_seats(bus_id, date).await.unwrap();
    assert_eq!(seats, vec![2, 5, 9]);

    // El id devuelto en la posición i corresponde al asiento i-ésimo
    for (id, expected_seat) in ids.iter().zip([2, 5, 9]) {
        let booking = repo.find_by_id(*id).await.unwrap().unwrap();
        assert_eq!(booking.seat_number, expected_seat);
    }
}

#[tokio::test]
#[ignore]
async fn attaching_an_artifact_twice_keeps_a_single_latest_url() {
    let pool = test_pool().await;
    let (_, _, bus_id) = seed_route_and_bus(&pool, 40).await;
    let repo = BookingRepository::new(pool.clone());
    let user_id = seed_user(&pool, Role::User).await;

    let ids = repo
        .create_bookings(user_id, bus_id, future_date(), &[1], price())
        .await
        .unwrap();
    let booking_id = ids[0];

    // La key del objeto es determinística, así que un reintento escribe la
    // misma URL; acá simulamos dos write-backs del attacher
    let key = QrService::object_key(booking_id);
    repo.set_qr_code(booking_id, &format!("https://cdn.test/{}", key))
        .await
        .unwrap();
    repo.set_qr_code(booking_id, &format!("https://cdn.test/{}", key))
        .await
        .unwrap();

    let booking = repo.find_by_id(booking_id).await.unwrap().unwrap();
    assert_eq!(
        booking.qr_code,
        Some(format!("https://cdn.test/{}", key)),
        "the booking must hold exactly one artifact URL"
    );
}

#[tokio::test]
#[ignore]
async fn rejects_a_request_that_books_nothing_or_travels_in_the_past() {
    let pool = test_pool().await;
    let (_, _, bus_id) = seed_route_and_bus(&pool, 40).await;
    let controller = booking_controller(&pool);

    let caller = AuthenticatedUser {
        user_id: seed_user(&pool, Role::User).await,
        role: Role::User,
    };

    // Fecha en el pasado
    let past = (Utc::now().date_naive() - Duration::days(1))
        .format("%Y-%m-%d")
        .to_string();
    let result = controller
        .create(
            &caller,
            CreateBookingRequest {
                bus_id,
                seat_numbers: vec![1],
                travel_date: past,
                price: price(),
            },
        )
        .await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    // Asiento no positivo
    let result = controller
        .create(
            &caller,
            CreateBookingRequest {
                bus_id,
                seat_numbers: vec![0],
                travel_date: future_date().format("%Y-%m-%d").to_string(),
                price: price(),
            },
        )
        .await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    // Nada quedó escrito
    let seats = BookingRepository::new(pool.clone())
        .booked_seats(bus_id, future_date())
        .await
        .unwrap();
    assert!(seats.is_empty());
}

#[tokio::test]
#[ignore]
async fn a_conductor_can_hold_one_active_assignment_per_bus() {
    let pool = test_pool().await;
    let (_, _, bus_id) = seed_route_and_bus(&pool, 40).await;
    let controller = ConductorController::new(pool.clone());

    let admin = AuthenticatedUser {
        user_id: seed_user(&pool, Role::Admin).await,
        role: Role::Admin,
    };
    let conductor_id = seed_user(&pool, Role::Conductor).await;

    let request = AssignConductorRequest {
        conductor_id,
        bus_id,
    };
    controller.assign(&admin, request).await.unwrap();

    let duplicate = controller
        .assign(
            &admin,
            AssignConductorRequest {
                conductor_id,
                bus_id,
            },
        )
        .await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));
}
