pub mod auth_routes;
pub mod booking_routes;
pub mod bus_routes;
pub mod conductor_routes;
pub mod directory_routes;
pub mod route_routes;
pub mod search_routes;
