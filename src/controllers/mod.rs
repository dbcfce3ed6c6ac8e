pub mod auth_controller;
pub mod booking_controller;
pub mod bus_controller;
pub mod conductor_controller;
pub mod directory_controller;
pub mod route_controller;
pub mod search_controller;
