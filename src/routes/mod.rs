pub mod assignment_routes;
pub mod driver_routes;
pub mod vehicle_routes;
