pub mod assignment_service;
pub mod order_service;
