pub mod delivery_repo;
pub mod models;
pub mod order_repo;
