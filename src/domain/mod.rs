pub mod cas;
pub mod courier;
pub mod errors;
pub mod geo;
pub mod lifecycle;
pub mod order;
pub mod ports;
