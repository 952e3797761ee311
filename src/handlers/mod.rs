pub mod delivery;
pub mod orders;
