pub mod cache;
pub mod driver;
pub mod error;
pub mod health;
pub mod race;
pub mod standing;
