pub mod health;
pub mod invoke;
