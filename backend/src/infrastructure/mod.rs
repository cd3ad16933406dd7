pub mod auth;
pub mod clock;
pub mod transport;
