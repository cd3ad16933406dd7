pub mod adapter;
pub mod seed;

pub use adapter::SeedCatalog;
pub use seed::{PRODUCERS, SAMPLES};
