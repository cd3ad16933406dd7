pub mod auth;
pub mod catalog;
pub mod clock;
pub mod media;
pub mod recommendation;

pub use auth::{AuthError, AuthProvider, IdentityStream};
pub use catalog::{CatalogError, CatalogSource};
pub use clock::{Clock, ManualClock, SystemClock};
pub use media::{MediaTransport, PlaybackError};
pub use recommendation::{ModelError, ModelRequest, RecommendationModel};
