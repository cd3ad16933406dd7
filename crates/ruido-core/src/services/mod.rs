pub mod conversation;
pub mod recommendation_service;
pub mod session;

pub use conversation::{Conversation, GREETING, PendingTurn, TurnTicket};
pub use recommendation_service::RecommendationClient;
pub use session::{DEFAULT_NOTIFICATION_DELAY, StorefrontSession};
