pub mod catalog;
pub mod chat;
pub mod ids;
pub mod license;
pub mod notification;
pub mod playback;
pub mod producer;
pub mod rating;
pub mod recommendation;
pub mod sample;
pub mod sound_pack;
pub mod user;
pub mod view;

pub use catalog::Catalog;
pub use chat::{ChatMessage, ChatRole, Recommendations};
pub use ids::{PackId, ProducerId, SampleId, SessionId};
pub use license::{LicenseError, Licenses};
pub use notification::{Notification, NotificationKind};
pub use playback::PlaybackState;
pub use producer::Producer;
pub use rating::Rating;
pub use recommendation::{FALLBACK_CONTENT, Recommendation, RecommendationContext, UiTrigger};
pub use sample::{Price, Sample, SampleKind, SampleSummary};
pub use sound_pack::SoundPack;
pub use user::{UserRole, UserState};
pub use view::AppView;
