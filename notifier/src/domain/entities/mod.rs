//! Domain entities
//!
//! Pure domain models for the moderation queue and the users who review it.
//! These are separate from the row types used by the Postgres adapter.

pub mod counts;
pub mod recipient;
pub mod reviewable;
pub mod settings;

pub use counts::{CountPayload, CountResult, MessageGroup};
pub use recipient::{GroupId, Recipient, Role, UserId, UserRecord};
pub use reviewable::{Reviewable, ReviewableId, ReviewableStatus};
pub use settings::{
    NotifySettings, PriorityThresholds, VisibilityLevel, VisibilityThreshold,
    DEFAULT_COUNTS_CHANNEL,
};
