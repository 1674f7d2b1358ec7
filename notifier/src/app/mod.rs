//! Application layer
//!
//! The count fan-out pipeline. Each stage is a plain function over snapshots;
//! `NotifyReviewableService` wires them to the ports.

pub mod audience;
pub mod counts;
pub mod grouping;
pub mod notify_service;
pub mod publisher;
pub mod visibility;

pub use audience::{resolve_audience, Audience};
pub use counts::{count_all, count_for};
pub use grouping::group_by_payload;
pub use notify_service::{NotifyReport, NotifyReviewableService};
pub use publisher::{publish_groups, PublishOutcome};
pub use visibility::{is_visible, scopes_for, RecipientScope};
