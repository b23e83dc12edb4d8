//! Data model for extracted container attributes
//!
//! A [`Record`] holds the flat attribute map for one container/release
//! pair. Failed extractions are stored as [`NOT_APPLICABLE`] rather than
//! being left out, so every record for a release has the same shape.

mod kind;
mod record;
mod release;

pub use kind::ContainerKind;
pub use record::{Record, NOT_APPLICABLE};
pub use release::Release;
