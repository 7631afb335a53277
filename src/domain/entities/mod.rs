//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic. Creation input
//! lives in a separate struct ([`NewShortLink`]) because the store, not the
//! caller, assigns identity and timestamps.

pub mod short_link;

pub use short_link::{NewShortLink, ShortLink};
