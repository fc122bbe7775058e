//! Display formatting for documents, trackers and operation results.
//!
//! Domain models implement [`std::fmt::Display`] directly and emit markdown.
//! Collections and operation outcomes get newtype wrappers so they can carry
//! their own framing (empty-listing messages, success prefixes).
//!
//! - [`collections`]: [`DocumentSummaries`]
//! - [`results`]: [`CreateResult`]
//! - [`status`]: [`OperationStatus`]
//! - [`datetime`]: [`LocalDateTime`]
//! - [`models`]: markdown for the domain models
//!
//! ```rust
//! use prdwiz_core::display::OperationStatus;
//!
//! let status = OperationStatus::success("Deleted PRD 1-acme".to_string());
//! assert!(status.to_string().starts_with("Success:"));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::DocumentSummaries;
pub use datetime::LocalDateTime;
pub use results::CreateResult;
pub use status::OperationStatus;
