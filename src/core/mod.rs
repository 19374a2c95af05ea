//! Core business logic: fund records, rating, formatting and filtering

pub mod config;
pub mod filter;
pub mod format;
pub mod fund;
pub mod log;
pub mod rating;
pub mod source;

// Re-export main types for cleaner imports
pub use filter::{ScreenCriteria, filter, screen};
pub use fund::{Exchange, FundRecord, HoldPeriod};
pub use rating::{RatingResult, classify, rate};
pub use source::{FundList, FundSource, HistoryPoint, SourceKind};
