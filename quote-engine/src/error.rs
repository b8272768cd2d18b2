//! Engine Error Types

use thiserror::Error;

/// Errors from the quote engine API.
///
/// Expected business outcomes (unknown coupon codes, empty item lists)
/// are modeled as data, not errors; this covers API misuse only.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// Coupon application or state access before any calculation
    #[error("no quote has been calculated yet")]
    NoQuote,
}
