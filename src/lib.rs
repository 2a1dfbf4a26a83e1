#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::all, clippy::nursery, missing_docs)]
#![doc = include_str!("../README.md")]

/// Physical constants and frequency conversions.
pub mod constants;
/// Strongly typed unit helpers and quantity abstractions.
pub mod units;
/// Shared scalar aliases and complex-number helpers.
pub mod math;
/// Passive components, series/parallel composition and voltage evaluation.
pub mod circuits;
/// Frequency sweep builders and post-processing helpers.
pub mod sweep;
/// Error type shared by every query.
pub mod errors;

/// Common exports for downstream crates.
pub mod prelude;
