//! SeqPredict - arithmetic progression prediction
//!
//! Turns free-form text into numeric sequences, decides whether a sequence is
//! an arithmetic progression, extends it, and keeps an in-memory log of the
//! predictions made ("echoes").
//!
//! # Modules
//!
//! - [`parser`] - comma-separated text to numbers
//! - [`progression`] - validity predicate and common difference
//! - [`predictor`] - next term and next-N terms
//! - [`echo`] - append-only echo log
//! - [`format`] - rendering numbers and sequences for people
//!
//! Absence is always signalled with `Option`: an unparseable string, an
//! invalid progression or a non-positive count yields `None`.
//!
//! # Example
//!
//! ```
//! use seqpredict::{EchoLog, parse_sequence, predict_next};
//!
//! let sequence = parse_sequence("3, 6, 9, 12").unwrap();
//! let next = predict_next(&sequence).unwrap();
//! assert_eq!(next, 15.0);
//!
//! let mut log = EchoLog::new();
//! log.record(&sequence, next);
//! assert_eq!(log.count(), 1);
//! ```

pub mod echo;
pub mod format;
pub mod parser;
pub mod predictor;
pub mod progression;

pub use echo::{Echo, EchoLog, iso_timestamp};
pub use format::{format_number, format_sequence, join_sequence};
pub use parser::parse_sequence;
pub use predictor::{predict_multiple, predict_next};
pub use progression::{common_difference, is_valid_progression};

/// Number of terms predicted when a caller does not say how many
pub const DEFAULT_PREDICTION_COUNT: i64 = 5;

/// Largest count the shells accept for a multi-term prediction
pub const DEFAULT_MAX_PREDICTION_COUNT: i64 = 1000;
