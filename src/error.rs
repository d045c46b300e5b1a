//! Error types for the event layout engine.

use std::fmt;

use thiserror::Error;

use crate::models::event::EventId;

/// Which end of an event interval a failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Start,
    End,
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Start => f.write_str("start"),
            Bound::End => f.write_str("end"),
        }
    }
}

/// Main error type for layout operations.
///
/// Inverted or zero-length intervals are not errors: they degrade to
/// zero-height geometry instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Unparseable {bound} timestamp {value:?} for event {event_id}")]
    UnparseableTimestamp {
        event_id: EventId,
        bound: Bound,
        value: String,
    },

    #[error("Unknown timezone identifier: {0}")]
    UnknownTimezone(String),
}

pub type Result<T> = std::result::Result<T, LayoutError>;
