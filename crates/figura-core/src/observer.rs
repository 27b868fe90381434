//! Diagnostics reported while encoding or decoding.
//!
//! Lossy but non-fatal events are handed to a caller-supplied [`Observer`] rather than
//! a process-wide log sink. Any `FnMut(Diagnostic)` closure is an observer;
//! [`LogObserver`] forwards to the `log` facade.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// The JSON encoder met a value with no JSON form and wrote an inline marker.
    Unrepresentable { value: String },
    /// The XML decoder skipped an element that is neither `Dict` nor `List`.
    UnknownElement { name: String },
    /// A `Dict` child element held no `Dict`/`List`; the entry decoded to `null`.
    MissingWrapperContent { key: String },
    /// The XML encoder left out a map entry whose key is not a valid XML name.
    InvalidKey { key: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Unrepresentable { value } => {
                write!(f, "value {value} has no JSON representation")
            }
            Diagnostic::UnknownElement { name } => {
                write!(f, "skipped unknown element <{name}>")
            }
            Diagnostic::MissingWrapperContent { key } => {
                write!(f, "element <{key}> has no Dict or List inside; using null")
            }
            Diagnostic::InvalidKey { key } => {
                write!(f, "skipped entry {key:?}: key is not a valid XML name")
            }
        }
    }
}

pub trait Observer {
    fn observe(&mut self, diagnostic: Diagnostic);
}

impl<F: FnMut(Diagnostic)> Observer for F {
    fn observe(&mut self, diagnostic: Diagnostic) {
        self(diagnostic)
    }
}

/// Observer used by the convenience entry points: logs each diagnostic at `warn`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl Observer for LogObserver {
    fn observe(&mut self, diagnostic: Diagnostic) {
        log::warn!("{diagnostic}");
    }
}
