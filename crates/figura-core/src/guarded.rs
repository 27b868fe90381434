//! A point that accepts free-form text edits without failing.
//!
//! Editors bind a [`GuardedPoint`] to a text field. Malformed text keeps the last good
//! coordinates and clears the validity flag; hooks registered on the point are called
//! synchronously with the new validity after every text edit.

use crate::error::{CodecError, Result};
use crate::value::Point;
use std::fmt;

/// Largest accepted absolute coordinate.
pub const MAX_COORDINATE: u32 = 10_000;

type ValidityHook = Box<dyn FnMut(bool)>;

pub struct GuardedPoint {
    point: Point,
    valid: bool,
    hooks: Vec<ValidityHook>,
}

impl GuardedPoint {
    pub fn new(point: Point) -> Self {
        Self {
            point,
            valid: true,
            hooks: Vec::new(),
        }
    }

    /// Parse `x,y` eagerly, failing instead of flagging.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(Self::new(checked_point(text)?))
    }

    /// Last accepted coordinates.
    pub fn point(&self) -> Point {
        self.point
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Text form of the last accepted coordinates.
    pub fn text(&self) -> String {
        self.point.to_string()
    }

    /// Replace the coordinates directly. Always valid; hooks are not called.
    pub fn set_point(&mut self, point: Point) {
        self.point = point;
        self.valid = true;
    }

    /// Apply a text edit. Returns the new validity.
    pub fn set_text(&mut self, text: &str) -> bool {
        match checked_point(text) {
            Ok(point) => {
                self.point = point;
                self.valid = true;
            }
            Err(_) => self.valid = false,
        }
        let valid = self.valid;
        for hook in &mut self.hooks {
            hook(valid);
        }
        valid
    }

    /// Register a hook called with the validity after each [`set_text`](Self::set_text).
    pub fn on_validity<F: FnMut(bool) + 'static>(&mut self, hook: F) {
        self.hooks.push(Box::new(hook));
    }
}

impl fmt::Debug for GuardedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuardedPoint")
            .field("point", &self.point)
            .field("valid", &self.valid)
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

fn checked_point(text: &str) -> Result<Point> {
    let point: Point = text.parse()?;
    if point.x.unsigned_abs() > MAX_COORDINATE || point.y.unsigned_abs() > MAX_COORDINATE {
        return Err(CodecError::OutOfRange {
            x: point.x,
            y: point.y,
        });
    }
    Ok(point)
}
