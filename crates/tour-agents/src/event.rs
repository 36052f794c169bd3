//! Marker events.
//!
//! These carry no behavior — they are flags that loggers, renderers, and
//! tests read to know that an explanation is in progress and where.

use tour_core::Point;

/// The guide is explaining at a destination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Narration {
    /// Where the explanation is happening.
    pub pos: Point,
}

impl Narration {
    pub fn new(pos: Point) -> Self {
        Self { pos }
    }
}

/// A visitor is attending a narration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Listening {
    /// Where the narration being attended is happening.
    pub pos: Point,
}

impl Listening {
    pub fn new(pos: Point) -> Self {
        Self { pos }
    }
}
