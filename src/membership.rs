//! Piecewise-linear fuzzy membership functions over the hue circle.
//!
//! Every colour model expresses its classes as an ordered list of linear
//! segments. Published tables mix open and closed endpoints and sometimes
//! overlap at a breakpoint, so each bound carries its own comparison and the
//! first segment containing the hue decides the degree.

use serde::{Deserialize, Serialize};

/// Shape family of a model's membership functions.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MembershipShape {
    Trapezoidal,
    Triangular,
}

/// One end of a hue interval.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Bound {
    /// Hue equal to the endpoint is inside the interval.
    Closed(f64),
    /// Hue equal to the endpoint is outside the interval.
    Open(f64),
}

impl Bound {
    pub fn value(self) -> f64 {
        match self {
            Bound::Closed(v) | Bound::Open(v) => v,
        }
    }

    fn admits_above(self, hue: f64) -> bool {
        match self {
            Bound::Closed(v) => v <= hue,
            Bound::Open(v) => v < hue,
        }
    }

    fn admits_below(self, hue: f64) -> bool {
        match self {
            Bound::Closed(v) => hue <= v,
            Bound::Open(v) => hue < v,
        }
    }
}

/// Linear piece running from degree `start` at `from` to degree `end` at `to`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Segment {
    pub from: Bound,
    pub to: Bound,
    pub start: f64,
    pub end: f64,
}

impl Segment {
    pub const fn new(from: Bound, to: Bound, start: f64, end: f64) -> Self {
        Self {
            from,
            to,
            start,
            end,
        }
    }

    /// Ramp from 0 up to 1.
    pub const fn rising(from: Bound, to: Bound) -> Self {
        Self::new(from, to, 0.0, 1.0)
    }

    /// Ramp from 1 down to 0.
    pub const fn falling(from: Bound, to: Bound) -> Self {
        Self::new(from, to, 1.0, 0.0)
    }

    pub const fn plateau(from: Bound, to: Bound) -> Self {
        Self::new(from, to, 1.0, 1.0)
    }

    pub fn contains(&self, hue: f64) -> bool {
        self.from.admits_above(hue) && self.to.admits_below(hue)
    }

    pub fn at(&self, hue: f64) -> f64 {
        let (a, b) = (self.from.value(), self.to.value());
        if self.start == self.end || b == a {
            return self.start;
        }
        self.start + (self.end - self.start) * (hue - a) / (b - a)
    }
}

/// Membership function of a single fuzzy colour class.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MembershipFunction {
    pub segments: &'static [Segment],
}

impl MembershipFunction {
    pub const fn new(segments: &'static [Segment]) -> Self {
        Self { segments }
    }

    /// Degree of membership of `hue`, clamped into `[0, 1]`.
    ///
    /// A hue outside every segment has degree 0.
    pub fn degree(&self, hue: f64) -> f64 {
        self.segments
            .iter()
            .find(|segment| segment.contains(hue))
            .map(|segment| segment.at(hue).clamp(0.0, 1.0))
            .unwrap_or(0.0)
    }
}

/// A named class together with its membership function.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FuzzyClass {
    pub name: &'static str,
    pub function: MembershipFunction,
}
