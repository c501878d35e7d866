// charge/types.rs
// Contains the Polarity enum and the Charge value type

use serde::{Deserialize, Serialize};
use ultraviolet::Vec2;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Polarity {
    Positive,
    Negative,
}

impl Polarity {
    /// Polarity of a signed magnitude. Zero has none.
    pub fn of(magnitude: f32) -> Option<Self> {
        if magnitude > 0.0 {
            Some(Polarity::Positive)
        } else if magnitude < 0.0 {
            Some(Polarity::Negative)
        } else {
            None
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Polarity::Positive => Polarity::Negative,
            Polarity::Negative => Polarity::Positive,
        }
    }

    /// +1 for positive, -1 for negative.
    pub fn sign(self) -> f32 {
        match self {
            Polarity::Positive => 1.0,
            Polarity::Negative => -1.0,
        }
    }
}

/// A point charge. Position and magnitude are fixed once created.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Charge {
    pub pos: Vec2,
    pub magnitude: f32,
}

impl Charge {
    pub fn new(x: f32, y: f32, magnitude: f32) -> Self {
        Self { pos: Vec2::new(x, y), magnitude }
    }

    pub fn at(pos: Vec2, magnitude: f32) -> Self {
        Self { pos, magnitude }
    }

    pub fn x(&self) -> f32 {
        self.pos.x
    }

    pub fn y(&self) -> f32 {
        self.pos.y
    }

    pub fn polarity(&self) -> Option<Polarity> {
        Polarity::of(self.magnitude)
    }

    pub fn is_positive(&self) -> bool {
        self.magnitude > 0.0
    }

    pub fn is_negative(&self) -> bool {
        self.magnitude < 0.0
    }

    /// Signed magnitude formatted for a charge label, e.g. `+1` or `-2.5`.
    pub fn label(&self) -> String {
        let sign = if self.magnitude > 0.0 { "+" } else { "" };
        format!("{}{}", sign, self.magnitude)
    }
}
