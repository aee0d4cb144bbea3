//! The constant-payload contract.

use std::fmt::Debug;

/// The opaque payload carried by constant leaves.
///
/// A grammar instance fixes one payload type for all trees parsed against
/// it; the engine only ever touches payloads through this trait.
pub trait Payload: Clone + Debug {
    /// Parse a numeric-literal token into a payload. `None` rejects the
    /// literal (surfaced as a syntax error by the parser).
    fn parse(text: &str) -> Option<Self>;

    /// Render the payload for display.
    fn format(&self) -> String;

    /// Structural equality, used by matching and tree comparison.
    fn equals(&self, other: &Self) -> bool;
}

/// The stock payload: double-precision floats with bitwise equality.
impl Payload for f64 {
    fn parse(text: &str) -> Option<Self> {
        text.parse().ok()
    }

    fn format(&self) -> String {
        if self.fract() == 0.0 && self.abs() < 1e15 {
            format!("{}", *self as i64)
        } else {
            format!("{self}")
        }
    }

    fn equals(&self, other: &Self) -> bool {
        self.to_bits() == other.to_bits()
    }
}
