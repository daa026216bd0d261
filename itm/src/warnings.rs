//! Soft warnings attached to a prediction.
//!
//! Warnings never stop a computation: they flag inputs or intermediate values
//! that fall outside the ranges the model was fit over.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Warning flags returned with every prediction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Warnings {
    bits: u32,
}

impl Warnings {
    pub const NONE: Self = Self::from_bits(0);

    /// TX structural height is below 1 m.
    pub const TX_HEIGHT_BELOW_RANGE: Self = Self::from_bits(0x0001);
    /// TX structural height is above 1000 m.
    pub const TX_HEIGHT_ABOVE_RANGE: Self = Self::from_bits(0x0002);
    /// RX structural height is below 1 m.
    pub const RX_HEIGHT_BELOW_RANGE: Self = Self::from_bits(0x0004);
    /// RX structural height is above 1000 m.
    pub const RX_HEIGHT_ABOVE_RANGE: Self = Self::from_bits(0x0008);
    /// Frequency is below 40 MHz.
    pub const FREQUENCY_BELOW_RANGE: Self = Self::from_bits(0x0010);
    /// Frequency is above 10 GHz.
    pub const FREQUENCY_ABOVE_RANGE: Self = Self::from_bits(0x0020);
    /// Path distance is below 1 km.
    pub const DISTANCE_BELOW_RANGE: Self = Self::from_bits(0x0040);
    /// Path distance is above 1000 km.
    pub const DISTANCE_ABOVE_RANGE: Self = Self::from_bits(0x0080);
    /// Path distance is beyond 2000 km, where the model has no support at all.
    pub const DISTANCE_BEYOND_MODEL: Self = Self::from_bits(0x0100);
    /// Path is shorter than five times the effective height difference.
    pub const DISTANCE_BELOW_MINIMUM: Self = Self::from_bits(0x0200);
    /// Terrain irregularity is above 500 m.
    pub const TERRAIN_IRREGULARITY: Self = Self::from_bits(0x0400);
    /// TX horizon elevation angle exceeds 200 mrad.
    pub const TX_HORIZON_ANGLE: Self = Self::from_bits(0x0800);
    /// RX horizon elevation angle exceeds 200 mrad.
    pub const RX_HORIZON_ANGLE: Self = Self::from_bits(0x1000);
    /// TX horizon distance is far from its smooth-earth value.
    pub const TX_HORIZON_DISTANCE: Self = Self::from_bits(0x2000);
    /// RX horizon distance is far from its smooth-earth value.
    pub const RX_HORIZON_DISTANCE: Self = Self::from_bits(0x4000);
    /// A requested percentage maps to a normal deviate beyond ±3.1.
    pub const EXTREME_VARIABILITIES: Self = Self::from_bits(0x8000);
    /// The total loss came out below free-space loss.
    pub const LOSS_BELOW_FREE_SPACE: Self = Self::from_bits(0x1_0000);

    const NAMES: [(Self, &'static str); 17] = [
        (Self::TX_HEIGHT_BELOW_RANGE, "tx height below range"),
        (Self::TX_HEIGHT_ABOVE_RANGE, "tx height above range"),
        (Self::RX_HEIGHT_BELOW_RANGE, "rx height below range"),
        (Self::RX_HEIGHT_ABOVE_RANGE, "rx height above range"),
        (Self::FREQUENCY_BELOW_RANGE, "frequency below range"),
        (Self::FREQUENCY_ABOVE_RANGE, "frequency above range"),
        (Self::DISTANCE_BELOW_RANGE, "distance below range"),
        (Self::DISTANCE_ABOVE_RANGE, "distance above range"),
        (Self::DISTANCE_BEYOND_MODEL, "distance beyond model"),
        (Self::DISTANCE_BELOW_MINIMUM, "distance below minimum"),
        (Self::TERRAIN_IRREGULARITY, "terrain irregularity"),
        (Self::TX_HORIZON_ANGLE, "tx horizon angle"),
        (Self::RX_HORIZON_ANGLE, "rx horizon angle"),
        (Self::TX_HORIZON_DISTANCE, "tx horizon distance"),
        (Self::RX_HORIZON_DISTANCE, "rx horizon distance"),
        (Self::EXTREME_VARIABILITIES, "extreme variabilities"),
        (Self::LOSS_BELOW_FREE_SPACE, "loss below free space"),
    ];

    /// Create warnings from raw bits.
    pub const fn from_bits(bits: u32) -> Self {
        Self { bits }
    }

    /// Get the raw warning bits.
    pub fn bits(self) -> u32 {
        self.bits
    }

    /// Check if there are any warnings.
    pub fn has_warnings(self) -> bool {
        self.bits != 0
    }

    /// Whether every flag in `other` is set.
    pub fn contains(self, other: Self) -> bool {
        self.bits & other.bits == other.bits
    }

    pub fn insert(&mut self, other: Self) {
        self.bits |= other.bits;
    }

    /// Sets `other` when `condition` holds.
    pub fn set_if(&mut self, other: Self, condition: bool) {
        if condition {
            self.insert(other);
        }
    }

    /// Short names of the flags that are set.
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        Self::NAMES
            .iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
    }
}

impl BitOr for Warnings {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self::from_bits(self.bits | rhs.bits)
    }
}

impl BitOrAssign for Warnings {
    fn bitor_assign(&mut self, rhs: Self) {
        self.insert(rhs);
    }
}

impl fmt::Display for Warnings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.has_warnings() {
            return f.write_str("none");
        }

        let names: Vec<&str> = self.names().collect();
        write!(f, "{:#x} ({})", self.bits, names.join(", "))
    }
}
