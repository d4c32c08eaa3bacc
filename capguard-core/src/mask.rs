//! Sensor selector / result bitmask
//!
//! Bit *i* stands for the sensor with flat index *i*. Flat indices are handed
//! out by walking widgets in configuration order and the sensors of each
//! widget in order, so the same physical sensor always lands on the same bit.
//!
//! ```text
//! widget 0: [s0 s1 s2]   widget 1: [s0]   widget 2: [s0 s1]
//! index:      0  1  2               3                4  5
//! ```
//!
//! The same type is used to select sensors going into
//! [`crate::SensorHealthMonitor::check`] and to report flagged sensors coming
//! out of it.

use core::fmt;
use core::ops::{BitAnd, BitOr, BitOrAssign, Not};

use crate::constants::{ALL_SENSORS, MAX_SENSORS};
use crate::traits::{SensingBackend, WidgetId};

/// 32-bit set of flat sensor indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct SensorMask(u32);

impl SensorMask {
    /// No sensors. Also the "everything normal" result.
    pub const NONE: Self = Self(0);

    /// Every sensor, whatever the configured count.
    pub const ALL: Self = Self(ALL_SENSORS);

    /// Wrap a raw bitfield
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Raw bitfield
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Mask with only `index` set. Indices past the mask width give an empty mask.
    pub const fn single(index: usize) -> Self {
        if index < MAX_SENSORS {
            Self(1 << index)
        } else {
            Self::NONE
        }
    }

    /// Mask covering exactly the first `count` sensors.
    pub const fn first(count: usize) -> Self {
        if count >= MAX_SENSORS {
            Self::ALL
        } else {
            Self((1u32 << count) - 1)
        }
    }

    /// Mask selecting one sensor addressed by widget and position in that widget.
    ///
    /// `None` when the sensor does not exist or its flat index does not fit
    /// the mask.
    pub fn for_sensor<B: SensingBackend + ?Sized>(
        backend: &B,
        widget: WidgetId,
        sensor: usize,
    ) -> Option<Self> {
        backend
            .sensor_position(widget, sensor)
            .filter(|&index| index < MAX_SENSORS)
            .map(Self::single)
    }

    /// Whether sensor `index` is in the set
    pub const fn contains(self, index: usize) -> bool {
        index < MAX_SENSORS && self.0 & (1 << index) != 0
    }

    /// Add sensor `index`. Out-of-width indices are ignored.
    pub fn insert(&mut self, index: usize) {
        *self = *self | Self::single(index);
    }

    /// Remove sensor `index`
    pub fn remove(&mut self, index: usize) {
        *self = *self & !Self::single(index);
    }

    /// Builder form of [`insert`](Self::insert)
    pub const fn with(self, index: usize) -> Self {
        Self(self.0 | Self::single(index).0)
    }

    /// Builder form of [`remove`](Self::remove)
    pub const fn without(self, index: usize) -> Self {
        Self(self.0 & !Self::single(index).0)
    }

    /// True when no bit is set
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of sensors in the set
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Flat indices in ascending order
    pub fn iter(self) -> impl Iterator<Item = usize> {
        (0..MAX_SENSORS).filter(move |&i| self.contains(i))
    }
}

impl From<u32> for SensorMask {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

impl From<SensorMask> for u32 {
    fn from(mask: SensorMask) -> Self {
        mask.0
    }
}

impl FromIterator<usize> for SensorMask {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        iter.into_iter().fold(Self::NONE, Self::with)
    }
}

impl BitOr for SensorMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for SensorMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for SensorMask {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl Not for SensorMask {
    type Output = Self;

    fn not(self) -> Self {
        Self(!self.0)
    }
}

impl fmt::Binary for SensorMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Binary::fmt(&self.0, f)
    }
}

impl fmt::Display for SensorMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SensorMask {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=u32:#x}", self.0)
    }
}
