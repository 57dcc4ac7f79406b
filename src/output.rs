//! Saturation bounds for the controller output.
//!
//! Bounds are kept in the scaled domain, already multiplied by
//! [`PARAM_MULT`], so the step computation can clamp before descaling.

use crate::fixed_point::{PARAM_MULT, PARAM_SHIFT};
use crate::ConfigError;

/// Scaled lower and upper bound of the control output.
///
/// The default range is empty (both bounds zero), which pins the output of an
/// unconfigured controller to zero.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutputRange {
    min: i64,
    max: i64,
}

impl OutputRange {
    /// Range spanning `min..=max` in output units.
    pub fn from_bounds(min: i16, max: i16) -> Result<Self, ConfigError> {
        if min >= max {
            return Err(ConfigError::InvalidOutputRange { min, max });
        }

        Ok(Self {
            min: i64::from(min) * PARAM_MULT,
            max: i64::from(max) * PARAM_MULT,
        })
    }

    /// Range of an integer with the given width and signedness.
    ///
    /// At the full 16 bit width the top bit is kept as a sign reserve, so an
    /// unsigned 16 bit output tops out at `i16::MAX`.
    pub fn from_bit_width(bits: u8, signed: bool) -> Result<Self, ConfigError> {
        if !(1..=16).contains(&bits) {
            return Err(ConfigError::InvalidBitWidth(bits));
        }
        let bits = u32::from(bits);

        let max = if bits == 16 {
            0xFFFF >> 1
        } else {
            0xFFFF >> (16 - bits)
        };
        let min = if signed {
            -((0xFFFF >> (17 - bits)) + 1)
        } else {
            0
        };

        Ok(Self {
            min: min * PARAM_MULT,
            max: max * PARAM_MULT,
        })
    }

    /// Lower bound, scaled.
    pub fn scaled_min(&self) -> i64 {
        self.min
    }

    /// Upper bound, scaled.
    pub fn scaled_max(&self) -> i64 {
        self.max
    }

    /// Lower bound in output units.
    pub fn min(&self) -> i16 {
        (self.min >> PARAM_SHIFT) as i16
    }

    /// Upper bound in output units.
    pub fn max(&self) -> i16 {
        (self.max >> PARAM_SHIFT) as i16
    }

    /// Saturate a scaled value to this range.
    #[inline]
    pub fn clamp(&self, value: i64) -> i64 {
        if value > self.max {
            self.max
        } else if value < self.min {
            self.min
        } else {
            value
        }
    }
}
