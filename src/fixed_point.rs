//! Conversion of floating-point gains into 8.8 fixed-point coefficients.
//!
//! Coefficients are 16 bits wide with 8 fractional bits, so the scale factor
//! is 256 and the largest encodable gain is `65535 / 256`.

use fixed::types::U8F8;

use crate::ConfigError;

/// Number of fractional bits in an encoded coefficient.
pub const PARAM_SHIFT: u32 = 8;

/// Total width of an encoded coefficient.
pub const PARAM_BITS: u32 = 16;

/// Scale factor between a gain and its encoding.
pub const PARAM_MULT: i64 = 1 << PARAM_SHIFT;

/// Largest gain [`encode`] accepts.
pub const PARAM_MAX: f32 = ((1u32 << PARAM_BITS) - 1) as f32 / PARAM_MULT as f32;

/// Encode a non-negative gain as an unsigned 8.8 fixed-point value.
///
/// The gain is multiplied by 256 and truncated, so `encode(x)` equals
/// `floor(x * 256)`. Negative, non-finite and too-large gains are rejected,
/// as is any positive gain that would truncate to zero.
pub fn encode(value: f32) -> Result<U8F8, ConfigError> {
    if !value.is_finite() || value < 0.0 || value > PARAM_MAX {
        return Err(ConfigError::GainOutOfRange);
    }

    let bits = (value * PARAM_MULT as f32) as u16;
    if bits == 0 && value != 0.0 {
        return Err(ConfigError::GainUnderflow);
    }

    Ok(U8F8::from_bits(bits))
}
