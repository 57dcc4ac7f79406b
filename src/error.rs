use thiserror::Error;

/// Reasons a controller configuration can be rejected.
///
/// A controller records the first of these it encounters and keeps it until
/// it is reconfigured.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A gain was negative, not finite, or above the largest encodable value.
    #[error("gain out of range")]
    GainOutOfRange,
    /// A positive gain was too small to be encoded and would disable its term.
    #[error("gain too small to encode")]
    GainUnderflow,
    #[error("invalid output range: min {min} is not below max {max}")]
    InvalidOutputRange { min: i16, max: i16 },
    #[error("invalid output width: {0} bits, expected 1 to 16")]
    InvalidBitWidth(u8),
}
