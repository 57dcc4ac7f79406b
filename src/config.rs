/// Tuning parameters for a [`FastPid`](crate::FastPid).
///
/// This is plain data; nothing is validated until the configuration is
/// applied with [`FastPid::configure_with`](crate::FastPid::configure_with)
/// or [`FastPid::from_config`](crate::FastPid::from_config).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PidConfig {
    /// Proportional gain.
    pub kp: f32,
    /// Integral gain, per second.
    pub ki: f32,
    /// Derivative gain, in seconds.
    pub kd: f32,
    /// Rate at which `step` is called, in Hz.
    pub hz: f32,
    /// Width of the output integer.
    pub bits: u8,
    /// Whether the output may go negative.
    pub signed: bool,
}

impl Default for PidConfig {
    fn default() -> Self {
        Self {
            kp: 1.0,
            ki: 0.0,
            kd: 0.0,
            hz: 1.0,
            bits: 16,
            signed: true,
        }
    }
}

impl PidConfig {
    /// Proportional-only controller with a signed 16 bit output, ticking at 1 Hz.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kp(mut self, kp: f32) -> Self {
        self.kp = kp;
        self
    }

    pub fn with_ki(mut self, ki: f32) -> Self {
        self.ki = ki;
        self
    }

    pub fn with_kd(mut self, kd: f32) -> Self {
        self.kd = kd;
        self
    }

    /// Set the sample frequency the integral and derivative gains are scaled by.
    pub fn with_sample_rate(mut self, hz: f32) -> Self {
        self.hz = hz;
        self
    }

    /// Set the output to the range of a `bits` wide integer.
    pub fn with_output(mut self, bits: u8, signed: bool) -> Self {
        self.bits = bits;
        self.signed = signed;
        self
    }
}
