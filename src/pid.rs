use fixed::types::U8F8;

use crate::fixed_point::{encode, PARAM_SHIFT};
use crate::{ConfigError, OutputRange, PidConfig};

/// Encoded gains of a controller, one per term.
///
/// These are per-sample gains: the integral gain has already been divided by
/// the sample rate and the derivative gain multiplied by it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Coefficients {
    pub p: U8F8,
    pub i: U8F8,
    pub d: U8F8,
}

impl Coefficients {
    fn encode(kp: f32, ki: f32, kd: f32, hz: f32) -> Result<Self, ConfigError> {
        Ok(Self {
            p: encode(kp)?,
            i: encode(ki / hz)?,
            d: encode(kd * hz)?,
        })
    }
}

/// PID controller running on integer arithmetic only.
///
/// The error is taken as `measured - setpoint`, so a positive gain drives the
/// output up when the measurement is above the setpoint.
///
/// Configuration failures are sticky: the first one is kept until the next
/// [`configure`](Self::configure) or [`clear`](Self::clear), and while one is
/// recorded every gain is zero. [`step`](Self::step) does not look at it, so
/// check the result of configuration once rather than on every tick.
#[derive(Debug, Default, Clone)]
pub struct FastPid {
    k_p: U8F8,
    integral: IntegralComponent,
    derivative: DerivativeComponent,
    range: OutputRange,
    error: Option<ConfigError>,
    last_output: i16,
}

impl FastPid {
    /// An unconfigured controller. All gains and both output bounds are zero,
    /// so it outputs zero until configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a controller from `config`, or return the first problem with it.
    pub fn from_config(config: &PidConfig) -> Result<Self, ConfigError> {
        let mut pid = Self::new();
        pid.configure_with(config);
        match pid.error {
            None => Ok(pid),
            Some(err) => Err(err),
        }
    }

    /// Reset the controller and apply a full configuration.
    ///
    /// `ki` is divided by and `kd` multiplied by `hz` to turn them into
    /// per-sample gains, so `step` must then be called at `hz`. Every
    /// resulting gain must lie in `0..=255.996`. The output is limited to the
    /// range of a `bits` wide integer, see [`OutputRange::from_bit_width`].
    ///
    /// Returns `true` on success.
    pub fn configure(
        &mut self,
        kp: f32,
        ki: f32,
        kd: f32,
        hz: f32,
        bits: u8,
        signed: bool,
    ) -> bool {
        self.clear();
        self.set_coefficients(kp, ki, kd, hz);
        self.set_output_config(bits, signed);

        if self.is_configured() {
            log::debug!(
                "configured kp={} ki={} kd={} at {} Hz, output {}..={}",
                kp,
                ki,
                kd,
                hz,
                self.range.min(),
                self.range.max()
            );
        }
        self.is_configured()
    }

    /// [`configure`](Self::configure) from a [`PidConfig`].
    pub fn configure_with(&mut self, config: &PidConfig) -> bool {
        self.configure(
            config.kp,
            config.ki,
            config.kd,
            config.hz,
            config.bits,
            config.signed,
        )
    }

    /// Replace the gains without resetting the accumulated state.
    ///
    /// All three gains are encoded before any is stored; if one is rejected
    /// every gain is zeroed. Gains are not applied while an earlier error is
    /// still recorded.
    ///
    /// Returns `true` if the controller carries no configuration error.
    pub fn set_coefficients(&mut self, kp: f32, ki: f32, kd: f32, hz: f32) -> bool {
        match Coefficients::encode(kp, ki, kd, hz) {
            Ok(coefficients) if self.error.is_none() => {
                self.k_p = coefficients.p;
                self.integral.k_i = coefficients.i;
                self.derivative.k_d = coefficients.d;
            }
            Ok(_) => {}
            Err(err) => self.fail(err),
        }
        self.is_configured()
    }

    /// Limit the output to `min..=max`, keeping the accumulated state.
    ///
    /// Returns `true` if the controller carries no configuration error.
    pub fn set_output_range(&mut self, min: i16, max: i16) -> bool {
        self.set_range(OutputRange::from_bounds(min, max))
    }

    /// Limit the output to the range of a `bits` wide integer, keeping the
    /// accumulated state.
    ///
    /// Returns `true` if the controller carries no configuration error.
    pub fn set_output_config(&mut self, bits: u8, signed: bool) -> bool {
        self.set_range(OutputRange::from_bit_width(bits, signed))
    }

    fn set_range(&mut self, range: Result<OutputRange, ConfigError>) -> bool {
        match range {
            Ok(range) => self.range = range,
            Err(err) => self.fail(err),
        }
        self.is_configured()
    }

    /// Forget the integral, the previous error and the previous output, and
    /// drop any recorded configuration error. Gains and bounds are kept.
    pub fn clear(&mut self) {
        self.integral.sum = 0;
        self.derivative.last_error = 0;
        self.last_output = 0;
        self.error = None;
    }

    fn fail(&mut self, err: ConfigError) {
        log::warn!("rejected configuration: {}", err);

        if self.error.is_none() {
            self.error = Some(err);
        }
        self.k_p = U8F8::ZERO;
        self.integral.k_i = U8F8::ZERO;
        self.derivative.k_d = U8F8::ZERO;
    }

    /// Run one control tick and return the new output.
    ///
    /// The output always lies within the configured range.
    pub fn step(&mut self, setpoint: i16, measured: i16) -> i16 {
        let error = i32::from(measured) - i32::from(setpoint);

        let p = if self.k_p == U8F8::ZERO {
            0
        } else {
            i64::from(self.k_p.to_bits()) * i64::from(error)
        };
        let i = self.integral.update(error);
        let d = self.derivative.update(error);

        let output = self.range.clamp(p + i + d);

        // Drop the fractional bits, rounding up from one half. Bounds are
        // whole multiples of 256, so the increment cannot overflow.
        let mut result = (output >> PARAM_SHIFT) as i16;
        if output & (1 << (PARAM_SHIFT - 1)) != 0 {
            result += 1;
        }

        self.last_output = result;
        result
    }

    /// The first configuration error recorded since the last reset, if any.
    pub fn error(&self) -> Option<ConfigError> {
        self.error
    }

    /// Whether no configuration error is recorded.
    pub fn is_configured(&self) -> bool {
        self.error.is_none()
    }

    pub fn coefficients(&self) -> Coefficients {
        Coefficients {
            p: self.k_p,
            i: self.integral.k_i,
            d: self.derivative.k_d,
        }
    }

    pub fn output_range(&self) -> OutputRange {
        self.range
    }

    /// Scaled integral accumulator. Always within the `i32` range.
    pub fn integral(&self) -> i64 {
        self.integral.sum
    }

    /// Error seen by the derivative term on its last update.
    pub fn last_error(&self) -> i32 {
        self.derivative.last_error
    }

    /// Value returned by the most recent [`step`](Self::step).
    pub fn last_output(&self) -> i16 {
        self.last_output
    }
}

#[derive(Debug, Default, Clone)]
struct IntegralComponent {
    k_i: U8F8,
    sum: i64,
}

impl IntegralComponent {
    fn update(&mut self, error: i32) -> i64 {
        if self.k_i == U8F8::ZERO {
            return 0;
        }

        // Saturate at 32 bits so a sustained error cannot wind the sum up.
        self.sum += i64::from(error) * i64::from(self.k_i.to_bits());
        self.sum = self.sum.clamp(i64::from(i32::MIN), i64::from(i32::MAX));
        self.sum
    }
}

#[derive(Debug, Default, Clone)]
struct DerivativeComponent {
    k_d: U8F8,
    last_error: i32,
}

impl DerivativeComponent {
    fn update(&mut self, error: i32) -> i64 {
        if self.k_d == U8F8::ZERO {
            return 0;
        }

        let derivative =
            (error - self.last_error).clamp(i32::from(i16::MIN), i32::from(i16::MAX));
        self.last_error = error;

        i64::from(derivative) * i64::from(self.k_d.to_bits())
    }
}
