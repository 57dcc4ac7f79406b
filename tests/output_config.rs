use fastpid::{ConfigError, FastPid, OutputRange, PidConfig};
use rstest::rstest;

fn proportional(bits: u8, signed: bool) -> FastPid {
    let mut pid = FastPid::new();
    assert!(pid.configure(1.0, 0.0, 0.0, 10.0, bits, signed));
    pid
}

#[rstest]
#[case(1, false, 0, 1)]
#[case(4, false, 0, 15)]
#[case(8, false, 0, 255)]
#[case(10, false, 0, 1023)]
#[case(16, false, 0, 32767)]
#[case(1, true, -1, 1)]
#[case(4, true, -8, 15)]
#[case(8, true, -128, 255)]
#[case(12, true, -2048, 4095)]
#[case(16, true, -32768, 32767)]
fn output_limited_to_bit_width(
    #[case] bits: u8,
    #[case] signed: bool,
    #[case] min: i16,
    #[case] max: i16,
) {
    let mut pid = proportional(bits, signed);
    assert_eq!(pid.output_range().min(), min);
    assert_eq!(pid.output_range().max(), max);

    assert_eq!(pid.step(i16::MIN, i16::MAX), max);
    assert_eq!(pid.step(i16::MAX, i16::MIN), min);
}

#[rstest]
#[case(0)]
#[case(17)]
#[case(32)]
#[case(u8::MAX)]
fn invalid_bit_width_rejected(#[case] bits: u8) {
    let mut pid = FastPid::new();
    assert!(!pid.configure(1.0, 0.0, 0.0, 10.0, bits, true));
    assert_eq!(pid.error(), Some(ConfigError::InvalidBitWidth(bits)));
    assert_eq!(pid.output_range(), OutputRange::default());
}

#[rstest]
#[case(0, 10, 10)]
#[case(100, 0, -100)]
#[case(-50, 50, 100)]
#[case(7, 7, 0)]
fn proportional_scenarios(#[case] setpoint: i16, #[case] measured: i16, #[case] expected: i16) {
    let mut pid = proportional(16, true);
    assert_eq!(pid.step(setpoint, measured), expected);
}

#[rstest]
#[case(-1.0, ConfigError::GainOutOfRange)]
#[case(256.0, ConfigError::GainOutOfRange)]
#[case(f32::NAN, ConfigError::GainOutOfRange)]
#[case(0.001, ConfigError::GainUnderflow)]
fn bad_proportional_gain(#[case] kp: f32, #[case] expected: ConfigError) {
    let config = PidConfig::new().with_kp(kp);
    assert_eq!(FastPid::from_config(&config).unwrap_err(), expected);
}

#[test]
fn large_gain_saturates_unsigned_byte() {
    let mut pid = FastPid::new();
    assert!(pid.set_output_config(8, false));
    assert!(pid.configure(200.0, 0.0, 0.0, 10.0, 8, false));

    assert_eq!(pid.step(0, 30000), 255);
    assert_eq!(pid.step(30000, 0), 0);
}

#[test]
fn integral_scaled_by_sample_rate() {
    // 5 per second at 50 Hz is 0.1 per tick.
    let config = PidConfig::new()
        .with_kp(0.0)
        .with_ki(5.0)
        .with_sample_rate(50.0);
    let mut pid = FastPid::from_config(&config).unwrap();

    let outputs: Vec<i16> = (0..4).map(|_| pid.step(0, 256)).collect();
    // 256 * 25 per tick: 25, 50, 75, 100.
    assert_eq!(outputs, [25, 50, 75, 100]);
}

#[test]
fn output_range_switch_keeps_integral() {
    let mut pid = FastPid::new();
    assert!(pid.configure(0.0, 1.0, 0.0, 1.0, 16, true));
    for _ in 0..5 {
        pid.step(0, 100);
    }
    assert_eq!(pid.integral(), 500 * 256);

    assert!(pid.set_output_range(-200, 200));
    assert_eq!(pid.integral(), 500 * 256);
    assert_eq!(pid.step(0, 0), 200);

    assert!(pid.set_output_config(16, true));
    assert_eq!(pid.step(0, 0), 500);
}
