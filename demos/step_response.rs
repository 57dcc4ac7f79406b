//! Closed-loop step response of a first-order plant driven by a `FastPid`.
//!
//! Every tick is written to `step_response.mcap` as a CBOR message so the
//! run can be inspected in Foxglove or a similar viewer.

use std::{borrow::Cow, collections::BTreeMap, fs::File, io::BufWriter, sync::Arc};

use fastpid::{FastPid, PidConfig};
use serde::Serialize;

#[derive(Serialize)]
struct Values {
    time_ns: u64,
    setpoint: i16,
    measured: i16,
    output: i16,
    integral: i64,
}

/// Plant whose value decays towards the drive input with time constant `tau`.
struct FirstOrderPlant {
    value: f32,
    gain: f32,
    tau: f32,
}

impl FirstOrderPlant {
    fn update(&mut self, drive: f32, dt: f32) -> f32 {
        self.value += (self.gain * drive - self.value) * dt / self.tau;
        self.value
    }
}

fn main() -> Result<(), anyhow::Error> {
    env_logger::init();

    let hz = 100.0;
    // The error is measured - setpoint, so the plant is driven by the negated output.
    let config = PidConfig::new()
        .with_kp(1.5)
        .with_ki(4.0)
        .with_kd(0.02)
        .with_sample_rate(hz)
        .with_output(12, true);
    let mut pid = FastPid::from_config(&config)?;

    let mut writer = mcap::Writer::new(BufWriter::new(File::create("step_response.mcap")?))?;
    let channel = mcap::Channel {
        topic: String::from("fastpid"),
        schema: Some(Arc::new(mcap::Schema {
            name: "".to_owned(),
            encoding: "".to_owned(),
            data: Cow::default(),
        })),
        message_encoding: "cbor".to_owned(),
        metadata: BTreeMap::default(),
    };
    let channel_id = writer.add_channel(&channel)?;

    let mut plant = FirstOrderPlant {
        value: 0.,
        gain: 1.,
        tau: 0.5,
    };
    let dt_ns = (1e9 / hz) as u64;
    let mut time_ns = 0;
    let mut measured = 0i16;

    while time_ns <= 5_000_000_000 {
        let setpoint = if time_ns < 500_000_000 { 0 } else { 1000 };
        let output = pid.step(setpoint, measured);

        let mut buffer = Vec::with_capacity(64);
        ciborium::into_writer(
            &Values {
                time_ns,
                setpoint,
                measured,
                output,
                integral: pid.integral(),
            },
            &mut buffer,
        )?;
        writer.write_to_known_channel(
            &mcap::records::MessageHeader {
                channel_id,
                sequence: 0,
                log_time: time_ns,
                publish_time: time_ns,
            },
            &buffer,
        )?;

        measured = plant.update(-f32::from(output), 1. / hz) as i16;
        time_ns += dt_ns;
    }

    writer.finish()?;
    log::info!("settled at {} with output {}", measured, pid.last_output());

    Ok(())
}
