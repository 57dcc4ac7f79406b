//! A fixed-point PID controller for microcontrollers without a fast FPU.
//!
//! Gains are converted once, at configuration time, into 8.8 fixed-point
//! coefficients. Every call to [`FastPid::step`] afterwards runs on integer
//! arithmetic only.
//!
//! ```
//! use fastpid::FastPid;
//!
//! let mut pid = FastPid::new();
//! assert!(pid.configure(1.0, 0.5, 0.0, 100.0, 16, true));
//!
//! let output = pid.step(0, 10);
//! assert_eq!(output, 10);
//! ```

#![no_std]
#![forbid(unsafe_code)]

mod config;
mod error;
pub mod fixed_point;
pub mod output;
mod pid;

pub use config::PidConfig;
pub use error::ConfigError;
pub use output::OutputRange;
pub use pid::{Coefficients, FastPid};
