// src/lib.rs

//! Control surface for the Moitessier and nav.HAT marine add-on boards.
//!
//! `common` holds the protocol core shared with the kernel driver (wire
//! records, command set, PROM CRC) and builds without `std`. `config` compiles
//! the operator's config file into the binary configuration record,
//! `controller` dispatches commands over the driver's control node and renders
//! the answers, and `sensor` reads the I2C sensors soldered to the board.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod common;
pub mod sensor;

#[cfg(feature = "std")]
pub mod config;
#[cfg(feature = "std")]
pub mod controller;

// Re-export key types for convenience
pub use common::{Command, CommandKind, ConfigHat, Generation};
