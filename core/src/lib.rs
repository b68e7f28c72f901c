#![cfg_attr(feature = "no-std", no_std)]

#[cfg(feature = "no-std")]
use defmt::{debug, info, trace, warn};
#[cfg(feature = "std")]
use log::{debug, info, trace, warn};

// Host builds get their critical section and timer queue from these
#[cfg(feature = "std")]
use critical_section as _;
#[cfg(feature = "std")]
use embassy_time_queue_utils as _;

pub mod cell;
pub mod changed;
pub mod channels;
pub mod config;
pub mod devices;
pub mod logic;
pub mod peripherals;
pub mod tasks;
pub mod types;

#[cfg(test)]
mod test;

pub use self::{
    cell::{BroadcastCell, CellStatistics},
    channels::{Links, MonitorChannels},
    tasks::{run, Priority, TaskKind},
    types::{AlertStatus, AnalogChannel, LedChannel, SensorReading},
};
