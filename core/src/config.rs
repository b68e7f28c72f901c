//! Compile-time configuration of the station.

use embassy_time::Duration;

/// Largest value the analog source can report (12 bit conversion).
pub const ANALOG_MAX: u16 = 4095;

/// Water level at or above which the station raises an alert (~70% of full scale).
pub const LEVEL_ALERT_THRESHOLD: u16 = 2867;

/// Precipitation intensity at or above which the station raises an alert (~80% of full scale).
pub const RAIN_ALERT_THRESHOLD: u16 = 3276;

pub const SAMPLE_PERIOD: Duration = Duration::from_millis(200);

pub const INDICATOR_PERIOD: Duration = Duration::from_millis(200);

pub const ALARM_BURST: Duration = Duration::from_millis(200);
pub const ALARM_REST: Duration = Duration::from_millis(500);
pub const ALARM_IDLE_RECHECK: Duration = Duration::from_millis(1000);
pub const ALARM_TONE_HZ: u32 = 1000;

pub const MATRIX_PERIOD: Duration = Duration::from_millis(300);
pub const MATRIX_WIDTH: u8 = 5;
pub const MATRIX_HEIGHT: u8 = 5;

pub const DISPLAY_WIDTH: u32 = 128;
pub const DISPLAY_HEIGHT: u32 = 64;

/// Number of readers each cell can have parked at once before they are woken spuriously.
pub const READING_WAITERS: usize = 1;
pub const DISPLAY_READING_WAITERS: usize = 1;
pub const STATUS_WAITERS: usize = 4;
