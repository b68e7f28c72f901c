//! The cells connecting the station's tasks, and the per-task handles onto them.
//!
//! ```text
//! sampler -> [readings] -> classifier -> [display_readings] -> text display
//!                                     -> [status] -> indicator light, audible alarm,
//!                                                    matrix indicator, text display
//! ```

use crate::{
    cell::{BroadcastCell, Observer, Publisher, Receiver},
    config::{DISPLAY_READING_WAITERS, READING_WAITERS, STATUS_WAITERS},
    types::{AlertStatus, SensorReading},
};
use embassy_sync::blocking_mutex::raw::RawMutex;

pub type ReadingCell<M> = BroadcastCell<M, SensorReading, READING_WAITERS>;
pub type DisplayReadingCell<M> = BroadcastCell<M, SensorReading, DISPLAY_READING_WAITERS>;
pub type StatusCell<M> = BroadcastCell<M, AlertStatus, STATUS_WAITERS>;

pub type ReadingPublisher<'a, M> = Publisher<'a, M, SensorReading, READING_WAITERS>;
pub type ReadingReceiver<'a, M> = Receiver<'a, M, SensorReading, READING_WAITERS>;
pub type DisplayReadingPublisher<'a, M> =
    Publisher<'a, M, SensorReading, DISPLAY_READING_WAITERS>;
pub type DisplayReadingReceiver<'a, M> = Receiver<'a, M, SensorReading, DISPLAY_READING_WAITERS>;
pub type StatusPublisher<'a, M> = Publisher<'a, M, AlertStatus, STATUS_WAITERS>;
pub type StatusObserver<'a, M> = Observer<'a, M, AlertStatus, STATUS_WAITERS>;

/// All shared state of the station. Created once at startup and never reset.
pub struct MonitorChannels<M: RawMutex> {
    /// Raw readings from the sampler, consumed by the classifier.
    pub readings: ReadingCell<M>,

    /// Classified readings, consumed by the text display.
    pub display_readings: DisplayReadingCell<M>,

    /// Latest alert status, observed by every output.
    pub status: StatusCell<M>,
}

impl<M: RawMutex> Default for MonitorChannels<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: RawMutex> MonitorChannels<M> {
    pub const fn new() -> Self {
        Self {
            readings: BroadcastCell::new(),
            display_readings: BroadcastCell::new(),
            status: BroadcastCell::new(),
        }
    }

    /// Hands out the access each task is allowed to have.
    pub fn split(&self) -> Links<'_, M> {
        Links {
            sampler: SamplerLinks {
                readings: self.readings.publisher(),
            },
            classifier: ClassifierLinks {
                readings: self.readings.receiver(),
                display_readings: self.display_readings.publisher(),
                status: self.status.publisher(),
            },
            indicator_light: self.status.observer(),
            audible_alarm: self.status.observer(),
            matrix_indicator: self.status.observer(),
            text_display: TextDisplayLinks {
                readings: self.display_readings.receiver(),
                status: self.status.observer(),
            },
        }
    }
}

pub struct Links<'a, M: RawMutex> {
    pub sampler: SamplerLinks<'a, M>,
    pub classifier: ClassifierLinks<'a, M>,
    pub indicator_light: StatusObserver<'a, M>,
    pub audible_alarm: StatusObserver<'a, M>,
    pub matrix_indicator: StatusObserver<'a, M>,
    pub text_display: TextDisplayLinks<'a, M>,
}

pub struct SamplerLinks<'a, M: RawMutex> {
    pub readings: ReadingPublisher<'a, M>,
}

pub struct ClassifierLinks<'a, M: RawMutex> {
    pub readings: ReadingReceiver<'a, M>,
    pub display_readings: DisplayReadingPublisher<'a, M>,
    pub status: StatusPublisher<'a, M>,
}

pub struct TextDisplayLinks<'a, M: RawMutex> {
    pub readings: DisplayReadingReceiver<'a, M>,
    pub status: StatusObserver<'a, M>,
}
