//! The fixed set of tasks making up the station.

use crate::{
    channels::Links,
    devices::{audible_alarm, indicator_light, matrix_indicator, sampler, text_display},
    logic::classifier,
    peripherals::{
        AnalogSource, AudibleOutput, Peripherals, PixelMatrix, TextOutput, TriColorOutput,
    },
};
use core::fmt;
use embassy_futures::join::{join, join3};
use embassy_sync::blocking_mutex::raw::RawMutex;

/// Scheduling tiers, higher values preempt lower ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "no-std", derive(defmt::Format))]
pub enum Priority {
    Display = 1,
    Actuation = 2,
    Sampling = 3,
    Classification = 4,
}

impl Priority {
    /// All tiers, highest first.
    pub const ALL: [Priority; 4] = [
        Self::Classification,
        Self::Sampling,
        Self::Actuation,
        Self::Display,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Display => "display",
            Self::Actuation => "actuation",
            Self::Sampling => "sampling",
            Self::Classification => "classification",
        }
    }

    pub fn tasks(&self) -> impl Iterator<Item = TaskKind> + '_ {
        TaskKind::ALL.into_iter().filter(move |t| t.priority() == *self)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "no-std", derive(defmt::Format))]
pub enum TaskKind {
    Sampler,
    Classifier,
    IndicatorLight,
    AudibleAlarm,
    MatrixIndicator,
    TextDisplay,
}

impl TaskKind {
    pub const ALL: [TaskKind; 6] = [
        Self::Sampler,
        Self::Classifier,
        Self::IndicatorLight,
        Self::AudibleAlarm,
        Self::MatrixIndicator,
        Self::TextDisplay,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sampler => "sampler",
            Self::Classifier => "classifier",
            Self::IndicatorLight => "indicator light",
            Self::AudibleAlarm => "audible alarm",
            Self::MatrixIndicator => "matrix indicator",
            Self::TextDisplay => "text display",
        }
    }

    pub fn priority(&self) -> Priority {
        match self {
            Self::Classifier => Priority::Classification,
            Self::Sampler => Priority::Sampling,
            Self::IndicatorLight | Self::AudibleAlarm | Self::MatrixIndicator => {
                Priority::Actuation
            }
            Self::TextDisplay => Priority::Display,
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Runs every task of the station on the calling executor. Never returns.
///
/// Deployments that map [`Priority`] tiers onto separate executors spawn the individual task
/// functions instead.
pub async fn run<M, A, L, B, X, T>(links: Links<'_, M>, peripherals: Peripherals<A, L, B, X, T>)
where
    M: RawMutex,
    A: AnalogSource,
    L: TriColorOutput,
    B: AudibleOutput,
    X: PixelMatrix,
    T: TextOutput,
{
    let Links {
        sampler: sampler_links,
        classifier: classifier_links,
        indicator_light: indicator_light_status,
        audible_alarm: audible_alarm_status,
        matrix_indicator: matrix_indicator_status,
        text_display: text_display_links,
    } = links;

    join(
        join3(
            classifier::task(classifier_links),
            sampler::task(peripherals.analog, sampler_links),
            text_display::task(peripherals.text_display, text_display_links),
        ),
        join3(
            indicator_light::task(peripherals.indicator_light, indicator_light_status),
            audible_alarm::task(peripherals.audible_alarm, audible_alarm_status),
            matrix_indicator::task(peripherals.matrix_indicator, matrix_indicator_status),
        ),
    )
    .await;
}
