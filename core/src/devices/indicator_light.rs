use crate::{
    changed::ObservedValue,
    channels::StatusObserver,
    config::INDICATOR_PERIOD,
    debug, info,
    peripherals::TriColorOutput,
    types::{AlertStatus, LedChannel},
    TaskKind,
};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::Timer;
use embedded_graphics::{pixelcolor::Rgb888, prelude::RgbColor};

pub fn colour(status: AlertStatus) -> Rgb888 {
    match status {
        AlertStatus::Normal => Rgb888::GREEN,
        AlertStatus::Alert => Rgb888::RED,
    }
}

pub struct IndicatorLight<L> {
    output: L,
}

impl<L: TriColorOutput> IndicatorLight<L> {
    pub fn new(output: L) -> Self {
        Self { output }
    }

    pub fn set(&mut self, status: AlertStatus) {
        let colour = colour(status);

        for channel in LedChannel::ALL {
            self.output.set_intensity(
                channel,
                match channel {
                    LedChannel::Red => colour.r(),
                    LedChannel::Green => colour.g(),
                    LedChannel::Blue => colour.b(),
                },
            );
        }
    }
}

pub async fn task<M: RawMutex, L: TriColorOutput>(output: L, status: StatusObserver<'_, M>) {
    info!("{} task started", TaskKind::IndicatorLight.name());

    let mut light = IndicatorLight::new(output);

    // Green until told otherwise
    light.set(AlertStatus::Normal);

    let mut shown = ObservedValue::default();

    loop {
        let s = status.peek().await;

        // Always drive the output, a glitched write is corrected on the next tick
        light.set(s);
        shown.update_and(s, |s| debug!("Indicator light showing {}", s));

        // Relative delay, missed periods are never caught up
        Timer::after(INDICATOR_PERIOD).await;
    }
}
