use crate::{
    channels::TextDisplayLinks,
    debug, info,
    peripherals::TextOutput,
    types::{AlertStatus, SensorReading},
    warn, TaskKind,
};
use core::fmt::Write;
use embassy_sync::blocking_mutex::raw::RawMutex;
use heapless::String;

const LINE_CAPACITY: usize = 20;

pub const RAIN_LINE_Y: i32 = 0;
pub const LEVEL_LINE_Y: i32 = 10;
pub const BANNER_Y: i32 = 50;

pub const ALERT_BANNER: &str = "!!! ALERT !!!";
pub const NORMAL_BANNER: &str = "   NORMAL    ";

fn measurement_line(name: &str, value: u16) -> String<LINE_CAPACITY> {
    let mut line = String::new();
    if write!(line, "{:<7}{:>4}", name, value).is_err() {
        warn!("Display line for {} truncated", name);
    }
    line
}

/// Draws one complete frame.
pub fn render<T: TextOutput>(output: &mut T, reading: &SensorReading, status: AlertStatus) {
    output.clear();

    output.draw_text(&measurement_line("Rain:", reading.rain()), 0, RAIN_LINE_Y);
    output.draw_text(&measurement_line("Level:", reading.level()), 0, LEVEL_LINE_Y);

    output.draw_text(
        match status {
            AlertStatus::Alert => ALERT_BANNER,
            AlertStatus::Normal => NORMAL_BANNER,
        },
        0,
        BANNER_Y,
    );

    output.flush();
}

pub async fn task<M: RawMutex, T: TextOutput>(mut output: T, links: TextDisplayLinks<'_, M>) {
    info!("{} task started", TaskKind::TextDisplay.name());

    let TextDisplayLinks {
        mut readings,
        status,
    } = links;

    output.clear();
    output.flush();

    loop {
        // Only redraw when there is something new to show, anything published while drawing
        // the previous frame is coalesced into the latest value
        let reading = readings.receive().await;
        let s = status.peek().await;

        debug!("Display draw ({}, {})", reading, s);
        render(&mut output, &reading, s);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{test::fakes::RecordingText, MonitorChannels};
    use embassy_futures::select::{select, Either};
    use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
    use embassy_time::Timer;

    #[test]
    fn measurement_lines() {
        assert_eq!(measurement_line("Rain:", 7).as_str(), "Rain:     7");
        assert_eq!(measurement_line("Level:", 4095).as_str(), "Level: 4095");
    }

    #[test]
    fn layout() {
        let text = RecordingText::default();
        render(
            &mut text.clone(),
            &SensorReading::new(3300, 120),
            AlertStatus::Alert,
        );

        assert_eq!(
            text.last_frame().unwrap(),
            [
                ("Rain:  3300".to_string(), 0, 0),
                ("Level:  120".to_string(), 0, 10),
                ("!!! ALERT !!!".to_string(), 0, 50),
            ]
        );

        render(&mut text.clone(), &SensorReading::new(0, 0), AlertStatus::Normal);
        assert_eq!(text.last_frame().unwrap()[2].0, NORMAL_BANNER);
    }

    #[tokio::test]
    async fn renders_only_on_new_readings() {
        let channels = MonitorChannels::<CriticalSectionRawMutex>::new();
        let links = channels.split();
        let text = RecordingText::default();

        channels.status.publish(AlertStatus::Normal);

        let check = async {
            Timer::after_millis(20).await;
            // Boot clear only
            assert_eq!(text.frames().len(), 1);

            channels.display_readings.publish(SensorReading::new(1, 2));
            Timer::after_millis(20).await;
            assert_eq!(text.frames().len(), 2);

            // Status alone does not trigger a redraw
            channels.status.publish(AlertStatus::Alert);
            Timer::after_millis(300).await;
            assert_eq!(text.frames().len(), 2);
        };

        match select(task(text.clone(), links.text_display), check).await {
            Either::First(_) => panic!("text display task returned"),
            Either::Second(_) => {}
        }
    }
}
