//! Output drivers that report to the log instead of driving hardware.

use embedded_graphics::{pixelcolor::Rgb888, prelude::RgbColor};
use flood_station_core::{
    changed::{checked_set, Changed, ObservedValue},
    config::{DISPLAY_HEIGHT, DISPLAY_WIDTH, MATRIX_HEIGHT, MATRIX_WIDTH},
    peripherals::{AudibleOutput, PixelMatrix, TextOutput, TriColorOutput},
    LedChannel,
};
use log::{debug, info, warn};
use std::collections::BTreeMap;

#[derive(Default)]
pub(crate) struct TerminalLight {
    pending: [u8; 3],
    shown: ObservedValue<Rgb888>,
}

#[cfg(test)]
impl TerminalLight {
    pub(crate) fn shown(&self) -> Option<Rgb888> {
        *self.shown
    }
}

impl TriColorOutput for TerminalLight {
    fn set_intensity(&mut self, channel: LedChannel, value: u8) {
        match channel {
            LedChannel::Red => self.pending[0] = value,
            LedChannel::Green => self.pending[1] = value,
            LedChannel::Blue => {
                // Blue is written last, the colour is complete
                self.pending[2] = value;
                let [r, g, b] = self.pending;
                self.shown.update_and(Rgb888::new(r, g, b), |c| {
                    info!(
                        "Indicator light is now #{:02x}{:02x}{:02x}",
                        c.r(),
                        c.g(),
                        c.b()
                    )
                });
            }
        }
    }
}

#[derive(Default)]
pub(crate) struct TerminalBuzzer {
    sounding: Option<u32>,
}

#[cfg(test)]
impl TerminalBuzzer {
    pub(crate) fn sounding(&self) -> Option<u32> {
        self.sounding
    }
}

impl AudibleOutput for TerminalBuzzer {
    fn start(&mut self, frequency_hz: u32) {
        if checked_set(&mut self.sounding, Some(frequency_hz)) == Changed::Yes {
            info!("Buzzer on ({} Hz)", frequency_hz);
        }
    }

    fn stop(&mut self) {
        if checked_set(&mut self.sounding, None) == Changed::Yes {
            info!("Buzzer off");
        }
    }
}

type Frame = [[Rgb888; MATRIX_WIDTH as usize]; MATRIX_HEIGHT as usize];

const BLANK_FRAME: Frame = [[Rgb888::BLACK; MATRIX_WIDTH as usize]; MATRIX_HEIGHT as usize];

pub(crate) struct TerminalMatrix {
    buffer: Frame,
    shown: Option<Frame>,
}

impl Default for TerminalMatrix {
    fn default() -> Self {
        Self {
            buffer: BLANK_FRAME,
            shown: None,
        }
    }
}

impl TerminalMatrix {
    fn row_text(row: &[Rgb888]) -> String {
        row.iter()
            .map(|p| {
                if *p == Rgb888::BLACK {
                    '.'
                } else if *p == Rgb888::RED {
                    'R'
                } else if *p == Rgb888::YELLOW {
                    'Y'
                } else {
                    '#'
                }
            })
            .collect()
    }

    /// The last flushed frame, one string per row.
    pub(crate) fn shown_rows(&self) -> Vec<String> {
        self.shown
            .iter()
            .flatten()
            .map(|row| Self::row_text(row))
            .collect()
    }
}

impl PixelMatrix for TerminalMatrix {
    fn set_pixel(&mut self, x: u8, y: u8, colour: Rgb888) {
        match self
            .buffer
            .get_mut(y as usize)
            .and_then(|row| row.get_mut(x as usize))
        {
            Some(pixel) => *pixel = colour,
            None => warn!("Pixel ({}, {}) is outside the matrix", x, y),
        }
    }

    fn clear(&mut self) {
        self.buffer = BLANK_FRAME;
    }

    fn flush(&mut self) {
        if checked_set(&mut self.shown, Some(self.buffer)) == Changed::Yes {
            info!("Matrix indicator:");
            for row in self.shown_rows() {
                info!("  {}", row);
            }
        }
    }
}

/// Text display as a set of lines keyed by their vertical position.
#[derive(Default)]
pub(crate) struct TerminalText {
    lines: BTreeMap<i32, String>,
    shown: Vec<String>,
}

#[cfg(test)]
impl TerminalText {
    pub(crate) fn shown(&self) -> &[String] {
        &self.shown
    }
}

impl TextOutput for TerminalText {
    fn clear(&mut self) {
        self.lines.clear();
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32) {
        if !(0..DISPLAY_WIDTH as i32).contains(&x) || !(0..DISPLAY_HEIGHT as i32).contains(&y) {
            warn!("Text {:?} at ({}, {}) is off screen", text, x, y);
            return;
        }

        let line = self.lines.entry(y).or_default();
        let column = x as usize;
        if line.len() < column {
            line.extend(std::iter::repeat(' ').take(column - line.len()));
        }
        line.truncate(column);
        line.push_str(text);
    }

    fn flush(&mut self) {
        let frame: Vec<String> = self.lines.values().cloned().collect();

        if checked_set(&mut self.shown, frame) == Changed::Yes {
            info!("Text display:");
            for line in &self.shown {
                info!("  | {}", line);
            }
        } else {
            debug!("Text display unchanged");
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use flood_station_core::{
        devices::{matrix_indicator, text_display},
        AlertStatus, SensorReading,
    };

    #[test]
    fn light_reports_complete_colours() {
        let mut light = TerminalLight::default();
        assert_eq!(light.shown(), None);

        light.set_intensity(LedChannel::Red, 255);
        light.set_intensity(LedChannel::Green, 0);
        assert_eq!(light.shown(), None);

        light.set_intensity(LedChannel::Blue, 0);
        assert_eq!(light.shown(), Some(Rgb888::RED));

        light.set_intensity(LedChannel::Red, 0);
        assert_eq!(light.shown(), Some(Rgb888::RED));
        light.set_intensity(LedChannel::Green, 255);
        light.set_intensity(LedChannel::Blue, 0);
        assert_eq!(light.shown(), Some(Rgb888::GREEN));
    }

    #[test]
    fn buzzer_is_idempotent() {
        let mut buzzer = TerminalBuzzer::default();
        buzzer.stop();
        assert_eq!(buzzer.sounding(), None);

        buzzer.start(1000);
        buzzer.start(1000);
        assert_eq!(buzzer.sounding(), Some(1000));

        buzzer.stop();
        buzzer.stop();
        assert_eq!(buzzer.sounding(), None);
    }

    #[test]
    fn matrix_shows_flushed_frame_only() {
        let mut matrix = TerminalMatrix::default();
        assert!(matrix.shown_rows().is_empty());

        matrix_indicator::render(&mut matrix, AlertStatus::Alert);
        assert_eq!(
            matrix.shown_rows(),
            ["RRRRR", "RRYRR", "RYYYR", "YYYYY", "RRRRR"]
        );

        // Buffered but not flushed
        matrix.clear();
        matrix.set_pixel(9, 9, Rgb888::GREEN);
        assert_eq!(matrix.shown_rows()[0], "RRRRR");

        matrix_indicator::render(&mut matrix, AlertStatus::Normal);
        assert!(matrix.shown_rows().iter().all(|row| row == "....."));
    }

    #[test]
    fn text_lines_ordered_by_position() {
        let mut text = TerminalText::default();

        text_display::render(
            &mut text,
            &SensorReading::new(3300, 120),
            AlertStatus::Alert,
        );
        assert_eq!(
            text.shown(),
            ["Rain:  3300", "Level:  120", "!!! ALERT !!!"]
        );

        text.clear();
        text.draw_text("b", 4, 20);
        text.draw_text("a", 0, 10);
        text.draw_text("lost", 0, 200);
        text.flush();
        assert_eq!(text.shown(), ["a", "    b"]);
    }
}
