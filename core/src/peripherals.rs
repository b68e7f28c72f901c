//! Interfaces to the hardware drivers the station runs on top of.
//!
//! Drivers are expected to have been brought up before being handed over; none of these
//! operations can fail at this layer.

use crate::types::{AnalogChannel, LedChannel};
use embedded_graphics::pixelcolor::Rgb888;

pub trait AnalogSource {
    /// Returns the current conversion result of `channel`, in `0..=4095`.
    fn read(&mut self, channel: AnalogChannel) -> u16;
}

pub trait TriColorOutput {
    fn set_intensity(&mut self, channel: LedChannel, value: u8);
}

/// Tone generator. Both operations are idempotent.
pub trait AudibleOutput {
    fn start(&mut self, frequency_hz: u32);
    fn stop(&mut self);
}

pub trait PixelMatrix {
    fn set_pixel(&mut self, x: u8, y: u8, colour: Rgb888);

    /// Turns every pixel off.
    fn clear(&mut self);

    /// Commits the buffered pixel state to the device.
    fn flush(&mut self);
}

pub trait TextOutput {
    fn clear(&mut self);

    /// Draws `text` with its top left corner at (`x`, `y`).
    fn draw_text(&mut self, text: &str, x: i32, y: i32);

    /// Commits the buffered frame to the device.
    fn flush(&mut self);
}

/// The drivers needed to run every task of the station.
pub struct Peripherals<A, L, B, X, T> {
    pub analog: A,
    pub indicator_light: L,
    pub audible_alarm: B,
    pub matrix_indicator: X,
    pub text_display: T,
}
