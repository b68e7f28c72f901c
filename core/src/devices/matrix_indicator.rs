use crate::{
    changed::ObservedValue,
    channels::StatusObserver,
    config::{MATRIX_HEIGHT, MATRIX_PERIOD, MATRIX_WIDTH},
    debug, info,
    peripherals::PixelMatrix,
    types::AlertStatus,
    TaskKind,
};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::Timer;
use embedded_graphics::{pixelcolor::Rgb888, prelude::RgbColor};

pub const ALERT_BACKGROUND_COLOUR: Rgb888 = Rgb888::RED;
pub const WARNING_GLYPH_COLOUR: Rgb888 = Rgb888::YELLOW;

/// Pixels (x, y) forming a warning triangle, apex at the top.
pub const WARNING_GLYPH: [(u8, u8); 9] = [
    (2, 1),
    (1, 2),
    (2, 2),
    (3, 2),
    (0, 3),
    (1, 3),
    (2, 3),
    (3, 3),
    (4, 3),
];

pub fn render<X: PixelMatrix>(matrix: &mut X, status: AlertStatus) {
    match status {
        AlertStatus::Alert => {
            for y in 0..MATRIX_HEIGHT {
                for x in 0..MATRIX_WIDTH {
                    matrix.set_pixel(x, y, ALERT_BACKGROUND_COLOUR);
                }
            }

            for (x, y) in WARNING_GLYPH {
                matrix.set_pixel(x, y, WARNING_GLYPH_COLOUR);
            }
        }
        AlertStatus::Normal => matrix.clear(),
    }

    matrix.flush();
}

pub async fn task<M: RawMutex, X: PixelMatrix>(mut matrix: X, status: StatusObserver<'_, M>) {
    info!("{} task started", TaskKind::MatrixIndicator.name());

    // Dark until told otherwise
    matrix.clear();
    matrix.flush();

    let mut shown = ObservedValue::default();

    loop {
        let s = status.peek().await;

        render(&mut matrix, s);
        shown.update_and(s, |s| debug!("Matrix indicator showing {}", s));

        // Relative delay, missed periods are never caught up
        Timer::after(MATRIX_PERIOD).await;
    }
}
