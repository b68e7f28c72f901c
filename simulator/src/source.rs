use crate::error::{Error, Result};
use flood_station_core::{config::ANALOG_MAX, peripherals::AnalogSource, AnalogChannel};
use log::{debug, info};
use std::{
    path::Path,
    time::{Duration, Instant},
};

/// Stands in for the ADC.
pub(crate) enum SimulatedSource {
    /// Both channels follow triangle waves across the whole analog range.
    Sweep { start: Instant, period: Duration },

    /// Both channels hold a constant value.
    Fixed { rain: u16, level: u16 },

    /// Replays a list of samples, one per sampling round, wrapping at the end.
    Script {
        samples: Vec<(u16, u16)>,
        next: usize,
    },
}

impl SimulatedSource {
    pub(crate) fn sweep(period: Duration) -> Self {
        info!("Sweeping both channels every {:?}", period);
        Self::Sweep {
            start: Instant::now(),
            period,
        }
    }

    pub(crate) fn fixed(rain: u16, level: u16) -> Self {
        info!("Holding rain at {} and level at {}", rain, level);
        Self::Fixed { rain, level }
    }

    pub(crate) fn script(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::ScriptRead {
            path: path.to_path_buf(),
            source,
        })?;

        let samples = parse_script(path, &text)?;
        info!("Replaying {} samples from {:?}", samples.len(), path);

        Ok(Self::Script { samples, next: 0 })
    }
}

impl AnalogSource for SimulatedSource {
    fn read(&mut self, channel: AnalogChannel) -> u16 {
        match self {
            Self::Sweep { start, period } => {
                let offset = match channel {
                    AnalogChannel::Rain => Duration::ZERO,
                    AnalogChannel::Level => *period / 4,
                };
                triangle(start.elapsed() + offset, *period)
            }
            Self::Fixed { rain, level } => match channel {
                AnalogChannel::Rain => *rain,
                AnalogChannel::Level => *level,
            },
            Self::Script { samples, next } => {
                let (rain, level) = samples[*next];
                match channel {
                    AnalogChannel::Rain => rain,
                    AnalogChannel::Level => {
                        // Level is read last in each sampling round
                        *next = (*next + 1) % samples.len();
                        level
                    }
                }
            }
        }
    }
}

/// Rises from 0 to [`ANALOG_MAX`] over the first half of `period`, then falls back.
fn triangle(at: Duration, period: Duration) -> u16 {
    let phase = (at.as_secs_f64() / period.as_secs_f64()).fract();
    let height = if phase < 0.5 {
        phase * 2.0
    } else {
        2.0 - phase * 2.0
    };
    (height * f64::from(ANALOG_MAX)).round() as u16
}

/// Parses `rain,level` lines. Blank lines and anything after a `#` are ignored.
fn parse_script(path: &Path, text: &str) -> Result<Vec<(u16, u16)>> {
    let mut samples = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let content = line.split('#').next().unwrap_or_default().trim();
        if content.is_empty() {
            continue;
        }

        let parse_error = |reason: String| Error::ScriptParse {
            path: path.to_path_buf(),
            line: idx + 1,
            reason,
        };

        let (rain, level) = content
            .split_once(',')
            .ok_or_else(|| parse_error("expected `rain,level`".to_string()))?;

        let parse_value = |name: &str, value: &str| -> Result<u16> {
            let value: u16 = value
                .trim()
                .parse()
                .map_err(|e| parse_error(format!("invalid {name} value {value:?}: {e}")))?;
            if value > ANALOG_MAX {
                return Err(parse_error(format!(
                    "{name} value {value} is above {ANALOG_MAX}"
                )));
            }
            Ok(value)
        };

        let sample = (parse_value("rain", rain)?, parse_value("level", level)?);
        debug!("Script sample {}: {:?}", samples.len(), sample);
        samples.push(sample);
    }

    if samples.is_empty() {
        return Err(Error::EmptyScript(path.to_path_buf()));
    }

    Ok(samples)
}
