use crate::config::ANALOG_MAX;
use core::fmt;

/// One combined sample of both analog channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "no-std", derive(defmt::Format))]
pub struct SensorReading {
    rain: u16,
    level: u16,
}

impl SensorReading {
    /// Values above the analog range are saturated to [`ANALOG_MAX`].
    pub fn new(rain: u16, level: u16) -> Self {
        Self {
            rain: rain.min(ANALOG_MAX),
            level: level.min(ANALOG_MAX),
        }
    }

    /// Precipitation intensity.
    pub fn rain(&self) -> u16 {
        self.rain
    }

    /// Water level.
    pub fn level(&self) -> u16 {
        self.level
    }

    pub fn status(&self) -> AlertStatus {
        crate::logic::classifier::classify(self)
    }
}

impl fmt::Display for SensorReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rain={} level={}", self.rain, self.level)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "no-std", derive(defmt::Format))]
pub enum AlertStatus {
    Normal,
    Alert,
}

impl AlertStatus {
    pub fn is_alert(&self) -> bool {
        *self == Self::Alert
    }
}

impl fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Normal => "normal",
            Self::Alert => "alert",
        })
    }
}

/// Inputs of the analog source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "no-std", derive(defmt::Format))]
pub enum AnalogChannel {
    /// Channel A
    Rain,
    /// Channel B
    Level,
}

/// Channels of the tri-colour indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "no-std", derive(defmt::Format))]
pub enum LedChannel {
    Red,
    Green,
    Blue,
}

impl LedChannel {
    pub const ALL: [LedChannel; 3] = [Self::Red, Self::Green, Self::Blue];
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reading_within_range() {
        let reading = SensorReading::new(100, 4095);
        assert_eq!(reading.rain(), 100);
        assert_eq!(reading.level(), 4095);
    }

    #[test]
    fn reading_saturates_to_analog_range() {
        let reading = SensorReading::new(4096, u16::MAX);
        assert_eq!(reading.rain(), ANALOG_MAX);
        assert_eq!(reading.level(), ANALOG_MAX);
    }

    #[test]
    fn status_ordering() {
        assert!(AlertStatus::Alert > AlertStatus::Normal);
        assert!(AlertStatus::Alert.is_alert());
        assert!(!AlertStatus::Normal.is_alert());
    }

    #[test]
    fn display() {
        assert_eq!(
            std::format!("{}", SensorReading::new(12, 3400)),
            "rain=12 level=3400"
        );
        assert_eq!(std::format!("{}", AlertStatus::Alert), "alert");
    }
}
