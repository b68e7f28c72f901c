use crate::{
    changed::ObservedValue,
    channels::ClassifierLinks,
    config::{LEVEL_ALERT_THRESHOLD, RAIN_ALERT_THRESHOLD},
    info, trace,
    types::{AlertStatus, SensorReading},
    TaskKind,
};
use embassy_sync::blocking_mutex::raw::RawMutex;

/// Either channel at or above its threshold raises an alert.
pub fn classify(reading: &SensorReading) -> AlertStatus {
    if reading.level() >= LEVEL_ALERT_THRESHOLD || reading.rain() >= RAIN_ALERT_THRESHOLD {
        AlertStatus::Alert
    } else {
        AlertStatus::Normal
    }
}

pub async fn task<M: RawMutex>(links: ClassifierLinks<'_, M>) {
    info!("{} task started", TaskKind::Classifier.name());

    let ClassifierLinks {
        mut readings,
        display_readings,
        status,
    } = links;

    let mut last_status = ObservedValue::default();

    loop {
        // Paced entirely by the sampler
        let reading = readings.receive().await;
        let new_status = classify(&reading);
        trace!("Classified {} as {}", reading, new_status);

        // Two separate publishes, a reader may briefly see one without the other
        display_readings.publish(reading);
        status.publish(new_status);

        last_status.update_and(new_status, |s| info!("Status is now {} ({})", s, reading));
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::MonitorChannels;
    use embassy_futures::select::{select, Either};
    use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

    #[test]
    fn level_threshold_is_inclusive() {
        assert_eq!(classify(&SensorReading::new(0, 2867)), AlertStatus::Alert);
        assert_eq!(classify(&SensorReading::new(0, 2866)), AlertStatus::Normal);
    }

    #[test]
    fn rain_threshold_is_inclusive() {
        assert_eq!(classify(&SensorReading::new(3276, 0)), AlertStatus::Alert);
        assert_eq!(classify(&SensorReading::new(3275, 0)), AlertStatus::Normal);
    }

    #[test]
    fn either_channel_raises_alert() {
        assert_eq!(classify(&SensorReading::new(0, 0)), AlertStatus::Normal);
        assert_eq!(classify(&SensorReading::new(3275, 2866)), AlertStatus::Normal);
        assert_eq!(classify(&SensorReading::new(4095, 4095)), AlertStatus::Alert);
        assert_eq!(classify(&SensorReading::new(4095, 0)), AlertStatus::Alert);
        assert_eq!(classify(&SensorReading::new(0, 4095)), AlertStatus::Alert);
    }

    #[test]
    fn reading_status_matches_classify() {
        let reading = SensorReading::new(3300, 100);
        assert_eq!(reading.status(), classify(&reading));
    }

    #[tokio::test]
    async fn republishes_reading_and_status() {
        let channels = MonitorChannels::<CriticalSectionRawMutex>::new();
        let links = channels.split();

        let check = async {
            channels.readings.publish(SensorReading::new(100, 100));
            assert_eq!(
                channels.display_readings.receive().await,
                SensorReading::new(100, 100)
            );
            assert_eq!(channels.status.peek().await, AlertStatus::Normal);

            channels.readings.publish(SensorReading::new(100, 3000));
            assert_eq!(
                channels.display_readings.receive().await,
                SensorReading::new(100, 3000)
            );
            assert_eq!(channels.status.peek().await, AlertStatus::Alert);

            // The classifier consumed both readings
            assert!(channels.readings.is_empty());
        };

        match select(task(links.classifier), check).await {
            Either::First(_) => panic!("classifier task returned"),
            Either::Second(_) => {}
        }
    }
}
