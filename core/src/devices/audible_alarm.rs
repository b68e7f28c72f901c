use crate::{
    changed::ObservedValue,
    channels::StatusObserver,
    config::{ALARM_BURST, ALARM_IDLE_RECHECK, ALARM_REST, ALARM_TONE_HZ},
    debug, info,
    peripherals::AudibleOutput,
    types::AlertStatus,
    TaskKind,
};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::Timer;

pub async fn task<M: RawMutex, B: AudibleOutput>(mut output: B, status: StatusObserver<'_, M>) {
    info!("{} task started", TaskKind::AudibleAlarm.name());

    output.stop();

    let mut sounding = ObservedValue::default();

    loop {
        let s = status.peek().await;
        sounding.update_and(s, |s| debug!("Audible alarm {}", s));

        match s {
            AlertStatus::Alert => {
                output.start(ALARM_TONE_HZ);
                Timer::after(ALARM_BURST).await;
                output.stop();
                Timer::after(ALARM_REST).await;
            }
            AlertStatus::Normal => {
                output.stop();
                Timer::after(ALARM_IDLE_RECHECK).await;
            }
        }
    }
}
