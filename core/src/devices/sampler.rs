use crate::{
    channels::SamplerLinks,
    config::SAMPLE_PERIOD,
    info,
    peripherals::AnalogSource,
    trace,
    types::{AnalogChannel, SensorReading},
    TaskKind,
};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::Ticker;

pub fn sample<A: AnalogSource>(source: &mut A) -> SensorReading {
    let rain = source.read(AnalogChannel::Rain);
    let level = source.read(AnalogChannel::Level);
    SensorReading::new(rain, level)
}

pub async fn task<M: RawMutex, A: AnalogSource>(mut source: A, links: SamplerLinks<'_, M>) {
    info!("{} task started", TaskKind::Sampler.name());

    let mut tick = Ticker::every(SAMPLE_PERIOD);

    loop {
        let reading = sample(&mut source);
        trace!("Sampled {}", reading);

        // An unconsumed previous reading is simply replaced
        links.readings.publish(reading);

        tick.next().await;
    }
}
