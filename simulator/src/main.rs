mod error;
mod outputs;
mod source;

use crate::{
    error::{Error, Result},
    outputs::{TerminalBuzzer, TerminalLight, TerminalMatrix, TerminalText},
    source::SimulatedSource,
};
use clap::{Parser, ValueEnum};
use embassy_futures::join::join3;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use flood_station_core::{
    devices::{audible_alarm, indicator_light, matrix_indicator, sampler, text_display},
    logic::classifier,
    MonitorChannels, Priority,
};
use log::{debug, info, warn};
use static_cell::StaticCell;
use std::{
    future::Future,
    path::PathBuf,
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

/// Runs the flood monitoring station against simulated sensors, reporting every output to the
/// log.
#[derive(Parser)]
#[command(version)]
struct Cli {
    /// Where sensor readings come from
    #[arg(short, long, value_enum, default_value = "sweep")]
    source: SourceKind,

    /// Rain channel value for the fixed source
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u16).range(0..=4095))]
    rain: u16,

    /// Level channel value for the fixed source
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u16).range(0..=4095))]
    level: u16,

    /// File of `rain,level` lines replayed by the script source, one line per sample
    #[arg(long, required_if_eq("source", "script"))]
    script: Option<PathBuf>,

    /// Period of the sweep source's triangle waves
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u64).range(1..))]
    sweep_period_secs: u64,

    /// Stop after this long, run forever when absent
    #[arg(long)]
    duration_secs: Option<u64>,

    /// Interval between cell statistics reports
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u64).range(1..))]
    stats_interval_secs: u64,
}

#[derive(Clone, Copy, ValueEnum)]
enum SourceKind {
    Sweep,
    Fixed,
    Script,
}

impl Cli {
    fn source(&self) -> Result<SimulatedSource> {
        match (self.source, &self.script) {
            (SourceKind::Sweep, _) => Ok(SimulatedSource::sweep(Duration::from_secs(
                self.sweep_period_secs,
            ))),
            (SourceKind::Fixed, _) => Ok(SimulatedSource::fixed(self.rain, self.level)),
            (SourceKind::Script, Some(path)) => SimulatedSource::script(path),
            (SourceKind::Script, None) => Err(Error::MissingScript),
        }
    }
}

static CHANNELS: StaticCell<MonitorChannels<CriticalSectionRawMutex>> = StaticCell::new();

type TierHandle = JoinHandle<Result<()>>;

/// Drives the tasks of one priority tier on a dedicated thread.
fn spawn_tier<F, Fut>(tier: Priority, tasks: F) -> Result<(Priority, TierHandle)>
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = ()>,
{
    let handle = thread::Builder::new()
        .name(format!("{tier} tier"))
        .spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .build()
                .map_err(|source| Error::RuntimeBuild { tier, source })?;

            for task in tier.tasks() {
                debug!("Starting {} on {} tier", task, tier);
            }
            runtime.block_on(tasks());

            Err(Error::TierExited(tier))
        })
        .map_err(|source| Error::ThreadSpawn { tier, source })?;

    Ok((tier, handle))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    info!(
        "Flood station simulator, revision {}",
        git_version::git_version!(fallback = "unknown")
    );

    let source = cli.source()?;

    let channels: &'static MonitorChannels<CriticalSectionRawMutex> =
        CHANNELS.init(MonitorChannels::new());
    let links = channels.split();

    let mut tiers = vec![
        spawn_tier(Priority::Classification, move || {
            classifier::task(links.classifier)
        })?,
        spawn_tier(Priority::Sampling, move || {
            sampler::task(source, links.sampler)
        })?,
        spawn_tier(Priority::Actuation, move || async move {
            join3(
                indicator_light::task(TerminalLight::default(), links.indicator_light),
                audible_alarm::task(TerminalBuzzer::default(), links.audible_alarm),
                matrix_indicator::task(TerminalMatrix::default(), links.matrix_indicator),
            )
            .await;
        })?,
        spawn_tier(Priority::Display, move || {
            text_display::task(TerminalText::default(), links.text_display)
        })?,
    ];

    let stats_interval = Duration::from_secs(cli.stats_interval_secs);
    let deadline = cli
        .duration_secs
        .map(|secs| Instant::now() + Duration::from_secs(secs));

    loop {
        let wait = match deadline {
            Some(deadline) => stats_interval.min(deadline.saturating_duration_since(Instant::now())),
            None => stats_interval,
        };
        thread::sleep(wait);

        info!("Readings: {:?}", channels.readings.statistics());
        info!("Display readings: {:?}", channels.display_readings.statistics());
        info!("Status: {:?}", channels.status.statistics());

        if let Some(idx) = tiers.iter().position(|(_, handle)| handle.is_finished()) {
            let (tier, handle) = tiers.swap_remove(idx);
            warn!("Thread of the {} tier finished", tier);

            return match handle.join() {
                Ok(result) => result,
                Err(_) => Err(Error::TierPanicked(tier)),
            };
        }

        if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            info!("Simulation finished");
            return Ok(());
        }
    }
}
