use flood_station_core::Priority;
use std::{io, path::PathBuf};

#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
    #[error("Failed to read script {path:?}: {source}")]
    ScriptRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{path:?} line {line}: {reason}")]
    ScriptParse {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("The script source needs --script")]
    MissingScript,

    #[error("Script {0:?} contains no samples")]
    EmptyScript(PathBuf),

    #[error("Failed to spawn thread for {tier} tier: {source}")]
    ThreadSpawn {
        tier: Priority,
        #[source]
        source: io::Error,
    },

    #[error("Failed to build runtime for {tier} tier: {source}")]
    RuntimeBuild {
        tier: Priority,
        #[source]
        source: io::Error,
    },

    #[error("Tasks of the {0} tier stopped running")]
    TierExited(Priority),

    #[error("Thread of the {0} tier panicked")]
    TierPanicked(Priority),
}

pub(crate) type Result<T> = std::result::Result<T, Error>;
