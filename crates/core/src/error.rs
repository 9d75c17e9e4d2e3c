use thiserror::Error;

/// Why a stored event timestamp could not be used in a windowed count.
///
/// Always recovered per event; never aborts an aggregation.
#[derive(Error, Debug)]
pub enum TimestampError {
    #[error("timestamp missing")]
    Missing,

    #[error("unparseable timestamp {value:?}: {source}")]
    Unparseable {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}
