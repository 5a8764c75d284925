use thiserror::Error;

/// Errors surfaced by the command-line tool.
///
/// Conversion itself never fails; only reading input and encoding output can.
#[derive(Debug, Error)]
pub enum CliError {
    /// The input file (or stdin) could not be read.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// A step content file was not valid JSON of the expected shape.
    #[error("invalid step file '{path}': {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    /// JSON output could not be encoded.
    #[error("failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}
