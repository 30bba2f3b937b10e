use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Timestamp(#[from] fxrelay_core::TimestampError),

    #[error("ingest line {line}: {source}")]
    Record {
        line: usize,
        source: serde_json::Error,
    },

    #[error("command error: {0}")]
    Command(String),

    #[error(transparent)]
    Pipeline(#[from] fxrelay_core::PipelineError),

    #[error(transparent)]
    Store(#[from] fxrelay_warehouse::StoreError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Timestamp(_) | Self::Record { .. } => 2,
            Self::Command(_) | Self::Pipeline(_) | Self::Store(_) | Self::Io(_) => 10,
        }
    }
}
