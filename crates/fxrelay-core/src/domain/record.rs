use serde::{Deserialize, Serialize};

use crate::domain::UtcDateTime;

/// One currency row on its way to the sink.
///
/// The mapper constructs a record per row and hands ownership to the
/// orchestrator, which moves it into the sink; nothing holds a shared
/// mutable reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyRecord {
    /// Classification of the instrument, e.g. "fiat" or "crypto".
    pub category: String,

    /// Short instrument code (ISO code or ticker).
    pub symbol: String,

    /// Chain for chain-based instruments. Absent (`None`) is distinct
    /// from present-but-empty and is omitted from the JSON payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain: Option<String>,

    /// Creation time; doubles as the filter boundary for the next run.
    pub created_at: UtcDateTime,
}
