mod record;
mod timestamp;

pub use record::CurrencyRecord;
pub use timestamp::{TimestampError, UtcDateTime};
