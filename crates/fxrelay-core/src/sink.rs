use crate::domain::CurrencyRecord;
use crate::error::DispatchError;

/// Accepts one record and forwards it to an external channel (message
/// bus, log, file; opaque to the pipeline).
pub trait RecordSink {
    /// Failure is fatal to the run; records already dispatched stand.
    fn dispatch(&mut self, record: CurrencyRecord) -> Result<(), DispatchError>;
}

/// Byte channel behind the reference sink.
pub trait Transport {
    fn forward(&mut self, payload: &[u8]) -> Result<(), DispatchError>;
}

/// Reference sink: encodes each record as a JSON payload and forwards
/// the bytes. Chain absence is preserved by omitting the field.
#[derive(Debug)]
pub struct JsonSink<T: Transport> {
    transport: T,
}

impl<T: Transport> JsonSink<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn into_transport(self) -> T {
        self.transport
    }
}

impl<T: Transport> RecordSink for JsonSink<T> {
    fn dispatch(&mut self, record: CurrencyRecord) -> Result<(), DispatchError> {
        let payload = serde_json::to_vec(&record)?;
        self.transport.forward(payload.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UtcDateTime;

    #[derive(Default)]
    struct BufferTransport {
        payloads: Vec<Vec<u8>>,
    }

    impl Transport for BufferTransport {
        fn forward(&mut self, payload: &[u8]) -> Result<(), DispatchError> {
            self.payloads.push(payload.to_vec());
            Ok(())
        }
    }

    fn record(chain: Option<&str>) -> CurrencyRecord {
        CurrencyRecord {
            category: String::from("fiat"),
            symbol: String::from("USD"),
            chain: chain.map(str::to_owned),
            created_at: UtcDateTime::parse("2025-04-12T23:40:31Z").expect("timestamp"),
        }
    }

    #[test]
    fn forwards_one_payload_per_record() {
        let mut sink = JsonSink::new(BufferTransport::default());
        sink.dispatch(record(Some("ethereum"))).expect("dispatch");
        sink.dispatch(record(None)).expect("dispatch");

        let transport = sink.into_transport();
        assert_eq!(transport.payloads.len(), 2);

        let first: serde_json::Value =
            serde_json::from_slice(&transport.payloads[0]).expect("json");
        assert_eq!(first["chain"], "ethereum");
        assert_eq!(first["symbol"], "USD");
        assert_eq!(first["created_at"], "2025-04-12T23:40:31Z");

        let second: serde_json::Value =
            serde_json::from_slice(&transport.payloads[1]).expect("json");
        assert!(second.get("chain").is_none());
    }

    #[test]
    fn transport_failure_is_reported() {
        struct RejectingTransport;

        impl Transport for RejectingTransport {
            fn forward(&mut self, _payload: &[u8]) -> Result<(), DispatchError> {
                Err(DispatchError::Rejected(String::from("broker unavailable")))
            }
        }

        let mut sink = JsonSink::new(RejectingTransport);
        let error = sink.dispatch(record(None)).expect_err("must fail");
        assert!(matches!(error, DispatchError::Rejected(_)));
    }
}
