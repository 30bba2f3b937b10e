use std::io::Write;

use fxrelay_core::{DispatchError, Transport};

/// NDJSON channel: one payload per line, flushed per record so a
/// failed run leaves complete lines behind.
#[derive(Debug)]
pub struct LineTransport<W: Write> {
    writer: W,
}

impl<W: Write> LineTransport<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<W: Write> Transport for LineTransport<W> {
    fn forward(&mut self, payload: &[u8]) -> Result<(), DispatchError> {
        self.writer.write_all(payload)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
