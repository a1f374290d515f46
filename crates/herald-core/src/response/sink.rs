//! A byte sink that discards its input.

use std::io::{self, Write};

/// Counts and discards written bytes.
///
/// Once closed, every write or flush fails with
/// [`io::ErrorKind::BrokenPipe`] instead of silently dropping data.
#[derive(Debug, Default)]
pub struct NullSink {
    written: u64,
    closed: bool,
}

impl NullSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    #[inline]
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn close(&mut self) {
        self.closed = true;
    }

    fn check_open(&self) -> io::Result<()> {
        if self.closed {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink is closed"));
        }
        Ok(())
    }
}

impl Write for NullSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.check_open()?;
        self.written += buf.len() as u64;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.check_open()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_until_closed() {
        let mut sink = NullSink::new();
        sink.write_all(b"hello").unwrap();
        sink.flush().unwrap();
        assert_eq!(sink.bytes_written(), 5);

        sink.close();
        assert!(sink.is_closed());
        let err = sink.write(b"x").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert_eq!(err.to_string(), "sink is closed");
        assert!(sink.flush().is_err());
        assert_eq!(sink.bytes_written(), 5);
    }
}
