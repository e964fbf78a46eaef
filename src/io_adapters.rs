use std::io::{Result as IoResult, Write};
use std::sync::{Arc, Mutex, PoisonError};

/// Writer that always targets the process standard output.
///
/// Unlike [`std::io::Stdout`] it is `Clone`, so every signal line can own one.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl Write for StdoutSink {
    fn write(&mut self, data: &[u8]) -> IoResult<usize> {
        std::io::stdout().write(data)
    }

    fn flush(&mut self) -> IoResult<()> {
        std::io::stdout().flush()
    }
}

/// Memory-backed writer whose clones share one buffer.
///
/// Used to capture output produced on another thread.
#[derive(Debug, Clone, Default)]
pub struct SharedWriter {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl SharedWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, decoded lossily.
    pub fn contents(&self) -> String {
        let buf = self.buf.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl Write for SharedWriter {
    fn write(&mut self, data: &[u8]) -> IoResult<usize> {
        self.buf
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> IoResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_buffer() {
        let writer = SharedWriter::new();
        let mut a = writer.clone();
        let mut b = writer.clone();
        write!(a, "one ").unwrap();
        write!(b, "two").unwrap();
        assert_eq!(writer.contents(), "one two");
    }
}
