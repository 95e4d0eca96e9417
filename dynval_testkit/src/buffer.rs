//! In-memory writers for capturing output in tests

use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Growable byte buffer
#[derive(Debug, Default, Clone)]
pub struct Buffer {
    data: Vec<u8>,
}

impl Buffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_byte(&mut self, b: u8) {
        self.data.push(b);
    }

    pub fn write_char(&mut self, c: char) -> usize {
        let mut tmp = [0u8; 4];
        let encoded = c.encode_utf8(&mut tmp);
        self.data.extend_from_slice(encoded.as_bytes());
        encoded.len()
    }

    pub fn write_str(&mut self, s: &str) -> usize {
        self.data.extend_from_slice(s.as_bytes());
        s.len()
    }

    /// Drain the buffered bytes into `w`
    pub fn write_to<W: Write + ?Sized>(&mut self, w: &mut W) -> io::Result<u64> {
        w.write_all(&self.data)?;
        let n = self.data.len() as u64;
        self.data.clear();
        Ok(n)
    }

    /// Buffered content, lossily decoded as UTF-8
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn reset(&mut self) {
        self.data.clear();
    }

    /// Get the buffered content and reset
    pub fn reset_get(&mut self) -> String {
        let s = self.contents();
        self.reset();
        s
    }
}

impl Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Thread-safe buffer.
///
/// Every write goes through one lock, so concurrent writers never
/// interleave partial writes.
#[derive(Debug, Default)]
pub struct SafeBuffer {
    inner: Mutex<Buffer>,
}

impl SafeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Buffer> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn write_bytes(&self, buf: &[u8]) -> usize {
        self.lock().data.extend_from_slice(buf);
        buf.len()
    }

    pub fn write_byte(&self, b: u8) {
        self.lock().write_byte(b);
    }

    pub fn write_char(&self, c: char) -> usize {
        self.lock().write_char(c)
    }

    pub fn write_str(&self, s: &str) -> usize {
        self.lock().write_str(s)
    }

    /// Drain the buffered bytes into `w`
    pub fn write_to<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<u64> {
        self.lock().write_to(w)
    }

    pub fn contents(&self) -> String {
        self.lock().contents()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Get the buffered content and reset, atomically
    pub fn reset_get(&self) -> String {
        self.lock().reset_get()
    }
}

impl Write for &SafeBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(self.write_bytes(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Write for SafeBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(self.write_bytes(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
