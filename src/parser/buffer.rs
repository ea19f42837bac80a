//! Growable read buffer for incremental parsing.

use tokio::io::{AsyncRead, AsyncReadExt};

/// Starting capacity used by [`crate::parser::Request::from_reader`].
pub(crate) const DEFAULT_BUFFER_SIZE: usize = 1024;

/// A growable byte buffer that tracks a logical length separate from its
/// physical capacity. Bytes past the logical length are uninitialized
/// garbage and must never be interpreted as data.
pub(crate) struct Buffer {
    /// Physical storage; `storage.len()` is the capacity.
    storage: Vec<u8>,
    /// Bytes read but not yet consumed.
    len: usize,
}

impl Buffer {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: vec![0; capacity.max(1)],
            len: 0,
        }
    }

    /// The unconsumed bytes.
    pub(crate) fn bytes(&self) -> &[u8] {
        &self.storage[..self.len]
    }

    /// Read more bytes from `reader` into free capacity, doubling the
    /// storage first if the buffer is full.
    ///
    /// Returns the number of bytes appended; zero means the stream reached
    /// end of input.
    pub(crate) async fn fill<R>(&mut self, reader: &mut R) -> std::io::Result<usize>
    where
        R: AsyncRead + Unpin,
    {
        if self.len == self.storage.len() {
            let grown = self.storage.len() * 2;
            self.storage.resize(grown, 0);
        }

        let n = reader.read(&mut self.storage[self.len..]).await?;
        self.len += n;
        Ok(n)
    }

    /// Remove the first `n` bytes by shifting the remainder to the front.
    /// The physical storage is left untouched.
    pub(crate) fn consume(&mut self, n: usize) {
        debug_assert!(n <= self.len, "consumed past the logical length");
        let n = n.min(self.len);
        self.storage.copy_within(n..self.len, 0);
        self.len -= n;
    }
}
