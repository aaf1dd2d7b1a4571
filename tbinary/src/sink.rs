//! Destinations for encoded bytes.
//!
//! A growable `Vec<u8>` accumulates as it goes. A `Presized` buffer gets allocated once from an exact size pass and
//! is then filled through a running offset. Any `io::Write` can be fed directly through an `IoSink`. The output is
//! byte for byte the same no matter which sink is used.

use crate::error::EncodeError;
use std::io::Write;

pub trait Sink {
    fn put(&mut self, bytes: &[u8]) -> Result<(), EncodeError>;
}

impl Sink for Vec<u8> {
    #[inline]
    fn put(&mut self, bytes: &[u8]) -> Result<(), EncodeError> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

/// How `to_bytes_with` assembles its output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Append to a vector, reallocating whenever it runs full
    Growable,
    /// Compute the exact length first, allocate once and write at a running offset
    Presized,
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::Growable
    }
}

impl Strategy {
    pub fn name(&self) -> &'static str {
        match *self {
            Strategy::Growable => "growable",
            Strategy::Presized => "presized",
        }
    }
}

/// A fixed size buffer. Putting more bytes than it can hold is an error, not a reallocation.
#[derive(Debug)]
pub struct Presized {
    buf: Box<[u8]>,
    offset: usize,
}

impl Presized {

    pub fn new(len: usize) -> Self {
        Presized { buf: vec![0u8; len].into_boxed_slice(), offset: 0 }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Hands out the buffer, which must have been filled completely
    pub fn finish(self) -> Result<Vec<u8>, EncodeError> {
        if self.offset == self.buf.len() {
            Ok(self.buf.into_vec())
        } else {
            Err(EncodeError::Length(self.offset))
        }
    }

}

impl Sink for Presized {
    #[inline]
    fn put(&mut self, bytes: &[u8]) -> Result<(), EncodeError> {
        let end = self.offset + bytes.len();
        if end > self.buf.len() {
            return Err(EncodeError::Capacity(bytes.len(), self.buf.len()));
        }
        self.buf[self.offset..end].copy_from_slice(bytes);
        self.offset = end;
        Ok(())
    }
}

/// Streams straight into a writer
pub struct IoSink<W: Write>(pub W);

impl<W: Write> IoSink<W> {
    pub fn into_inner(self) -> W {
        self.0
    }
}

impl<W: Write> Sink for IoSink<W> {
    #[inline]
    fn put(&mut self, bytes: &[u8]) -> Result<(), EncodeError> {
        self.0.write_all(bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{IoSink, Presized, Sink};
    use crate::error::ErrorKind;

    #[test]
    fn presized_fills_exactly() {
        let mut sink = Presized::new(5);
        sink.put(&[1, 2]).unwrap();
        sink.put(&[3, 4, 5]).unwrap();
        assert_eq!(vec![1, 2, 3, 4, 5], sink.finish().unwrap());
    }

    #[test]
    fn presized_overflow() {
        let mut sink = Presized::new(2);
        sink.put(&[1]).unwrap();
        assert_eq!(ErrorKind::Sink, sink.put(&[2, 3]).unwrap_err().kind());
        assert_eq!(1, sink.offset());
    }

    #[test]
    fn presized_underfilled() {
        let mut sink = Presized::new(2);
        sink.put(&[1]).unwrap();
        assert!(sink.finish().is_err());
    }

    #[test]
    fn io_sink() {
        let mut sink = IoSink(Vec::new());
        sink.put(b"abc").unwrap();
        assert_eq!(b"abc".to_vec(), sink.into_inner());
    }

}
