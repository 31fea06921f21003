//! The [`Transport`] trait and a [`std::io::Write`] adapter.

use std::io::{self, Write};

use crate::error::TransportError;

/// Sink for encoded layer transmissions.
///
/// Each call carries one complete layer. Implementations must either
/// deliver the whole row or return an error.
pub trait Transport: Send {
    /// Send one encoded layer.
    fn transmit(&mut self, row: &[u8]) -> Result<(), TransportError>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn transmit(&mut self, row: &[u8]) -> Result<(), TransportError> {
        (**self).transmit(row)
    }
}

/// Sends each row with a single `write` on any [`Write`] sink.
///
/// A spidev character device treats every `write` as one SPI
/// transaction, so a row is never split across calls: a partial write
/// surfaces as [`TransportError::ShortWrite`].
///
/// ```
/// use voxcube_frame::{Transport, WriteTransport};
///
/// let mut transport = WriteTransport::new(Vec::new());
/// transport.transmit(&[0x01, 0xff]).unwrap();
/// assert_eq!(transport.into_inner(), vec![0x01, 0xff]);
/// ```
#[derive(Debug)]
pub struct WriteTransport<W> {
    inner: W,
}

impl<W: Write + Send> WriteTransport<W> {
    /// Wrap a writer.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Borrow the writer.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Unwrap the writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write + Send> Transport for WriteTransport<W> {
    fn transmit(&mut self, row: &[u8]) -> Result<(), TransportError> {
        let written = loop {
            match self.inner.write(row) {
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                other => break other?,
            }
        };
        if written != row.len() {
            return Err(TransportError::ShortWrite {
                written,
                expected: row.len(),
            });
        }
        self.inner.flush()?;
        Ok(())
    }
}
