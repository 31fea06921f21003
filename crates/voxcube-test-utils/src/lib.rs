//! Test transports and scripted scenes for voxcube development.
//!
//! Provides [`Transport`](voxcube_frame::Transport) implementations that
//! record or fail on demand, and [`Scene`](voxcube_scene::Scene) fixtures
//! with fully predictable output.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::sync::{Arc, Mutex, PoisonError};

use voxcube_frame::{Transport, TransportError};

pub use fixtures::{PlaneScene, ScriptedScene};

/// Transport that keeps every transmitted row.
///
/// Clones share the same log, so a test can hand one clone to a driver
/// (even on another thread) and inspect the other.
#[derive(Clone, Debug, Default)]
pub struct RecordingTransport {
    rows: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every row sent so far.
    pub fn rows(&self) -> Vec<Vec<u8>> {
        self.rows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of rows sent so far.
    pub fn row_count(&self) -> usize {
        self.rows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Rows grouped into whole frames of `rows_per_frame`. A trailing
    /// partial frame is dropped.
    pub fn frames(&self, rows_per_frame: usize) -> Vec<Vec<Vec<u8>>> {
        self.rows()
            .chunks_exact(rows_per_frame)
            .map(|c| c.to_vec())
            .collect()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.rows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Transport for RecordingTransport {
    fn transmit(&mut self, row: &[u8]) -> Result<(), TransportError> {
        self.rows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(row.to_vec());
        Ok(())
    }
}

/// Transport that accepts `ok_rows` rows, then fails every call with
/// [`TransportError::Closed`].
#[derive(Clone, Debug)]
pub struct FailingTransport {
    ok_rows: usize,
    sent: Arc<Mutex<usize>>,
}

impl FailingTransport {
    pub fn after(ok_rows: usize) -> Self {
        Self {
            ok_rows,
            sent: Arc::new(Mutex::new(0)),
        }
    }

    /// Rows accepted so far.
    pub fn accepted(&self) -> usize {
        *self.sent.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Transport for FailingTransport {
    fn transmit(&mut self, _row: &[u8]) -> Result<(), TransportError> {
        let mut sent = self.sent.lock().unwrap_or_else(PoisonError::into_inner);
        if *sent >= self.ok_rows {
            return Err(TransportError::Closed);
        }
        *sent += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_clones_share_log() {
        let probe = RecordingTransport::new();
        let mut t = probe.clone();
        t.transmit(&[1, 2]).unwrap();
        t.transmit(&[3]).unwrap();
        assert_eq!(probe.rows(), vec![vec![1, 2], vec![3]]);
        assert_eq!(probe.frames(2).len(), 1);
        probe.clear();
        assert_eq!(probe.row_count(), 0);
    }

    #[test]
    fn failing_stops_after_budget() {
        let mut t = FailingTransport::after(2);
        assert!(t.transmit(&[0]).is_ok());
        assert!(t.transmit(&[0]).is_ok());
        assert!(matches!(t.transmit(&[0]), Err(TransportError::Closed)));
        assert_eq!(t.accepted(), 2);
    }
}
