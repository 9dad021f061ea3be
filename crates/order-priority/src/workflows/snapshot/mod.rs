//! Loading order snapshots exported by the dealership order system.

use crate::workflows::priority::domain::Order;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum SnapshotImportError {
    #[error("failed to read order snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid order snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// `{ "orders": [...] }` wrapper some exports use instead of a bare array.
#[derive(Debug, Deserialize)]
struct SnapshotEnvelope {
    orders: Vec<Order>,
}

pub struct OrderSnapshotImporter;

impl OrderSnapshotImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Order>, SnapshotImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Vec<Order>, SnapshotImportError> {
        let mut raw = Vec::new();
        reader.read_to_end(&mut raw)?;
        Self::from_slice(&raw)
    }

    /// Picks the document shape from the first significant byte so decode errors keep
    /// the offending field and position.
    pub fn from_slice(raw: &[u8]) -> Result<Vec<Order>, SnapshotImportError> {
        match raw.iter().find(|byte| !byte.is_ascii_whitespace()) {
            Some(b'{') => {
                let envelope: SnapshotEnvelope = serde_json::from_slice(raw)?;
                Ok(envelope.orders)
            }
            _ => Ok(serde_json::from_slice(raw)?),
        }
    }
}
