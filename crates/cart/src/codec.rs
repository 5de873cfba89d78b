//! Snapshot (de)serialization for the persisted cart record.
//!
//! The record is a JSON array of line items in cart order:
//!
//! ```json
//! [{"id":"p1","title":"Tomato","image_url":"u","price":2.5,"quantity":1}]
//! ```

use gomarket_core::{CartSnapshot, LineItem};

use crate::error::DecodeError;

/// Serialize a snapshot into the persisted record.
///
/// # Errors
///
/// Returns `serde_json::Error` if serialization fails.
pub fn encode(snapshot: &CartSnapshot) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(snapshot.items())
}

/// Parse a persisted record back into a snapshot.
///
/// # Errors
///
/// Returns `DecodeError::Json` for malformed records (including zero
/// quantities) and `DecodeError::Snapshot` for duplicate IDs.
pub fn decode(bytes: &[u8]) -> Result<CartSnapshot, DecodeError> {
    let items: Vec<LineItem> = serde_json::from_slice(bytes)?;
    Ok(CartSnapshot::try_from_items(items)?)
}
