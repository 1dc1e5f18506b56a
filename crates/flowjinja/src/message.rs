//! The message contract between the node and the host graph.
//!
//! A [`Message`] carries an arbitrary JSON payload plus whatever other fields
//! the host attaches (topic, correlation ids, timestamps). The node only ever
//! touches `payload`: inbound it is the context overlay, outbound it is
//! replaced by the rendered text (or the caught failure's description). All
//! other fields pass through unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One message flowing through the graph.
///
/// The flattened `metadata` map round-trips any fields the host put next to
/// `payload`, so a node in the middle of a flow never loses them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Context overlay on the way in; rendered or error text on the way out.
    pub payload: Value,

    /// All other message fields, passed through untouched.
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl Message {
    /// Creates a message with the given payload and no extra fields.
    pub fn new(payload: Value) -> Self {
        Self {
            payload,
            metadata: Map::new(),
        }
    }

    /// Attaches a metadata field, returning the message for chaining.
    pub fn with_meta(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}
