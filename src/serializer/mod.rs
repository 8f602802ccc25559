//! Adapts internal responses into webhook wire JSON.
//!
//! One submodule per target surface. [`ResponseSerializer`] dispatches on
//! the response variant and hands off to the matching format module; the
//! submodules own the mapping rules, context merging, and payload assembly.

mod conversation;
mod dialogflow;

use serde_json::{Map, Value};
use tracing::debug;

use crate::config::{LibraryInfo, SerializerConfig};
use crate::error::Result;
use crate::response::Response;

/// Serializes [`Response`] values for one dialog session.
///
/// Holds only the session id (used to namespace context names) and the
/// serializer config. No interior state: a serializer can be shared across
/// threads and reused for any number of responses.
#[derive(Debug, Clone)]
pub struct ResponseSerializer {
    session_id: String,
    config: SerializerConfig,
}

impl ResponseSerializer {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self::with_config(session_id, SerializerConfig::default())
    }

    pub fn with_config(session_id: impl Into<String>, config: SerializerConfig) -> Self {
        Self {
            session_id: session_id.into(),
            config,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Serialize a response into the JSON string for its wire format.
    pub fn serialize(&self, response: Response) -> Result<String> {
        debug!(
            kind = response.kind(),
            session_id = %self.session_id,
            "serializing response"
        );
        match response {
            Response::Dialog(dialog) => dialogflow::serialize(self, dialog),
            Response::Direct(direct) => conversation::serialize(self, direct),
        }
    }
}

/// Injects `{<outer_key>: {<inner_key>: <library info>}}` into a serialized
/// response object. The two formats use different key pairs for the same
/// metadata; callers pass theirs.
fn inject_library_metadata(
    value: &mut Value,
    outer_key: &str,
    inner_key: &str,
    library: &LibraryInfo,
) -> Result<()> {
    if let Value::Object(object) = value {
        let mut metadata = Map::new();
        metadata.insert(inner_key.to_string(), serde_json::to_value(library)?);
        object.insert(outer_key.to_string(), Value::Object(metadata));
    }
    Ok(())
}
