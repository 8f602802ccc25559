//! Adapts conversational responses into webhook wire JSON for the Google
//! Assistant platform.
//!
//! Applications build a [`Response`] (a [`DialogResponse`] for webhooks
//! fronted by Dialogflow, or a [`DirectResponse`] for the conversation
//! webhook) and pass it to a [`ResponseSerializer`] together with the dialog
//! session id. The serializer produces the JSON string for the matching wire
//! format: Dialogflow v2 webhook responses with merged `outputContexts` and
//! an embedded `payload.google`, or the conversation-webhook `AppResponse`.
//!
//! ```
//! use fondant::{DialogResponse, Response, ResponseSerializer};
//! use serde_json::json;
//!
//! let serializer = ResponseSerializer::new("sessions/demo");
//! let response = Response::Dialog(DialogResponse {
//!     conversation_data: Some(json!({"step": 1})),
//!     ..DialogResponse::default()
//! });
//! let wire_json = serializer.serialize(response)?;
//! assert!(wire_json.contains("sessions/demo/contexts/_actions_on_google"));
//! # Ok::<(), fondant::FondantError>(())
//! ```

pub mod config;
pub mod error;
pub mod response;
pub mod serializer;
pub mod wire;

pub use config::{LibraryInfo, SerializerConfig};
pub use error::{FondantError, Result};
pub use response::{
    ActionContext, DialogResponse, DirectResponse, Response, APP_DATA_CONTEXT,
    APP_DATA_CONTEXT_LIFESPAN,
};
pub use serializer::ResponseSerializer;
