//! Dialogflow v2 webhook wire types.
//!
//! The fulfillment response Dialogflow accepts: fulfillment text, output
//! contexts, and a per-platform `payload` map. Assistant-specific content
//! rides under the `"google"` payload key as a [`GooglePayload`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::wire::conversation::{RichResponse, SimpleResponse};

/// Top-level Dialogflow v2 fulfillment response.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WebhookResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fulfillment_text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fulfillment_messages: Option<Vec<Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Per-platform content keyed by platform name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Map<String, Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_contexts: Option<Vec<OutputContext>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub followup_event_input: Option<EventInput>,
}

/// A Dialogflow context, named with the full session path:
/// `<session>/contexts/<context-name>`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OutputContext {
    pub name: String,

    /// Turns the context stays active; 0 deactivates it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifespan_count: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Map<String, Value>>,
}

/// Event to trigger instead of matching the user's next utterance.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventInput {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Map<String, Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
}

/// Assistant content embedded under `payload.google`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GooglePayload {
    pub expect_user_response: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rich_response: Option<RichResponse>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_input_prompts: Option<Vec<SimpleResponse>>,

    /// Reserved by the wire contract; always emitted as `false`
    pub is_ssml: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_intent: Option<SystemIntent>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_storage: Option<String>,
}

/// Helper-intent request carried through the Dialogflow payload. Unlike the
/// conversation-webhook `ExpectedIntent`, the value spec key here is `data`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SystemIntent {
    pub intent: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}
