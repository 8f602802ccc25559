//! Conversation-webhook wire types.
//!
//! These are the shapes the Assistant platform accepts directly:
//! [`AppResponse`] at the top, expected inputs and prompts below it, and the
//! rich-response content model shared with the Dialogflow payload. Field
//! names follow the platform's camelCase JSON; absent optionals are omitted
//! from the output entirely.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Top-level response for the conversation webhook.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppResponse {
    /// Opaque state echoed back by the platform on the next turn
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_token: Option<String>,

    /// Cross-conversation storage, pre-serialized to a JSON string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_storage: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_user_storage: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expect_user_response: Option<bool>,

    /// Populated when the conversation continues
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_inputs: Option<Vec<ExpectedInput>>,

    /// Populated when the conversation ends
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_response: Option<FinalResponse>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_in_sandbox: Option<bool>,
}

/// What the app expects from the user next: a prompt to surface and the
/// intents the platform may resolve.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExpectedInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_prompt: Option<InputPrompt>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub possible_intents: Option<Vec<ExpectedIntent>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub speech_biasing_hints: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InputPrompt {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rich_initial_prompt: Option<RichResponse>,

    /// Prompts spoken when the user stays silent, in escalation order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_input_prompts: Option<Vec<SimpleResponse>>,
}

/// An intent the app asks the platform to resolve next. Helper intents
/// (confirmation, sign-in, option picking) are expressed this way, with the
/// capability-specific value spec carried in `inputValueData`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExpectedIntent {
    pub intent: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_value_data: Option<Value>,
}

impl ExpectedIntent {
    pub fn new(intent: impl Into<String>) -> Self {
        Self {
            intent: intent.into(),
            input_value_data: None,
        }
    }

    pub fn with_input_value_data(mut self, data: Value) -> Self {
        self.input_value_data = Some(data);
        self
    }
}

/// Closing content for a conversation that does not continue.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FinalResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rich_response: Option<RichResponse>,
}

/// Visual-and-spoken response content: ordered items plus suggestion chips.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RichResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<ResponseItem>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<Suggestion>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_out_suggestion: Option<LinkOutSuggestion>,
}

/// One rich-response item. Serializes as a single-key object keyed by the
/// item kind, e.g. `{"simpleResponse": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ResponseItem {
    #[serde(rename = "simpleResponse")]
    Simple(SimpleResponse),

    #[serde(rename = "basicCard")]
    BasicCard(BasicCard),

    #[serde(rename = "mediaResponse")]
    Media(MediaResponse),

    /// Transaction/order payloads; passed through opaquely
    #[serde(rename = "structuredResponse")]
    Structured(Value),
}

/// Spoken-and-displayed response. `textToSpeech` and `ssml` are mutually
/// exclusive on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimpleResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_to_speech: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssml: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BasicCard {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted_text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub buttons: Option<Vec<Button>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_display_options: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub url: String,

    /// Required by the platform for screen readers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessibility_text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Button {
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_url_action: Option<OpenUrlAction>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OpenUrlAction {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MediaResponse {
    pub media_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_objects: Option<Vec<MediaObject>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MediaObject {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub content_url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<Image>,
}

/// A suggestion chip the user can tap to continue the conversation.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LinkOutSuggestion {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}
