//! Internal response representation.
//!
//! Applications build one of the two [`Response`] variants and hand it to the
//! serializer together with a session id. [`DialogResponse`] targets the
//! Dialogflow webhook surface; [`DirectResponse`] targets the conversation
//! webhook. Neither variant knows how to encode itself; the mapping to wire
//! JSON lives in the serializer.

pub mod context;

pub use context::{ActionContext, APP_DATA_CONTEXT, APP_DATA_CONTEXT_LIFESPAN};

use serde_json::Value;

use crate::wire::conversation::{
    AppResponse, ExpectedInput, ExpectedIntent, FinalResponse, InputPrompt, RichResponse,
};
use crate::wire::dialogflow::WebhookResponse;

/// A response ready for serialization, tagged by its target wire format.
///
/// The enum is closed: every variant has a wire mapping and the dispatch
/// matches exhaustively. Adding a variant is a compile-visible change that
/// obliges the author to supply a mapping or surface
/// [`FondantError::UnsupportedResponseKind`](crate::FondantError::UnsupportedResponseKind).
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// For webhooks fronted by Dialogflow
    Dialog(DialogResponse),

    /// For webhooks called by the assistant platform directly
    Direct(DirectResponse),
}

impl Response {
    /// Stable label for logs and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Response::Dialog(_) => "dialog",
            Response::Direct(_) => "direct",
        }
    }
}

/// Response content bound for the Dialogflow webhook surface.
///
/// Everything is optional: an empty value serializes to an empty webhook
/// response. When `assistant_response` is present, the assistant payload
/// built from it replaces the webhook response's `payload` map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DialogResponse {
    /// Source for the `payload.google` assistant payload
    pub assistant_response: Option<DirectResponse>,

    /// Webhook response to merge into; defaults to empty when absent
    pub webhook_response: Option<WebhookResponse>,

    /// Free-form state carried between turns via the app-data context
    pub conversation_data: Option<Value>,

    /// Contexts to merge into the webhook response, in order
    pub contexts: Vec<ActionContext>,
}

impl From<DialogResponse> for Response {
    fn from(dialog: DialogResponse) -> Self {
        Response::Dialog(dialog)
    }
}

impl From<DirectResponse> for Response {
    fn from(direct: DirectResponse) -> Self {
        Response::Direct(direct)
    }
}

/// Response content bound for the conversation webhook, or embedded into a
/// Dialogflow payload.
///
/// [`finalize`](DirectResponse::finalize) assembles the wire-level
/// [`AppResponse`] from the fields below. A pre-built `AppResponse` can be
/// supplied instead via [`from_app_response`](DirectResponse::from_app_response),
/// in which case `finalize` passes it through untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectResponse {
    /// Whether the conversation continues after this response
    pub expect_user_response: bool,

    pub rich_response: Option<RichResponse>,

    /// Helper intents to request, in priority order
    pub helper_intents: Vec<ExpectedIntent>,

    /// Free-form state echoed back on the next turn via the conversation token
    pub conversation_data: Option<Value>,

    /// Cross-conversation storage blob
    pub user_storage: Option<Value>,

    pub is_in_sandbox: Option<bool>,

    /// Explicit token; overrides the one derived from `conversation_data`
    pub conversation_token: Option<String>,

    app_response: Option<AppResponse>,
}

impl DirectResponse {
    pub fn new(expect_user_response: bool) -> Self {
        Self {
            expect_user_response,
            ..Self::default()
        }
    }

    /// Wraps an already-assembled wire response. `finalize` will return it
    /// as-is, and the Dialogflow mapping extracts the assistant payload from
    /// its expected inputs or final response.
    pub fn from_app_response(app_response: AppResponse) -> Self {
        Self {
            expect_user_response: app_response.expect_user_response.unwrap_or(false),
            app_response: Some(app_response),
            ..Self::default()
        }
    }

    /// The wire representation, if already assembled.
    pub fn app_response(&self) -> Option<&AppResponse> {
        self.app_response.as_ref()
    }

    /// Assembles the wire [`AppResponse`] and returns it.
    ///
    /// Idempotent: the representation is built once, on the first call;
    /// later calls (and mutations of the source fields in between) do not
    /// change it.
    pub fn finalize(&mut self) -> &AppResponse {
        if self.app_response.is_none() {
            self.app_response = Some(self.build_app_response());
        }
        self.app_response
            .as_ref()
            .expect("app response populated above")
    }

    fn build_app_response(&self) -> AppResponse {
        let mut app = AppResponse {
            expect_user_response: Some(self.expect_user_response),
            ..AppResponse::default()
        };

        if self.expect_user_response {
            app.expected_inputs = Some(vec![ExpectedInput {
                input_prompt: Some(InputPrompt {
                    rich_initial_prompt: self.rich_response.clone(),
                    no_input_prompts: None,
                }),
                possible_intents: if self.helper_intents.is_empty() {
                    None
                } else {
                    Some(self.helper_intents.clone())
                },
                speech_biasing_hints: None,
            }]);
        } else {
            app.final_response = Some(FinalResponse {
                rich_response: self.rich_response.clone(),
            });
        }

        app.conversation_token = match &self.conversation_token {
            Some(token) => Some(token.clone()),
            None => self.conversation_data.as_ref().map(wrap_data),
        };
        app.user_storage = self.user_storage.as_ref().map(wrap_data);
        app.is_in_sandbox = self.is_in_sandbox;

        app
    }
}

/// Encodes a state blob as the platform expects it: a JSON *string* holding
/// a `{"data": <value>}` document. The double encoding is part of the wire
/// contract for `conversationToken` and `userStorage`.
pub(crate) fn wrap_data(value: &Value) -> String {
    let mut wrapper = serde_json::Map::new();
    wrapper.insert("data".to_string(), value.clone());
    Value::Object(wrapper).to_string()
}
