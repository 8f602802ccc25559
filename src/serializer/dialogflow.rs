//! Dialog-format mapping.
//!
//! Assembles a Dialogflow v2 webhook response: embeds the assistant payload
//! under `payload.google`, folds conversation data into the app-data
//! context, and merges contexts into `outputContexts` with session
//! namespacing.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::Result;
use crate::response::{
    ActionContext, DialogResponse, DirectResponse, APP_DATA_CONTEXT, APP_DATA_CONTEXT_LIFESPAN,
};
use crate::wire::conversation::{AppResponse, ExpectedIntent, RichResponse};
use crate::wire::dialogflow::{GooglePayload, OutputContext, SystemIntent, WebhookResponse};

use super::ResponseSerializer;

/// Payload key Dialogflow routes to the assistant platform.
const GOOGLE_PAYLOAD_KEY: &str = "google";

const METADATA_KEY: &str = "metadata";
const LIBRARY_KEY: &str = "google_library";

pub(super) fn serialize(
    serializer: &ResponseSerializer,
    mut dialog: DialogResponse,
) -> Result<String> {
    let mut webhook = dialog.webhook_response.take().unwrap_or_default();

    if let Some(source) = dialog.assistant_response.take() {
        let payload = build_google_payload(&source);
        let mut map = Map::new();
        map.insert(GOOGLE_PAYLOAD_KEY.to_string(), serde_json::to_value(payload)?);
        webhook.payload = Some(map);
    }

    let mut incoming = Vec::with_capacity(dialog.contexts.len() + 1);
    if let Some(data) = dialog.conversation_data.take() {
        incoming.push(app_data_context(&data));
    }
    incoming.extend(dialog.contexts);

    if !incoming.is_empty() {
        merge_contexts(&mut webhook, serializer.session_id(), incoming);
    }

    let mut value = serde_json::to_value(&webhook)?;
    if serializer.config.include_library_metadata {
        super::inject_library_metadata(
            &mut value,
            METADATA_KEY,
            LIBRARY_KEY,
            &serializer.config.library,
        )?;
    }
    Ok(value.to_string())
}

/// The synthetic context that carries conversation data between turns. Its
/// single `data` parameter holds the blob JSON-encoded to a string.
fn app_data_context(data: &Value) -> ActionContext {
    let mut parameters = Map::new();
    parameters.insert("data".to_string(), Value::String(data.to_string()));
    ActionContext {
        name: APP_DATA_CONTEXT.to_string(),
        lifespan_turns: APP_DATA_CONTEXT_LIFESPAN,
        parameters,
    }
}

/// Merges incoming contexts into the webhook response's `outputContexts`.
///
/// Lookup is by exact stored name: a hit overwrites that entry's lifespan
/// and parameters in place, keeping its name and list position; a miss
/// appends under the namespaced form of the incoming name. Existing entries
/// keep their order, appends follow in call order.
fn merge_contexts(webhook: &mut WebhookResponse, session_id: &str, incoming: Vec<ActionContext>) {
    let mut merged: IndexMap<String, OutputContext> = IndexMap::new();
    for context in webhook.output_contexts.take().into_iter().flatten() {
        merged.insert(context.name.clone(), context);
    }

    for context in incoming {
        match merged.get_mut(&context.name) {
            Some(existing) => {
                existing.lifespan_count = Some(context.lifespan_turns);
                existing.parameters = Some(context.parameters);
            }
            None => {
                // A bare incoming name never matches a namespaced stored one;
                // it lands as a fresh namespaced entry.
                let name = namespaced(session_id, &context.name);
                merged.insert(
                    name.clone(),
                    OutputContext {
                        name,
                        lifespan_count: Some(context.lifespan_turns),
                        parameters: Some(context.parameters),
                    },
                );
            }
        }
    }

    webhook.output_contexts = Some(merged.into_values().collect());
}

/// Prefixes a bare context name with `<sessionId>/contexts/`. Names already
/// carrying this session's prefix pass through unchanged.
fn namespaced(session_id: &str, name: &str) -> String {
    let prefix = format!("{session_id}/contexts/");
    if name.starts_with(&prefix) {
        name.to_string()
    } else {
        format!("{prefix}{name}")
    }
}

/// Builds the assistant payload embedded under `payload.google`.
///
/// When the source carries an assembled [`AppResponse`], content is lifted
/// out of its deep structure; otherwise the source's own fields are used.
/// Lookups into the deep structure resolve missing elements as absent.
fn build_google_payload(source: &DirectResponse) -> GooglePayload {
    let mut payload = GooglePayload {
        expect_user_response: source.expect_user_response,
        is_ssml: false,
        ..GooglePayload::default()
    };

    match source.app_response() {
        Some(app) if app.expect_user_response == Some(true) => {
            payload.rich_response = first_rich_initial_prompt(app);
            payload.system_intent = first_possible_intent(app).map(system_intent_from);
        }
        Some(app) => {
            payload.rich_response = app
                .final_response
                .as_ref()
                .and_then(|response| response.rich_response.clone());
        }
        None => {
            payload.rich_response = source.rich_response.clone();
            payload.system_intent = source.helper_intents.first().map(system_intent_from);
        }
    }

    payload.user_storage = source.user_storage.as_ref().map(crate::response::wrap_data);
    payload
}

fn first_rich_initial_prompt(app: &AppResponse) -> Option<RichResponse> {
    let input = match app.expected_inputs.as_ref().and_then(|inputs| inputs.first()) {
        Some(input) => input,
        None => {
            warn!("app response expects user input but carries no expected inputs");
            return None;
        }
    };
    input
        .input_prompt
        .as_ref()
        .and_then(|prompt| prompt.rich_initial_prompt.clone())
}

fn first_possible_intent(app: &AppResponse) -> Option<&ExpectedIntent> {
    app.expected_inputs
        .as_ref()
        .and_then(|inputs| inputs.first())
        .and_then(|input| input.possible_intents.as_ref())
        .and_then(|intents| intents.first())
}

/// The Dialogflow payload carries the value spec under `data` where the
/// conversation webhook uses `inputValueData`.
fn system_intent_from(intent: &ExpectedIntent) -> SystemIntent {
    SystemIntent {
        intent: intent.intent.clone(),
        data: intent.input_value_data.clone(),
    }
}
