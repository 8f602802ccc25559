//! End-to-end tests for the Dialogflow webhook output format:
//! passthrough behavior, context merging and namespacing, the app-data
//! context, the embedded `payload.google`, and metadata injection.

mod common;

use fondant::wire::conversation::{
    AppResponse, ExpectedInput, ExpectedIntent, InputPrompt, ResponseItem, RichResponse,
    SimpleResponse, Suggestion,
};
use fondant::wire::dialogflow::{OutputContext, WebhookResponse};
use fondant::{
    ActionContext, DialogResponse, DirectResponse, Response, ResponseSerializer, SerializerConfig,
    APP_DATA_CONTEXT_LIFESPAN,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Map, Value};

fn serialize_dialog(session_id: &str, dialog: DialogResponse) -> Value {
    common::init_test_logging();
    let serializer = ResponseSerializer::new(session_id);
    let out = serializer
        .serialize(Response::Dialog(dialog))
        .expect("serialization should succeed");
    serde_json::from_str(&out).expect("output should be valid JSON")
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

fn speech_response(text: &str) -> RichResponse {
    RichResponse {
        items: Some(vec![ResponseItem::Simple(SimpleResponse {
            text_to_speech: Some(text.to_string()),
            ssml: None,
            display_text: None,
        })]),
        suggestions: None,
        link_out_suggestion: None,
    }
}

#[test]
fn test_bare_webhook_response_passes_through() {
    let webhook = WebhookResponse {
        fulfillment_text: Some("Your pizza is on the way".to_string()),
        source: Some("pizza-backend".to_string()),
        ..WebhookResponse::default()
    };
    let value = serialize_dialog(
        "sess1",
        DialogResponse {
            webhook_response: Some(webhook.clone()),
            ..DialogResponse::default()
        },
    );

    assert_eq!(value, serde_json::to_value(&webhook).unwrap());
    assert!(value.get("payload").is_none());
    assert!(value.get("outputContexts").is_none());
    assert!(value.get("metadata").is_none());
}

#[test]
fn test_empty_dialog_response_serializes_to_empty_object() {
    let value = serialize_dialog("sess1", DialogResponse::default());
    assert_eq!(value, json!({}));
}

#[test]
fn test_conversation_data_becomes_app_data_context() {
    let blob = json!({"order": {"size": "large", "toppings": ["olives"]}});
    let value = serialize_dialog(
        "sess1",
        DialogResponse {
            conversation_data: Some(blob.clone()),
            ..DialogResponse::default()
        },
    );

    let contexts = value["outputContexts"].as_array().unwrap();
    assert_eq!(contexts.len(), 1);
    assert_eq!(contexts[0]["name"], "sess1/contexts/_actions_on_google");
    assert_eq!(contexts[0]["lifespanCount"], APP_DATA_CONTEXT_LIFESPAN);

    // The data parameter is a JSON string, not a nested object
    let data = contexts[0]["parameters"]["data"].as_str().unwrap();
    let parsed: Value = serde_json::from_str(data).unwrap();
    assert_eq!(parsed, blob);
}

#[test]
fn test_app_data_context_precedes_caller_contexts() {
    let value = serialize_dialog(
        "sess1",
        DialogResponse {
            conversation_data: Some(json!({"step": 3})),
            contexts: vec![ActionContext::new("await-topping", 2)],
            ..DialogResponse::default()
        },
    );

    let contexts = value["outputContexts"].as_array().unwrap();
    assert_eq!(contexts.len(), 2);
    assert_eq!(contexts[0]["name"], "sess1/contexts/_actions_on_google");
    assert_eq!(contexts[1]["name"], "sess1/contexts/await-topping");
}

#[test]
fn test_worked_context_example() {
    let value = serialize_dialog(
        "sess1",
        DialogResponse {
            contexts: vec![ActionContext::new("foo", 5).with_parameters(object(json!({"a": 1})))],
            ..DialogResponse::default()
        },
    );

    assert_eq!(
        value["outputContexts"],
        json!([{
            "name": "sess1/contexts/foo",
            "lifespanCount": 5,
            "parameters": {"a": 1}
        }])
    );
}

#[test]
fn test_merge_overwrites_existing_context_in_place() {
    let webhook = WebhookResponse {
        output_contexts: Some(vec![
            OutputContext {
                name: "sess1/contexts/first".to_string(),
                lifespan_count: Some(1),
                parameters: Some(object(json!({"stale": true}))),
            },
            OutputContext {
                name: "sess1/contexts/second".to_string(),
                lifespan_count: Some(4),
                parameters: None,
            },
        ]),
        ..WebhookResponse::default()
    };

    let value = serialize_dialog(
        "sess1",
        DialogResponse {
            webhook_response: Some(webhook),
            contexts: vec![ActionContext::new("sess1/contexts/first", 8)
                .with_parameters(object(json!({"fresh": true})))],
            ..DialogResponse::default()
        },
    );

    assert_eq!(
        value["outputContexts"],
        json!([
            {
                "name": "sess1/contexts/first",
                "lifespanCount": 8,
                "parameters": {"fresh": true}
            },
            {
                "name": "sess1/contexts/second",
                "lifespanCount": 4
            }
        ])
    );
}

#[test]
fn test_namespaced_names_are_not_double_prefixed() {
    let value = serialize_dialog(
        "sess1",
        DialogResponse {
            contexts: vec![ActionContext::new("sess1/contexts/ready", 1)],
            ..DialogResponse::default()
        },
    );

    let contexts = value["outputContexts"].as_array().unwrap();
    assert_eq!(contexts.len(), 1);
    assert_eq!(contexts[0]["name"], "sess1/contexts/ready");
}

#[test]
fn test_assistant_payload_lands_under_google_key() {
    let mut source = DirectResponse::new(true);
    source.rich_response = Some(RichResponse {
        suggestions: Some(vec![Suggestion {
            title: "order again".to_string(),
        }]),
        ..speech_response("anything else?")
    });

    let value = serialize_dialog(
        "sess1",
        DialogResponse {
            assistant_response: Some(source),
            ..DialogResponse::default()
        },
    );

    let google = &value["payload"]["google"];
    assert_eq!(google["expectUserResponse"], true);
    assert_eq!(google["isSsml"], false);
    assert_eq!(
        google["richResponse"]["items"][0]["simpleResponse"]["textToSpeech"],
        "anything else?"
    );
    assert_eq!(google["richResponse"]["suggestions"][0]["title"], "order again");
}

#[test]
fn test_assistant_payload_replaces_existing_payload() {
    let mut payload = Map::new();
    payload.insert("facebook".to_string(), json!({"text": "hi"}));

    let value = serialize_dialog(
        "sess1",
        DialogResponse {
            webhook_response: Some(WebhookResponse {
                payload: Some(payload),
                ..WebhookResponse::default()
            }),
            assistant_response: Some(DirectResponse::new(false)),
            ..DialogResponse::default()
        },
    );

    let payload = value["payload"].as_object().unwrap();
    assert_eq!(payload.len(), 1);
    assert!(payload.contains_key("google"));
}

#[test]
fn test_helper_intent_surfaces_as_system_intent() {
    let mut source = DirectResponse::new(true);
    source.helper_intents = vec![ExpectedIntent::new("actions.intent.PERMISSION")
        .with_input_value_data(json!({
            "@type": "type.googleapis.com/google.actions.v2.PermissionValueSpec",
            "permissions": ["NAME"]
        }))];

    let value = serialize_dialog(
        "sess1",
        DialogResponse {
            assistant_response: Some(source),
            ..DialogResponse::default()
        },
    );

    let intent = &value["payload"]["google"]["systemIntent"];
    assert_eq!(intent["intent"], "actions.intent.PERMISSION");
    assert_eq!(intent["data"]["permissions"][0], "NAME");
    // The conversation-webhook spelling must not appear here
    assert!(intent.get("inputValueData").is_none());
}

#[test]
fn test_deep_app_response_extraction() {
    let app = AppResponse {
        expect_user_response: Some(true),
        expected_inputs: Some(vec![ExpectedInput {
            input_prompt: Some(InputPrompt {
                rich_initial_prompt: Some(speech_response("small or large?")),
                no_input_prompts: None,
            }),
            possible_intents: Some(vec![ExpectedIntent::new("actions.intent.OPTION")]),
            speech_biasing_hints: None,
        }]),
        ..AppResponse::default()
    };

    let value = serialize_dialog(
        "sess1",
        DialogResponse {
            assistant_response: Some(DirectResponse::from_app_response(app)),
            ..DialogResponse::default()
        },
    );

    let google = &value["payload"]["google"];
    assert_eq!(
        google["richResponse"]["items"][0]["simpleResponse"]["textToSpeech"],
        "small or large?"
    );
    assert_eq!(google["systemIntent"]["intent"], "actions.intent.OPTION");
}

#[test]
fn test_deep_app_response_with_no_inputs_stays_quiet() {
    let app = AppResponse {
        expect_user_response: Some(true),
        ..AppResponse::default()
    };

    let value = serialize_dialog(
        "sess1",
        DialogResponse {
            assistant_response: Some(DirectResponse::from_app_response(app)),
            ..DialogResponse::default()
        },
    );

    let google = value["payload"]["google"].as_object().unwrap();
    assert_eq!(google["expectUserResponse"], true);
    assert!(google.get("richResponse").is_none());
    assert!(google.get("systemIntent").is_none());
}

#[test]
fn test_user_storage_is_double_encoded_in_payload() {
    let mut source = DirectResponse::new(false);
    source.user_storage = Some(json!({"lastOrder": "margherita"}));

    let value = serialize_dialog(
        "sess1",
        DialogResponse {
            assistant_response: Some(source),
            ..DialogResponse::default()
        },
    );

    let storage = value["payload"]["google"]["userStorage"].as_str().unwrap();
    let parsed: Value = serde_json::from_str(storage).unwrap();
    assert_eq!(parsed, json!({"data": {"lastOrder": "margherita"}}));
}

#[test]
fn test_metadata_injected_when_enabled() {
    common::init_test_logging();
    let serializer =
        ResponseSerializer::with_config("sess1", SerializerConfig::with_library_metadata());
    let out = serializer
        .serialize(Response::Dialog(DialogResponse::default()))
        .unwrap();
    let value: Value = serde_json::from_str(&out).unwrap();

    let library = &value["metadata"]["google_library"];
    assert_eq!(library["name"], "actions");
    assert_eq!(library["language"], "rust");
    assert_eq!(library["version"], env!("CARGO_PKG_VERSION"));
    // The direct-format spelling must not appear on this surface
    assert!(value.get("ResponseMetadata").is_none());
}

#[test]
fn test_metadata_absent_by_default() {
    let value = serialize_dialog(
        "sess1",
        DialogResponse {
            conversation_data: Some(json!({"step": 1})),
            ..DialogResponse::default()
        },
    );
    assert!(value.get("metadata").is_none());
}

#[test]
fn test_full_dialog_response_combines_all_parts() {
    let mut source = DirectResponse::new(true);
    source.rich_response = Some(speech_response("what size?"));
    source.user_storage = Some(json!({"visits": 2}));

    let value = serialize_dialog(
        "sessions/abc",
        DialogResponse {
            webhook_response: Some(WebhookResponse {
                fulfillment_text: Some("what size?".to_string()),
                ..WebhookResponse::default()
            }),
            assistant_response: Some(source),
            conversation_data: Some(json!({"stage": "size"})),
            contexts: vec![ActionContext::new("await-size", 2)],
            ..DialogResponse::default()
        },
    );

    assert_eq!(value["fulfillmentText"], "what size?");
    assert_eq!(value["payload"]["google"]["expectUserResponse"], true);

    let contexts = value["outputContexts"].as_array().unwrap();
    assert_eq!(contexts.len(), 2);
    assert_eq!(
        contexts[0]["name"],
        "sessions/abc/contexts/_actions_on_google"
    );
    assert_eq!(contexts[1]["name"], "sessions/abc/contexts/await-size");
}
