//! Wire-format types for the two serialization targets.
//!
//! `dialogflow` carries the Dialogflow v2 webhook response shape;
//! `conversation` carries the conversation-webhook `AppResponse` shape sent
//! directly to the Assistant platform. Both are plain serde models; all
//! mapping logic lives in [`crate::serializer`].

pub mod conversation;
pub mod dialogflow;
