//! Dialog contexts as the application sees them, before session namespacing.

use serde_json::{Map, Value};

/// Context name reserved for carrying conversation data between turns.
pub const APP_DATA_CONTEXT: &str = "_actions_on_google";

/// Lifespan of the conversation-data context, in turns. High enough to
/// outlive any realistic dialog.
pub const APP_DATA_CONTEXT_LIFESPAN: u32 = 99;

/// A context to set on the dialog session. The name may be bare
/// (`"pick-topping"`) or already namespaced
/// (`"<sessionId>/contexts/pick-topping"`); bare names are namespaced when
/// the context is appended during serialization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionContext {
    pub name: String,

    /// Turns the context stays active once set
    pub lifespan_turns: u32,

    pub parameters: Map<String, Value>,
}

impl ActionContext {
    pub fn new(name: impl Into<String>, lifespan_turns: u32) -> Self {
        Self {
            name: name.into(),
            lifespan_turns,
            parameters: Map::new(),
        }
    }

    pub fn with_parameters(mut self, parameters: Map<String, Value>) -> Self {
        self.parameters = parameters;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_has_empty_parameters() {
        let context = ActionContext::new("pick-topping", 2);
        assert_eq!(context.name, "pick-topping");
        assert_eq!(context.lifespan_turns, 2);
        assert!(context.parameters.is_empty());
    }

    #[test]
    fn test_with_parameters() {
        let mut parameters = Map::new();
        parameters.insert("topping".to_string(), json!("olives"));
        let context = ActionContext::new("pick-topping", 2).with_parameters(parameters);
        assert_eq!(context.parameters["topping"], "olives");
    }

    #[test]
    fn test_app_data_constants() {
        assert_eq!(APP_DATA_CONTEXT, "_actions_on_google");
        assert_eq!(APP_DATA_CONTEXT_LIFESPAN, 99);
    }
}
