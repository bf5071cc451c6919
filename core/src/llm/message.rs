//! Message types for generative model conversations.
//!
//! A conversation is an ordered list of [`Message`]s, each tagged with the [`Role`] of its
//! author. [`Prompt`] is the flexible input form accepted by high-level APIs: a bare
//! string (treated as a single user message) or a full message list.

use alloc::{string::String, vec, vec::Vec};

/// Conversation participant role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Role {
    /// User message - input from a human user.
    User,
    /// Assistant message - responses from the model.
    Assistant,
    /// System message - context/instructions for the model.
    System,
}

/// A message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Message {
    /// Who authored the message.
    pub role: Role,
    /// Text content of the message.
    pub content: String,
}

impl Message {
    /// Creates a message with an explicit role.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Creates a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Creates a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Creates a new system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }
}

/// Input accepted by conversation-driven APIs.
///
/// Callers pass either a bare string or an explicit message list; conversions exist for
/// both so APIs can take `impl Into<Prompt>`:
///
/// ```rust
/// use mneme_core::{Message, Prompt};
///
/// let from_text: Prompt = "What is an aqueduct?".into();
/// let from_messages: Prompt = vec![
///     Message::system("Answer briefly."),
///     Message::user("What is an aqueduct?"),
/// ]
/// .into();
///
/// assert_eq!(from_text.into_messages().len(), 1);
/// assert_eq!(from_messages.into_messages().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    /// A bare string, interpreted as a single user message.
    Text(String),
    /// An explicit conversation.
    Messages(Vec<Message>),
}

impl Prompt {
    /// Normalizes the prompt into a message list.
    ///
    /// A bare string becomes one user message. An empty string produces an empty list, so
    /// "nothing to say" collapses to the same shape in both input forms.
    #[must_use]
    pub fn into_messages(self) -> Vec<Message> {
        match self {
            Self::Text(text) => {
                if text.is_empty() {
                    Vec::new()
                } else {
                    vec![Message::user(text)]
                }
            }
            Self::Messages(messages) => messages,
        }
    }
}

impl From<&str> for Prompt {
    fn from(text: &str) -> Self {
        Self::Text(String::from(text))
    }
}

impl From<String> for Prompt {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Vec<Message>> for Prompt {
    fn from(messages: Vec<Message>) -> Self {
        Self::Messages(messages)
    }
}

impl From<Message> for Prompt {
    fn from(message: Message) -> Self {
        Self::Messages(vec![message])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_equality() {
        assert_eq!(Role::User, Role::User);
        assert_eq!(Role::Assistant, Role::Assistant);
        assert_eq!(Role::System, Role::System);
        assert_ne!(Role::User, Role::Assistant);
    }

    #[test]
    fn message_creation() {
        let user = Message::user("Hello");
        assert_eq!(user.role, Role::User);
        assert_eq!(user.content, "Hello");

        let assistant = Message::assistant("Hi there!");
        assert_eq!(assistant.role, Role::Assistant);
        assert_eq!(assistant.content, "Hi there!");

        let system = Message::system("Be helpful");
        assert_eq!(system.role, Role::System);
        assert_eq!(system.content, "Be helpful");
    }

    #[test]
    fn prompt_from_text_is_one_user_message() {
        let prompt: Prompt = "What is the capital of France?".into();
        let messages = prompt.into_messages();

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[0].content, "What is the capital of France?");
    }

    #[test]
    fn prompt_from_empty_text_is_empty() {
        let prompt: Prompt = "".into();
        assert!(prompt.into_messages().is_empty());
    }

    #[test]
    fn prompt_from_messages_keeps_order() {
        let prompt: Prompt = vec![Message::system("sys"), Message::user("usr")].into();
        let messages = prompt.into_messages();

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].role, Role::User);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn message_serde_round_trip() {
        let message = Message::user("ping");
        let json = serde_json::to_string(&message).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"ping"}"#);

        let back: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(back, message);
    }
}
