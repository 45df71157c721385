use crate::types::UserId;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserKind {
    Person { email: Option<String> },
    Bot,
    Unknown(String),
}

/// A workspace member or integration.
///
/// References sent in requests (mentions, people values) carry only the id;
/// `kind` stays `None` until the API fills it in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "UserWire", into = "UserWire")]
pub struct User {
    pub id: UserId,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub kind: Option<UserKind>,
}

impl User {
    pub fn reference(id: UserId) -> Self {
        Self {
            id,
            name: None,
            avatar_url: None,
            kind: None,
        }
    }

    pub fn email(&self) -> Option<&str> {
        match &self.kind {
            Some(UserKind::Person { email }) => email.as_deref(),
            _ => None,
        }
    }

    pub fn is_bot(&self) -> bool {
        matches!(self.kind, Some(UserKind::Bot))
    }
}

/// Wire form: a bare `{object, id}` reference unless more is known.
#[derive(Serialize, Deserialize)]
struct UserWire {
    #[serde(default = "user_object")]
    object: String,
    id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    avatar_url: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    type_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    person: Option<Person>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bot: Option<Value>,
}

#[derive(Serialize, Deserialize)]
struct Person {
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
}

fn user_object() -> String {
    "user".to_string()
}

impl From<UserWire> for User {
    fn from(wire: UserWire) -> Self {
        let kind = wire.type_name.map(|type_name| match type_name.as_str() {
            "person" => UserKind::Person {
                email: wire.person.and_then(|person| person.email),
            },
            "bot" => UserKind::Bot,
            other => UserKind::Unknown(crate::codec::unknown_tag("user", other)),
        });
        User {
            id: wire.id,
            name: wire.name,
            avatar_url: wire.avatar_url,
            kind,
        }
    }
}

impl From<User> for UserWire {
    fn from(user: User) -> Self {
        let (type_name, person, bot) = match user.kind {
            None => (None, None, None),
            Some(UserKind::Person { email }) => {
                (Some("person".to_string()), Some(Person { email }), None)
            }
            Some(UserKind::Bot) => (Some("bot".to_string()), None, Some(json!({}))),
            Some(UserKind::Unknown(type_name)) => (Some(type_name), None, None),
        };
        UserWire {
            object: user_object(),
            id: user.id,
            name: user.name,
            avatar_url: user.avatar_url,
            type_name,
            person,
            bot,
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.name, self.email()) {
            (Some(name), _) => write!(f, "{}", name),
            (None, Some(email)) => write!(f, "{}", email),
            (None, None) => write!(f, "User {}", self.id),
        }
    }
}
