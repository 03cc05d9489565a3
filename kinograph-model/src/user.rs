use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ids::UserId;

/// A registered user.
///
/// `friends` is a read-only projection over the friendship graph: the ids of
/// every user this one has an outgoing edge to, regardless of confirmation
/// status. It is loaded by the store and never mutated through the entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub login: String,
    pub birthday: Option<NaiveDate>,
    #[serde(default)]
    pub friends: BTreeSet<UserId>,
}

/// Display-name defaulting applied at the create/update boundary: a blank
/// name falls back to the login.
pub fn normalized_name(name: Option<&str>, login: &str) -> String {
    match name {
        Some(name) if !name.trim().is_empty() => name.to_string(),
        _ => login.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::normalized_name;

    #[test]
    fn blank_name_falls_back_to_login() {
        assert_eq!(normalized_name(None, "neo"), "neo");
        assert_eq!(normalized_name(Some(""), "neo"), "neo");
        assert_eq!(normalized_name(Some("   "), "neo"), "neo");
    }

    #[test]
    fn explicit_name_is_kept() {
        assert_eq!(normalized_name(Some("Thomas"), "neo"), "Thomas");
    }
}
