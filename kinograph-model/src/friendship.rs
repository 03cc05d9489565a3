use serde::{Deserialize, Serialize};

/// Status of a directed friendship edge.
///
/// Edges are created `Unconfirmed` by a request and become `Confirmed` only
/// through explicit approval by the receiver. Cancellation deletes the edge
/// outright in either status, so there is no terminal state to model here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FriendshipStatus {
    Unconfirmed,
    Confirmed,
}

impl FriendshipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FriendshipStatus::Unconfirmed => "UNCONFIRMED",
            FriendshipStatus::Confirmed => "CONFIRMED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "UNCONFIRMED" => Some(FriendshipStatus::Unconfirmed),
            "CONFIRMED" => Some(FriendshipStatus::Confirmed),
            _ => None,
        }
    }
}

impl std::fmt::Display for FriendshipStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::FriendshipStatus;

    #[test]
    fn round_trips_through_storage_representation() {
        for status in [FriendshipStatus::Unconfirmed, FriendshipStatus::Confirmed] {
            assert_eq!(FriendshipStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(FriendshipStatus::parse("PENDING"), None);
    }
}
