use serde::{Deserialize, Serialize};

/// Opaque, stable identifier of a player within a game.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        PlayerId(id.to_string())
    }
}

impl PlayerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug, derive_more::Display)]
pub struct GameId(pub i32);
