use serde::{Deserialize, Serialize};

use super::{PlayerId, RoleType, Team};

/// Nominees paired with the number of votes they received, most votes first.
pub type Ranking = Vec<(PlayerId, usize)>;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, derive_more::Display)]
pub enum MessageType {
    #[display(fmt = "vote-draw")]
    VoteDraw,
    #[display(fmt = "execution")]
    Execution,
    #[display(fmt = "eliminations")]
    Eliminations,
    #[display(fmt = "resurections")]
    Resurrections,
    #[display(fmt = "seer-success")]
    SeerSuccess,
    #[display(fmt = "seer-failure")]
    SeerFailure,
    #[display(fmt = "executioner-elected")]
    ExecutionerElected,
    #[display(fmt = "game-over")]
    GameOver,
    #[display(fmt = "role-assigned")]
    RoleAssigned,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "kebab-case")]
pub enum MessageContent {
    VoteDraw(Ranking),
    Execution { player: PlayerId, votes: usize },
    Eliminations(Vec<PlayerId>),
    #[serde(rename = "resurections")]
    Resurrections(Vec<PlayerId>),
    SeerSuccess(PlayerId),
    SeerFailure(PlayerId),
    ExecutionerElected { player: PlayerId, votes: usize },
    GameOver { victors: Team },
    RoleAssigned(RoleType),
}

impl MessageContent {
    pub fn message_type(&self) -> MessageType {
        match self {
            MessageContent::VoteDraw(_) => MessageType::VoteDraw,
            MessageContent::Execution { .. } => MessageType::Execution,
            MessageContent::Eliminations(_) => MessageType::Eliminations,
            MessageContent::Resurrections(_) => MessageType::Resurrections,
            MessageContent::SeerSuccess(_) => MessageType::SeerSuccess,
            MessageContent::SeerFailure(_) => MessageType::SeerFailure,
            MessageContent::ExecutionerElected { .. } => MessageType::ExecutionerElected,
            MessageContent::GameOver { .. } => MessageType::GameOver,
            MessageContent::RoleAssigned(_) => MessageType::RoleAssigned,
        }
    }
}

/// A notification and the players allowed to read it. Recipients are kept in
/// ascending order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub recipients: Vec<PlayerId>,
    #[serde(flatten)]
    pub content: MessageContent,
}

impl Message {
    pub fn new(recipients: impl IntoIterator<Item = PlayerId>, content: MessageContent) -> Self {
        let mut recipients = recipients.into_iter().collect::<Vec<_>>();
        recipients.sort();
        recipients.dedup();
        Message {
            recipients,
            content,
        }
    }

    pub fn message_type(&self) -> MessageType {
        self.content.message_type()
    }

    pub fn is_visible_to(&self, player: &PlayerId) -> bool {
        self.recipients.binary_search(player).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_type_next_to_recipients() {
        let message = Message::new(
            vec![PlayerId::from("p2"), PlayerId::from("p1")],
            MessageContent::Execution {
                player: PlayerId::from("p2"),
                votes: 3,
            },
        );

        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(
            value,
            json!({
                "recipients": ["p1", "p2"],
                "type": "execution",
                "content": {"player": "p2", "votes": 3},
            })
        );
    }

    #[test]
    fn resurrections_keep_their_wire_spelling() {
        let content = MessageContent::Resurrections(vec![PlayerId::from("p3")]);
        let value = serde_json::to_value(&content).unwrap();
        assert_eq!(value, json!({"type": "resurections", "content": ["p3"]}));
        assert_eq!(content.message_type().to_string(), "resurections");
    }

    #[test]
    fn visibility_follows_recipients() {
        let message = Message::new(
            vec![PlayerId::from("p3"), PlayerId::from("p1")],
            MessageContent::SeerFailure(PlayerId::from("p2")),
        );
        assert!(message.is_visible_to(&PlayerId::from("p1")));
        assert!(!message.is_visible_to(&PlayerId::from("p2")));
    }
}
