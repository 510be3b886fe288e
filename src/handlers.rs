use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use teloxide::{prelude::*, RequestError};
use tokio::task::JoinSet;

use crate::config::Config;
use crate::game::{self, GameId, MessageContent, Phase, PlayerId};
use crate::game_manager::{local_game_manager::LocalGameManager, GameManager, Player};

pub mod game_handler;
pub mod main_menu_handler;

pub struct BotState<G: GameManager> {
    pub game_manager: G,
    pub config: Config,
}

pub type AsyncBotState = Arc<Mutex<BotState<LocalGameManager>>>;

pub fn new_async_bot_state(config: Config) -> AsyncBotState {
    Arc::new(Mutex::new(BotState {
        game_manager: LocalGameManager::new(),
        config,
    }))
}

pub fn lock(bot_state: &AsyncBotState) -> MutexGuard<'_, BotState<LocalGameManager>> {
    bot_state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A text waiting to be sent to one chat.
pub type Letter = (ChatId, String);

pub fn get_handler() -> Handler<
    'static,
    DependencyMap,
    Result<(), RequestError>,
    teloxide::dispatching::DpHandlerDescription,
> {
    Update::filter_message()
        .branch(main_menu_handler::get_main_menu_handler())
        .branch(game_handler::get_game_handler())
}

pub fn player_id(chat_id: ChatId) -> PlayerId {
    PlayerId(chat_id.0.to_string())
}

pub fn chat_id(player_id: &PlayerId) -> Option<ChatId> {
    player_id.as_str().parse().ok().map(ChatId)
}

pub fn player_from_message(msg: &Message) -> Player {
    Player {
        player_id: player_id(msg.chat.id),
        username: String::from(msg.chat.username().unwrap_or("(no name)")),
    }
}

pub fn usernames<G: GameManager + ?Sized>(
    manager: &G,
    game_id: GameId,
) -> crate::Result<HashMap<PlayerId, String>> {
    Ok(manager
        .list_players(game_id)?
        .into_iter()
        .map(|p| (p.player_id, p.username))
        .collect())
}

fn name<'a>(names: &'a HashMap<PlayerId, String>, player_id: &'a PlayerId) -> &'a str {
    names
        .get(player_id)
        .map(String::as_str)
        .unwrap_or(player_id.as_str())
}

fn name_list(names: &HashMap<PlayerId, String>, players: &[PlayerId]) -> String {
    players
        .iter()
        .map(|p| name(names, p))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Renders a game message for a human reader.
pub fn describe(message: &game::Message, names: &HashMap<PlayerId, String>) -> String {
    match &message.content {
        MessageContent::VoteDraw(ranking) => {
            let standings = ranking
                .iter()
                .map(|(p, votes)| format!("{} ({votes})", name(names, p)))
                .collect::<Vec<_>>()
                .join(", ");
            if standings.is_empty() {
                "Nobody was voted for. Nobody is executed today".to_string()
            } else {
                format!("The vote was a draw: {standings}. Nobody is executed today")
            }
        }
        MessageContent::Execution { player, votes } => {
            format!("{} was executed with {votes} votes", name(names, player))
        }
        MessageContent::Eliminations(players) => {
            format!("{} died last night", name_list(names, players))
        }
        MessageContent::Resurrections(players) => {
            format!("{} came back to life", name_list(names, players))
        }
        MessageContent::SeerSuccess(player) => {
            format!("The seer saw that {} is a killer", name(names, player))
        }
        MessageContent::SeerFailure(player) => {
            format!("The seer saw that {} is not a killer", name(names, player))
        }
        MessageContent::ExecutionerElected { player, votes } => format!(
            "{} was elected executioner with {votes} votes",
            name(names, player)
        ),
        MessageContent::GameOver { victors } => format!("The {victors} team won the game!"),
        MessageContent::RoleAssigned(role) => format!("You are the {role}"),
    }
}

/// One letter per recipient per message, in message order.
pub fn letters(messages: &[game::Message], names: &HashMap<PlayerId, String>) -> Vec<Letter> {
    let mut letters = Vec::new();
    for message in messages {
        let text = describe(message, names);
        for recipient in message.recipients.iter() {
            match chat_id(recipient) {
                Some(chat_id) => letters.push((chat_id, text.clone())),
                None => log::warn!("Cannot deliver to non-telegram player {recipient}"),
            }
        }
    }
    letters
}

/// Tells everybody in the game that the latest round has begun.
pub fn announce_round<G: GameManager + ?Sized>(manager: &G, game_id: GameId) -> crate::Result<Vec<Letter>> {
    let round = match manager.get_latest_round(game_id)? {
        Some(round) => round,
        None => return Ok(Vec::new()),
    };
    let text = match round.phase {
        Phase::Night => format!(
            "Night {} has begun. Use your ability with /vote <name or number>",
            round.number
        ),
        Phase::Day => format!(
            "Day {} has begun. Vote someone out with /vote <name or number>",
            round.number
        ),
    };

    Ok(round
        .players
        .iter()
        .chain(round.ghosts.iter())
        .filter_map(chat_id)
        .map(|chat_id| (chat_id, text.clone()))
        .collect())
}

pub async fn deliver(bot: &Bot, letters: Vec<Letter>) -> Result<(), RequestError> {
    let mut set = JoinSet::new();

    for (chat_id, text) in letters {
        let bot = bot.clone();
        set.spawn(async move { bot.send_message(chat_id, text).await });
    }

    let mut failure = None;
    while let Some(join_res) = set.join_next().await {
        match join_res {
            Ok(Ok(_)) => {}
            Ok(Err(err)) => {
                log::warn!("Failed to deliver message: {err}");
                failure.get_or_insert(err);
            }
            Err(err) => log::error!("Internal error: join error: {err}"),
        }
    }

    match failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{RoleType, Team};

    fn names() -> HashMap<PlayerId, String> {
        HashMap::from([
            (PlayerId::from("11"), "alice".to_string()),
            (PlayerId::from("22"), "bob".to_string()),
        ])
    }

    #[test]
    fn chat_ids_round_trip_through_player_ids() {
        assert_eq!(player_id(ChatId(-42)), PlayerId::from("-42"));
        assert_eq!(chat_id(&PlayerId::from("-42")), Some(ChatId(-42)));
        assert_eq!(chat_id(&PlayerId::from("p1")), None);
    }

    #[test]
    fn describes_messages_with_usernames() {
        let execution = game::Message::new(
            vec![PlayerId::from("11")],
            MessageContent::Execution {
                player: PlayerId::from("22"),
                votes: 3,
            },
        );
        assert_eq!(describe(&execution, &names()), "bob was executed with 3 votes");

        let eliminations = game::Message::new(
            vec![PlayerId::from("11")],
            MessageContent::Eliminations(vec![PlayerId::from("22"), PlayerId::from("33")]),
        );
        assert_eq!(describe(&eliminations, &names()), "bob, 33 died last night");

        let game_over = game::Message::new(
            vec![PlayerId::from("11")],
            MessageContent::GameOver { victors: Team::Bad },
        );
        assert_eq!(describe(&game_over, &names()), "The bad team won the game!");
    }

    #[test]
    fn writes_one_letter_per_recipient() {
        let messages = vec![
            game::Message::new(
                vec![PlayerId::from("22"), PlayerId::from("11")],
                MessageContent::SeerSuccess(PlayerId::from("11")),
            ),
            game::Message::new(
                vec![PlayerId::from("11")],
                MessageContent::RoleAssigned(RoleType::Seer),
            ),
        ];

        assert_eq!(
            letters(&messages, &names()),
            vec![
                (ChatId(11), "The seer saw that alice is a killer".to_string()),
                (ChatId(22), "The seer saw that alice is a killer".to_string()),
                (ChatId(11), "You are the Seer".to_string()),
            ]
        );
    }
}
