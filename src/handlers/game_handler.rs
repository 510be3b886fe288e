use rand::Rng;
use teloxide::{prelude::*, utils::command::BotCommands};

use super::{announce_round, deliver, letters, lock, player_id, usernames, AsyncBotState, Letter};
use crate::config::Config;
use crate::error::{GameError, Result};
use crate::game::{GameId, PlayerId};
use crate::game_manager::{cast_vote, start_game, GameManager};

/*
1. Check player is in a game
2. Run the command against the game manager while holding the lock
3. Send the reply, then deliver every produced message
 */

pub fn get_game_handler() -> Handler<
    'static,
    DependencyMap,
    std::result::Result<(), teloxide::RequestError>,
    teloxide::dispatching::DpHandlerDescription,
> {
    dptree::filter(|msg: Message, bot_state: AsyncBotState| {
        lock(&bot_state)
            .game_manager
            .get_player_game(&player_id(msg.chat.id))
            .is_some()
    })
    .filter_command::<GameCommand>()
    .endpoint(game_handler)
}

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "Game commands")]
enum GameCommand {
    #[command(description = "Shows this message.")]
    Help,
    #[command(description = "List players in the game")]
    Players,
    #[command(description = "Leave the game before it starts")]
    Quit,
    #[command(description = "Start the game (host only)")]
    Start,
    #[command(description = "Vote for a player by name or number")]
    Vote { target: String },
    #[command(description = "Show every message you can read")]
    Messages,
}

/// What a command produced: the reply to the caller and the letters for
/// everybody else.
#[derive(Debug, PartialEq)]
struct Outcome {
    reply: String,
    letters: Vec<Letter>,
}

impl Outcome {
    fn reply(reply: impl Into<String>) -> Outcome {
        Outcome {
            reply: reply.into(),
            letters: Vec::new(),
        }
    }
}

async fn game_handler(
    bot_state: AsyncBotState,
    bot: Bot,
    msg: Message,
    cmd: GameCommand,
) -> std::result::Result<(), teloxide::RequestError> {
    let outcome = {
        let mut state_lock = lock(&bot_state);
        let state = &mut *state_lock;
        let mut rng = rand::thread_rng();
        handle_game_command(
            &mut state.game_manager,
            &state.config,
            &player_id(msg.chat.id),
            cmd,
            &mut rng,
        )
    };

    bot.send_message(msg.chat.id, outcome.reply).await?;
    deliver(&bot, outcome.letters).await
}

fn handle_game_command<G, R>(
    game_manager: &mut G,
    config: &Config,
    caller: &PlayerId,
    cmd: GameCommand,
    rng: &mut R,
) -> Outcome
where
    G: GameManager,
    R: Rng + ?Sized,
{
    let game_id = match game_manager.get_player_game(caller) {
        Some(game_id) => game_id,
        None => return Outcome::reply(GameError::NotInGame(caller.clone()).to_string()),
    };

    let result = match cmd {
        GameCommand::Help => Ok(Outcome::reply(GameCommand::descriptions().to_string())),
        GameCommand::Players => list_players(game_manager, game_id).map(Outcome::reply),
        GameCommand::Quit => game_manager
            .quit_game(caller)
            .map(|game_id| Outcome::reply(format!("Quit game #{}", game_id))),
        GameCommand::Start => start(game_manager, config, game_id, caller, rng),
        GameCommand::Vote { target } => vote(game_manager, game_id, caller, &target),
        GameCommand::Messages => read_messages(game_manager, game_id, caller).map(Outcome::reply),
    };

    result.unwrap_or_else(|err| Outcome::reply(format!("Encountered error: {}", err)))
}

fn list_players<G: GameManager>(game_manager: &G, game_id: GameId) -> Result<String> {
    let host_id = game_manager.get_host(game_id)?;
    let round = game_manager.get_latest_round(game_id)?;

    Ok(game_manager
        .list_players(game_id)?
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let mut line = format!("{}. {}", i + 1, p.username);
            if p.player_id == host_id {
                line.push_str(" (host)");
            }
            if matches!(&round, Some(r) if r.ghosts.contains(&p.player_id)) {
                line.push_str(" (ghost)");
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n"))
}

fn start<G, R>(
    game_manager: &mut G,
    config: &Config,
    game_id: GameId,
    caller: &PlayerId,
    rng: &mut R,
) -> Result<Outcome>
where
    G: GameManager,
    R: Rng + ?Sized,
{
    if &game_manager.get_host(game_id)? != caller {
        return Err(GameError::NotHost(caller.clone()));
    }

    let messages = start_game(game_manager, game_id, &config.role_group, rng)?;
    let names = usernames(game_manager, game_id)?;

    let mut outgoing = letters(&messages, &names);
    outgoing.extend(announce_round(game_manager, game_id)?);
    Ok(Outcome {
        reply: format!("Started game #{}", game_id),
        letters: outgoing,
    })
}

/// Finds a player by their number in `/players`, or else by username.
fn find_target<G: GameManager>(game_manager: &G, game_id: GameId, target: &str) -> Result<PlayerId> {
    let target = target.trim().trim_start_matches('@');
    let players = game_manager.list_players(game_id)?;

    if let Some(p) = target
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| players.get(i))
    {
        return Ok(p.player_id.clone());
    }

    let mut named = players
        .iter()
        .filter(|p| p.username.eq_ignore_ascii_case(target));
    match (named.next(), named.next()) {
        (Some(p), None) => Ok(p.player_id.clone()),
        (Some(_), Some(_)) => Err(GameError::AmbiguousName(target.to_string())),
        (None, _) => Err(GameError::UnknownPlayer(PlayerId(target.to_string()))),
    }
}

fn vote<G: GameManager>(
    game_manager: &mut G,
    game_id: GameId,
    caller: &PlayerId,
    target: &str,
) -> Result<Outcome> {
    let nominee = find_target(game_manager, game_id, target)?;
    let names = usernames(game_manager, game_id)?;
    let nominee_name = names
        .get(&nominee)
        .cloned()
        .unwrap_or_else(|| nominee.to_string());

    match cast_vote(game_manager, game_id, caller, &nominee)? {
        None => Ok(Outcome::reply(format!("Voted for {}", nominee_name))),
        Some(result) => {
            let mut outgoing = letters(&result.messages, &names);
            if !result.is_game_over {
                outgoing.extend(announce_round(game_manager, game_id)?);
            }
            Ok(Outcome {
                reply: format!("Voted for {}. That was the last vote", nominee_name),
                letters: outgoing,
            })
        }
    }
}

fn read_messages<G: GameManager>(
    game_manager: &G,
    game_id: GameId,
    caller: &PlayerId,
) -> Result<String> {
    let names = usernames(game_manager, game_id)?;
    let messages = game_manager.get_messages(game_id, caller)?;
    if messages.is_empty() {
        return Ok(String::from("No messages yet"));
    }

    Ok(messages
        .iter()
        .map(|m| super::describe(m, &names))
        .collect::<Vec<_>>()
        .join("\n"))
}
