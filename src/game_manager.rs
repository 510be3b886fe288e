use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{GameError, Result};
use crate::game::{
    self, distribute_roles, GameId, Message, MessageContent, Phase, PlayerId, RoleGroup, RoleType,
    RoundInput, RoundResult, Team,
};

pub mod local_game_manager;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub player_id: PlayerId,
    pub username: String,
}

/// Stored at the start of every phase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub phase: Phase,
    pub number: u32,
    pub players: Vec<PlayerId>,
    pub ghosts: Vec<PlayerId>,
}

/// Storage behind a running game. Writes are keyed by player id or round
/// number, so repeating one overwrites instead of duplicating.
pub trait GameManager {
    fn create_game(&mut self, host: Player) -> Result<GameId>;

    fn join_game(&mut self, game_id: GameId, player: Player) -> Result<()>;

    // If the host quits, the next player to have joined becomes the host
    fn quit_game(&mut self, player_id: &PlayerId) -> Result<GameId>;

    fn get_player_game(&self, player_id: &PlayerId) -> Option<GameId>;

    fn get_host(&self, game_id: GameId) -> Result<PlayerId>;

    /// Players in the order they joined.
    fn list_players(&self, game_id: GameId) -> Result<Vec<Player>>;

    fn list_player_ids(&self, game_id: GameId) -> Result<Vec<PlayerId>> {
        Ok(self
            .list_players(game_id)?
            .into_iter()
            .map(|p| p.player_id)
            .collect())
    }

    /// Stops new players from joining.
    fn close_game(&mut self, game_id: GameId) -> Result<()>;

    /// Drops a finished game. Its players are free to host or join another.
    fn end_game(&mut self, game_id: GameId, victors: Team) -> Result<()>;

    fn add_role(&mut self, game_id: GameId, player_id: &PlayerId, role: RoleType) -> Result<()>;

    fn get_roles(&self, game_id: GameId) -> Result<HashMap<PlayerId, RoleType>>;

    fn add_round(&mut self, game_id: GameId, round: RoundRecord) -> Result<()>;

    fn get_latest_round(&self, game_id: GameId) -> Result<Option<RoundRecord>>;

    /// Replaces any earlier vote by the same player.
    fn add_vote(
        &mut self,
        game_id: GameId,
        voter: &PlayerId,
        round_number: u32,
        nominee: &PlayerId,
    ) -> Result<()>;

    fn get_votes(&self, game_id: GameId, round_number: u32) -> Result<HashMap<PlayerId, PlayerId>>;

    fn add_messages(&mut self, game_id: GameId, messages: &[Message]) -> Result<()>;

    /// Messages the player is allowed to read, oldest first.
    fn get_messages(&self, game_id: GameId, player_id: &PlayerId) -> Result<Vec<Message>>;
}

/// Closes the game, deals the roles and opens the first night.
///
/// Returns the role announcements, one per player.
pub fn start_game<G, R>(
    manager: &mut G,
    game_id: GameId,
    group: &RoleGroup,
    rng: &mut R,
) -> Result<Vec<Message>>
where
    G: GameManager + ?Sized,
    R: Rng + ?Sized,
{
    if manager.get_latest_round(game_id)?.is_some() {
        return Err(GameError::GameStarted(game_id));
    }

    let players = manager.list_player_ids(game_id)?;
    let dealt = distribute_roles(&players, group, rng)?;

    manager.close_game(game_id)?;

    let mut messages = Vec::with_capacity(dealt.len());
    for (player_id, role) in dealt {
        manager.add_role(game_id, &player_id, role)?;
        messages.push(Message::new(
            vec![player_id],
            MessageContent::RoleAssigned(role),
        ));
    }
    manager.add_messages(game_id, &messages)?;

    manager.add_round(
        game_id,
        RoundRecord {
            phase: Phase::Night,
            number: 0,
            players,
            ghosts: Vec::new(),
        },
    )?;
    info!("Started game #{game_id} with {} players", messages.len());

    Ok(messages)
}

/// Records a vote. The vote that completes the round resolves it, stores the
/// messages and opens the next phase unless the game is over.
pub fn cast_vote<G>(
    manager: &mut G,
    game_id: GameId,
    voter: &PlayerId,
    nominee: &PlayerId,
) -> Result<Option<RoundResult>>
where
    G: GameManager + ?Sized,
{
    let round = manager
        .get_latest_round(game_id)?
        .ok_or(GameError::NoRound(game_id))?;
    if !round.players.contains(voter) {
        return Err(GameError::NotAllowedToVote(voter.clone()));
    }
    if !round.players.contains(nominee) && !round.ghosts.contains(nominee) {
        return Err(GameError::UnknownPlayer(nominee.clone()));
    }

    manager.add_vote(game_id, voter, round.number, nominee)?;

    let votes = manager.get_votes(game_id, round.number)?;
    debug!(
        "game #{game_id} round {}: {}/{} votes",
        round.number,
        votes.len(),
        round.players.len()
    );
    if votes.len() < round.players.len() {
        return Ok(None);
    }

    let input = RoundInput {
        players: round.players.iter().cloned().collect(),
        ghosts: round.ghosts.iter().cloned().collect(),
        votes,
        roles: manager.get_roles(game_id)?,
    };
    let result = game::resolve(round.phase, &input)?;

    manager.add_messages(game_id, &result.messages)?;
    match result.winning_team {
        Some(victors) => {
            info!("Game #{game_id} won by the {victors} team");
            manager.end_game(game_id, victors)?;
        }
        None => manager.add_round(
            game_id,
            RoundRecord {
                phase: round.phase.next(),
                number: round.number + 1,
                players: result.players.clone(),
                ghosts: result.ghosts.clone(),
            },
        )?,
    }

    Ok(Some(result))
}
