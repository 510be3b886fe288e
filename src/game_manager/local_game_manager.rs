use log::debug;
use rand::Rng;
use std::collections::{BTreeMap, HashMap};

use super::{GameManager, Player, RoundRecord};
use crate::error::{GameError, Result};
use crate::game::{GameId, Message, PlayerId, RoleType, Team};

struct VoteRecord {
    nominee: PlayerId,
    round_number: u32,
}

struct GameRecord {
    host: PlayerId,
    players: Vec<Player>,
    is_open: bool,
    roles: HashMap<PlayerId, RoleType>,
    rounds: BTreeMap<u32, RoundRecord>,
    votes: HashMap<PlayerId, VoteRecord>,
    messages: Vec<Message>,
}

/// Keeps every game in memory.
#[derive(Default)]
pub struct LocalGameManager {
    games: HashMap<GameId, GameRecord>,
    player_map: HashMap<PlayerId, GameId>,
}

impl LocalGameManager {
    pub fn new() -> LocalGameManager {
        LocalGameManager::default()
    }

    fn game(&self, game_id: GameId) -> Result<&GameRecord> {
        self.games
            .get(&game_id)
            .ok_or(GameError::GameNotFound(game_id))
    }

    fn game_mut(&mut self, game_id: GameId) -> Result<&mut GameRecord> {
        self.games
            .get_mut(&game_id)
            .ok_or(GameError::GameNotFound(game_id))
    }
}

impl GameManager for LocalGameManager {
    fn create_game(&mut self, host: Player) -> Result<GameId> {
        if self.player_map.contains_key(&host.player_id) {
            return Err(GameError::AlreadyInGame(host.player_id));
        }

        let mut rng = rand::thread_rng();
        let mut game_id = GameId(rng.gen_range(1_000..10_000));
        while self.games.contains_key(&game_id) {
            game_id = GameId(rng.gen_range(1_000..10_000));
        }

        self.player_map.insert(host.player_id.clone(), game_id);
        self.games.insert(
            game_id,
            GameRecord {
                host: host.player_id.clone(),
                players: vec![host],
                is_open: true,
                roles: HashMap::new(),
                rounds: BTreeMap::new(),
                votes: HashMap::new(),
                messages: Vec::new(),
            },
        );

        Ok(game_id)
    }

    fn join_game(&mut self, game_id: GameId, player: Player) -> Result<()> {
        if self.player_map.contains_key(&player.player_id) {
            return Err(GameError::AlreadyInGame(player.player_id));
        }

        let game = self.game_mut(game_id)?;
        if !game.is_open {
            return Err(GameError::GameClosed(game_id));
        }
        let player_id = player.player_id.clone();
        game.players.push(player);
        self.player_map.insert(player_id, game_id);
        Ok(())
    }

    fn quit_game(&mut self, player_id: &PlayerId) -> Result<GameId> {
        let game_id = *self
            .player_map
            .get(player_id)
            .ok_or_else(|| GameError::NotInGame(player_id.clone()))?;

        let game = self.game_mut(game_id)?;
        if !game.is_open {
            return Err(GameError::GameStarted(game_id));
        }
        game.players.retain(|p| &p.player_id != player_id);
        match game.players.first().map(|p| p.player_id.clone()) {
            Some(next) => {
                if &game.host == player_id {
                    game.host = next;
                }
            }
            None => {
                self.games.remove(&game_id);
            }
        }

        self.player_map.remove(player_id);
        Ok(game_id)
    }

    fn get_player_game(&self, player_id: &PlayerId) -> Option<GameId> {
        self.player_map.get(player_id).copied()
    }

    fn get_host(&self, game_id: GameId) -> Result<PlayerId> {
        Ok(self.game(game_id)?.host.clone())
    }

    fn list_players(&self, game_id: GameId) -> Result<Vec<Player>> {
        Ok(self.game(game_id)?.players.clone())
    }

    fn close_game(&mut self, game_id: GameId) -> Result<()> {
        self.game_mut(game_id)?.is_open = false;
        Ok(())
    }

    fn end_game(&mut self, game_id: GameId, victors: Team) -> Result<()> {
        let game = self
            .games
            .remove(&game_id)
            .ok_or(GameError::GameNotFound(game_id))?;
        for player in game.players.iter() {
            self.player_map.remove(&player.player_id);
        }
        debug!(
            "game #{game_id} won by the {victors} team, freed {} players",
            game.players.len()
        );
        Ok(())
    }

    fn add_role(&mut self, game_id: GameId, player_id: &PlayerId, role: RoleType) -> Result<()> {
        self.game_mut(game_id)?
            .roles
            .insert(player_id.clone(), role);
        Ok(())
    }

    fn get_roles(&self, game_id: GameId) -> Result<HashMap<PlayerId, RoleType>> {
        Ok(self.game(game_id)?.roles.clone())
    }

    fn add_round(&mut self, game_id: GameId, round: RoundRecord) -> Result<()> {
        self.game_mut(game_id)?.rounds.insert(round.number, round);
        Ok(())
    }

    fn get_latest_round(&self, game_id: GameId) -> Result<Option<RoundRecord>> {
        Ok(self
            .game(game_id)?
            .rounds
            .values()
            .next_back()
            .cloned())
    }

    fn add_vote(
        &mut self,
        game_id: GameId,
        voter: &PlayerId,
        round_number: u32,
        nominee: &PlayerId,
    ) -> Result<()> {
        self.game_mut(game_id)?.votes.insert(
            voter.clone(),
            VoteRecord {
                nominee: nominee.clone(),
                round_number,
            },
        );
        Ok(())
    }

    fn get_votes(&self, game_id: GameId, round_number: u32) -> Result<HashMap<PlayerId, PlayerId>> {
        Ok(self
            .game(game_id)?
            .votes
            .iter()
            .filter(|(_, v)| v.round_number == round_number)
            .map(|(voter, v)| (voter.clone(), v.nominee.clone()))
            .collect())
    }

    fn add_messages(&mut self, game_id: GameId, messages: &[Message]) -> Result<()> {
        self.game_mut(game_id)?
            .messages
            .extend(messages.iter().cloned());
        Ok(())
    }

    fn get_messages(&self, game_id: GameId, player_id: &PlayerId) -> Result<Vec<Message>> {
        Ok(self
            .game(game_id)?
            .messages
            .iter()
            .filter(|m| m.is_visible_to(player_id))
            .cloned()
            .collect())
    }
}
