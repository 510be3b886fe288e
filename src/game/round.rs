use log::debug;
use std::collections::{BTreeSet, HashMap};

use super::{Message, MessageContent, PlayerId, RoleType, Team};
use crate::error::{GameError, Result};

/// Everything a phase needs to resolve: who is alive, who is a ghost, the
/// votes cast this phase and the secret role of every player.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoundInput {
    pub players: BTreeSet<PlayerId>,
    pub ghosts: BTreeSet<PlayerId>,
    pub votes: HashMap<PlayerId, PlayerId>,
    pub roles: HashMap<PlayerId, RoleType>,
}

impl RoundInput {
    pub fn new<P, G>(players: P, ghosts: G) -> Self
    where
        P: IntoIterator,
        P::Item: Into<PlayerId>,
        G: IntoIterator,
        G::Item: Into<PlayerId>,
    {
        RoundInput {
            players: players.into_iter().map(Into::into).collect(),
            ghosts: ghosts.into_iter().map(Into::into).collect(),
            votes: HashMap::new(),
            roles: HashMap::new(),
        }
    }

    pub fn with_vote(mut self, voter: impl Into<PlayerId>, nominee: impl Into<PlayerId>) -> Self {
        self.votes.insert(voter.into(), nominee.into());
        self
    }

    pub fn with_role(mut self, player: impl Into<PlayerId>, role: RoleType) -> Self {
        self.roles.insert(player.into(), role);
        self
    }

    pub fn is_known(&self, player: &PlayerId) -> bool {
        self.players.contains(player) || self.ghosts.contains(player)
    }

    pub fn role(&self, player: &PlayerId) -> Result<RoleType> {
        self.roles
            .get(player)
            .copied()
            .ok_or_else(|| GameError::MissingRole(player.clone()))
    }

    /// The vote recorded for a player this phase, if any.
    pub fn vote(&self, voter: &PlayerId) -> Option<&PlayerId> {
        self.votes.get(voter)
    }

    /// Rejects inputs that would make resolution meaningless. Runs before any
    /// state is touched.
    pub fn validate(&self) -> Result<()> {
        if let Some(player) = self.players.intersection(&self.ghosts).next() {
            return Err(GameError::DuplicatePlayer(player.clone()));
        }
        for player in self.players.iter() {
            self.role(player)?;
        }
        for (voter, nominee) in self.votes.iter() {
            if !self.is_known(voter) {
                return Err(GameError::UnknownPlayer(voter.clone()));
            }
            if !self.is_known(nominee) {
                return Err(GameError::UnknownPlayer(nominee.clone()));
            }
        }
        Ok(())
    }
}

/// State threaded through every resolution step. Each step consumes the state
/// and hands back the next one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoundState {
    players: BTreeSet<PlayerId>,
    ghosts: BTreeSet<PlayerId>,
    eliminated: Vec<PlayerId>,
    resurrected: Vec<PlayerId>,
    messages: Vec<Message>,
}

impl RoundState {
    pub fn new(players: &BTreeSet<PlayerId>, ghosts: &BTreeSet<PlayerId>) -> Self {
        RoundState {
            players: players.clone(),
            ghosts: ghosts.clone(),
            ..RoundState::default()
        }
    }

    pub fn players(&self) -> &BTreeSet<PlayerId> {
        &self.players
    }

    pub fn ghosts(&self) -> &BTreeSet<PlayerId> {
        &self.ghosts
    }

    pub fn eliminated(&self) -> &[PlayerId] {
        &self.eliminated
    }

    pub fn resurrected(&self) -> &[PlayerId] {
        &self.resurrected
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Moves a living player to the ghosts. Cancels an earlier resurrection of
    /// the same player. Does nothing to ghosts.
    pub fn eliminate(mut self, player: &PlayerId) -> Self {
        if !self.players.remove(player) {
            return self;
        }
        debug!("eliminating {player}");
        self.ghosts.insert(player.clone());
        self.resurrected.retain(|p| p != player);
        self.eliminated.push(player.clone());
        self
    }

    /// Moves a ghost back to the living. Cancels an earlier elimination of the
    /// same player. Does nothing to living players.
    pub fn resurrect(mut self, player: &PlayerId) -> Self {
        if !self.ghosts.remove(player) {
            return self;
        }
        debug!("resurrecting {player}");
        self.players.insert(player.clone());
        self.eliminated.retain(|p| p != player);
        self.resurrected.push(player.clone());
        self
    }

    /// Adds a message for `to`. Ghosts can read everything.
    pub fn private_message(mut self, to: &PlayerId, content: MessageContent) -> Self {
        let recipients = self.ghosts.iter().chain(Some(to)).cloned();
        self.messages.push(Message::new(recipients, content));
        self
    }

    pub fn public_message(mut self, content: MessageContent) -> Self {
        let recipients = self.players.iter().chain(self.ghosts.iter()).cloned();
        self.messages.push(Message::new(recipients, content));
        self
    }
}

/// Outcome of one resolved phase. Nothing in here changes after resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundResult {
    pub players: Vec<PlayerId>,
    pub ghosts: Vec<PlayerId>,
    pub eliminated: Vec<PlayerId>,
    pub resurrected: Vec<PlayerId>,
    pub messages: Vec<Message>,
    pub is_game_over: bool,
    pub winning_team: Option<Team>,
}

/// Returns the winning team, if any, given the living players.
///
/// A team wins once the other one has nobody left alive. With nobody bad left
/// alive the good team wins, even when nobody at all is alive.
pub fn check_winners<'a, I>(players: I, roles: &HashMap<PlayerId, RoleType>) -> Result<Option<Team>>
where
    I: IntoIterator<Item = &'a PlayerId>,
{
    let mut good = 0;
    let mut bad = 0;
    for player in players {
        let role = roles
            .get(player)
            .ok_or_else(|| GameError::MissingRole(player.clone()))?;
        match role.team() {
            Team::Good => good += 1,
            Team::Bad => bad += 1,
        }
    }

    Ok(if bad == 0 {
        Some(Team::Good)
    } else if good == 0 {
        Some(Team::Bad)
    } else {
        None
    })
}

/// Runs the win check and freezes the state into a result.
pub(crate) fn finish(state: RoundState, roles: &HashMap<PlayerId, RoleType>) -> Result<RoundResult> {
    let winning_team = check_winners(state.players(), roles)?;
    let state = match winning_team {
        Some(victors) => {
            debug!("{victors} team won");
            state.public_message(MessageContent::GameOver { victors })
        }
        None => state,
    };

    let RoundState {
        players,
        ghosts,
        eliminated,
        resurrected,
        messages,
    } = state;

    Ok(RoundResult {
        players: players.into_iter().collect(),
        ghosts: ghosts.into_iter().collect(),
        eliminated,
        resurrected,
        messages,
        is_game_over: winning_team.is_some(),
        winning_team,
    })
}
