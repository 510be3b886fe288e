use log::debug;
use serde::{Deserialize, Serialize};

pub use day_round::DayRound;
pub use message::{Message, MessageContent, MessageType, Ranking};
pub use night_round::{NightRound, Nomination};
pub use player::{GameId, PlayerId};
pub use poll::{is_draw, score_poll};
pub use role::{Ability, Role, RoleType, Team};
pub use role_assigner::{distribute_roles, RoleGroup};
pub use round::{check_winners, RoundInput, RoundResult, RoundState};

use crate::error::Result;

pub mod day_round;
pub mod message;
pub mod night_round;
pub mod player;
pub mod poll;
pub mod role;
pub mod role_assigner;
pub mod round;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[display(fmt = "day")]
    Day,
    #[display(fmt = "night")]
    Night,
}

impl Phase {
    pub fn next(self) -> Phase {
        match self {
            Phase::Day => Phase::Night,
            Phase::Night => Phase::Day,
        }
    }

    fn resolver(self) -> &'static dyn PhaseResolver {
        match self {
            Phase::Day => &DayRound,
            Phase::Night => &NightRound,
        }
    }
}

/// Phase specific part of a round: turns the votes into eliminations,
/// resurrections and messages. The win check is left to [`resolve`].
pub trait PhaseResolver {
    fn resolve(&self, state: RoundState, input: &RoundInput) -> Result<RoundState>;
}

/// Resolves one phase from start to finish.
///
/// Identical inputs always give identical results. Nothing is produced
/// unless the whole resolution succeeds.
pub fn resolve(phase: Phase, input: &RoundInput) -> Result<RoundResult> {
    input.validate()?;
    debug!(
        "resolving {phase} with {} players and {} ghosts",
        input.players.len(),
        input.ghosts.len()
    );

    let state = RoundState::new(&input.players, &input.ghosts);
    let state = phase.resolver().resolve(state, input)?;
    round::finish(state, &input.roles)
}
