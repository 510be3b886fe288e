use thiserror::Error;

use crate::game::{GameId, PlayerId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("at least {required} players needed, found {actual}")]
    NotEnoughPlayers { required: usize, actual: usize },
    #[error("unknown role group: {0}")]
    UnknownRoleGroup(String),

    #[error("unknown player: {0}")]
    UnknownPlayer(PlayerId),
    #[error("no role assigned to player {0}")]
    MissingRole(PlayerId),
    #[error("player {0} is listed as both alive and a ghost")]
    DuplicatePlayer(PlayerId),

    #[error("game #{0} does not exist")]
    GameNotFound(GameId),
    #[error("game #{0} is closed to new players")]
    GameClosed(GameId),
    #[error("game #{0} has already started")]
    GameStarted(GameId),
    #[error("game #{0} has not started")]
    NoRound(GameId),
    #[error("player {0} is already in a game")]
    AlreadyInGame(PlayerId),
    #[error("player {0} is not in a game")]
    NotInGame(PlayerId),
    #[error("player {0} is not the host")]
    NotHost(PlayerId),
    #[error("more than one player is called {0}, vote by number instead")]
    AmbiguousName(String),
    #[error("player {0} is not allowed to vote on this round")]
    NotAllowedToVote(PlayerId),
}

pub type Result<T> = std::result::Result<T, GameError>;
