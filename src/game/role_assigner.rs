use log::debug;
use rand::{seq::SliceRandom, Rng};

use super::{PlayerId, RoleType};
use crate::error::{GameError, Result};

/// A distribution of roles: the special roles are dealt first, everybody else
/// gets the default role.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RoleGroup {
    pub name: &'static str,
    pub min_players: usize,
    pub special: &'static [RoleType],
    pub default: RoleType,
}

pub const CLASSIC: RoleGroup = RoleGroup {
    name: "classic",
    min_players: 3,
    special: &[RoleType::Werewolf, RoleType::Seer, RoleType::Healer],
    default: RoleType::Villager,
};

pub const HERO: RoleGroup = RoleGroup {
    name: "hero",
    min_players: 3,
    special: &[RoleType::Hero],
    default: RoleType::Zombie,
};

impl RoleGroup {
    pub const ALL: [RoleGroup; 2] = [CLASSIC, HERO];

    pub fn from_name(name: &str) -> Result<RoleGroup> {
        RoleGroup::ALL
            .into_iter()
            .find(|g| g.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| GameError::UnknownRoleGroup(name.to_string()))
    }
}

impl Default for RoleGroup {
    fn default() -> Self {
        CLASSIC
    }
}

/// Deals a role to every player in a random order. Fails without dealing
/// anything when there are too few players.
pub fn distribute_roles<R>(
    players: &[PlayerId],
    group: &RoleGroup,
    rng: &mut R,
) -> Result<Vec<(PlayerId, RoleType)>>
where
    R: Rng + ?Sized,
{
    if players.len() < group.min_players {
        return Err(GameError::NotEnoughPlayers {
            required: group.min_players,
            actual: players.len(),
        });
    }

    let mut shuffled = players.to_vec();
    shuffled.shuffle(rng);
    debug!("dealing {} roles from {}", shuffled.len(), group.name);

    Ok(shuffled
        .into_iter()
        .enumerate()
        .map(|(i, player)| {
            let role = group.special.get(i).copied().unwrap_or(group.default);
            (player, role)
        })
        .collect())
}
