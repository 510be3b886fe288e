use log::debug;
use std::collections::BTreeSet;

use super::{
    score_poll, Ability, MessageContent, PhaseResolver, PlayerId, RoleType, RoundInput, RoundState,
    Team,
};
use crate::error::Result;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Nomination {
    pub voter: PlayerId,
    pub nominee: PlayerId,
}

pub type AbilityFn = fn(RoundState, &[Nomination], &RoundInput) -> Result<RoundState>;

/// Night time: every role acts in priority order, then the good team elects
/// an executioner.
#[derive(Copy, Clone, Debug, Default)]
pub struct NightRound;

impl PhaseResolver for NightRound {
    fn resolve(&self, state: RoundState, input: &RoundInput) -> Result<RoundState> {
        let mut state = state;
        for role_type in acting_roles(input)? {
            let nominations = nominations(input, role_type)?;
            debug!("{role_type} acts on {} nominations", nominations.len());
            state = ability_fn(role_type.ability())(state, &nominations, input)?;
        }

        state = elect_executioner(state, input)?;

        if !state.eliminated().is_empty() {
            let eliminated = state.eliminated().to_vec();
            state = state.public_message(MessageContent::Eliminations(eliminated));
        }
        if !state.resurrected().is_empty() {
            let resurrected = state.resurrected().to_vec();
            state = state.public_message(MessageContent::Resurrections(resurrected));
        }
        Ok(state)
    }
}

/// Distinct roles held by the living, lowest priority first.
fn acting_roles(input: &RoundInput) -> Result<Vec<RoleType>> {
    let held = input
        .players
        .iter()
        .map(|p| input.role(p))
        .collect::<Result<BTreeSet<_>>>()?;

    let mut roles = held.into_iter().collect::<Vec<_>>();
    roles.sort_by_key(|r| r.priority());
    Ok(roles)
}

/// Votes of the living holders of a role. Ghosts cannot be targeted.
fn nominations(input: &RoundInput, role_type: RoleType) -> Result<Vec<Nomination>> {
    let mut nominations = Vec::new();
    for voter in input.players.iter() {
        if input.role(voter)? != role_type {
            continue;
        }
        match input.vote(voter) {
            Some(nominee) if !input.ghosts.contains(nominee) => nominations.push(Nomination {
                voter: voter.clone(),
                nominee: nominee.clone(),
            }),
            _ => {}
        }
    }
    Ok(nominations)
}

pub fn ability_fn(ability: Ability) -> AbilityFn {
    match ability {
        Ability::Kill => kill,
        Ability::Heal => heal,
        Ability::See => see,
        Ability::Inert => inert,
    }
}

fn kill(state: RoundState, nominations: &[Nomination], _: &RoundInput) -> Result<RoundState> {
    Ok(nominations
        .iter()
        .fold(state, |state, n| state.eliminate(&n.nominee)))
}

fn heal(state: RoundState, nominations: &[Nomination], _: &RoundInput) -> Result<RoundState> {
    Ok(nominations
        .iter()
        .fold(state, |state, n| state.resurrect(&n.nominee)))
}

fn see(state: RoundState, nominations: &[Nomination], input: &RoundInput) -> Result<RoundState> {
    let mut state = state;
    for n in nominations {
        let content = if input.role(&n.nominee)?.is_killer() {
            MessageContent::SeerSuccess(n.nominee.clone())
        } else {
            MessageContent::SeerFailure(n.nominee.clone())
        };
        state = state.private_message(&n.voter, content);
    }
    Ok(state)
}

fn inert(state: RoundState, _: &[Nomination], _: &RoundInput) -> Result<RoundState> {
    Ok(state)
}

/// Good players still alive after the night pick their executioner.
fn elect_executioner(state: RoundState, input: &RoundInput) -> Result<RoundState> {
    let mut nominees = Vec::new();
    for player in state.players() {
        if input.role(player)?.team() != Team::Good {
            continue;
        }
        if let Some(nominee) = input.vote(player) {
            nominees.push(nominee);
        }
    }

    Ok(match score_poll(nominees).into_iter().next() {
        Some((player, votes)) => {
            debug!("{player} elected executioner with {votes} votes");
            state.public_message(MessageContent::ExecutionerElected { player, votes })
        }
        None => state,
    })
}
