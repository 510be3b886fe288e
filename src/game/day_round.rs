use log::debug;

use super::{is_draw, score_poll, MessageContent, PhaseResolver, RoundInput, RoundState};
use crate::error::Result;

/// Daytime: the living vote, the single most nominated player is executed.
/// Votes for ghosts count for nobody.
#[derive(Copy, Clone, Debug, Default)]
pub struct DayRound;

impl PhaseResolver for DayRound {
    fn resolve(&self, state: RoundState, input: &RoundInput) -> Result<RoundState> {
        let ranking = score_poll(
            input
                .players
                .iter()
                .filter_map(|p| input.vote(p))
                .filter(|nominee| !input.ghosts.contains(*nominee)),
        );

        if is_draw(&ranking) {
            debug!("day vote is a draw: {ranking:?}");
            return Ok(state.public_message(MessageContent::VoteDraw(ranking)));
        }

        let (player, votes) = ranking[0].clone();
        Ok(state
            .eliminate(&player)
            .public_message(MessageContent::Execution { player, votes }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{resolve, MessageType, Phase, PlayerId, RoleType};

    fn village() -> RoundInput {
        RoundInput::new(["p1", "p2", "p3", "p4"], Vec::<&str>::new())
            .with_role("p1", RoleType::Werewolf)
            .with_role("p2", RoleType::Villager)
            .with_role("p3", RoleType::Villager)
            .with_role("p4", RoleType::Villager)
    }

    #[test]
    fn executes_the_most_voted_player() {
        let input = village()
            .with_vote("p1", "p2")
            .with_vote("p2", "p2")
            .with_vote("p3", "p2")
            .with_vote("p4", "p1");

        let result = resolve(Phase::Day, &input).unwrap();

        assert_eq!(result.messages.len(), 1);
        assert_eq!(result.messages[0].message_type(), MessageType::Execution);
        assert_eq!(
            result.messages[0].content,
            MessageContent::Execution {
                player: PlayerId::from("p2"),
                votes: 3
            }
        );
        assert_eq!(result.eliminated, vec![PlayerId::from("p2")]);
        assert_eq!(result.ghosts, vec![PlayerId::from("p2")]);
    }

    #[test]
    fn draw_eliminates_nobody() {
        let input = village()
            .with_vote("p1", "p2")
            .with_vote("p2", "p2")
            .with_vote("p3", "p1")
            .with_vote("p4", "p1");

        let result = resolve(Phase::Day, &input).unwrap();

        assert_eq!(result.messages.len(), 1);
        assert_eq!(
            result.messages[0].content,
            MessageContent::VoteDraw(vec![(PlayerId::from("p1"), 2), (PlayerId::from("p2"), 2)])
        );
        assert!(result.eliminated.is_empty());
        assert_eq!(result.players.len(), 4);
        assert!(result.ghosts.is_empty());
    }

    #[test]
    fn executing_the_last_werewolf_ends_the_game() {
        let input = village()
            .with_vote("p1", "p2")
            .with_vote("p2", "p1")
            .with_vote("p3", "p1")
            .with_vote("p4", "p1");

        let result = resolve(Phase::Day, &input).unwrap();

        assert!(result.is_game_over);
        let types = result.messages.iter().map(|m| m.message_type()).collect::<Vec<_>>();
        assert_eq!(types, vec![MessageType::Execution, MessageType::GameOver]);
    }

    #[test]
    fn ghosts_cannot_be_executed_again() {
        let input = RoundInput::new(["p1", "p2", "p3"], ["p4"])
            .with_role("p1", RoleType::Werewolf)
            .with_role("p2", RoleType::Villager)
            .with_role("p3", RoleType::Villager)
            .with_role("p4", RoleType::Villager)
            .with_vote("p1", "p4")
            .with_vote("p2", "p4")
            .with_vote("p3", "p1");

        let result = resolve(Phase::Day, &input).unwrap();

        assert_eq!(
            result.messages[0].content,
            MessageContent::Execution {
                player: PlayerId::from("p1"),
                votes: 1
            }
        );
        assert_eq!(result.eliminated, vec![PlayerId::from("p1")]);
        assert!(result.is_game_over);
    }

    #[test]
    fn votes_only_for_ghosts_are_a_draw() {
        let input = RoundInput::new(["p1", "p2", "p3"], ["p4"])
            .with_role("p1", RoleType::Werewolf)
            .with_role("p2", RoleType::Villager)
            .with_role("p3", RoleType::Villager)
            .with_vote("p1", "p4")
            .with_vote("p2", "p4");

        let result = resolve(Phase::Day, &input).unwrap();

        assert_eq!(result.messages.len(), 1);
        assert_eq!(result.messages[0].content, MessageContent::VoteDraw(Vec::new()));
        assert!(result.eliminated.is_empty());
        assert_eq!(result.ghosts, vec![PlayerId::from("p4")]);
    }

    #[test]
    fn ghost_votes_are_not_counted() {
        let input = RoundInput::new(["p1", "p2", "p3"], ["p4"])
            .with_role("p1", RoleType::Werewolf)
            .with_role("p2", RoleType::Villager)
            .with_role("p3", RoleType::Villager)
            .with_role("p4", RoleType::Villager)
            .with_vote("p1", "p2")
            .with_vote("p2", "p3")
            .with_vote("p3", "p2")
            .with_vote("p4", "p3");

        let result = resolve(Phase::Day, &input).unwrap();

        assert_eq!(
            result.messages[0].content,
            MessageContent::Execution {
                player: PlayerId::from("p2"),
                votes: 2
            }
        );
    }
}
