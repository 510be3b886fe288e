use rand::{rngs::StdRng, SeedableRng};
use std::collections::HashMap;

use that_werewolf_game::game::role_assigner::{CLASSIC, HERO};
use that_werewolf_game::game::{GameId, MessageType, Phase, PlayerId, RoleType, Team};
use that_werewolf_game::game_manager::{
    cast_vote, local_game_manager::LocalGameManager, start_game, GameManager, Player,
};
use that_werewolf_game::GameError;

fn player(i: usize) -> Player {
    Player {
        player_id: PlayerId(i.to_string()),
        username: format!("player{i}"),
    }
}

fn setup(count: usize) -> (LocalGameManager, GameId) {
    let mut manager = LocalGameManager::new();
    let game_id = manager.create_game(player(1)).unwrap();
    for i in 2..=count {
        manager.join_game(game_id, player(i)).unwrap();
    }
    (manager, game_id)
}

fn holder(roles: &HashMap<PlayerId, RoleType>, role: RoleType) -> PlayerId {
    roles
        .iter()
        .find(|(_, r)| **r == role)
        .map(|(p, _)| p.clone())
        .unwrap()
}

#[test]
fn a_classic_game_from_start_to_finish() {
    let (mut manager, game_id) = setup(4);
    let mut rng = StdRng::seed_from_u64(11);

    let dealt = start_game(&mut manager, game_id, &CLASSIC, &mut rng).unwrap();
    assert_eq!(dealt.len(), 4);
    assert!(dealt.iter().all(|m| m.recipients.len() == 1));
    assert_eq!(
        start_game(&mut manager, game_id, &CLASSIC, &mut rng),
        Err(GameError::GameStarted(game_id))
    );

    let roles = manager.get_roles(game_id).unwrap();
    let wolf = holder(&roles, RoleType::Werewolf);
    let seer = holder(&roles, RoleType::Seer);
    let healer = holder(&roles, RoleType::Healer);
    let villager = holder(&roles, RoleType::Villager);

    // night 0: the wolf takes the villager and the seer finds the wolf
    assert_eq!(cast_vote(&mut manager, game_id, &wolf, &villager), Ok(None));
    assert_eq!(cast_vote(&mut manager, game_id, &seer, &wolf), Ok(None));
    assert_eq!(cast_vote(&mut manager, game_id, &healer, &wolf), Ok(None));
    let night = cast_vote(&mut manager, game_id, &villager, &wolf)
        .unwrap()
        .unwrap();

    assert_eq!(night.ghosts, vec![villager.clone()]);
    assert!(!night.is_game_over);
    let seen = manager.get_messages(game_id, &seer).unwrap();
    assert!(seen
        .iter()
        .any(|m| m.message_type() == MessageType::SeerSuccess));
    assert!(!manager
        .get_messages(game_id, &healer)
        .unwrap()
        .iter()
        .any(|m| m.message_type() == MessageType::SeerSuccess));

    let day = manager.get_latest_round(game_id).unwrap().unwrap();
    assert_eq!((day.phase, day.number), (Phase::Day, 1));
    assert_eq!(
        cast_vote(&mut manager, game_id, &villager, &wolf),
        Err(GameError::NotAllowedToVote(villager.clone()))
    );

    // day 1: the village executes the wolf
    assert_eq!(cast_vote(&mut manager, game_id, &wolf, &seer), Ok(None));
    assert_eq!(cast_vote(&mut manager, game_id, &seer, &wolf), Ok(None));
    let day = cast_vote(&mut manager, game_id, &healer, &wolf)
        .unwrap()
        .unwrap();

    assert!(day.is_game_over);
    assert_eq!(day.winning_team, Some(Team::Good));
    assert_eq!(
        cast_vote(&mut manager, game_id, &seer, &wolf),
        Err(GameError::GameNotFound(game_id))
    );

    // everybody is free to play again
    for player_id in [&wolf, &seer, &healer, &villager] {
        assert_eq!(manager.get_player_game(player_id), None);
    }
    let rematch = manager
        .create_game(Player {
            player_id: seer.clone(),
            username: "seer".to_string(),
        })
        .unwrap();
    manager
        .join_game(
            rematch,
            Player {
                player_id: wolf.clone(),
                username: "wolf".to_string(),
            },
        )
        .unwrap();
    assert_eq!(manager.list_player_ids(rematch), Ok(vec![seer.clone(), wolf.clone()]));
}

#[test]
fn changing_a_vote_replaces_it() {
    let (mut manager, game_id) = setup(3);
    let mut rng = StdRng::seed_from_u64(3);
    start_game(&mut manager, game_id, &CLASSIC, &mut rng).unwrap();

    let (p1, p2) = (PlayerId::from("1"), PlayerId::from("2"));
    assert_eq!(cast_vote(&mut manager, game_id, &p1, &p2), Ok(None));
    assert_eq!(cast_vote(&mut manager, game_id, &p1, &p1), Ok(None));
    assert_eq!(
        manager.get_votes(game_id, 0),
        Ok(HashMap::from([(p1.clone(), p1.clone())]))
    );
}

#[test]
fn votes_need_a_running_game_and_a_real_nominee() {
    let (mut manager, game_id) = setup(3);
    let (p1, p2) = (PlayerId::from("1"), PlayerId::from("2"));
    assert_eq!(
        cast_vote(&mut manager, game_id, &p1, &p2),
        Err(GameError::NoRound(game_id))
    );

    let mut rng = StdRng::seed_from_u64(3);
    start_game(&mut manager, game_id, &HERO, &mut rng).unwrap();
    assert_eq!(
        cast_vote(&mut manager, game_id, &p1, &PlayerId::from("99")),
        Err(GameError::UnknownPlayer(PlayerId::from("99")))
    );
    assert_eq!(
        manager.join_game(game_id, player(4)),
        Err(GameError::GameClosed(game_id))
    );
}
