use serde::{Deserialize, Serialize};

#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    #[display(fmt = "good")]
    Good,
    #[display(fmt = "bad")]
    Bad,
}

/// What a role does when its tier is resolved at night.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Ability {
    Kill,
    Heal,
    See,
    Inert,
}

/// Every role a player can be dealt.
///
/// Declaration order doubles as the tie-break between roles sharing a
/// priority tier, so `Werewolf` acts before `Zombie` and `Healer` before `Seer`.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleType {
    #[display(fmt = "Werewolf")]
    Werewolf,
    #[display(fmt = "Zombie")]
    Zombie,
    #[display(fmt = "Healer")]
    Healer,
    #[display(fmt = "Seer")]
    Seer,
    #[display(fmt = "Villager")]
    Villager,
    #[display(fmt = "Executioner")]
    Executioner,
    #[display(fmt = "Acolite")]
    Acolite,
    #[display(fmt = "Shape Shifter")]
    ShapeShifter,
    #[display(fmt = "Hero")]
    Hero,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Role {
    pub role_type: RoleType,
    pub team: Team,
    /// Lower priorities resolve first.
    pub priority: u8,
    pub ability: Ability,
}

impl RoleType {
    pub const ALL: [RoleType; 9] = [
        RoleType::Werewolf,
        RoleType::Zombie,
        RoleType::Healer,
        RoleType::Seer,
        RoleType::Villager,
        RoleType::Executioner,
        RoleType::Acolite,
        RoleType::ShapeShifter,
        RoleType::Hero,
    ];

    pub fn role(self) -> Role {
        let (team, priority, ability) = match self {
            RoleType::Werewolf => (Team::Bad, 1, Ability::Kill),
            RoleType::Zombie => (Team::Bad, 1, Ability::Kill),
            RoleType::Healer => (Team::Good, 2, Ability::Heal),
            RoleType::Seer => (Team::Good, 2, Ability::See),
            RoleType::Villager => (Team::Good, 3, Ability::Inert),
            RoleType::Executioner => (Team::Good, 3, Ability::Inert),
            RoleType::Acolite => (Team::Good, 3, Ability::Inert),
            // Shape shifting and self revival are not implemented yet
            RoleType::ShapeShifter => (Team::Good, 4, Ability::Inert),
            RoleType::Hero => (Team::Good, 4, Ability::Inert),
        };

        Role {
            role_type: self,
            team,
            priority,
            ability,
        }
    }

    pub fn team(self) -> Team {
        self.role().team
    }

    pub fn priority(self) -> u8 {
        self.role().priority
    }

    pub fn ability(self) -> Ability {
        self.role().ability
    }

    pub fn is_killer(self) -> bool {
        self.ability() == Ability::Kill
    }
}
