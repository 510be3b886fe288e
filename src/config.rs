use std::env;

use crate::error::Result;
use crate::game::RoleGroup;

pub const ROLE_GROUP_VAR: &str = "WEREWOLF_ROLE_GROUP";

/// Bot settings read from the environment. The Telegram token itself is
/// picked up by `Bot::from_env` from `TELOXIDE_TOKEN`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    pub role_group: RoleGroup,
}

impl Config {
    pub fn from_env() -> Result<Config> {
        Config::from_role_group(env::var(ROLE_GROUP_VAR).ok().as_deref())
    }

    fn from_role_group(name: Option<&str>) -> Result<Config> {
        let role_group = match name {
            Some(name) if !name.trim().is_empty() => RoleGroup::from_name(name)?,
            _ => RoleGroup::default(),
        };
        Ok(Config { role_group })
    }
}
