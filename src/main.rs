use std::error::Error;
use teloxide::prelude::*;

use that_werewolf_game::{config::Config, handlers};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();
    pretty_env_logger::init();
    log::info!("Starting That Werewolf Game Bot");

    let config = Config::from_env()?;
    log::info!("Dealing roles from the {} group", config.role_group.name);
    let bot_state = handlers::new_async_bot_state(config);

    let bot = Bot::from_env();
    Dispatcher::builder(bot, handlers::get_handler())
        .dependencies(dptree::deps![bot_state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
