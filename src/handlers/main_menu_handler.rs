use teloxide::{prelude::*, utils::command::BotCommands};

use super::{lock, player_from_message, player_id, AsyncBotState};
use crate::game::GameId;
use crate::game_manager::{GameManager, Player};

pub fn get_main_menu_handler() -> Handler<
    'static,
    DependencyMap,
    Result<(), teloxide::RequestError>,
    teloxide::dispatching::DpHandlerDescription,
> {
    dptree::entry()
        .filter(|msg: Message, bot_state: AsyncBotState| {
            lock(&bot_state)
                .game_manager
                .get_player_game(&player_id(msg.chat.id))
                .is_none()
        })
        .filter_command::<MainMenuCommand>()
        .endpoint(main_menu_handler)
}

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "Main menu commands")]
enum MainMenuCommand {
    #[command(description = "Shows this message.")]
    Help,
    #[command(description = "Host a game")]
    Host,
    #[command(description = "Join a game")]
    Join { code: i32 },
}

async fn main_menu_handler(
    bot_state: AsyncBotState,
    bot: Bot,
    msg: Message,
    cmd: MainMenuCommand,
) -> Result<(), teloxide::RequestError> {
    let text = {
        let mut state_lock = lock(&bot_state);
        handle_main_menu_command(&mut state_lock.game_manager, player_from_message(&msg), cmd)
    };

    bot.send_message(msg.chat.id, text).await?;

    Ok(())
}

fn handle_main_menu_command<G: GameManager>(
    game_manager: &mut G,
    player: Player,
    cmd: MainMenuCommand,
) -> String {
    match cmd {
        MainMenuCommand::Help => MainMenuCommand::descriptions().to_string(),
        MainMenuCommand::Host => match game_manager.create_game(player) {
            Ok(game_id) => format!(
                "Created new game. Code: {}\nOthers can join with /join {}",
                game_id, game_id
            ),
            Err(err) => format!("Encountered error: {}", err),
        },
        MainMenuCommand::Join { code } => match game_manager.join_game(GameId(code), player) {
            Ok(()) => format!("Joined game {}", code),
            Err(err) => format!("Encountered error: {}", err),
        },
    }
}
