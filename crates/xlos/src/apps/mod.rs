//! The apps that ship with the desktop.
//!
//! Each one is a self-contained [`App`](crate::app::App). They are registered
//! by [`builtin_registry`] in the order the start menu and the desktop icons
//! list them.

mod calculator;
mod chat;
mod notes;
mod settings;
mod sketch;
mod snake;
mod tictactoe;

pub use calculator::{CalcError, Calculator, evaluate, format_number};
pub use chat::{BOT_REPLY, Chat, Sender};
pub use notes::Notes;
pub use settings::Settings;
pub use sketch::{Ink, Segment, Sketch};
pub use snake::Snake;
pub use tictactoe::{Mark, Tally, TicTacToe};

use crate::app::AppRegistry;

/// A registry of every bundled app.
pub fn builtin_registry() -> AppRegistry {
    AppRegistry::new()
        .with("Notes", || Box::new(Notes::new()))
        .with("Sketch", || Box::new(Sketch::new()))
        .with("Settings", || Box::new(Settings::new()))
        .with("Calculator", || Box::new(Calculator::new()))
        .with("Snake", || Box::new(Snake::new()))
        .with("TicTacToe", || Box::new(TicTacToe::new()))
        .with("Chat", || Box::new(Chat::new()))
}
