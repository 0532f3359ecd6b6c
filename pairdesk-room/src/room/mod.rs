mod command;
mod config;
mod controller;
mod event;

pub use command::*;
pub use config::*;
pub use controller::*;
pub use event::*;
