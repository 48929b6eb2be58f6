// HTTP handlers
pub mod health;
pub mod play_handler;
