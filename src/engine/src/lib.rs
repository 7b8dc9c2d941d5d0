pub mod config;
pub mod error;
pub mod game;
pub mod game_generator;
pub mod simulator;
pub mod word_source;

#[cfg(test)]
mod test_utils;
