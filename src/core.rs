pub mod algorithms;
pub mod definitions;
pub mod engine;
pub mod game;
pub mod session;
pub mod utils;
