pub mod collision;
pub mod config;
pub mod display;
pub mod entities;
pub mod game;
pub mod input;
pub mod platform;
pub mod runner;
pub mod score;
pub mod ui;
pub mod world;
