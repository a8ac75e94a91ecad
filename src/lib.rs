pub mod app;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod controller;
pub mod loader;
pub mod model;
pub mod output;
pub mod table;
pub mod tui;

#[cfg(test)]
mod tests;
