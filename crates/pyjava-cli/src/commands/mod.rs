pub mod config;
pub mod discover;
pub mod transpile;

#[cfg(test)]
mod config_tests;
#[cfg(test)]
mod discover_tests;
#[cfg(test)]
mod transpile_tests;
