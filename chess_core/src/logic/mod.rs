pub mod board;
pub mod clock;
pub mod eval_constants;
pub mod game;
pub mod generator;
pub mod notation;
pub mod opening;
pub mod rules;

#[cfg(test)]
mod scenario_test;
