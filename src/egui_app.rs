//! egui front end: view state, background controller and renderer.

pub mod controller;
pub mod state;
pub mod ui;
