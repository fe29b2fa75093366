//! egui rendering. Nothing in here owns state; widgets read from and write to
//! [`crate::state::AppState`].

pub mod panels;
pub mod plot;
pub mod range_slider;
pub mod table;
