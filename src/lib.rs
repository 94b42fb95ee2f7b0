// Library target for the training core. The binary in main.rs adds the
// terminal host (app, event loop, ui) on top; integration tests and
// criterion benches import the core through `vimtype::*`.

pub mod config;
pub mod editor;
pub mod engine;
pub mod keyboard;
pub mod session;
