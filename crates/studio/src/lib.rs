// Library crate: the massing engine, testable headless. The CLI binary and the
// wasm binding are thin drivers on top of `state` and `command`.

pub mod command;
pub mod error;
pub mod export;
pub mod fixtures;
pub mod geometry;
pub mod grid;
pub mod harness;
pub mod interaction;
pub mod proxy;
pub mod render_index;
pub mod solar;
pub mod state;
pub mod validation;

pub use error::StudioError;
