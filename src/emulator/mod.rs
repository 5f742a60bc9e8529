pub mod config;
pub mod display;
#[allow(clippy::module_inception)]
pub mod emulator;
pub mod error;
pub mod instruction;
pub mod keypad;
pub mod memory;
pub mod opcode;
pub mod run_state;

pub use config::{Config, ShiftSource};
pub use emulator::{Emulator, RegisterDump};
pub use error::Error;
pub use run_state::RunState;
