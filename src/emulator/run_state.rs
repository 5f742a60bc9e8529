use crate::emulator::error::Error;

/// Whether the emulator is executing instructions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunState {
    Running,
    /// No cycles run until resumed. Single steps are still allowed.
    Paused,
    /// Execution stopped for good because of an error.
    Halted(Error),
}

impl RunState {
    /// The error that stopped execution, if any.
    pub fn halt_reason(&self) -> Option<&Error> {
        match self {
            RunState::Halted(error) => Some(error),
            RunState::Running | RunState::Paused => None,
        }
    }
}

impl Default for RunState {
    fn default() -> Self {
        RunState::Running
    }
}
