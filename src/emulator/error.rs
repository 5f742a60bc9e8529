use thiserror::Error;

/// Everything that can stop the emulator.
///
/// Apart from `InvalidKey` and `ProgramTooLarge`, which come from the host,
/// every variant is fatal: the emulator halts and refuses to run further.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// No handler exists for this instruction word.
    #[error("unsupported instruction {0:#06x}")]
    UnsupportedInstruction(u16),

    /// A call was made with every stack slot in use.
    #[error("stack overflow")]
    StackOverflow,

    /// A return was made with an empty stack.
    #[error("stack underflow")]
    StackUnderflow,

    /// A fetch, jump or memory access targeted an address outside memory.
    #[error("address {0:#x} is outside of memory")]
    AddressOutOfRange(u32),

    /// The program does not fit between 0x200 and the end of memory.
    #[error("program of {len} bytes does not fit in {max} bytes")]
    ProgramTooLarge { len: usize, max: usize },

    /// Keys are numbered 0x0 to 0xF.
    #[error("key {0:#x} is not on the keypad")]
    InvalidKey(u8),

    /// The emulator has already stopped because of the wrapped error.
    #[error("emulator is halted: {0}")]
    Halted(Box<Error>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_instruction_reports_the_word() {
        let message = Error::UnsupportedInstruction(0x5AB1).to_string();
        assert_eq!(message, "unsupported instruction 0x5ab1");
    }

    #[test]
    fn halted_includes_the_cause() {
        let error = Error::Halted(Box::new(Error::AddressOutOfRange(0x1000)));
        assert_eq!(
            error.to_string(),
            "emulator is halted: address 0x1000 is outside of memory"
        );
    }
}
