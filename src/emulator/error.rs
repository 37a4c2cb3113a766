use thiserror::Error;

/// Conditions that stop the machine.
/// Unknown opcodes are not errors, they are reported through `Step::Anomaly`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmulatorError {
    #[error("memory access out of bounds at address {address:#06x}")]
    AddressOutOfBounds { address: usize },

    #[error("register V{index:X} does not exist")]
    RegisterOutOfBounds { index: u8 },

    #[error("stack overflow: call depth limit of {depth} exceeded")]
    StackOverflow { depth: usize },

    #[error("stack underflow: return with an empty call stack")]
    StackUnderflow,

    #[error("program is too large ({size} bytes), max size is {max_size} bytes")]
    RomTooLarge { size: usize, max_size: usize },
}
