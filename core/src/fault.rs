use crate::constants::STACK_DEPTH;

/// Terminal faults raised by the fetch-decode-execute cycle.
///
/// A fault ends the running program: once `step` reports one it keeps
/// reporting the same fault until the machine is reset. Resuming after a
/// corrupted control flow would execute garbage, so there is no recovery
/// path short of `reset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Fault {
    /// The fetched word is not part of the instruction set.
    #[error("unrecognized opcode {opcode:#06X}")]
    Decode { opcode: u16 },

    /// A return was executed with no call frame to return to.
    #[error("return with an empty call stack")]
    StackUnderflow,

    /// A call would nest deeper than the stack allows.
    #[error("call nested deeper than {} frames", STACK_DEPTH)]
    StackOverflow,

    /// A fetch or memory operand landed outside the 4KB address space.
    /// Addresses are not masked to 12 bits; going out of range is an error.
    #[error("memory access out of bounds at {address:#06X}")]
    AddressOutOfBounds { address: usize },
}

/// Result of a single `step` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The instruction retired and the machine is ready for the next step.
    Continue,
    /// A wait-for-key instruction is pending. The machine does not advance
    /// until the host delivers a key press, but stepping stays safe to call.
    Waiting,
    /// The program faulted. Every further step returns this until `reset`.
    Halted(Fault),
}

/// Rejection reasons for `load`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// The image does not fit between the program start and the end of
    /// memory. Oversized ROMs are rejected whole rather than truncated.
    #[error("ROM is {size} bytes but only {max_size} fit above the reserved region")]
    RomTooLarge { size: usize, max_size: usize },
}
