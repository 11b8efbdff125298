pub use crate::fault::{Fault, LoadError, StepOutcome};
pub use crate::state::{FrameBuffer, Keys, State};
pub use crate::vm::Chip8;

pub mod constants;
mod fault;
mod instruction;
mod opcode;
mod operations;
mod state;
mod vm;
