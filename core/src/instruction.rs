use crate::fault::Fault;
use crate::opcode::Opcode;
use crate::operations as ops;
use crate::state::{Keys, State};

/// An executable instruction: opcode operands in, successor state out.
pub type Operation = fn(Opcode, &State, &Keys) -> Result<State, Fault>;

/// Resolve an opcode to its operation.
///
/// Dispatch is on the high nibble first; the 0x0, 0x8, 0xE and 0xF families
/// overload several instructions in their low byte or nibble. Words the
/// instruction set does not define decode to a fault carrying the raw value.
pub fn decode(op: Opcode) -> Result<Operation, Fault> {
    let operation: Operation = match op.nibbles() {
        (0x0, 0x0, 0xE, 0x0) => ops::clear_screen,
        (0x0, 0x0, 0xE, 0xE) => ops::ret,
        (0x1, ..) => ops::jump,
        (0x2, ..) => ops::call,
        (0x3, ..) => ops::skip_eq_imm,
        (0x4, ..) => ops::skip_ne_imm,
        (0x5, .., 0x0) => ops::skip_eq_reg,
        (0x6, ..) => ops::load_imm,
        (0x7, ..) => ops::add_imm,
        (0x8, .., 0x0) => ops::copy_reg,
        (0x8, .., 0x1) => ops::bit_or,
        (0x8, .., 0x2) => ops::bit_and,
        (0x8, .., 0x3) => ops::bit_xor,
        (0x8, .., 0x4) => ops::add_carry,
        (0x8, .., 0x5) => ops::sub_borrow,
        (0x8, .., 0x6) => ops::shift_right,
        (0x8, .., 0x7) => ops::sub_reverse,
        (0x8, .., 0xE) => ops::shift_left,
        (0x9, .., 0x0) => ops::skip_ne_reg,
        (0xA, ..) => ops::load_index,
        (0xB, ..) => ops::jump_offset,
        (0xC, ..) => ops::random,
        (0xD, ..) => ops::draw,
        (0xE, _, 0x9, 0xE) => ops::skip_key_down,
        (0xE, _, 0xA, 0x1) => ops::skip_key_up,
        (0xF, _, 0x0, 0x7) => ops::read_delay,
        (0xF, _, 0x0, 0xA) => ops::wait_key,
        (0xF, _, 0x1, 0x5) => ops::set_delay,
        (0xF, _, 0x1, 0x8) => ops::set_sound,
        (0xF, _, 0x1, 0xE) => ops::add_index,
        (0xF, _, 0x2, 0x9) => ops::font_index,
        (0xF, _, 0x3, 0x3) => ops::bcd,
        (0xF, _, 0x5, 0x5) => ops::dump_regs,
        (0xF, _, 0x6, 0x5) => ops::fill_regs,
        _ => return Err(Fault::Decode { opcode: op.word() }),
    };
    Ok(operation)
}
