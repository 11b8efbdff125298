use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT, MEMORY_SIZE, PROGRAM_START, STACK_DEPTH};

/// The framebuffer is indexed as `[y][x]`; `true` is a lit cell.
pub type FrameBuffer = [[bool; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// Pressed status of the sixteen pad keys, indexed by key id 0x0..=0xF.
pub type Keys = [bool; 16];

/// Every program-visible piece of the machine in one copyable snapshot.
///
/// ## Registers
/// - `v` the 16 one-byte general registers V0..VF. VF doubles as the flags
///   register; any operation that defines a flag overwrites it.
/// - `i` the 16-bit address register.
/// - `pc` the program counter.
/// - `sp` the number of occupied call stack frames; `stack[sp - 1]` is the
///   top when `sp > 0` and `sp == 0` means the stack is empty.
///
/// ## Timers
/// - `delay_timer` and `sound_timer` count down to 0 at 60Hz. The machine,
///   not the snapshot, owns the wall-clock bookkeeping that paces them.
///
/// ## Memory
/// - `memory` the 4096-byte flat address space. Addresses below
///   `PROGRAM_START` are reserved; the font is seeded at 0x000.
/// - `stack` the 16-frame list of return addresses.
///
/// ## Output and input latches
/// - `frame_buffer` the 64x32 monochrome cell grid, mutated only by the
///   clear-screen and draw operations.
/// - `draw_flag` set whenever the frame buffer changed, so a renderer can
///   skip untouched frames.
/// - `awaiting_key` the register recorded by the wait-for-key instruction,
///   filled in by the next key press the host delivers.
#[derive(Copy, Clone)]
pub struct State {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub stack: [u16; STACK_DEPTH],
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
    pub awaiting_key: Option<u8>,
}

impl State {
    pub fn new() -> Self {
        let mut memory = [0; MEMORY_SIZE];
        memory[..FONT.len()].copy_from_slice(&FONT);

        State {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            stack: [0; STACK_DEPTH],
            delay_timer: 0,
            sound_timer: 0,
            memory,
            frame_buffer: [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            draw_flag: false,
            awaiting_key: None,
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
