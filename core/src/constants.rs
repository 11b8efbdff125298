/// Framebuffer width in cells.
pub const DISPLAY_WIDTH: usize = 64;
/// Framebuffer height in cells.
pub const DISPLAY_HEIGHT: usize = 32;

/// Total addressable memory.
pub const MEMORY_SIZE: usize = 4096;

/// Where program images are loaded and execution begins. Everything below
/// this address is reserved for the interpreter (the font lives there).
pub const PROGRAM_START: u16 = 0x200;

/// The largest ROM that fits between `PROGRAM_START` and the end of memory.
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// How many return addresses the call stack holds.
pub const STACK_DEPTH: usize = 16;

/// Seconds between timer decrements; the reference hardware ticked its
/// delay and sound timers at 60Hz regardless of CPU speed.
pub const TIMER_INTERVAL: f64 = 1.0 / 60.0;

/// Nanoseconds per CPU cycle at the conventional 500Hz clock. Hosts are
/// free to pace `step` however they like; this is the default cadence.
pub const CLOCK_SPEED: u32 = 2_000_000;

/// Glyphs for the hexadecimal digits, five bytes per digit, seeded into
/// memory at address 0x000 so that programs can render numbers. Each byte
/// is one 8-pixel sprite row with the glyph in the high nibble.
pub const FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
