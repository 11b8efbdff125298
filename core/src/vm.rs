use crate::constants::{MAX_ROM_SIZE, MEMORY_SIZE, PROGRAM_START, TIMER_INTERVAL};
use crate::fault::{Fault, LoadError, StepOutcome};
use crate::instruction;
use crate::opcode::Opcode;
use crate::state::{FrameBuffer, Keys, State};

/// The CHIP-8 virtual machine.
///
/// Owns every piece of VM state and mutates it only through this API:
///
/// - `load` writes a program image into memory
/// - `step` runs one fetch-decode-execute cycle
/// - `advance_timers` drives the 60Hz countdown timers from wall-clock time
/// - `set_key` / `is_pressed` are the host's input channel
/// - `framebuffer` / `take_draw_flag` / `should_play_tone` are the output
///   channel for a renderer
///
/// None of these calls are safe to interleave from multiple threads; a host
/// that wants to drive the machine from several places must serialize them.
pub struct Chip8 {
    state: State,
    keys: Keys,
    halted: Option<Fault>,
    timer_accumulator: f64,
}

impl Chip8 {
    pub fn new() -> Self {
        Chip8 {
            state: State::new(),
            keys: [false; 16],
            halted: None,
            timer_accumulator: 0.0,
        }
    }

    /// Write a program image into memory starting at `PROGRAM_START`.
    ///
    /// An image larger than the program area is rejected whole; nothing is
    /// written. Loading does not reset registers or the program counter, so
    /// a host swapping programs should `reset` first.
    pub fn load(&mut self, rom: &[u8]) -> Result<(), LoadError> {
        if rom.len() > MAX_ROM_SIZE {
            return Err(LoadError::RomTooLarge {
                size: rom.len(),
                max_size: MAX_ROM_SIZE,
            });
        }
        let start = PROGRAM_START as usize;
        self.state.memory[start..start + rom.len()].copy_from_slice(rom);
        Ok(())
    }

    /// Return the machine to its power-on state, keeping the program image.
    ///
    /// Registers, stack, framebuffer, keys, timers, and any halt or pending
    /// key wait are cleared; the font is re-seeded and the program counter
    /// rewinds to `PROGRAM_START`. Memory above the reserved region is left
    /// as the program last saw it, so a self-modifying program needs a fresh
    /// `load` to run from a pristine image.
    pub fn reset(&mut self) {
        let memory = self.state.memory;
        self.state = State::new();
        self.state.memory[PROGRAM_START as usize..]
            .copy_from_slice(&memory[PROGRAM_START as usize..]);
        self.keys = [false; 16];
        self.halted = None;
        self.timer_accumulator = 0.0;
    }

    /// Run one fetch-decode-execute cycle.
    ///
    /// Reports `Waiting` without touching state while a wait-for-key is
    /// pending, and latches the first fault so that a halted machine stays
    /// halted until `reset`.
    pub fn step(&mut self) -> StepOutcome {
        if let Some(fault) = self.halted {
            return StepOutcome::Halted(fault);
        }
        if self.state.awaiting_key.is_some() {
            return StepOutcome::Waiting;
        }
        match self.execute_cycle() {
            Ok(state) => {
                self.state = state;
                if self.state.awaiting_key.is_some() {
                    StepOutcome::Waiting
                } else {
                    StepOutcome::Continue
                }
            }
            Err(fault) => {
                self.halted = Some(fault);
                StepOutcome::Halted(fault)
            }
        }
    }

    fn execute_cycle(&self) -> Result<State, Fault> {
        let op = self.fetch()?;
        let operation = instruction::decode(op)?;
        // the counter moves past the instruction before dispatch, so jump
        // and call targets are absolute and skips add to the advanced value
        let mut state = self.state;
        state.pc = state.pc.wrapping_add(2);
        operation(op, &state, &self.keys)
    }

    fn fetch(&self) -> Result<Opcode, Fault> {
        let pc = self.state.pc as usize;
        if pc + 1 >= MEMORY_SIZE {
            return Err(Fault::AddressOutOfBounds { address: pc });
        }
        Ok(Opcode::from_bytes(
            self.state.memory[pc],
            self.state.memory[pc + 1],
        ))
    }

    /// Accumulate wall-clock time and decrement both timers by one when the
    /// accumulated time crosses the 60Hz interval, discarding any excess.
    /// At most one decrement happens per call, which suits a fixed-step
    /// host loop; callers with wildly uneven frames should call more often
    /// rather than with larger deltas.
    pub fn advance_timers(&mut self, elapsed_seconds: f64) {
        self.timer_accumulator += elapsed_seconds;
        if self.timer_accumulator >= TIMER_INTERVAL {
            self.timer_accumulator = 0.0;
            self.state.delay_timer = self.state.delay_timer.saturating_sub(1);
            self.state.sound_timer = self.state.sound_timer.saturating_sub(1);
        }
    }

    /// Record a key press or release from the host.
    ///
    /// Ids above 0xF are a caller error and are dropped without touching
    /// state. A press delivered while the machine waits on Fx0A lands in
    /// the latched register and ends the wait; releases never do.
    pub fn set_key(&mut self, key: u8, pressed: bool) {
        if key > 0xF {
            return;
        }
        self.keys[key as usize] = pressed;
        if pressed {
            if let Some(register) = self.state.awaiting_key.take() {
                self.state.v[register as usize] = key;
            }
        }
    }

    /// Whether the host currently holds the key down.
    pub fn is_pressed(&self, key: u8) -> bool {
        key <= 0xF && self.keys[key as usize]
    }

    /// Read-only view of the 64x32 cell grid, valid between calls.
    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// True once after any draw or clear touched the framebuffer; reading
    /// clears it, so a renderer can redraw only changed frames.
    pub fn take_draw_flag(&mut self) -> bool {
        std::mem::take(&mut self.state.draw_flag)
    }

    /// The tone plays for as long as the sound timer is above zero.
    pub fn should_play_tone(&self) -> bool {
        self.state.sound_timer > 0
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAX_ROM_SIZE;

    fn loaded(rom: &[u8]) -> Chip8 {
        let mut chip8 = Chip8::new();
        chip8.load(rom).unwrap();
        chip8
    }

    #[test]
    fn test_load_writes_at_program_start() {
        let chip8 = loaded(&[0x60, 0x12]);
        assert_eq!(chip8.state.memory[0x200..0x202], [0x60, 0x12]);
    }

    #[test]
    fn test_load_rejects_oversized_rom_untouched() {
        let mut chip8 = Chip8::new();
        let rom = vec![0xAB; MAX_ROM_SIZE + 1];
        assert_eq!(
            chip8.load(&rom),
            Err(LoadError::RomTooLarge {
                size: MAX_ROM_SIZE + 1,
                max_size: MAX_ROM_SIZE,
            })
        );
        assert_eq!(chip8.state.memory[0x200..], [0; MAX_ROM_SIZE]);
    }

    #[test]
    fn test_load_accepts_a_full_program_area() {
        let mut chip8 = Chip8::new();
        assert!(chip8.load(&vec![0xAB; MAX_ROM_SIZE]).is_ok());
        assert_eq!(chip8.state.memory[0xFFF], 0xAB);
    }

    #[test]
    fn test_step_executes_one_instruction() {
        let mut chip8 = loaded(&[0x61, 0x22]);
        assert_eq!(chip8.step(), StepOutcome::Continue);
        assert_eq!(chip8.state.v[0x1], 0x22);
        assert_eq!(chip8.state.pc, 0x202);
    }

    #[test]
    fn test_unknown_opcode_halts_and_latches() {
        let mut chip8 = loaded(&[0xFF, 0xFF]);
        let outcome = chip8.step();
        assert_eq!(outcome, StepOutcome::Halted(Fault::Decode { opcode: 0xFFFF }));
        // state is frozen where the fault left it
        assert_eq!(chip8.state.pc, 0x200);
        assert_eq!(chip8.step(), outcome);
    }

    #[test]
    fn test_fetch_at_end_of_memory_faults() {
        // jump to the last byte; the next fetch cannot read a full word
        let mut chip8 = loaded(&[0x1F, 0xFF]);
        assert_eq!(chip8.step(), StepOutcome::Continue);
        assert_eq!(
            chip8.step(),
            StepOutcome::Halted(Fault::AddressOutOfBounds { address: 0xFFF })
        );
    }

    #[test]
    fn test_faulting_instruction_does_not_commit() {
        // V1 = 0xAB, then return with an empty stack
        let mut chip8 = loaded(&[0x61, 0xAB, 0x00, 0xEE]);
        chip8.step();
        assert_eq!(chip8.step(), StepOutcome::Halted(Fault::StackUnderflow));
        assert_eq!(chip8.state.pc, 0x202);
        assert_eq!(chip8.state.v[0x1], 0xAB);
    }

    #[test]
    fn test_wait_key_holds_until_a_press() {
        // F10A, then 00E0 as the instruction after the wait
        let mut chip8 = loaded(&[0xF1, 0x0A, 0x00, 0xE0]);
        assert_eq!(chip8.step(), StepOutcome::Waiting);
        assert_eq!(chip8.step(), StepOutcome::Waiting);
        assert_eq!(chip8.state.pc, 0x202);

        // a release does not satisfy the wait
        chip8.set_key(0xE, false);
        assert_eq!(chip8.step(), StepOutcome::Waiting);

        chip8.set_key(0xE, true);
        assert_eq!(chip8.state.v[0x1], 0xE);
        assert_eq!(chip8.step(), StepOutcome::Continue);
        assert_eq!(chip8.state.pc, 0x204);
    }

    #[test]
    fn test_reset_cancels_a_wait() {
        let mut chip8 = loaded(&[0xF1, 0x0A]);
        assert_eq!(chip8.step(), StepOutcome::Waiting);
        chip8.reset();
        assert_eq!(chip8.state.awaiting_key, None);
    }

    #[test]
    fn test_reset_clears_state_but_keeps_the_program() {
        let mut chip8 = loaded(&[0x61, 0x22, 0xFF, 0xFF]);
        chip8.step();
        chip8.step();
        chip8.set_key(0x4, true);
        chip8.reset();

        assert_eq!(chip8.state.pc, 0x200);
        assert_eq!(chip8.state.v, [0; 16]);
        assert!(!chip8.is_pressed(0x4));
        // font re-seeded, program image intact
        assert_eq!(chip8.state.memory[0..5], [0xF0, 0x90, 0x90, 0x90, 0xF0]);
        assert_eq!(chip8.state.memory[0x200..0x204], [0x61, 0x22, 0xFF, 0xFF]);
        // the machine runs again
        assert_eq!(chip8.step(), StepOutcome::Continue);
    }

    #[test]
    fn test_set_key_rejects_out_of_range_ids() {
        let mut chip8 = Chip8::new();
        chip8.set_key(16, true);
        assert!(chip8.keys.iter().all(|&pressed| !pressed));
        assert!(!chip8.is_pressed(16));
    }

    #[test]
    fn test_set_key_tracks_press_and_release() {
        let mut chip8 = Chip8::new();
        chip8.set_key(0xA, true);
        assert!(chip8.is_pressed(0xA));
        chip8.set_key(0xA, false);
        assert!(!chip8.is_pressed(0xA));
    }

    #[test]
    fn test_timers_decrement_once_per_sixtieth() {
        let mut chip8 = Chip8::new();
        chip8.state.delay_timer = 2;
        chip8.state.sound_timer = 1;

        // two half-interval calls make exactly one decrement
        chip8.advance_timers(1.0 / 120.0);
        assert_eq!(chip8.state.delay_timer, 2);
        chip8.advance_timers(1.0 / 120.0);
        assert_eq!(chip8.state.delay_timer, 1);
        assert_eq!(chip8.state.sound_timer, 0);

        // floor at zero
        chip8.advance_timers(1.0);
        chip8.advance_timers(1.0);
        assert_eq!(chip8.state.delay_timer, 0);
        assert_eq!(chip8.state.sound_timer, 0);
    }

    #[test]
    fn test_excess_time_is_discarded_at_the_threshold() {
        let mut chip8 = Chip8::new();
        chip8.state.delay_timer = 10;
        // a huge delta still costs exactly one decrement
        chip8.advance_timers(1.0);
        assert_eq!(chip8.state.delay_timer, 9);
        // and leaves no residue behind
        chip8.advance_timers(1.0 / 120.0);
        assert_eq!(chip8.state.delay_timer, 9);
    }

    #[test]
    fn test_tone_follows_the_sound_timer() {
        let mut chip8 = Chip8::new();
        assert!(!chip8.should_play_tone());
        chip8.state.sound_timer = 1;
        assert!(chip8.should_play_tone());
        chip8.advance_timers(1.0 / 60.0);
        assert!(!chip8.should_play_tone());
    }

    #[test]
    fn test_draw_flag_reads_once() {
        let mut chip8 = loaded(&[0x00, 0xE0]);
        assert!(!chip8.take_draw_flag());
        chip8.step();
        assert!(chip8.take_draw_flag());
        assert!(!chip8.take_draw_flag());
    }

    #[test]
    fn test_framebuffer_reflects_draws() {
        // V0 = 0, I = font glyph for 0, draw five rows at (0, 0)
        let mut chip8 = loaded(&[0x60, 0x00, 0xF0, 0x29, 0xD0, 0x05]);
        chip8.step();
        chip8.step();
        chip8.step();
        let frame = chip8.framebuffer();
        assert_eq!(frame[0][..4], [true, true, true, true]);
        assert_eq!(frame[1][..4], [true, false, false, true]);
    }
}
