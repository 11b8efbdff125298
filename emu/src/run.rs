use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use chip8_core::constants::CLOCK_SPEED;
use chip8_core::{Chip8, StepOutcome};
use chip8_display::Display;

use crate::keymap::keymap;

/// Load a ROM file and drive the machine until the window closes or the
/// program faults.
///
/// The loop owns all pacing: one step per iteration at the default clock,
/// timers advanced from measured wall-clock time, and a redraw only when
/// the machine reports a dirty framebuffer. A machine waiting on a key
/// keeps the loop (and so rendering and input) fully live.
pub fn run(rom: PathBuf) {
    let mut chip8 = Chip8::new();

    let bytes = match fs::read(&rom) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("unable to read {}: {}", rom.display(), e);
            return;
        }
    };
    if let Err(e) = chip8.load(&bytes) {
        eprintln!("refusing to load {}: {}", rom.display(), e);
        return;
    }
    println!("loaded {} byte ROM from {}", bytes.len(), rom.display());

    let sdl = sdl2::init().unwrap();
    let mut display = Display::new(&sdl);
    let mut events = sdl.event_pump().unwrap();

    let cycle_time = Duration::new(0, CLOCK_SPEED);
    let mut last_cycle = Instant::now();

    // When held, skip the sleep and run as fast as the host allows
    let mut fast_forward = false;

    'event: loop {
        if chip8.take_draw_flag() {
            display.render(chip8.framebuffer());
        }

        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(id)) => chip8.set_key(id, true),
                    (Keycode::Space, _) => fast_forward = true,
                    _ => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(id)) => chip8.set_key(id, false),
                    (Keycode::Space, _) => fast_forward = false,
                    _ => continue,
                },
                _ => continue,
            };
        }

        if let StepOutcome::Halted(fault) = chip8.step() {
            eprintln!("halted: {}", fault);
            break 'event;
        }

        let now = Instant::now();
        chip8.advance_timers((now - last_cycle).as_secs_f64());
        if !fast_forward && cycle_time > now - last_cycle {
            std::thread::sleep(cycle_time - (now - last_cycle));
        }
        last_cycle = now;
    }
}
