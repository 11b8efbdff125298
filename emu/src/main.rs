use std::path::PathBuf;
use std::process::exit;

mod keymap;
mod run;

fn main() {
    let rom = match std::env::args().nth(1) {
        Some(path) => PathBuf::from(path),
        None => {
            eprintln!("usage: chip8-emu <rom>");
            exit(2);
        }
    };
    run::run(rom);
}
