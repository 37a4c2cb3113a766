//! Diagnostic dumps of a running machine.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use crate::emulator::{Emulator, Framebuffer};

pub const MEMORY_DUMP: &str = "memory-dump.hex";
pub const DISPLAY_DUMP: &str = "display-dump.txt";

/// Raw memory, all 4096 bytes.
pub fn write_memory<W: Write>(out: &mut W, emulator: &Emulator) -> io::Result<()> {
    out.write_all(emulator.memory())
}

/// One line per row, `1` for a set pixel and `0` otherwise.
pub fn write_display<W: Write>(out: &mut W, screen: &Framebuffer) -> io::Result<()> {
    write!(out, "{:?}", screen)
}

/// Write both dumps into `dir`, replacing earlier ones.
pub fn dump_to_dir(dir: &Path, emulator: &Emulator) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    write_memory(&mut File::create(dir.join(MEMORY_DUMP))?, emulator)?;
    write_display(&mut File::create(dir.join(DISPLAY_DUMP))?, emulator.framebuffer())?;
    log::debug!("Wrote dumps to {:?}", dir);
    Ok(())
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::emulator::{Config, SCREEN_HEIGHT, SCREEN_WIDTH};
    use pretty_assertions::assert_eq;

    #[test]
    fn memory_dump_is_the_whole_address_space() {
        let emulator = Emulator::new(Config { seed: Some(0), ..Config::default() });
        let mut out = Vec::new();
        write_memory(&mut out, &emulator).unwrap();
        assert_eq!(out.len(), 4096);
        assert_eq!(out[0x50], 0xF0);
    }

    #[test]
    fn display_dump_is_ones_and_zeros() {
        let mut screen = Framebuffer::new();
        screen.set(1, 0, true);
        let mut out = Vec::new();
        write_display(&mut out, &screen).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), SCREEN_HEIGHT);
        assert_eq!(lines[0].len(), SCREEN_WIDTH);
        assert!(lines[0].starts_with("010"));
        assert!(lines[1].chars().all(|c| c == '0'));
    }

    #[test]
    fn dumps_land_in_directory() {
        let dir = std::env::temp_dir().join(format!("emu-chip8-dump-{}", std::process::id()));
        let emulator = Emulator::new(Config { seed: Some(0), ..Config::default() });
        dump_to_dir(&dir, &emulator).unwrap();
        assert_eq!(fs::read(dir.join(MEMORY_DUMP)).unwrap().len(), 4096);
        assert!(dir.join(DISPLAY_DUMP).exists());
        fs::remove_dir_all(&dir).unwrap();
    }
}
