use crate::emulator::error::EmulatorError;

pub const MEM_SIZE: usize = 4096;

/// Where programs are loaded, and where execution starts after a load.
/// Everything below is reserved for the interpreter.
pub const PROGRAM_START: u16 = 0x200;

pub const FONT_START: u16 = 0x50;

/// Bytes per font glyph.
pub const FONT_GLYPH_SIZE: u16 = 5;

const FONT: [u8; 80] = [
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

/// The 4 KiB address space. Every access is bounds checked,
/// a bad address is an error rather than a panic.
#[derive(Clone, PartialEq, Eq)]
pub struct Memory {
    bytes: [u8; MEM_SIZE],
}

impl Memory {

    /// Memory with the font loaded and nothing else.
    pub fn new() -> Memory {
        let mut memory = Memory { bytes: [0; MEM_SIZE] };
        memory.reset();
        memory
    }

    /// Zero everything, then reload the font.
    pub fn reset(&mut self) {
        self.bytes = [0; MEM_SIZE];
        let start = FONT_START as usize;
        self.bytes[start..start + FONT.len()].copy_from_slice(&FONT);
    }

    /// Address of the glyph for the low nibble of `digit`.
    pub fn glyph_addr(digit: u8) -> u16 {
        FONT_START + FONT_GLYPH_SIZE * (digit & 0xF) as u16
    }

    /// Copy a program to `PROGRAM_START`. Nothing is written if it does not fit.
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), EmulatorError> {
        let start = PROGRAM_START as usize;
        let max_size = MEM_SIZE - start;
        if program.len() > max_size {
            return Err(EmulatorError::RomTooLarge { size: program.len(), max_size });
        }
        self.bytes[start..start + program.len()].copy_from_slice(program);
        Ok(())
    }

    pub fn read(&self, address: usize) -> Result<u8, EmulatorError> {
        self.bytes.get(address).copied()
            .ok_or(EmulatorError::AddressOutOfBounds { address })
    }

    pub fn write(&mut self, address: usize, value: u8) -> Result<(), EmulatorError> {
        let byte = self.bytes.get_mut(address)
            .ok_or(EmulatorError::AddressOutOfBounds { address })?;
        *byte = value;
        Ok(())
    }

    /// `len` bytes starting at `address`.
    pub fn slice(&self, address: usize, len: usize) -> Result<&[u8], EmulatorError> {
        let end = address + len;
        if end > MEM_SIZE {
            // Report the first byte that is out of range
            return Err(EmulatorError::AddressOutOfBounds { address: address.max(MEM_SIZE) });
        }
        Ok(&self.bytes[address..end])
    }

    /// Mutable counterpart of `slice`.
    pub fn slice_mut(&mut self, address: usize, len: usize) -> Result<&mut [u8], EmulatorError> {
        let end = address + len;
        if end > MEM_SIZE {
            return Err(EmulatorError::AddressOutOfBounds { address: address.max(MEM_SIZE) });
        }
        Ok(&mut self.bytes[address..end])
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn font_is_loaded_at_0x50() {
        let memory = Memory::new();
        assert_eq!(memory.slice(0x50, 5).unwrap(), &[0xF0, 0x90, 0x90, 0x90, 0xF0]);
        assert_eq!(memory.slice(0x9B, 5).unwrap(), &[0xF0, 0x80, 0xF0, 0x80, 0x80]);
        assert_eq!(memory.read(0x4F), Ok(0));
        assert_eq!(memory.read(0xA0), Ok(0));
    }

    #[test]
    fn glyph_addr_uses_low_nibble() {
        assert_eq!(Memory::glyph_addr(0), 0x50);
        assert_eq!(Memory::glyph_addr(0xF), 0x9B);
        assert_eq!(Memory::glyph_addr(0x12), 0x50 + 2 * 5);
    }

    #[test]
    fn load_program_copies_at_0x200() {
        let mut memory = Memory::new();
        memory.load_program(&[0x12, 0x34]).unwrap();
        assert_eq!(memory.slice(0x200, 2).unwrap(), &[0x12, 0x34]);
    }

    #[test]
    fn load_program_accepts_exact_fit() {
        let mut memory = Memory::new();
        let program = vec![0xAB; MEM_SIZE - 0x200];
        assert_eq!(memory.load_program(&program), Ok(()));
        assert_eq!(memory.read(MEM_SIZE - 1), Ok(0xAB));
    }

    #[test]
    fn oversized_program_leaves_memory_untouched() {
        let mut memory = Memory::new();
        let before = memory.clone();
        let program = vec![0xAB; MEM_SIZE - 0x200 + 1];
        assert_eq!(
            memory.load_program(&program),
            Err(EmulatorError::RomTooLarge { size: 3585, max_size: 3584 })
        );
        assert!(memory == before);
    }

    #[test]
    fn out_of_bounds_access_is_an_error() {
        let mut memory = Memory::new();
        assert_eq!(memory.read(MEM_SIZE), Err(EmulatorError::AddressOutOfBounds { address: MEM_SIZE }));
        assert_eq!(memory.write(MEM_SIZE + 3, 1), Err(EmulatorError::AddressOutOfBounds { address: MEM_SIZE + 3 }));
        assert!(memory.slice(MEM_SIZE - 2, 3).is_err());
        assert!(memory.slice_mut(MEM_SIZE - 1, 2).is_err());
        assert!(memory.slice(MEM_SIZE - 2, 2).is_ok());
    }
}
