use crate::emulator::error::Error;

pub const MEM_SIZE: usize = 4096;
pub const PROGRAM_START: usize = 0x200;
pub const FONT_START: usize = 0x000;
/// Each font glyph is five rows tall.
pub const FONT_STRIDE: u16 = 5;

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

/// The 4 KiB address space, with the font loaded at the bottom.
/// All accesses are bounds checked.
#[derive(Clone)]
pub struct Memory {
    bytes: [u8; MEM_SIZE],
}

impl Memory {
    pub fn new() -> Memory {
        let mut bytes = [0; MEM_SIZE];
        bytes[FONT_START..FONT_START + FONT.len()].copy_from_slice(&FONT);
        Memory { bytes }
    }

    /// Copy a program into memory at 0x200.
    pub fn load(&mut self, program: &[u8]) -> Result<(), Error> {
        let max = MEM_SIZE - PROGRAM_START;
        if program.len() > max {
            return Err(Error::ProgramTooLarge {
                len: program.len(),
                max,
            });
        }
        self.bytes[PROGRAM_START..PROGRAM_START + program.len()].copy_from_slice(program);
        Ok(())
    }

    /// The big-endian word at `addr` and `addr + 1`.
    pub fn word(&self, addr: u16) -> Result<u16, Error> {
        let bytes = self.slice(addr, 2)?;
        Ok(u16::from(bytes[0]) << 8 | u16::from(bytes[1]))
    }

    pub fn slice(&self, addr: u16, len: usize) -> Result<&[u8], Error> {
        let range = Self::range(addr, len)?;
        Ok(&self.bytes[range])
    }

    pub fn slice_mut(&mut self, addr: u16, len: usize) -> Result<&mut [u8], Error> {
        let range = Self::range(addr, len)?;
        Ok(&mut self.bytes[range])
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn range(addr: u16, len: usize) -> Result<std::ops::Range<usize>, Error> {
        let start = addr as usize;
        let end = start + len;
        if end > MEM_SIZE {
            return Err(Error::AddressOutOfRange((end - 1) as u32));
        }
        Ok(start..end)
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

    #[test]
    fn font_is_loaded_at_the_bottom() {
        let memory = Memory::new();
        assert_eq!(memory.slice(0x000, 5).unwrap(), &[0xF0, 0x90, 0x90, 0x90, 0xF0]);
        assert_eq!(memory.slice(0x4B, 5).unwrap(), &[0xF0, 0x80, 0xF0, 0x80, 0x80]);
    }

    #[test]
    fn program_is_loaded_at_0x200() {
        let mut memory = Memory::new();
        memory.load(&[0x12, 0x34, 0x56]).unwrap();
        assert_eq!(memory.word(0x200).unwrap(), 0x1234);
        assert_eq!(memory.slice(0x202, 1).unwrap(), &[0x56]);
    }

    #[test]
    fn program_filling_memory_exactly_fits() {
        let mut memory = Memory::new();
        let program = vec![0xAA; MEM_SIZE - PROGRAM_START];
        assert_eq!(memory.load(&program), Ok(()));
        assert_eq!(memory.word(0xFFE).unwrap(), 0xAAAA);
    }

    #[test]
    fn oversized_program_is_rejected() {
        let mut memory = Memory::new();
        let program = vec![0; MEM_SIZE - PROGRAM_START + 1];
        assert_eq!(
            memory.load(&program),
            Err(Error::ProgramTooLarge { len: 3585, max: 3584 })
        );
    }

    #[test]
    fn accesses_past_the_end_fail() {
        let mut memory = Memory::new();
        assert_eq!(memory.word(0xFFF), Err(Error::AddressOutOfRange(0x1000)));
        assert_eq!(memory.slice_mut(0xFFE, 3).err(), Some(Error::AddressOutOfRange(0x1000)));
        assert!(memory.slice(0xFFF, 1).is_ok());
    }
}
