use crate::constants::{ADDRESS_MASK, FONTSET, RAM_SIZE, ROM_START_ADDRESS};

///The ram of the chip8 cpu, uses big endian, and is laid out in the following way:
///0x000 start of chip-8 ram
///0x000 to 0x050 fontset
///0x200 start of chip-8 programs
///0xfff end of chip8 ram
///
///Every address is masked to 12 bits, so an index register that runs past 0xfff wraps around to
///the start of ram instead of reading outside of it.
#[derive(Debug, Copy, Clone)]
pub struct Ram {
    bytes: [u8; RAM_SIZE],
}

impl Ram {
    /// Returns the ram with the fontset already loaded
    pub fn with_fonts() -> Self {
        let mut ram = Self {
            bytes: [0; RAM_SIZE],
        };
        ram.bytes[..FONTSET.len()].copy_from_slice(&FONTSET);
        ram
    }

    /// Returns the big endian opcode made up of the bytes at `address` and `address + 1`
    pub fn get_opcode(&self, address: u16) -> u16 {
        u16::from(self.get_byte(address)) << 8 | u16::from(self.get_byte(address.wrapping_add(1)))
    }

    pub fn get_byte(&self, address: u16) -> u8 {
        self.bytes[Self::mask(address)]
    }

    pub fn set(&mut self, address: u16, value: u8) {
        self.bytes[Self::mask(address)] = value;
    }

    /// The part of ram a program image gets copied in to
    pub fn program_mut(&mut self) -> &mut [u8] {
        &mut self.bytes[ROM_START_ADDRESS as usize..]
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn mask(address: u16) -> usize {
        (address & ADDRESS_MASK) as usize
    }
}

impl Default for Ram {
    fn default() -> Self {
        Self::with_fonts()
    }
}
