use crate::constants::STACK_SIZE;

/// 16 16-bit addresses, used to call subroutines or functions and return from them.
/// The stack pointer is only 4 bits wide, so a 17th nested call overwrites the first slot and a
/// return from an empty stack reads the last one.
#[derive(Clone, Copy, Default)]
pub struct Stack {
    values: [u16; STACK_SIZE],
    pointer: u8,
}

impl Stack {
    pub fn push(&mut self, address: u16) {
        self.values[self.pointer as usize] = address;
        self.pointer = (self.pointer + 1) & 0xF;
    }

    pub fn pop(&mut self) -> u16 {
        self.pointer = self.pointer.wrapping_sub(1) & 0xF;
        self.values[self.pointer as usize]
    }

    pub fn pointer(&self) -> u8 {
        self.pointer
    }

    pub fn values(&self) -> &[u16; STACK_SIZE] {
        &self.values
    }
}
