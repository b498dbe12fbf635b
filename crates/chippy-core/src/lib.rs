//! A chip8 interpreter with the parts of the superchip that programs commonly use: the 128x64
//! screen, scrolling and 16x16 sprites.
//!
//! The interpreter never schedules anything itself. A host implements [`Host`], creates a
//! [`Cpu`] and calls [`Cpu::step`] for every instruction and [`Cpu::refresh`] about 60 times a
//! second.

///This holds all of the constants (written in capital letters in the code)
mod constants;
///Handles the fetch, decode execute cycle
mod cpu;
///The pixel plane and its drawing rules
mod display;
///Writes a text snapshot of the machine
mod dump;
mod error;
///What the cpu needs from whoever runs it
mod host;
///An overview of all instructions in the chip 8 instruction set architecture
mod instruction;
///A data structure modeling ram
mod ram;
///The registers for the chip8 cpu
mod registers;
///Holds the data loaded from disk
mod rombuffer;
///The stack that is used in the cpu
mod stack;
mod timer;

// Re-export everything a host needs to drive and present the machine
pub use constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, HIRES_DISPLAY_HEIGHT, HIRES_DISPLAY_WIDTH, NUM_KEYS,
    RAM_SIZE, ROM_START_ADDRESS,
};
pub use cpu::{Cpu, Quirks};
pub use display::{DEFAULT_BACKGROUND, DEFAULT_FOREGROUND, Display, DrawMode};
pub use error::{Error, Result, StepResult};
pub use host::Host;
pub use instruction::Instruction;
pub use ram::Ram;
pub use registers::Registers;
pub use rombuffer::RomBuffer;
pub use stack::Stack;
pub use timer::TimerGate;
