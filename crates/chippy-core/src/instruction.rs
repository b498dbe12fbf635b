use crate::error::{Error, Result};

/// # A list of every instruction the interpreter understands
/// ## nnn
/// a hexadecimal memory address, it's 12 bits long
/// ## kk
/// a hexadecimal byte, 8 bits
/// ## n
/// a "nibble" 4 bits
/// ## x and y
/// Registers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// Moves the screen contents down by n rows
    ScrollDown {
        n: u8,
    }, //00cn
    /// Turns all the pixels to the background colour
    ClearScreen, //00e0
    /// Sets the program counter to the last address in the stack
    ReturnFromSubroutine, //00ee
    ScrollRight, //00fb
    ScrollLeft,  //00fc
    /// Stops the program, this is a regular way to end it and not an error
    Exit, //00fd
    /// Back to the 64x32 screen
    LowResolution, //00fe
    /// The 128x64 superchip screen
    HighResolution, //00ff
    /// Host hook: asks the host to run at v0 * 10 hz
    SetCpuFrequency, //0100
    /// Host hook: resets the whole machine
    SoftReset, //0101
    /// Host hook: background colour from v0, foreground colour from v1
    SetColors, //0102
    /// Sets the program counter to whatever nnn is
    Jump {
        nnn: u16,
    }, //1nnn
    CallSubroutineAtNNN {
        nnn: u16,
    }, //2nnn
    /// skips the next instruction only if the register X holds the value kk
    SkipNextInstructionIfXIsKK {
        x: u8,
        kk: u8,
    }, //3xkk
    /// same as previous, except skips if register x does not hold value kk
    SkipNextInstructionIfXIsNotKK {
        x: u8,
        kk: u8,
    }, //4xkk
    SkipNextInstructionIfXIsY {
        x: u8,
        y: u8,
    }, //5xy0
    /// Set register x to the value kk
    LoadRegisterX {
        x: u8,
        kk: u8,
    }, //6xkk
    /// Adds the value kk to register x
    AddToRegisterX {
        x: u8,
        kk: u8,
    }, //7xkk
    /// Stores the value of register Vy in register Vx
    LoadRegisterYIntoX {
        x: u8,
        y: u8,
    }, //8xy0
    /// Sets the value of register x to the result of binary OR-ing register x and y
    LoadXOrYinX {
        x: u8,
        y: u8,
    }, //8xy1
    /// Sets the value of register x to the result of binary AND-ing register x and y
    LoadXAndYInX {
        x: u8,
        y: u8,
    }, //8xy2
    /// Sets the value of register x to the result of binary XOR-ing register x and y
    LoadXXorYInX {
        x: u8,
        y: u8,
    }, //8xy3
    /// Sets the value of register x to the value of itself added to that of register y
    AddYToX {
        x: u8,
        y: u8,
    }, //8xy4
    /// vx - vy
    SubYFromX {
        x: u8,
        y: u8,
    }, //8xy5
    /// shift the value of register x one bit to the right
    ShiftXRight1 {
        x: u8,
    }, //8xy6
    /// vy - vx, stored in register x
    SubXFromY {
        x: u8,
        y: u8,
    }, //8xy7
    /// shift the value of register x one bit to the left
    ShiftXLeft1 {
        x: u8,
    }, //8xye
    SkipNextInstructionIfXIsNotY {
        x: u8,
        y: u8,
    }, //9xy0
    /// set index register I to nnn
    SetIndexRegister {
        nnn: u16,
    }, //annn
    /// jump to address nnn + v0
    JumpToAddressPlusV0 {
        nnn: u16,
    }, //bnnn
    SetXToRandom {
        x: u8,
        kk: u8,
    }, //cxkk
    /// draws a sprite at coordinate from vx and vy, of width 8 and height n.
    /// n == 0 on the 128 wide screen draws a 16x16 sprite
    Display {
        x: u8,
        y: u8,
        n: u8,
    }, //dxyn
    SkipIfVxPressed {
        x: u8,
    }, //ex9e
    SkipIfVxNotPressed {
        x: u8,
    }, //exa1
    SetXToDelayTimer {
        x: u8,
    }, //fx07
    WaitForKeyPressed {
        x: u8,
    }, //fx0a
    SetDelayTimerToX {
        x: u8,
    }, //fx15
    SetSoundTimerToX {
        x: u8,
    }, //fx18
    AddXtoI {
        x: u8,
    }, //fx1e
    SetIToSpriteX {
        x: u8,
    }, //fx29
    LoadBCDOfX {
        x: u8,
    }, //fx33
    Write0ThroughX {
        x: u8,
    }, //fx55
    Load0ThroughX {
        x: u8,
    }, //fx65
}

impl Instruction {
    /// Takes two bytes, and decodes what instruction they represent
    pub fn decode(opcode: u16) -> Result<Self> {
        let x = Self::get_nibble(opcode, 1);
        let y = Self::get_nibble(opcode, 2);
        let n = Self::get_nibble(opcode, 3);
        let kk = Self::last_byte(opcode);
        let nnn = Self::oxxx(opcode);

        let instruction = match Self::get_nibble(opcode, 0) {
            0x0 => match nnn {
                0x0C0..=0x0CF => Instruction::ScrollDown { n },
                0x0E0 => Instruction::ClearScreen,
                0x0EE => Instruction::ReturnFromSubroutine,
                0x0FB => Instruction::ScrollRight,
                0x0FC => Instruction::ScrollLeft,
                0x0FD => Instruction::Exit,
                0x0FE => Instruction::LowResolution,
                0x0FF => Instruction::HighResolution,
                0x100 => Instruction::SetCpuFrequency,
                0x101 => Instruction::SoftReset,
                0x102 => Instruction::SetColors,
                _ => return Err(Error::InvalidOpcode(opcode)),
            },
            0x1 => Instruction::Jump { nnn },
            0x2 => Instruction::CallSubroutineAtNNN { nnn },
            0x3 => Instruction::SkipNextInstructionIfXIsKK { x, kk },
            0x4 => Instruction::SkipNextInstructionIfXIsNotKK { x, kk },
            0x5 if n == 0 => Instruction::SkipNextInstructionIfXIsY { x, y },
            0x6 => Instruction::LoadRegisterX { x, kk },
            0x7 => Instruction::AddToRegisterX { x, kk },
            0x8 => match n {
                0x0 => Instruction::LoadRegisterYIntoX { x, y },
                0x1 => Instruction::LoadXOrYinX { x, y },
                0x2 => Instruction::LoadXAndYInX { x, y },
                0x3 => Instruction::LoadXXorYInX { x, y },
                0x4 => Instruction::AddYToX { x, y },
                0x5 => Instruction::SubYFromX { x, y },
                0x6 => Instruction::ShiftXRight1 { x },
                0x7 => Instruction::SubXFromY { x, y },
                0xE => Instruction::ShiftXLeft1 { x },
                _ => return Err(Error::InvalidOpcode(opcode)),
            },
            0x9 if n == 0 => Instruction::SkipNextInstructionIfXIsNotY { x, y },
            0xA => Instruction::SetIndexRegister { nnn },
            0xB => Instruction::JumpToAddressPlusV0 { nnn },
            0xC => Instruction::SetXToRandom { x, kk },
            0xD => Instruction::Display { x, y, n },
            0xE => match kk {
                0x9E => Instruction::SkipIfVxPressed { x },
                0xA1 => Instruction::SkipIfVxNotPressed { x },
                _ => return Err(Error::InvalidOpcode(opcode)),
            },
            0xF => match kk {
                0x07 => Instruction::SetXToDelayTimer { x },
                0x0A => Instruction::WaitForKeyPressed { x },
                0x15 => Instruction::SetDelayTimerToX { x },
                0x18 => Instruction::SetSoundTimerToX { x },
                0x1E => Instruction::AddXtoI { x },
                0x29 => Instruction::SetIToSpriteX { x },
                0x33 => Instruction::LoadBCDOfX { x },
                0x55 => Instruction::Write0ThroughX { x },
                0x65 => Instruction::Load0ThroughX { x },
                0x30 | 0x75 | 0x85 => return Err(Error::UnsupportedInstruction(opcode)),
                _ => return Err(Error::InvalidOpcode(opcode)),
            },
            _ => return Err(Error::InvalidOpcode(opcode)),
        };
        Ok(instruction)
    }

    /// The 0x100 - 0x102 hooks that talk to the host instead of the machine
    pub fn is_host_extension(&self) -> bool {
        matches!(
            self,
            Instruction::SetCpuFrequency | Instruction::SoftReset | Instruction::SetColors
        )
    }

    /// A nibble is 4 bits, this returns the nth nibble counting from the most significant one
    fn get_nibble(opcode: u16, nth: u8) -> u8 {
        debug_assert!(nth < 4);
        ((opcode >> (12 - 4 * nth)) & 0xf) as u8
    }
    /// Returns the last full byte byte of an opcode
    fn last_byte(opcode: u16) -> u8 {
        (opcode & 0xff) as u8
    }
    /// Returns the the last 12 bits of an opcode
    fn oxxx(opcode: u16) -> u16 {
        opcode & 0xfff
    }
}
