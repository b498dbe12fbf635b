use std::time::Instant;

use rand::{Rng, RngCore};

use crate::constants::{
    DISPLAY_WIDTH, FONT_GLYPH_SIZE, HIRES_DISPLAY_WIDTH, NUM_KEYS, ROM_START_ADDRESS,
};
use crate::display::Display;
use crate::error::{Error, Result, StepResult};
use crate::host::Host;
use crate::instruction::Instruction;
use crate::ram::Ram;
use crate::registers::Registers;
use crate::stack::Stack;
use crate::timer::TimerGate;

/// Behaviour that differs between interpreters and that programs sometimes rely on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Quirks {
    /// Use the usual "vf = 1 when there was no borrow" rule for 8xy7, so vy == vx also sets the
    /// flag. Off by default, then 8xy7 only sets vf when vy is strictly larger. Either way 8xy7
    /// stores vy - vx, some interpreters compute vx - vy here and that order is not available.
    pub standard_borrow_flag: bool,
    /// Let programs reach the host through 0x0100, 0x0101 and 0x0102. Off by default, then those
    /// opcodes are invalid like any other unknown 0nnn.
    pub host_extensions: bool,
}

/// The main cpu, owns the whole machine state and the host it talks to
pub struct Cpu<H: Host> {
    /// The pixel plane, 64x32 or 128x64
    display: Display,
    ///Program counter, used to keep track of what to fetch,decode and execute from ram, initialized at 0x200
    program_counter: u16,
    /// The memory, stores the rom data when loaded
    memory: Ram,
    /// Registers 0x0 through 0xF, the index register and both timers
    registers: Registers,
    stack: Stack,
    /// Handed out by the host on every reset, so tests can use a fixed seed
    rng: Box<dyn RngCore>,
    /// Used to check which quirks should be enabled or disabled
    quirks: Quirks,
    timer: TimerGate,
    host: H,
}

impl<H: Host> Cpu<H> {
    /// Creates a new cpu with the default quirks, the host gets asked to load its program right
    /// away
    pub fn new(host: H) -> Self {
        Self::with_quirks(host, Quirks::default())
    }

    pub fn with_quirks(mut host: H, quirks: Quirks) -> Self {
        let rng = host.random_source();
        let mut cpu = Self {
            display: Display::new(),
            program_counter: ROM_START_ADDRESS,
            memory: Ram::with_fonts(),
            registers: Registers::default(),
            stack: Stack::default(),
            rng,
            quirks,
            timer: TimerGate::starting_at(Instant::now()),
            host,
        };
        cpu.load_program();
        cpu
    }

    /// Puts the machine back in the state it was created in and reloads the program. Nothing but
    /// the quirks survives a reset.
    pub fn reset(&mut self) {
        let was_hires = self.display.width() != DISPLAY_WIDTH;
        let was_sounding = self.registers.get_sound_timer() != 0;

        self.rng = self.host.random_source();
        self.memory = Ram::with_fonts();
        self.registers = Registers::default();
        self.stack = Stack::default();
        self.program_counter = ROM_START_ADDRESS;
        self.display = Display::new();
        self.timer = TimerGate::starting_at(Instant::now());

        if was_sounding {
            self.host.end_tone();
        }
        if was_hires {
            self.host.on_resize(DISPLAY_WIDTH);
        }
        self.load_program();
    }

    fn load_program(&mut self) {
        self.host.load_program(self.memory.program_mut());
        log::debug!("program loaded, program counter at {:#05X}", self.program_counter);
    }

    /// Returns two bytes from memory at the location where the program counter currently points to
    fn fetch(&self) -> u16 {
        self.memory.get_opcode(self.program_counter)
    }

    /// A single cpu cycle: fetches and decodes an opcode, moves the program counter past it,
    /// executes it and then gives the timers a chance to tick.
    ///
    /// Opcodes that fail to decode are returned as an error before anything in the machine
    /// changes, so the host can still inspect or dump the state that led to it.
    pub fn step(&mut self) -> Result<StepResult> {
        let opcode = self.fetch();
        let instruction = Instruction::decode(opcode)?;
        if instruction.is_host_extension() && !self.quirks.host_extensions {
            return Err(Error::InvalidOpcode(opcode));
        }
        log::trace!(
            "{:#05X}: {:#06X} {:?}",
            self.program_counter,
            opcode,
            instruction
        );

        self.program_counter = self.program_counter.wrapping_add(2);
        let result = self.execute(instruction);
        if result == StepResult::Continue {
            self.tick_timers_at(Instant::now());
        }
        Ok(result)
    }

    /// Hands the display to the host, but only if something changed since the last refresh
    pub fn refresh(&mut self) {
        if self.display.take_dirty() {
            self.host.draw(self.display.pixels());
        }
    }

    fn tick_timers_at(&mut self, now: Instant) {
        if !self.timer.poll(now) {
            return;
        }
        self.registers.decrement_delay_timer();
        if self.registers.decrement_sound_timer() {
            self.host.end_tone();
        }
    }

    fn skip_next_if(&mut self, condition: bool) {
        if condition {
            self.program_counter = self.program_counter.wrapping_add(2);
        }
    }

    fn switch_resolution(&mut self, width: usize) {
        self.display.resize(width);
        self.host.on_resize(width);
        log::debug!("display switched to {}x{}", width, self.display.height());
    }

    ///Execute the instruction, for details on the instruction, check the instruction enum
    ///definition
    fn execute(&mut self, instruction: Instruction) -> StepResult {
        match instruction {
            //00CN
            Instruction::ScrollDown { n } => {
                self.display.scroll_down(usize::from(n));
            }
            //00E0
            Instruction::ClearScreen => {
                self.display.clear();
            }
            //00EE
            Instruction::ReturnFromSubroutine => {
                self.program_counter = self.stack.pop();
            }
            //00FB
            Instruction::ScrollRight => {
                self.display.scroll_right();
            }
            //00FC
            Instruction::ScrollLeft => {
                self.display.scroll_left();
            }
            //00FD
            Instruction::Exit => {
                log::debug!("program exited at {:#05X}", self.program_counter);
                return StepResult::Exit;
            }
            //00FE
            Instruction::LowResolution => {
                self.switch_resolution(DISPLAY_WIDTH);
            }
            //00FF
            Instruction::HighResolution => {
                self.switch_resolution(HIRES_DISPLAY_WIDTH);
            }
            //0100
            Instruction::SetCpuFrequency => {
                let v0 = u32::from(self.registers.get_register(0));
                self.host.set_frequency(v0 * 10);
            }
            //0101
            Instruction::SoftReset => {
                self.reset();
            }
            //0102
            Instruction::SetColors => {
                let background = self.registers.get_register(0);
                let foreground = self.registers.get_register(1);
                self.display.set_colors(background, foreground);
            }
            //1NNN
            Instruction::Jump { nnn } => {
                self.program_counter = nnn;
            }
            //2NNN
            Instruction::CallSubroutineAtNNN { nnn } => {
                self.stack.push(self.program_counter);
                self.program_counter = nnn;
            }
            //3XKK
            Instruction::SkipNextInstructionIfXIsKK { x, kk } => {
                let vx = self.registers.get_register(x);
                self.skip_next_if(vx == kk);
            }
            //4XKK
            Instruction::SkipNextInstructionIfXIsNotKK { x, kk } => {
                let vx = self.registers.get_register(x);
                self.skip_next_if(vx != kk);
            }
            //5XY0
            Instruction::SkipNextInstructionIfXIsY { x, y } => {
                let vx = self.registers.get_register(x);
                let vy = self.registers.get_register(y);
                self.skip_next_if(vx == vy);
            }
            //6XKK
            Instruction::LoadRegisterX { x, kk } => {
                self.registers.set_register(x, kk);
            }
            //7XKK
            Instruction::AddToRegisterX { x, kk } => {
                let vx = self.registers.get_register(x);
                self.registers.set_register(x, vx.wrapping_add(kk));
            }
            //8xy0
            Instruction::LoadRegisterYIntoX { x, y } => {
                let vy = self.registers.get_register(y);
                self.registers.set_register(x, vy);
            }
            //8xy1
            Instruction::LoadXOrYinX { x, y } => {
                let vx = self.registers.get_register(x);
                let vy = self.registers.get_register(y);
                self.registers.set_register(x, vx | vy);
            }
            //8xy2
            Instruction::LoadXAndYInX { x, y } => {
                let vx = self.registers.get_register(x);
                let vy = self.registers.get_register(y);
                self.registers.set_register(x, vx & vy);
            }
            //8xy3
            Instruction::LoadXXorYInX { x, y } => {
                let vx = self.registers.get_register(x);
                let vy = self.registers.get_register(y);
                self.registers.set_register(x, vx ^ vy);
            }
            //8xy4
            Instruction::AddYToX { x, y } => {
                let vx = self.registers.get_register(x);
                let vy = self.registers.get_register(y);

                let (res, carry) = vx.overflowing_add(vy);
                self.registers.set_register(x, res);
                self.registers.set_flag(carry);
            }
            //8xy5
            Instruction::SubYFromX { x, y } => {
                let vx = self.registers.get_register(x);
                let vy = self.registers.get_register(y);

                let (res, borrow) = vx.overflowing_sub(vy);
                self.registers.set_register(x, res);
                self.registers.set_flag(!borrow);
            }
            //8xy6
            Instruction::ShiftXRight1 { x } => {
                let vx = self.registers.get_register(x);
                self.registers.set_register(x, vx >> 1);
                self.registers.set_flag(vx & 1 == 1);
            }
            //8xy7
            Instruction::SubXFromY { x, y } => {
                let vx = self.registers.get_register(x);
                let vy = self.registers.get_register(y);

                let flag = if self.quirks.standard_borrow_flag {
                    vy >= vx
                } else {
                    vy > vx
                };
                self.registers.set_register(x, vy.wrapping_sub(vx));
                self.registers.set_flag(flag);
            }
            //8xyE
            Instruction::ShiftXLeft1 { x } => {
                let vx = self.registers.get_register(x);
                self.registers.set_register(x, vx << 1);
                self.registers.set_flag(vx >> 7 == 1);
            }
            //9XY0
            Instruction::SkipNextInstructionIfXIsNotY { x, y } => {
                let vx = self.registers.get_register(x);
                let vy = self.registers.get_register(y);
                self.skip_next_if(vx != vy);
            }
            //ANNN
            Instruction::SetIndexRegister { nnn } => {
                self.registers.set_index_register(nnn);
            }
            //BNNN
            Instruction::JumpToAddressPlusV0 { nnn } => {
                let v0 = u16::from(self.registers.get_register(0));
                self.program_counter = nnn + v0;
            }
            //CXKK
            Instruction::SetXToRandom { x, kk } => {
                let random_byte = self.rng.random_range(0..255u8);
                self.registers.set_register(x, random_byte & kk);
            }
            //DXYN
            Instruction::Display { x, y, n } => {
                self.draw_sprite(x, y, n);
            }
            //EX9E
            Instruction::SkipIfVxPressed { x } => {
                let key = self.registers.get_register(x) & 0xF;
                let pressed = self.host.is_key_down(key);
                self.skip_next_if(pressed);
            }
            //EXA1
            Instruction::SkipIfVxNotPressed { x } => {
                let key = self.registers.get_register(x) & 0xF;
                let pressed = self.host.is_key_down(key);
                self.skip_next_if(!pressed);
            }
            //FX07
            Instruction::SetXToDelayTimer { x } => {
                let delay = self.registers.get_delay_timer();
                self.registers.set_register(x, delay);
            }
            //FX0A
            Instruction::WaitForKeyPressed { x } => {
                match (0..NUM_KEYS).find(|key| self.host.is_key_down(*key)) {
                    Some(key) => self.registers.set_register(x, key),
                    // Stay on this instruction, the host keeps on stepping until a key shows up
                    None => self.program_counter = self.program_counter.wrapping_sub(2),
                }
            }
            //FX15
            Instruction::SetDelayTimerToX { x } => {
                let vx = self.registers.get_register(x);
                self.registers.set_delay_timer(vx);
            }
            //FX18
            Instruction::SetSoundTimerToX { x } => {
                let vx = self.registers.get_register(x);
                let previous = self.registers.get_sound_timer();
                self.registers.set_sound_timer(vx);
                if previous == 0 && vx != 0 {
                    self.host.begin_tone();
                } else if previous != 0 && vx == 0 {
                    self.host.end_tone();
                }
            }
            //FX1E
            Instruction::AddXtoI { x } => {
                let vx = u16::from(self.registers.get_register(x));
                let vi = self.registers.get_index_register();
                self.registers.set_index_register(vi.wrapping_add(vx));
            }
            //FX29
            Instruction::SetIToSpriteX { x } => {
                let vx = u16::from(self.registers.get_register(x));
                //the sprite at *index* x, not location x.
                self.registers.set_index_register(vx * FONT_GLYPH_SIZE);
            }
            //FX33
            Instruction::LoadBCDOfX { x } => {
                let vx = self.registers.get_register(x);
                let vi = self.registers.get_index_register();
                self.memory.set(vi, vx / 100);
                self.memory.set(vi.wrapping_add(1), (vx / 10) % 10);
                self.memory.set(vi.wrapping_add(2), vx % 10);
            }
            //FX55
            Instruction::Write0ThroughX { x } => {
                let vi = self.registers.get_index_register();
                for register in 0..=x {
                    let value = self.registers.get_register(register);
                    self.memory.set(vi.wrapping_add(u16::from(register)), value);
                }
            }
            //FX65
            Instruction::Load0ThroughX { x } => {
                let vi = self.registers.get_index_register();
                for register in 0..=x {
                    let value = self.memory.get_byte(vi.wrapping_add(u16::from(register)));
                    self.registers.set_register(register, value);
                }
            }
        }
        StepResult::Continue
    }

    /// Draws the sprite at memory\[I\] with its top left corner at (vx, vy). vf ends up as 1 if any
    /// lit pixel hit an already lit one.
    fn draw_sprite(&mut self, x: u8, y: u8, n: u8) {
        let start_x = usize::from(self.registers.get_register(x));
        let start_y = usize::from(self.registers.get_register(y));
        let sprite_start = self.registers.get_index_register();

        // a height of 0 on the big screen is a 16x16 sprite, stored as two bytes per row
        let (rows, bytes_per_row) = if n == 0 && self.display.width() == HIRES_DISPLAY_WIDTH {
            (16, 2)
        } else {
            (usize::from(n), 1)
        };

        self.registers.set_flag(false);
        let mut collision = false;
        for sprite_row in 0..rows {
            for byte in 0..bytes_per_row {
                let offset = (sprite_row * bytes_per_row + byte) as u16;
                let sprite = self.memory.get_byte(sprite_start.wrapping_add(offset));
                for sprite_column in 0..8 {
                    if sprite >> (7 - sprite_column) & 1 == 1 {
                        collision |= self
                            .display
                            .plot(start_x + byte * 8 + sprite_column, start_y + sprite_row);
                    }
                }
            }
        }
        self.registers.set_flag(collision);
    }

    pub fn program_counter(&self) -> u16 {
        self.program_counter
    }

    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    pub fn memory(&self) -> &Ram {
        &self.memory
    }

    pub fn display(&self) -> &Display {
        &self.display
    }

    pub fn quirks(&self) -> Quirks {
        self.quirks
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}
