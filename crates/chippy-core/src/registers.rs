use crate::constants::{FLAG_REGISTER, NUM_REGISTERS};

#[derive(Clone, Copy, Default)]
///# Holds all the registers and the sound and delay timers
pub struct Registers {
    register: [u8; NUM_REGISTERS as usize],
    vindex: u16,
    /// 0 by default, unless its set to a number then it will just start decrementing by one 60 times per
    /// second
    delay_timer: u8,
    /// Decremented at 60hz like the delay timer. The tone plays while it is not zero
    sound_timer: u8,
}

impl Registers {
    pub fn set_index_register(&mut self, value: u16) {
        self.vindex = value;
    }
    pub fn get_index_register(&self) -> u16 {
        self.vindex
    }
    pub fn set_sound_timer(&mut self, value: u8) {
        self.sound_timer = value;
    }
    pub fn get_sound_timer(&self) -> u8 {
        self.sound_timer
    }
    pub fn set_delay_timer(&mut self, value: u8) {
        self.delay_timer = value;
    }
    pub fn get_delay_timer(&self) -> u8 {
        self.delay_timer
    }
    pub fn decrement_delay_timer(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
    }
    /// Returns true when this decrement is the one that silenced the sound timer
    pub fn decrement_sound_timer(&mut self) -> bool {
        if self.sound_timer > 0 {
            self.sound_timer -= 1;
            return self.sound_timer == 0;
        }
        false
    }

    pub fn get_register(&self, register: u8) -> u8 {
        self.register[(register & 0xF) as usize]
    }
    pub fn set_register(&mut self, register: u8, value: u8) {
        self.register[(register & 0xF) as usize] = value;
    }
    /// Writes vf, always done after the result register so the flag wins when x is 0xf
    pub fn set_flag(&mut self, value: bool) {
        self.set_register(FLAG_REGISTER, u8::from(value));
    }
    pub fn all(&self) -> &[u8; NUM_REGISTERS as usize] {
        &self.register
    }
}
