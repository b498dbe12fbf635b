use rand::RngCore;

/// Everything the interpreter needs from the outside world.
///
/// A host is whatever presents the machine: a window, a terminal, a test harness. All calls are
/// made synchronously from inside [`Cpu::step`](crate::Cpu::step), [`Cpu::refresh`](crate::Cpu::refresh)
/// and [`Cpu::reset`](crate::Cpu::reset) and are expected to return right away.
pub trait Host {
    /// Fill the program region of ram (everything from 0x200 up) with a program image
    fn load_program(&mut self, memory: &mut [u8]);

    /// Present the visible pixel plane, row after row. Its length tells the resolution:
    /// 64x32 or 128x64 cells.
    fn draw(&mut self, plane: &[u8]);

    /// Whether key `key` (0x0 through 0xF) of the hexadecimal keypad is held down
    fn is_key_down(&self, key: u8) -> bool;

    /// A fresh random number generator, asked for once on every reset
    fn random_source(&mut self) -> Box<dyn RngCore>;

    fn begin_tone(&mut self);

    fn end_tone(&mut self);

    /// The running program asked for a different instruction rate, in hertz
    fn set_frequency(&mut self, _hz: u32) {}

    /// The display switched between 64 and 128 pixels wide
    fn on_resize(&mut self, _width: usize) {}
}
