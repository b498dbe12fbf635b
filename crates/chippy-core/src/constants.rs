/// The width of the display in pixels in the standard chip8 mode
pub const DISPLAY_WIDTH: usize = 64;
/// The height of the display in pixels in the standard chip8 mode
pub const DISPLAY_HEIGHT: usize = 32;
/// The width of the display in the extended (superchip) mode
pub const HIRES_DISPLAY_WIDTH: usize = 128;
/// The height of the display in the extended (superchip) mode
pub const HIRES_DISPLAY_HEIGHT: usize = 64;
/// The size of ram in bytes
pub const RAM_SIZE: usize = 4096;
/// Every address is reduced to 12 bits before it touches ram
pub const ADDRESS_MASK: u16 = 0x0FFF;
/// For the regular chip 8 roms
pub const ROM_START_ADDRESS: u16 = 0x200;
/// Amount of registers CHIP-8 has
pub const NUM_REGISTERS: u8 = 16;
/// Amount of keys on the hexadecimal keypad
pub const NUM_KEYS: u8 = 16;
/// Depth of the call stack
pub const STACK_SIZE: usize = 16;
/// How often per second the delay and sound timers count down
pub const TIMER_HZ: u32 = 60;
/// The register that doubles as carry, borrow and collision flag
pub const FLAG_REGISTER: u8 = 0xF;
/// The amount of bytes a single glyph of the fontset takes up
pub const FONT_GLYPH_SIZE: u16 = 5;

/// The built in fontset, 16 glyphs (0-F) of 4x5 pixels, loaded at address 0.
/// Each byte is one row of a glyph, the high nibble holds the pixels:
///
/// ```text
/// 0xF0  1111
/// 0x90  1  1
/// 0x90  1  1
/// 0x90  1  1
/// 0xF0  1111
/// ```
pub const FONTSET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, //0
    0x20, 0x60, 0x20, 0x20, 0x70, //1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, //2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, //3
    0x90, 0x90, 0xF0, 0x10, 0x10, //4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, //5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, //6
    0xF0, 0x10, 0x20, 0x40, 0x40, //7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, //8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, //9
    0xF0, 0x90, 0xF0, 0x90, 0x90, //a
    0xE0, 0x90, 0xE0, 0x90, 0xE0, //b
    0xF0, 0x80, 0x80, 0x80, 0xF0, //c
    0xE0, 0x90, 0x90, 0x90, 0xE0, //d
    0xF0, 0x80, 0xF0, 0x80, 0xF0, //e
    0xF0, 0x80, 0xF0, 0x80, 0x80, //f
];
