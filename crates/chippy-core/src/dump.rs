use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use crate::cpu::Cpu;
use crate::host::Host;

impl<H: Host> Cpu<H> {
    /// Writes a human readable snapshot of the machine: registers, the call stack, all of ram and
    /// a 64x32 text rendering of the screen. On the 128x64 screen every second pixel of every
    /// second row is shown, so the whole screen fits. Dumps that print only the top left 64x32
    /// cells of a 128 wide screen will not match line for line.
    pub fn dump<W: Write>(&self, writer: &mut W, name: &str) -> io::Result<()> {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default();
        writeln!(writer, "{timestamp}\n{name}\n")?;

        let registers = self.registers();
        writeln!(
            writer,
            "PC: {:#X}, SP: {:#X}, I: {:#X}\n",
            self.program_counter(),
            self.stack().pointer(),
            registers.get_index_register()
        )?;
        for (index, value) in registers.all().iter().enumerate() {
            writeln!(writer, "V{index:X}: {value:#X}")?;
        }

        writeln!(writer)?;
        let stack: Vec<u8> = self
            .stack()
            .values()
            .iter()
            .flat_map(|address| address.to_be_bytes())
            .collect();
        hexdump(writer, &stack)?;

        writeln!(writer)?;
        hexdump(writer, self.memory().bytes())?;

        let display = self.display();
        let step = display.width() / DISPLAY_WIDTH;
        let background = display.background();
        for y in 0..DISPLAY_HEIGHT {
            writeln!(writer)?;
            let row: String = (0..DISPLAY_WIDTH)
                .map(|x| display.pixels()[y * step * display.width() + x * step])
                .map(|cell| if cell != background { '#' } else { '.' })
                .collect();
            write!(writer, "{row}")?;
        }
        writeln!(writer)
    }
}

/// The canonical `hexdump -C` layout: offset, 16 bytes split in two groups, and the printable
/// characters between bars
fn hexdump<W: Write>(writer: &mut W, bytes: &[u8]) -> io::Result<()> {
    for (line, chunk) in bytes.chunks(16).enumerate() {
        write!(writer, "{:08x} ", line * 16)?;
        for column in 0..16 {
            if column == 8 {
                write!(writer, " ")?;
            }
            match chunk.get(column) {
                Some(byte) => write!(writer, " {byte:02x}")?,
                None => write!(writer, "   ")?,
            }
        }
        let printable: String = chunk
            .iter()
            .map(|byte| {
                if byte.is_ascii_graphic() || *byte == b' ' {
                    char::from(*byte)
                } else {
                    '.'
                }
            })
            .collect();
        writeln!(writer, "  |{printable}|")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::tests::cpu_with;

    fn dump_to_string(cpu: &Cpu<crate::cpu::tests::TestHost>) -> String {
        let mut out = Vec::new();
        cpu.dump(&mut out, "test.ch8").unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn hexdump_matches_the_canonical_layout() {
        let mut out = Vec::new();
        let bytes: Vec<u8> = (0x41..0x41 + 18).collect();
        hexdump(&mut out, &bytes).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("00000000  41 42 43 44 45 46 47 48  49 4a 4b 4c 4d 4e 4f 50  |ABCDEFGHIJKLMNOP|")
        );
        assert_eq!(
            lines.next(),
            Some("00000010  51 52                                             |QR|")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn dumps_registers_stack_memory_and_screen() {
        // v3 = 0xAB, call 0x206, draw the glyph for 0 at (0, 0)
        let mut cpu = cpu_with(vec![0x63, 0xAB, 0x22, 0x06, 0x00, 0x00, 0xD0, 0x15]);
        for _ in 0..3 {
            cpu.step().unwrap();
        }
        let text = dump_to_string(&cpu);
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].parse::<u64>().is_ok());
        assert_eq!(lines[1], "test.ch8");
        assert_eq!(lines[3], "PC: 0x208, SP: 0x1, I: 0x0");
        assert_eq!(lines[5], "V0: 0x0");
        assert_eq!(lines[8], "V3: 0xAB");
        assert_eq!(lines[20], "VF: 0x0");
        // the return address 0x204 as a big endian word
        assert!(lines[22].starts_with("00000000  02 04 00 00"));
        assert!(lines[25].starts_with("00000000  f0 90 90 90 f0"));

        let screen = &lines[lines.len() - 32..];
        assert!(screen.iter().all(|row| row.len() == 64));
        assert!(screen[0].starts_with("####."));
        assert!(screen[1].starts_with("#..#."));
        assert!(screen[31].chars().all(|c| c == '.'));
    }

    #[test]
    fn samples_the_high_resolution_screen() {
        let mut cpu = cpu_with(vec![0x00, 0xFF, 0xD0, 0x11]);
        cpu.step().unwrap();
        cpu.step().unwrap();
        let text = dump_to_string(&cpu);
        let screen: Vec<&str> = text.lines().rev().take(32).collect();
        // 0xF0 lights x 0..=3, every second one of those shows up
        assert!(screen[31].starts_with("##.."));
    }
}
