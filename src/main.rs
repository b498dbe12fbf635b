//! Runs a chip8 program without a window.
//!
//! Useful for checking that a rom runs to completion, for reproducing a crash with a fixed
//! `--seed`, and for getting a `--dump` of the machine at the point where it stopped.
//!
//! ```bash
//! RUST_LOG=info chippy roms/maze.ch8 --max-cycles 5000 --seed 7 --dump maze.txt
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use chippy_core::{Cpu, Host, Quirks, RomBuffer, StepResult};
use clap::Parser;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// How often the display gets handed to the host
const REFRESH_INTERVAL: Duration = Duration::from_nanos(1_000_000_000 / 60);
const DEFAULT_INSTRUCTIONS_PER_SECOND: u32 = 500;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(help = "Path to the rom to run")]
    rom: PathBuf,

    #[arg(long, default_value_t = DEFAULT_INSTRUCTIONS_PER_SECOND, value_parser = clap::value_parser!(u32).range(1..), help = "Instructions per second")]
    hz: u32,

    #[arg(long, help = "Stop after this many instructions")]
    max_cycles: Option<u64>,

    #[arg(long, help = "Seed for the random number generator, random when left out")]
    seed: Option<u64>,

    #[arg(long, help = "Write a dump of the machine to this file when it stops")]
    dump: Option<PathBuf>,

    #[arg(long, help = "Let the program use the 0x0100-0x0102 host instructions")]
    host_extensions: bool,

    #[arg(long, help = "Let 8xy7 set vf when vy equals vx")]
    standard_borrow_flag: bool,
}

/// A host with no screen, no sound and no keyboard. Everything the program asks of it ends up in
/// the log.
struct HeadlessHost {
    rom: RomBuffer,
    seed: Option<u64>,
    instructions_per_second: u32,
    frames: u64,
}

impl HeadlessHost {
    fn new(rom: RomBuffer, seed: Option<u64>, instructions_per_second: u32) -> Self {
        Self {
            rom,
            seed,
            instructions_per_second,
            frames: 0,
        }
    }

    fn step_interval(&self) -> Duration {
        Duration::from_secs(1) / self.instructions_per_second
    }
}

impl Host for HeadlessHost {
    fn load_program(&mut self, memory: &mut [u8]) {
        let loaded = self.rom.load_into(memory);
        log::info!("loaded {loaded} bytes of program");
    }

    fn draw(&mut self, _plane: &[u8]) {
        self.frames += 1;
    }

    fn is_key_down(&self, _key: u8) -> bool {
        false
    }

    fn random_source(&mut self) -> Box<dyn RngCore> {
        match self.seed {
            Some(seed) => Box::new(ChaCha8Rng::seed_from_u64(seed)),
            None => Box::new(ChaCha8Rng::from_rng(&mut rand::rng())),
        }
    }

    fn begin_tone(&mut self) {
        log::info!("tone on");
    }

    fn end_tone(&mut self) {
        log::info!("tone off");
    }

    fn set_frequency(&mut self, hz: u32) {
        log::info!("program asked for {hz} instructions per second");
        self.instructions_per_second = hz.max(1);
    }

    fn on_resize(&mut self, width: usize) {
        log::info!("display is now {width} pixels wide");
    }
}

/// Steps the cpu at the host's pace and refreshes at 60hz, until the program exits, fails or
/// runs out of cycles. Returns the number of instructions executed.
fn run(cpu: &mut Cpu<HeadlessHost>, max_cycles: Option<u64>) -> anyhow::Result<u64> {
    let mut cycles = 0;
    let mut next_step = Instant::now();
    let mut next_refresh = next_step;

    loop {
        if max_cycles.is_some_and(|max| cycles >= max) {
            log::info!("stopping after {cycles} cycles");
            return Ok(cycles);
        }

        let program_counter = cpu.program_counter();
        let result = cpu
            .step()
            .with_context(|| format!("execution stopped at {program_counter:#05X}"))?;
        cycles += 1;
        if result == StepResult::Exit {
            log::info!("program exited after {cycles} cycles");
            return Ok(cycles);
        }

        let now = Instant::now();
        if now >= next_refresh {
            cpu.refresh();
            next_refresh += REFRESH_INTERVAL;
        }

        next_step += cpu.host().step_interval();
        if let Some(wait) = next_step.checked_duration_since(now) {
            thread::sleep(wait);
        }
    }
}

fn write_dump(cpu: &Cpu<HeadlessHost>, path: &Path, name: &str) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("could not create dump file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    cpu.dump(&mut writer, name)?;
    writer.flush()?;
    log::info!("wrote dump to {}", path.display());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let rom = RomBuffer::new(&args.rom)
        .with_context(|| format!("could not read rom {}", args.rom.display()))?;
    let name = args
        .rom
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let quirks = Quirks {
        standard_borrow_flag: args.standard_borrow_flag,
        host_extensions: args.host_extensions,
    };
    let host = HeadlessHost::new(rom, args.seed, args.hz);
    let mut cpu = Cpu::with_quirks(host, quirks);
    log::info!("running {name} at {} instructions per second", args.hz);

    let result = run(&mut cpu, args.max_cycles);
    if let Some(path) = &args.dump {
        write_dump(&cpu, path, &name)?;
    }
    let cycles = result?;
    log::info!("{cycles} cycles, {} frames drawn", cpu.host().frames);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headless(rom: Vec<u8>) -> Cpu<HeadlessHost> {
        let host = HeadlessHost::new(RomBuffer::from_bytes(rom), Some(1), 1_000_000);
        Cpu::new(host)
    }

    #[test]
    fn runs_until_the_program_exits() {
        let mut cpu = headless(vec![0x60, 0x01, 0x00, 0xFD]);
        assert_eq!(run(&mut cpu, None).unwrap(), 2);
    }

    #[test]
    fn stops_after_max_cycles() {
        let mut cpu = headless(vec![0x12, 0x00]);
        assert_eq!(run(&mut cpu, Some(10)).unwrap(), 10);
    }

    #[test]
    fn reports_where_execution_failed() {
        let mut cpu = headless(vec![0x00, 0xE0, 0xF0, 0x30]);
        let error = run(&mut cpu, None).unwrap_err();
        assert_eq!(error.to_string(), "execution stopped at 0x202");
        assert!(matches!(
            error.downcast_ref::<chippy_core::Error>(),
            Some(chippy_core::Error::UnsupportedInstruction(0xF030))
        ));
    }

    #[test]
    fn program_can_change_the_pace() {
        let mut host = HeadlessHost::new(RomBuffer::default(), None, 500);
        host.set_frequency(0);
        assert_eq!(host.step_interval(), Duration::from_secs(1));
        host.set_frequency(1000);
        assert_eq!(host.step_interval(), Duration::from_millis(1));
    }
}
