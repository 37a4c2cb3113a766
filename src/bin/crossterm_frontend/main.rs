use std::path::PathBuf;
use std::time::{Duration, Instant};

use structopt::StructOpt;

use emu_chip8::emulator::{Config, Emulator, Quirks};

mod terminal;
use terminal::{quit_requested, TerminalScreen};

/// The program options.
#[derive(StructOpt)]
struct Opt {
    /// Instructions executed per second
    #[structopt(long, default_value = "720")]
    ips: u32,

    /// Seed for the random number instruction
    #[structopt(long)]
    seed: Option<u64>,

    /// Shift instructions read VY instead of VX
    #[structopt(long)]
    shift_vy: bool,

    /// The program to execute
    #[structopt(parse(from_os_str))]
    input: PathBuf,
}

const FPS: u32 = 60;

fn main() -> Result<(), Box<dyn std::error::Error>> {

    env_logger::init();

    // Get configuration and read input file
    let opt = Opt::from_args();
    log::info!("Executing {:?}", &opt.input);
    let program = std::fs::read(&opt.input)?;

    let config = Config {
        instructions_per_second: opt.ips,
        quirks: Quirks { shift_reads_vy: opt.shift_vy },
        seed: opt.seed,
        ..Config::default()
    };
    let per_frame = config.instructions_per_frame(FPS);
    let frame_time = Duration::from_secs(1) / FPS;

    // Load instructions into emulator memory
    let mut emulator = Emulator::new(config);
    emulator.load(&program)?;

    let mut screen = TerminalScreen::new()?;

    // Start execution, one frame at a time until q or Esc
    loop {
        let started = Instant::now();
        emulator.run(per_frame)?;
        screen.render(emulator.framebuffer(), &emulator.registers(), emulator.sound_active())?;

        let remaining = frame_time.checked_sub(started.elapsed()).unwrap_or_default();
        if quit_requested(remaining)? {
            break;
        }
    }

    Ok(())
}
