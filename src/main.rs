use std::path::PathBuf;
use std::time::Duration;

use log::LevelFilter;
use structopt::StructOpt;

use emu_chip8::disassembler;
use emu_chip8::dump;
use emu_chip8::emulator::memory::PROGRAM_START;
use emu_chip8::emulator::{Config, Emulator, Quirks};

/// Run a CHIP-8 program without a screen and print the final display.
#[derive(StructOpt, Debug)]
#[structopt(name = "emu-chip8")]
struct Opt {
    /// Verbose mode (-v, -vv, -vvv)
    #[structopt(short, long, parse(from_occurrences))]
    verbose: u8,

    /// Print the disassembled program before running it
    #[structopt(short, long)]
    disassemble: bool,

    /// Instructions executed per second of emulated time
    #[structopt(long, default_value = "720")]
    ips: u32,

    /// Frames per second
    #[structopt(long, default_value = "60")]
    fps: u32,

    /// Number of frames to run
    #[structopt(long, default_value = "600")]
    frames: u32,

    /// Seed for the random number instruction
    #[structopt(long)]
    seed: Option<u64>,

    /// Shift instructions read VY instead of VX
    #[structopt(long)]
    shift_vy: bool,

    /// Stop at the first unknown or unsupported instruction
    #[structopt(long)]
    halt_on_anomaly: bool,

    /// Sleep between frames to run at real speed
    #[structopt(long)]
    realtime: bool,

    /// Write memory and display dumps here after every frame
    #[structopt(long, parse(from_os_str))]
    dump_dir: Option<PathBuf>,

    /// The program to execute
    #[structopt(parse(from_os_str))]
    input: PathBuf,
}

impl Opt {
    fn config(&self) -> Config {
        Config {
            instructions_per_second: self.ips,
            quirks: Quirks { shift_reads_vy: self.shift_vy },
            seed: self.seed,
            halt_on_anomaly: self.halt_on_anomaly,
        }
    }
}

fn init_logging(verbose: u8) {
    let mut builder = env_logger::Builder::from_default_env();
    match verbose {
        0 => {}
        1 => { builder.filter_level(LevelFilter::Info); }
        2 => { builder.filter_level(LevelFilter::Debug); }
        _ => { builder.filter_level(LevelFilter::Trace); }
    }
    builder.init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {

    // Get configuration and read input file
    let opt = Opt::from_args();
    init_logging(opt.verbose);
    log::info!("Executing {:?}", &opt.input);
    let program = std::fs::read(&opt.input)?;

    if opt.disassemble {
        print!("{}", disassembler::listing(&program, PROGRAM_START));
    }

    let config = opt.config();
    let per_frame = config.instructions_per_frame(opt.fps);
    let frame_time = Duration::from_secs(1) / opt.fps.max(1);

    // Load instructions into emulator memory
    let mut emulator = Emulator::new(config);
    emulator.load(&program)?;

    // Start execution
    for frame in 0..opt.frames {
        let summary = emulator.run(per_frame)?;
        log::debug!("Frame {}: {}", frame, emulator.registers());

        if let Some(dir) = &opt.dump_dir {
            dump::dump_to_dir(dir, &emulator)?;
        }

        if let Some(anomaly) = summary.last_anomaly {
            if emulator.config().halt_on_anomaly {
                log::warn!("Halting on frame {}: {}", frame, anomaly);
                break;
            }
        }

        if opt.realtime {
            std::thread::sleep(frame_time);
        }
    }

    println!("{}", emulator.registers());
    if emulator.anomalies() > 0 {
        println!("{} instructions skipped", emulator.anomalies());
    }
    print!("{}", emulator.framebuffer());

    Ok(())
}
