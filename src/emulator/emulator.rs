//! The CHIP-8 virtual machine as described at https://en.wikipedia.org/wiki/CHIP-8#Virtual_machine_description.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::emulator::config::Config;
use crate::emulator::display::Framebuffer;
use crate::emulator::error::EmulatorError;
use crate::emulator::instruction::*;
use crate::emulator::memory::{Memory, PROGRAM_START};
use crate::emulator::opcode::Opcode;
use crate::emulator::stack::Stack;
use crate::emulator::timer::Timers;

pub const NUM_REGISTERS: usize = 16;
const FLAG: usize = 0xF;

/// An instruction the machine fetched but did not execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anomaly {
    /// Where the instruction was fetched from.
    pub address: u16,
    pub instruction: Instruction,
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = if self.instruction.needs_keypad() { "needs the keypad" } else { "unknown opcode" };
        write!(f, "{} at {:#06x}: {}", reason, self.address, self.instruction)
    }
}

/// The outcome of a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Executed(Instruction),
    /// PC has moved past the instruction, nothing else changed.
    /// Whether to carry on is up to the caller.
    Anomaly(Anomaly),
}

/// What happened during `Emulator::run`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Steps taken, anomalies included.
    pub executed: u32,
    pub anomalies: u32,
    pub last_anomaly: Option<Anomaly>,
}

/// A copy of the CPU state, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterSnapshot {
    pub v: [u8; NUM_REGISTERS],
    pub i: u16,
    pub program_counter: u16,
    pub stack: Stack,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub cycles: u64,
}

impl fmt::Display for RegisterSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (n, value) in self.v.iter().enumerate() {
            write!(f, "V{:X}={:02x} ", n, value)?;
        }
        write!(
            f,
            "I={:#05x} PC={:#05x} SP={} DT={} ST={}",
            self.i,
            self.program_counter,
            self.stack.depth(),
            self.delay_timer,
            self.sound_timer
        )
    }
}

pub struct Emulator {
    config: Config,
    memory: Memory,
    registers: [u8; NUM_REGISTERS],
    i: u16,
    program_counter: u16,
    stack: Stack,
    timers: Timers,
    screen: Framebuffer,
    rng: StdRng,
    anomalies: u64,
}

impl Emulator {

    /// Create a new emulator. It starts out reset: font loaded, everything else zero.
    pub fn new(config: Config) -> Emulator {
        Emulator {
            memory: Memory::new(),
            registers: [0; NUM_REGISTERS],
            i: 0,
            program_counter: 0,
            stack: Stack::new(),
            timers: Timers::new(config.timer_divisor()),
            screen: Framebuffer::new(),
            rng: seeded_rng(config.seed),
            anomalies: 0,
            config,
        }
    }

    /// Zero memory, registers, timers and screen, then reload the font.
    /// PC is 0 until a program is loaded.
    pub fn reset(&mut self) {
        log::info!("Resetting emulator");
        self.memory.reset();
        self.registers = [0; NUM_REGISTERS];
        self.i = 0;
        self.program_counter = 0;
        self.stack = Stack::new();
        self.timers.reset();
        self.screen.clear();
        self.rng = seeded_rng(self.config.seed);
        self.anomalies = 0;
    }

    /// Copy a program into memory at 0x200 and point PC at it.
    /// A program that does not fit is rejected and nothing changes.
    pub fn load(&mut self, program: &[u8]) -> Result<(), EmulatorError> {
        if let Err(error) = self.memory.load_program(program) {
            log::error!("Could not load program: {}", error);
            return Err(error);
        }
        self.program_counter = PROGRAM_START;
        log::info!("Loaded {} bytes at {:#05x}", program.len(), PROGRAM_START);
        Ok(())
    }

    pub fn unload(&mut self) {
        self.reset();
    }

    /// Perform a single step, which will update timers,
    /// then load an instruction and execute it.
    pub fn step(&mut self) -> Result<Step, EmulatorError> {
        self.timers.on_cycle();

        // Each opcode is two bytes
        let address = self.program_counter;
        let left = self.memory.read(address as usize)?;
        let right = self.memory.read(address as usize + 1)?;
        let instruction = Instruction::decode(Opcode::from_two_u8(left, right));

        log::trace!("{:#05x} {}", address, instruction);

        self.program_counter += 2;

        let result = self.execute_at(address, instruction);
        if let Err(error) = &result {
            log::error!("{} at {:#05x} failed: {}", instruction, address, error);
        }
        result
    }

    /// Run up to `cycle_count` steps. Stops early on an anomaly
    /// only if the config asks for it.
    pub fn run(&mut self, cycle_count: u32) -> Result<RunSummary, EmulatorError> {
        let mut summary = RunSummary::default();
        for _ in 0..cycle_count {
            let step = self.step()?;
            summary.executed += 1;
            if let Step::Anomaly(anomaly) = step {
                summary.anomalies += 1;
                summary.last_anomaly = Some(anomaly);
                if self.config.halt_on_anomaly {
                    break;
                }
            }
        }
        Ok(summary)
    }

    /// Execute a single instruction without fetching it. PC is not advanced first.
    pub fn execute(&mut self, instruction: Instruction) -> Result<Step, EmulatorError> {
        self.execute_at(self.program_counter, instruction)
    }

    fn execute_at(&mut self, address: u16, instruction: Instruction) -> Result<Step, EmulatorError> {
        match instruction {

            // Clear the screen
            Instruction::ClearScreen => self.screen.clear(),

            // Return to the previous call site via the stack.
            Instruction::Return => {
                self.program_counter = self.stack.pop()?;
                log::debug!("Return to {:#05x}, depth {}", self.program_counter, self.stack.depth());
            }

            // Machine code routines only existed on the original hardware
            Instruction::Sys(_) => {}

            Instruction::Goto(Addr(addr)) => {
                self.program_counter = addr;
            }

            // Store the current address on the stack, then jump to the specified address
            Instruction::Call(Addr(addr)) => {
                self.stack.push(self.program_counter)?;
                self.program_counter = addr;
                log::debug!("Call {:#05x}, depth {}", addr, self.stack.depth());
            }

            Instruction::IfRegEqConst(x, Const(n)) => {
                if self.reg(x)? == n {
                    self.skip();
                }
            }

            Instruction::IfRegNeqConst(x, Const(n)) => {
                if self.reg(x)? != n {
                    self.skip();
                }
            }

            Instruction::IfRegEqReg(x, y) => {
                if self.reg(x)? == self.reg(y)? {
                    self.skip();
                }
            }

            Instruction::IfRegNeqReg(x, y) => {
                if self.reg(x)? != self.reg(y)? {
                    self.skip();
                }
            }

            Instruction::SetRegToConst(x, Const(n)) => self.set_reg(x, n)?,

            // Wraps, and leaves VF alone
            Instruction::IncRegByConst(x, Const(n)) => {
                let vx = self.reg(x)?;
                self.set_reg(x, vx.wrapping_add(n))?;
            }

            Instruction::SetRegToReg(x, y) => {
                let vy = self.reg(y)?;
                self.set_reg(x, vy)?;
            }

            Instruction::BitwiseOr(x, y) => {
                let value = self.reg(x)? | self.reg(y)?;
                self.set_reg(x, value)?;
            }

            Instruction::BitwiseAnd(x, y) => {
                let value = self.reg(x)? & self.reg(y)?;
                self.set_reg(x, value)?;
            }

            Instruction::BitwiseXor(x, y) => {
                let value = self.reg(x)? ^ self.reg(y)?;
                self.set_reg(x, value)?;
            }

            // Flags are computed from the operands before anything is written,
            // and VF is always written last.

            Instruction::IncRegByReg(x, y) => {
                let (sum, carry) = self.reg(x)?.overflowing_add(self.reg(y)?);
                self.set_reg(x, sum)?;
                self.registers[FLAG] = carry as u8;
            }

            Instruction::DecRegByReg(x, y) => {
                let (vx, vy) = (self.reg(x)?, self.reg(y)?);
                self.set_reg(x, vx.wrapping_sub(vy))?;
                self.registers[FLAG] = (vx > vy) as u8;
            }

            Instruction::SetVxVyMinusVx(x, y) => {
                let (vx, vy) = (self.reg(x)?, self.reg(y)?);
                self.set_reg(x, vy.wrapping_sub(vx))?;
                self.registers[FLAG] = (vy > vx) as u8;
            }

            Instruction::BitshiftRight(x, y) => {
                let source = self.shift_source(x, y)?;
                self.set_reg(x, source >> 1)?;
                self.registers[FLAG] = source & 1;
            }

            Instruction::BitshiftLeft(x, y) => {
                let source = self.shift_source(x, y)?;
                self.set_reg(x, source << 1)?;
                self.registers[FLAG] = source >> 7;
            }

            Instruction::SetI(Addr(addr)) => {
                self.i = addr;
            }

            Instruction::SetPcToV0PlusAddr(Addr(addr)) => {
                self.program_counter = addr.wrapping_add(self.registers[0] as u16);
            }

            Instruction::SetVxRand(x, Const(n)) => {
                let value = self.rng.gen::<u8>() & n;
                self.set_reg(x, value)?;
            }

            Instruction::Draw(x, y, Const(sprite_height)) => {
                let x_coord = self.reg(x)? as usize;
                let y_coord = self.reg(y)? as usize;

                // Each sprite row is one byte
                let collision = if sprite_height == 0 {
                    false
                } else {
                    let sprite = self.memory.slice(self.i as usize, sprite_height as usize)?;
                    self.screen.draw_sprite(x_coord, y_coord, sprite)
                };

                self.registers[FLAG] = collision as u8;
            }

            Instruction::SetRegToDelayTimer(x) => {
                let delay = self.timers.delay;
                self.set_reg(x, delay)?;
            }

            Instruction::SetDelayTimerToReg(x) => {
                self.timers.delay = self.reg(x)?;
            }

            Instruction::SetSoundTimerToReg(x) => {
                self.timers.sound = self.reg(x)?;
            }

            Instruction::AddRegToI(x) => {
                self.i = self.i.wrapping_add(self.reg(x)? as u16);
            }

            // Set i to character address. Each font element is 5 bytes wide.
            Instruction::SetIToSpriteAddrVx(x) => {
                self.i = Memory::glyph_addr(self.reg(x)?);
            }

            Instruction::SetIToBcdOfReg(x) => {
                let value = self.reg(x)?;
                let digits = [value / 100, (value / 10) % 10, value % 10];
                self.memory.slice_mut(self.i as usize, 3)?.copy_from_slice(&digits);
            }

            // Dump register values up to and including Vx
            Instruction::RegDump(x) => {
                let last = self.reg_index(x)?;
                self.memory
                    .slice_mut(self.i as usize, last + 1)?
                    .copy_from_slice(&self.registers[..=last]);
            }

            // Load register values up to and including Vx
            Instruction::RegLoad(x) => {
                let last = self.reg_index(x)?;
                let bytes = self.memory.slice(self.i as usize, last + 1)?;
                self.registers[..=last].copy_from_slice(bytes);
            }

            Instruction::IfKeyEqVx(_)
            | Instruction::IfKeyNeqVx(_)
            | Instruction::SetRegToGetKey(_)
            | Instruction::Unknown(_) => {
                return Ok(self.report_anomaly(address, instruction));
            }
        };

        Ok(Step::Executed(instruction))
    }

    fn report_anomaly(&mut self, address: u16, instruction: Instruction) -> Step {
        let anomaly = Anomaly { address, instruction };
        self.anomalies += 1;
        log::warn!("Skipping {}", anomaly);
        Step::Anomaly(anomaly)
    }

    fn skip(&mut self) {
        self.program_counter = self.program_counter.wrapping_add(2);
    }

    fn reg_index(&self, Reg(x): Reg) -> Result<usize, EmulatorError> {
        if (x as usize) < NUM_REGISTERS {
            Ok(x as usize)
        } else {
            Err(EmulatorError::RegisterOutOfBounds { index: x })
        }
    }

    fn reg(&self, reg: Reg) -> Result<u8, EmulatorError> {
        Ok(self.registers[self.reg_index(reg)?])
    }

    fn set_reg(&mut self, reg: Reg, value: u8) -> Result<(), EmulatorError> {
        let index = self.reg_index(reg)?;
        self.registers[index] = value;
        Ok(())
    }

    fn shift_source(&self, x: Reg, y: Reg) -> Result<u8, EmulatorError> {
        if self.config.quirks.shift_reads_vy {
            self.reg(y)
        } else {
            self.reg(x)
        }
    }

    /// The screen as it is now.
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.screen
    }

    pub fn registers(&self) -> RegisterSnapshot {
        RegisterSnapshot {
            v: self.registers,
            i: self.i,
            program_counter: self.program_counter,
            stack: self.stack.clone(),
            delay_timer: self.timers.delay,
            sound_timer: self.timers.sound,
            cycles: self.timers.cycles(),
        }
    }

    /// All 4096 bytes of memory.
    pub fn memory(&self) -> &[u8] {
        self.memory.as_slice()
    }

    /// True while the sound timer is running, i.e. while a host should beep.
    pub fn sound_active(&self) -> bool {
        self.timers.sound > 0
    }

    pub fn cycles(&self) -> u64 {
        self.timers.cycles()
    }

    /// Unknown or unsupported instructions seen since the last reset.
    pub fn anomalies(&self) -> u64 {
        self.anomalies
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Emulator::new(Config::default())
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
