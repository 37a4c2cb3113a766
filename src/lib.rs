/*!

A CHIP-8 virtual machine as specified at https://en.wikipedia.org/wiki/CHIP-8.

# Running a program

`cargo run --release -- <program>` runs a ROM headless for a number of frames and prints the final screen.
`cargo run --release --bin crossterm_frontend -- <program>` shows the screen in the terminal, press `q` to quit.
Set `RUST_LOG=trace` to see every executed instruction.

# Library

The main way of running a program is to load instructions as bytes,
then step through them one at a time or a frame's worth at a time.

```rust
use emu_chip8::emulator::{Config, Emulator};

let mut emulator = Emulator::new(Config::default());

// Load a program at address 0x200.
let program = [
    0x00, 0xE0, // Clear the screen
    0x60, 0x0A, // V0 = 10
    0x70, 0x05, // V0 += 5
];
emulator.load(&program).unwrap();
emulator.step().unwrap(); // Will now clear the display
emulator.run(2).unwrap();

assert_eq!(emulator.registers().v[0], 15);
assert_eq!(emulator.registers().program_counter, 0x206);
```

Alternatively, you can experiment by executing instructions manually.

```rust
use emu_chip8::emulator::Emulator;
use emu_chip8::emulator::instruction::{Instruction, Reg, Const, Addr};

let mut emulator = Emulator::default();

emulator.execute(Instruction::ClearScreen).unwrap();
emulator.execute(Instruction::Goto(Addr(0x250))).unwrap();
emulator.execute(Instruction::SetRegToConst(Reg(0xA), Const(35))).unwrap();
emulator.execute(Instruction::SetRegToReg(Reg(0xB), Reg(0xA))).unwrap();

assert_eq!(emulator.registers().v[0xB], 35);
```

## Errors and anomalies

Out of bounds memory accesses and call stack overflow or underflow are errors, and stop the machine.
Instructions the machine can not run, unknown opcodes and the keypad instructions,
are skipped and reported as a `Step::Anomaly` so the host can decide whether to carry on.

```rust
use emu_chip8::emulator::{Emulator, EmulatorError, Step};

let mut emulator = Emulator::default();
emulator.load(&[0xFF, 0xFF, 0x00, 0xEE]).unwrap();

assert!(matches!(emulator.step(), Ok(Step::Anomaly(_))));
assert_eq!(emulator.step(), Err(EmulatorError::StackUnderflow));
```
*/

pub mod disassembler;
pub mod dump;
pub mod emulator;
