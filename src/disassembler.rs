//! Turns program bytes back into readable instructions.
//! Uses the same decoder as the emulator but never runs anything.

use std::fmt;

use crate::emulator::instruction::Instruction;
use crate::emulator::opcode::Opcode;

/// One decoded instruction and where it lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub address: u16,
    pub opcode: Opcode,
    pub instruction: Instruction,
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06x}  {:#06x}  {}", self.address, self.opcode.0, self.instruction)
    }
}

/// Decode `program` two bytes at a time, as if loaded at `base`.
/// A trailing odd byte is ignored.
pub fn disassemble(program: &[u8], base: u16) -> impl Iterator<Item = Line> + '_ {
    program.chunks_exact(2).enumerate().map(move |(n, pair)| {
        let opcode = Opcode::from_two_u8(pair[0], pair[1]);
        Line {
            address: base.wrapping_add((n as u16).wrapping_mul(2)),
            opcode,
            instruction: Instruction::decode(opcode),
        }
    })
}

/// The whole listing, one line per instruction.
pub fn listing(program: &[u8], base: u16) -> String {
    disassemble(program, base)
        .map(|line| format!("{}\n", line))
        .collect()
}
