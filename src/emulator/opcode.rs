/// A raw 16-bit instruction word, with accessors for
/// the fields the different instruction families use.
///
/// ```text
///  family  x     y     n
/// [ 1111 | 2222 | 3333 | 4444 ]
///         \______ nnn ______/
///                \__ kk ___/
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode(pub u16);

impl Opcode {

    /// Combine two bytes, big-endian, into an opcode.
    pub fn from_two_u8(left: u8, right: u8) -> Opcode {
        Opcode(((left as u16) << 8) | right as u16)
    }

    /// The opcode as its two bytes, big-endian.
    pub fn as_two_u8(self) -> (u8, u8) {
        ((self.0 >> 8) as u8, (self.0 & 0x00FF) as u8)
    }

    /// All four nibbles, most significant first.
    pub fn as_four_u8(self) -> (u8, u8, u8, u8) {
        (self.family(), self.x(), self.y(), self.n())
    }

    pub fn family(self) -> u8 {
        ((self.0 >> 12) & 0xF) as u8
    }

    /// Second nibble, usually a register.
    pub fn x(self) -> u8 {
        ((self.0 >> 8) & 0xF) as u8
    }

    /// Third nibble, usually a register.
    pub fn y(self) -> u8 {
        ((self.0 >> 4) & 0xF) as u8
    }

    /// Last nibble, a small constant.
    pub fn n(self) -> u8 {
        (self.0 & 0xF) as u8
    }

    /// Last byte, an 8-bit constant.
    pub fn kk(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Last 12 bits, an address.
    pub fn nnn(self) -> u16 {
        self.0 & 0x0FFF
    }
}
