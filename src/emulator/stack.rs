use crate::emulator::error::EmulatorError;

/// Maximum call depth, as on the classic interpreters.
pub const STACK_SIZE: usize = 16;

/// Fixed-size return address stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stack {
    frames: [u16; STACK_SIZE],
    stack_pointer: usize,
}

impl Stack {

    pub fn new() -> Stack {
        Stack {
            frames: [0; STACK_SIZE],
            stack_pointer: 0,
        }
    }

    pub fn push(&mut self, addr: u16) -> Result<(), EmulatorError> {
        let frame = self.frames.get_mut(self.stack_pointer)
            .ok_or(EmulatorError::StackOverflow { depth: STACK_SIZE })?;
        *frame = addr;
        self.stack_pointer += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16, EmulatorError> {
        if self.stack_pointer == 0 {
            return Err(EmulatorError::StackUnderflow);
        }
        self.stack_pointer -= 1;
        Ok(self.frames[self.stack_pointer])
    }

    pub fn depth(&self) -> usize {
        self.stack_pointer
    }

    /// The live frames, oldest first.
    pub fn frames(&self) -> &[u16] {
        &self.frames[..self.stack_pointer]
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn pops_in_reverse_order() {
        let mut stack = Stack::new();
        stack.push(0x202).unwrap();
        stack.push(0x304).unwrap();
        assert_eq!(stack.frames(), &[0x202, 0x304]);
        assert_eq!(stack.pop(), Ok(0x304));
        assert_eq!(stack.pop(), Ok(0x202));
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn pop_on_empty_stack_underflows() {
        let mut stack = Stack::new();
        assert_eq!(stack.pop(), Err(EmulatorError::StackUnderflow));
    }

    #[test]
    fn seventeenth_push_overflows() {
        let mut stack = Stack::new();
        for i in 0..STACK_SIZE {
            assert_eq!(stack.push(i as u16), Ok(()));
        }
        assert_eq!(stack.push(0xFFF), Err(EmulatorError::StackOverflow { depth: 16 }));
        assert_eq!(stack.depth(), STACK_SIZE);
        assert_eq!(stack.pop(), Ok(15));
    }
}
