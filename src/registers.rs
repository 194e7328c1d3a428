use std::fmt::{Display, Error, Formatter};

/// Register ids as they appear in operand words (4 bits each).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
    /// No register
    Nil = 0,
    X = 1,
    Y = 2,
    Z = 3,
    /// Target register
    Trgt = 4,
    /// Flags register
    Stat = 5,
    /// Call register
    Call = 6,
}

/// First id past the named registers.
pub const REGISTER_END: u8 = 7;

impl Register {
    /// Map a raw id to a register. Out-of-range ids collapse to `Nil`.
    pub fn from_id(id: u8) -> Self {
        match id {
            1 => Register::X,
            2 => Register::Y,
            3 => Register::Z,
            4 => Register::Trgt,
            5 => Register::Stat,
            6 => Register::Call,
            _ => Register::Nil,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Register::Nil => "RNIL",
            Register::X => "RX",
            Register::Y => "RY",
            Register::Z => "RZ",
            Register::Trgt => "RTRGT",
            Register::Stat => "RSTAT",
            Register::Call => "RCALL",
        }
    }
}

/// Display name for a raw register id; 0 and ids >= `REGISTER_END` give `RNIL`.
pub fn register_name(id: u8) -> &'static str {
    Register::from_id(id).name()
}

impl Display for Register {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        f.pad(self.name())
    }
}
