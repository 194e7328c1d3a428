use crate::container::Program;
use crate::registers::Register;
use std::fmt;

/// Number of entries in the call/return stack
pub const STACK_SIZE: usize = 65536;

// Status flag bits held in RSTAT
pub const FZERO: u16 = 1 << 0;
pub const FEQUL: u16 = 1 << 1;
pub const FLT: u16 = 1 << 2;
pub const FGT: u16 = 1 << 3;
pub const FCRRY: u16 = 1 << 4;
pub const FINF: u16 = 1 << 5;
pub const FSE: u16 = 1 << 6;
pub const FSF: u16 = 1 << 7;

/// Register file and stack of the MEDEA machine at reset.
///
/// Nothing in this crate executes instructions; the state exists so the
/// reset values can be inspected alongside a loaded program.
pub struct MachineState<'p, 'a> {
    /// General purpose
    pub rx: u16,
    pub ry: u16,
    pub rz: u16,
    /// Target register
    pub rtrgt: u16,
    /// Flags register
    pub rstat: u16,
    /// Call register
    pub rcall: u16,
    /// Stack pointer register
    pub rsk: u16,
    /// Stack return register
    pub rsr: u16,
    /// Instruction pointer
    pub ip: u16,
    pub stack: Vec<u16>,
    pub program: &'p Program<'a>,
}

impl<'p, 'a> MachineState<'p, 'a> {
    pub fn new(program: &'p Program<'a>) -> Self {
        MachineState {
            rx: 0,
            ry: 0,
            rz: 0,
            rtrgt: 0,
            rstat: FSE,
            rcall: 0,
            rsk: 0xFFFF,
            rsr: 0,
            ip: 0x0001,
            stack: vec![0; STACK_SIZE],
            program,
        }
    }

    /// Read one of the operand-addressable registers; `Nil` reads as zero.
    pub fn register(&self, register: Register) -> u16 {
        match register {
            Register::Nil => 0,
            Register::X => self.rx,
            Register::Y => self.ry,
            Register::Z => self.rz,
            Register::Trgt => self.rtrgt,
            Register::Stat => self.rstat,
            Register::Call => self.rcall,
        }
    }

    pub fn flag(&self, mask: u16) -> bool {
        self.rstat & mask != 0
    }
}

impl fmt::Display for MachineState<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RX={:04x} RY={:04x} RZ={:04x} RTRGT={:04x} RSTAT={:04x} RCALL={:04x} RSK={:04x} RSR={:04x} IP={:04x}",
            self.rx,
            self.ry,
            self.rz,
            self.rtrgt,
            self.rstat,
            self.rcall,
            self.rsk,
            self.rsr,
            self.ip
        )
    }
}
