use crate::container::MemoryRegion;
use crate::error::{MedeaError, Result};
use crate::opcode_tables;
use crate::registers::Register;
use log::{debug, warn};
use std::fmt::{Display, Error, Formatter};

/// Addressing mode of one operand position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    /// Operand names a register and takes a slot in the operand word
    Register,
    /// Operand is an immediate or memory address
    Immediate,
}

impl AddressingMode {
    /// Parse the mode from a 2-bit AFLG field. Bit 0 is not needed to size
    /// the instruction and is ignored.
    pub fn from_flag(flag: u8) -> Self {
        if flag & 0b10 == 0 {
            AddressingMode::Register
        } else {
            AddressingMode::Immediate
        }
    }
}

/// The first word of every instruction.
///
/// ```text
///  15 14 | 13 12 | 11 10 |  9   | 8 .. 0
///  AFLG0 | AFLG1 | AFLG2 | SIGN | OPCODE
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstructionWord {
    pub aflg: [u8; 3],
    pub sign: u8,
    pub opcode: u16,
}

impl InstructionWord {
    pub fn from_bits(bits: u16) -> Self {
        InstructionWord {
            aflg: [
                (bits >> 14 & 0x3) as u8,
                (bits >> 12 & 0x3) as u8,
                (bits >> 10 & 0x3) as u8,
            ],
            sign: (bits >> 9 & 0x1) as u8,
            opcode: bits & 0x1FF,
        }
    }

    pub fn to_bits(&self) -> u16 {
        (self.aflg[0] as u16 & 0x3) << 14
            | (self.aflg[1] as u16 & 0x3) << 12
            | (self.aflg[2] as u16 & 0x3) << 10
            | (self.sign as u16 & 0x1) << 9
            | (self.opcode & 0x1FF)
    }

    /// Number of leading operand positions, up to the opcode's argument count,
    /// that are in register mode.
    pub fn register_arg_count(&self) -> usize {
        let arg_count = opcode_tables::get_arg_count(self.opcode) as usize;
        self.aflg
            .iter()
            .take(arg_count)
            .filter(|&&flag| AddressingMode::from_flag(flag) == AddressingMode::Register)
            .count()
    }
}

/// Unpack `count` register ids from an operand word.
///
/// The ids are packed from bit 4 upward, with the first operand in the
/// highest used nibble:
///
/// ```text
/// count 1: ........ aaaa....
/// count 2: ....aaaa bbbb....
/// count 3: aaaabbbb cccc....
/// ```
pub fn operand_registers(bits: u16, count: usize) -> Vec<u8> {
    let count = count.min(3);
    (0..count)
        .map(|i| (bits >> (4 * (count - i)) & 0xF) as u8)
        .collect()
}

/// Pack register ids into an operand word; inverse of [`operand_registers`].
pub fn pack_registers(registers: &[u8]) -> u16 {
    let count = registers.len().min(3);
    registers
        .iter()
        .take(count)
        .enumerate()
        .fold(0, |bits, (i, &id)| bits | (id as u16 & 0xF) << (4 * (count - i)))
}

/// A decoded MEDEA instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// Addressing flags for operand positions 0-2
    pub aflg: [u8; 3],
    pub sign: u8,
    /// The raw 9-bit opcode
    pub opcode: u16,
    /// Register ids from the operand word, one per register-mode operand
    pub registers: Vec<u8>,
    /// Literal following ICPY
    pub immediate: Option<u16>,
    /// Total size of the instruction in words
    pub size: usize,
}

impl Instruction {
    /// Decode the instruction starting at word `cursor` of a code region.
    pub fn decode(code: &MemoryRegion<'_>, cursor: usize) -> Result<Self> {
        let truncated = |needed: usize| MedeaError::TruncatedInstruction {
            cursor,
            needed,
            len: code.len(),
        };

        let word = InstructionWord::from_bits(code.word(cursor).ok_or_else(|| truncated(1))?);
        if opcode_tables::opcode_info(word.opcode).is_none() {
            warn!(
                "Unallocated opcode {:#05x} at word {:#06x}",
                word.opcode, cursor
            );
        }

        let register_count = word.register_arg_count();
        let has_operand_word = register_count > 0;
        let has_immediate = word.opcode == opcode_tables::ICPY;
        let size = 1 + has_operand_word as usize + has_immediate as usize;
        if cursor + size > code.len() {
            return Err(truncated(size));
        }

        let mut offset = cursor + 1;
        let mut registers = Vec::new();
        if has_operand_word {
            let bits = code.word(offset).ok_or_else(|| truncated(size))?;
            registers = operand_registers(bits, register_count);
            offset += 1;
        }

        let immediate = if has_immediate {
            let value = code.word(offset).ok_or_else(|| truncated(size))?;
            offset += 1;
            Some(value)
        } else {
            None
        };

        debug!(
            "{:#06x}: opcode {:#05x} regs {} size {}",
            cursor,
            word.opcode,
            registers.len(),
            offset - cursor
        );

        Ok(Instruction {
            aflg: word.aflg,
            sign: word.sign,
            opcode: word.opcode,
            registers,
            immediate,
            size: offset - cursor,
        })
    }

    /// Get the mnemonic, `error` for unallocated opcodes
    pub fn name(&self) -> &'static str {
        opcode_tables::get_instruction_name(self.opcode)
    }

    pub fn register_names(&self) -> Vec<&'static str> {
        self.registers
            .iter()
            .map(|&id| Register::from_id(id).name())
            .collect()
    }

    pub fn word(&self) -> InstructionWord {
        InstructionWord {
            aflg: self.aflg,
            sign: self.sign,
            opcode: self.opcode,
        }
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::result::Result<(), Error> {
        write!(
            f,
            "[{}]\t{:x} {:x} {:x} {:x} {:x}",
            self.name(),
            self.aflg[0],
            self.aflg[1],
            self.aflg[2],
            self.sign,
            self.opcode
        )?;

        if !self.registers.is_empty() {
            write!(f, "\t|")?;
            for &id in &self.registers {
                write!(f, " {:>5}", Register::from_id(id))?;
            }
        }

        if let Some(value) = self.immediate {
            write!(f, "\t| {:x}", value)?;
        }

        Ok(())
    }
}
