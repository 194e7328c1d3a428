//! Hex dump and instruction listing of a code region.

use crate::container::MemoryRegion;
use crate::error::Result;
use crate::instruction::Instruction;
use std::fmt::Write;

/// Words per hex dump line
pub const HEXDUMP_WIDTH: usize = 8;

/// Walks a code region one instruction at a time.
///
/// Yields `(cursor, instruction)` pairs and stops after the first decode
/// error.
pub struct Instructions<'r, 'a> {
    code: &'r MemoryRegion<'a>,
    cursor: usize,
    failed: bool,
}

impl<'r, 'a> Instructions<'r, 'a> {
    pub fn new(code: &'r MemoryRegion<'a>) -> Self {
        Instructions {
            code,
            cursor: 0,
            failed: false,
        }
    }

    /// Word index of the next instruction
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl Iterator for Instructions<'_, '_> {
    type Item = Result<(usize, Instruction)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.cursor >= self.code.len() {
            return None;
        }

        match Instruction::decode(self.code, self.cursor) {
            Ok(instruction) => {
                let at = self.cursor;
                self.cursor += instruction.size;
                Some(Ok((at, instruction)))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

/// Dump every word of the region as 4-digit hex, eight to a line.
///
/// Each full line ends in a newline; a short final line does not.
pub fn hexdump(code: &MemoryRegion<'_>) -> String {
    let mut output = String::with_capacity(code.len() * 5);
    for (i, word) in code.words().enumerate() {
        if i % HEXDUMP_WIDTH == HEXDUMP_WIDTH - 1 {
            writeln!(&mut output, "{:04x}", word).unwrap();
        } else {
            write!(&mut output, "{:04x} ", word).unwrap();
        }
    }
    output
}

/// Write one line per instruction to `out` as each one is decoded.
///
/// Lines decoded before a failure stay in `out`. Returns the number of
/// instructions written.
pub fn disassemble_into<W: Write>(code: &MemoryRegion<'_>, out: &mut W) -> Result<usize> {
    let mut count = 0;
    for entry in Instructions::new(code) {
        let (_, instruction) = entry?;
        writeln!(out, "{}", instruction).unwrap();
        count += 1;
    }
    Ok(count)
}

/// Disassemble the whole region, one line per instruction.
pub fn disassemble(code: &MemoryRegion<'_>) -> Result<String> {
    let mut output = String::new();
    disassemble_into(code, &mut output)?;
    Ok(output)
}

/// Decode the whole region into a list of instructions.
pub fn decode_all(code: &MemoryRegion<'_>) -> Result<Vec<(usize, Instruction)>> {
    Instructions::new(code).collect()
}
