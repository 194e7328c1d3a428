//! Opcode metadata for the MEDEA instruction set.
//!
//! Opcode ids are 9 bits wide but sparsely allocated: a contiguous block at
//! 0x000-0x027, two lone compare opcodes at 0x030 and 0x034, and a block of
//! four register opcodes starting at 0x040. Everything else is reserved and
//! decodes as `error` with no operands.

use indexmap::IndexMap;

pub const HALT: u16 = 0x000;
pub const NOOP: u16 = 0x001;
pub const INC: u16 = 0x002;
pub const DEC: u16 = 0x003;
pub const ADD: u16 = 0x004;
pub const SUB: u16 = 0x005;
pub const MUL: u16 = 0x006;
pub const DIC: u16 = 0x007;
pub const ADDC: u16 = 0x008;
pub const SUBC: u16 = 0x009;
pub const READ: u16 = 0x00A;
pub const WRIT: u16 = 0x00B;
pub const CPY: u16 = 0x00C;
pub const MCPY: u16 = 0x00D;
pub const ICPY: u16 = 0x00E;
pub const CMP: u16 = 0x00F;
pub const AND: u16 = 0x010;
pub const OR: u16 = 0x011;
pub const CMPL: u16 = 0x012;
pub const LSHF: u16 = 0x013;
pub const RSHF: u16 = 0x014;
pub const PUSH: u16 = 0x015;
pub const POP: u16 = 0x016;
pub const CFLG: u16 = 0x017;
pub const CALL: u16 = 0x018;
pub const RTRN: u16 = 0x019;
pub const RTRV: u16 = 0x01A;
pub const RTL: u16 = 0x01B;
pub const RTR: u16 = 0x01C;
pub const CIP: u16 = 0x01D;
pub const BSWP: u16 = 0x01E;
pub const JUMP: u16 = 0x01F;
pub const JZRO: u16 = 0x020;
pub const JEQU: u16 = 0x021;
pub const JLT: u16 = 0x022;
pub const JGT: u16 = 0x023;
pub const JCRY: u16 = 0x024;
pub const JINF: u16 = 0x025;
pub const JSE: u16 = 0x026;
pub const JSF: u16 = 0x027;
pub const CZRO: u16 = 0x030;
pub const CCRY: u16 = 0x034;
pub const XOR: u16 = 0x040;
pub const SWAP: u16 = 0x041;
pub const RCPT: u16 = 0x042;
pub const RCPF: u16 = 0x043;
/// One past the last allocated opcode.
pub const OPCODE_END: u16 = 0x044;

/// Mnemonic used for reserved and out-of-range opcode ids.
pub const ERROR_NAME: &str = "error";

/// Static description of one opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeInfo {
    pub opcode: u16,
    pub name: &'static str,
    /// Number of register-capable operand positions (0-3)
    pub arg_count: u8,
}

lazy_static! {
    static ref OPCODES: IndexMap<u16, OpcodeInfo> = {
        let table: &[(u16, &'static str, u8)] = &[
            (HALT, "HALT", 0),
            (NOOP, "NOOP", 0),
            (INC, "INC", 1),
            (DEC, "DEC", 1),
            (ADD, "ADD", 2),
            (SUB, "SUB", 2),
            (MUL, "MUL", 2),
            (DIC, "DIC", 2),
            (ADDC, "ADDC", 2),
            (SUBC, "SUBC", 2),
            (READ, "READ", 1),
            (WRIT, "WRIT", 1),
            (CPY, "CPY", 2),
            (MCPY, "MCPY", 3),
            (ICPY, "ICPY", 2),
            (CMP, "CMP", 2),
            (AND, "AND", 2),
            (OR, "OR", 2),
            (CMPL, "CMPL", 1),
            (LSHF, "LSHF", 2),
            (RSHF, "RSHF", 2),
            (PUSH, "PUSH", 1),
            (POP, "POP", 1),
            (CFLG, "CFLG", 0),
            (CALL, "CALL", 3),
            (RTRN, "RTRN", 0),
            (RTRV, "RTRV", 0),
            (RTL, "RTL", 2),
            (RTR, "RTR", 2),
            (CIP, "CIP", 1),
            (BSWP, "BSWP", 1),
            (JUMP, "JUMP", 0),
            (JZRO, "JZRO", 0),
            (JEQU, "JEQU", 0),
            (JLT, "JLT", 0),
            (JGT, "JGT", 0),
            (JCRY, "JCRY", 0),
            (JINF, "JINF", 0),
            (JSE, "JSE", 0),
            (JSF, "JSF", 0),
            (CZRO, "CZRO", 0),
            (CCRY, "CCRY", 0),
            (XOR, "XOR", 2),
            (SWAP, "SWAP", 2),
            (RCPT, "RCPT", 2),
            (RCPF, "RCPF", 2),
        ];
        table
            .iter()
            .map(|&(opcode, name, arg_count)| {
                (
                    opcode,
                    OpcodeInfo {
                        opcode,
                        name,
                        arg_count,
                    },
                )
            })
            .collect()
    };
}

/// Look up the metadata for an opcode id, `None` for reserved ids.
pub fn opcode_info(opcode: u16) -> Option<&'static OpcodeInfo> {
    OPCODES.get(&opcode)
}

/// Get the mnemonic of an opcode
pub fn get_instruction_name(opcode: u16) -> &'static str {
    opcode_info(opcode).map_or(ERROR_NAME, |info| info.name)
}

/// Get the number of register-capable operands of an opcode
pub fn get_arg_count(opcode: u16) -> u8 {
    opcode_info(opcode).map_or(0, |info| info.arg_count)
}

/// Iterate over every allocated opcode in ascending id order.
pub fn all_opcodes() -> impl Iterator<Item = &'static OpcodeInfo> {
    OPCODES.values()
}
