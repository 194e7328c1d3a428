#[cfg(test)]
mod tests {
    use crate::container::{MemoryRegion, SectionKind};
    use crate::error::MedeaError;
    use crate::instruction::{pack_registers, InstructionWord};
    use crate::listing::{decode_all, disassemble, disassemble_into, hexdump, Instructions};
    use crate::opcode_tables::{ADD, CALL, HALT, ICPY, JUMP, POP, RCPF};
    use test_log::test;

    fn code_bytes(words: &[u16]) -> Vec<u8> {
        words.iter().flat_map(|w| w.to_le_bytes()).collect()
    }

    fn with_flags(opcode: u16, aflg: [u8; 3]) -> u16 {
        InstructionWord {
            aflg,
            sign: 0,
            opcode,
        }
        .to_bits()
    }

    #[test]
    fn test_hexdump_wraps_every_eight_words() {
        let words: Vec<u16> = (0..10).map(|i| 0x1000 + i).collect();
        let bytes = code_bytes(&words);
        let code = MemoryRegion::new(SectionKind::Code, 0, &bytes);

        let dump = hexdump(&code);
        assert_eq!(
            dump,
            "1000 1001 1002 1003 1004 1005 1006 1007\n1008 1009 "
        );
    }

    #[test]
    fn test_hexdump_empty() {
        let code = MemoryRegion::new(SectionKind::Code, 0, &[]);
        assert_eq!(hexdump(&code), "");
    }

    #[test]
    fn test_basic_listing() {
        let words = [
            with_flags(ICPY, [0b00, 0b10, 0]),
            pack_registers(&[1]),
            0xBEEF,
            ADD,
            pack_registers(&[1, 2]),
            CALL,
            pack_registers(&[4, 5, 6]),
            with_flags(POP, [0b11, 0, 0]),
            JUMP,
            HALT,
        ];
        let bytes = code_bytes(&words);
        let code = MemoryRegion::new(SectionKind::Code, 0, &bytes);

        let listing = disassemble(&code).unwrap();
        let lines: Vec<&str> = listing.lines().collect();
        assert_eq!(
            lines,
            vec![
                "[ICPY]\t0 2 0 0 e\t|    RX\t| beef",
                "[ADD]\t0 0 0 0 4\t|    RX    RY",
                "[CALL]\t0 0 0 0 18\t| RTRGT RSTAT RCALL",
                "[POP]\t3 0 0 0 16",
                "[JUMP]\t0 0 0 0 1f",
                "[HALT]\t0 0 0 0 0",
            ]
        );
    }

    #[test]
    fn test_cursor_positions() {
        let words = [ADD, 0x0120, HALT, ICPY, 0x0120, 0x0001, HALT];
        let bytes = code_bytes(&words);
        let code = MemoryRegion::new(SectionKind::Code, 0, &bytes);

        let cursors: Vec<usize> = decode_all(&code)
            .unwrap()
            .into_iter()
            .map(|(cursor, _)| cursor)
            .collect();
        assert_eq!(cursors, vec![0, 2, 3, 6]);
    }

    #[test]
    fn test_error_opcode_resumes_on_next_word() {
        let words = [0x0030 + 1, 0x1FF, RCPF, 0x0340];
        let bytes = code_bytes(&words);
        let code = MemoryRegion::new(SectionKind::Code, 0, &bytes);

        let listing = disassemble(&code).unwrap();
        let lines: Vec<&str> = listing.lines().collect();
        assert_eq!(
            lines,
            vec![
                "[error]\t0 0 0 0 31",
                "[error]\t0 0 0 0 1ff",
                "[RCPF]\t0 0 0 0 43\t|    RZ RTRGT",
            ]
        );
    }

    #[test]
    fn test_truncated_listing_fails() {
        let words = [HALT, ADD];
        let bytes = code_bytes(&words);
        let code = MemoryRegion::new(SectionKind::Code, 0, &bytes);

        match disassemble(&code) {
            Err(MedeaError::TruncatedInstruction { cursor, .. }) => assert_eq!(cursor, 1),
            other => panic!("unexpected {:?}", other),
        }

        let mut iter = Instructions::new(&code);
        assert!(iter.next().unwrap().is_ok());
        assert!(iter.next().unwrap().is_err());
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_lines_before_truncation_are_kept() {
        let words = [HALT, HALT, HALT, ADD];
        let bytes = code_bytes(&words);
        let code = MemoryRegion::new(SectionKind::Code, 0, &bytes);

        let mut output = String::new();
        match disassemble_into(&code, &mut output) {
            Err(MedeaError::TruncatedInstruction { cursor, needed, len }) => {
                assert_eq!((cursor, needed, len), (3, 2, 4));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(output, "[HALT]\t0 0 0 0 0\n".repeat(3));

        let decoded: Vec<_> = Instructions::new(&code).collect();
        assert_eq!(decoded.len(), 4);
        assert!(decoded[..3].iter().all(|entry| entry.is_ok()));
        assert!(decoded[3].is_err());
    }
}

#[cfg(test)]
mod properties {
    use crate::container::{MemoryRegion, SectionKind};
    use crate::instruction::{pack_registers, InstructionWord};
    use crate::listing::{decode_all, disassemble, Instructions};
    use crate::opcode_tables::{self, ICPY};
    use crate::registers::Register;
    use proptest::prelude::*;

    fn code_bytes(words: &[u16]) -> Vec<u8> {
        words.iter().flat_map(|w| w.to_le_bytes()).collect()
    }

    fn allocated_opcode() -> impl Strategy<Value = u16> {
        let ids: Vec<u16> = opcode_tables::all_opcodes().map(|info| info.opcode).collect();
        proptest::sample::select(ids)
    }

    proptest! {
        #[test]
        fn all_register_operands_take_two_words(opcode in allocated_opcode(), regs in any::<u16>()) {
            let arg_count = opcode_tables::get_arg_count(opcode) as usize;
            prop_assume!(arg_count >= 1 && opcode != ICPY);

            let bytes = code_bytes(&[opcode, regs]);
            let code = MemoryRegion::new(SectionKind::Code, 0, &bytes);
            let (_, inst) = Instructions::new(&code).next().unwrap().unwrap();
            prop_assert_eq!(inst.size, 2);
            prop_assert_eq!(inst.register_names().len(), arg_count);
        }

        #[test]
        fn immediate_operands_take_one_word(opcode in allocated_opcode(), sign in 0u8..2) {
            prop_assume!(opcode != ICPY);

            let word = InstructionWord { aflg: [0b10, 0b11, 0b10], sign, opcode }.to_bits();
            let bytes = code_bytes(&[word]);
            let code = MemoryRegion::new(SectionKind::Code, 0, &bytes);
            let (_, inst) = Instructions::new(&code).next().unwrap().unwrap();
            prop_assert_eq!(inst.size, 1);
            prop_assert!(inst.registers.is_empty());
        }

        #[test]
        fn decoding_is_idempotent(words in proptest::collection::vec(any::<u16>(), 0..64)) {
            let bytes = code_bytes(&words);
            let code = MemoryRegion::new(SectionKind::Code, 0, &bytes);
            let first = decode_all(&code).map_err(|e| e.to_string());
            let second = decode_all(&code).map_err(|e| e.to_string());
            prop_assert_eq!(first, second);
        }

        #[test]
        fn listing_has_one_line_per_instruction(
            program in proptest::collection::vec(
                (allocated_opcode(), [0u8..4, 0u8..4, 0u8..4], 0u8..2, [0u8..16, 0u8..16, 0u8..16], any::<u16>()),
                1..32,
            )
        ) {
            let mut words = Vec::new();
            let mut expected = Vec::new();
            for &(opcode, aflg, sign, regs, imm) in &program {
                let arg_count = opcode_tables::get_arg_count(opcode) as usize;
                let k = aflg[..arg_count].iter().filter(|&&flag| flag & 2 == 0).count();

                words.push(InstructionWord { aflg, sign, opcode }.to_bits());
                let mut line = format!(
                    "[{}]\t{:x} {:x} {:x} {:x} {:x}",
                    opcode_tables::get_instruction_name(opcode),
                    aflg[0],
                    aflg[1],
                    aflg[2],
                    sign,
                    opcode
                );
                if k > 0 {
                    words.push(pack_registers(&regs[..k]));
                    line.push_str("\t|");
                    for &id in &regs[..k] {
                        line.push_str(&format!(" {:>5}", Register::from_id(id).name()));
                    }
                }
                if opcode == ICPY {
                    words.push(imm);
                    line.push_str(&format!("\t| {:x}", imm));
                }
                expected.push(line);
            }

            let bytes = code_bytes(&words);
            let code = MemoryRegion::new(SectionKind::Code, 0, &bytes);
            let listing = disassemble(&code).unwrap();
            let lines: Vec<&str> = listing.lines().collect();
            prop_assert_eq!(lines, expected.iter().map(String::as_str).collect::<Vec<_>>());
        }
    }
}
