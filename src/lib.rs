#[macro_use]
extern crate lazy_static;

pub mod config;
pub mod container;
pub mod decompress;
pub mod error;
pub mod instruction;
pub mod listing;
pub mod opcode_tables;
pub mod registers;
pub mod vm;

mod listing_tests;

pub use error::{MedeaError, Result};

/*
Layout of a decompressed image

        u8  kind | u16 words | payload ...   section 1
        u8  kind | u16 words | payload ...   section 2
        ...

kind 1  SIN     input memory
kind 2  SCODE   code memory, decoded by instruction.rs
kind 3  SMAIN   general purpose memory
other   SERROR  skipped

Instruction encoding (words)
        [AFLG0:2][AFLG1:2][AFLG2:2][SIGN:1][OPCODE:9]
        [operand word]       if any operand is in register mode
        [immediate]          ICPY only
*/
