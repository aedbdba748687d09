use lazy_static::lazy_static;

use crate::{
    catalog::{CATALOG, SENTINEL},
    instruction::INSTRUCTION_SET,
};

/// What a single opcode byte encodes: the instruction and addressing
/// mode indices plus cycle counts. Unused opcodes are all zeros, i.e.
/// both indices are the sentinel.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct OpcodeEntry {
    /// Index into the instruction set.
    pub iix: usize,
    /// Index into the addressing mode catalog.
    pub aix: usize,
    pub cycles: u8,
    pub xcycles: u8,
}

impl OpcodeEntry {
    pub fn is_valid(&self) -> bool {
        self.iix != SENTINEL
    }
}

/// Lookup table from opcode byte to instruction variant.
#[derive(Debug)]
pub struct OpcodeTable {
    entries: [OpcodeEntry; 256],
}

impl OpcodeTable {
    fn build() -> Self {
        let mut entries = [OpcodeEntry::default(); 256];
        for (iix, ins) in INSTRUCTION_SET.instructions().iter().enumerate() {
            for var in ins.variants {
                entries[var.opcode as usize] = OpcodeEntry {
                    iix,
                    aix: CATALOG.find(var.mode),
                    cycles: var.cycles,
                    xcycles: var.xcycles,
                };
            }
        }
        Self { entries }
    }

    pub fn get(&self, opcode: u8) -> OpcodeEntry {
        self.entries[opcode as usize]
    }
}

lazy_static! {
    /// The process-wide opcode lookup table, derived from the
    /// instruction set and the catalog.
    pub static ref OPCODE_TABLE: OpcodeTable = OpcodeTable::build();
}
