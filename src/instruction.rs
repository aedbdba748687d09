use lazy_static::lazy_static;
use thiserror::Error;

use crate::catalog::{CATALOG, SENTINEL};

/// One encoding variant of an instruction, e.g. `LDA` in `ABS` mode.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Variant {
    /// Addressing mode code, resolvable through the catalog.
    pub mode: &'static str,
    /// The opcode byte for this variant.
    pub opcode: u8,
    /// Minimal number of cycles to execute this variant.
    pub cycles: u8,
    /// Worst case additional cycles (page crossings, taken branches).
    pub xcycles: u8,
}

/// Definition of one instruction, e.g. what `LDA` means and which
/// addressing mode variants it has.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Instruction {
    /// The instruction mnemonic (e.g. `LDA`).
    pub mnemonic: &'static str,
    /// Description of the instruction.
    pub description: &'static str,
    /// Detailed description, in register transfer notation.
    pub help: &'static str,
    /// The program status flags the instruction updates. Uppercase means
    /// updated, lowercase untouched.
    pub flags: &'static str,
    pub variants: &'static [Variant],
}

const fn v(mode: &'static str, opcode: u8, cycles: u8, xcycles: u8) -> Variant {
    Variant {
        mode,
        opcode,
        cycles,
        xcycles,
    }
}

// Sorted by mnemonic, with the sentinel entry first (as the addressing
// mode catalog, index 0 traps failed lookups).
pub static INSTRUCTIONS: &[Instruction] = &[
    Instruction {
        mnemonic: "0EI",
        description: "?error",
        help: "?error",
        flags: "????????",
        variants: &[],
    },
    Instruction {
        mnemonic: "ADC",
        description: "add memory to accumulator with carry",
        help: "C <- A + M + C",
        flags: "NVxbdiZC",
        variants: &[
            v("IMM", 0x69, 2, 0),
            v("ZPG", 0x65, 3, 0),
            v("ZPX", 0x75, 4, 0),
            v("ABS", 0x6D, 4, 0),
            v("ABX", 0x7D, 4, 1),
            v("ABY", 0x79, 4, 1),
            v("ZXI", 0x61, 6, 0),
            v("ZIY", 0x71, 5, 1),
        ],
    },
    Instruction {
        mnemonic: "AND",
        description: "AND memory with accumulator",
        help: "A <- A AND M",
        flags: "NvxbdiZc",
        variants: &[
            v("IMM", 0x29, 2, 0),
            v("ZPG", 0x25, 3, 0),
            v("ZPX", 0x35, 4, 0),
            v("ABS", 0x2D, 4, 0),
            v("ABX", 0x3D, 4, 1),
            v("ABY", 0x39, 4, 1),
            v("ZXI", 0x21, 6, 0),
            v("ZIY", 0x31, 5, 1),
        ],
    },
    Instruction {
        mnemonic: "ASL",
        description: "arithmetic shift one bit left (memory or accumulator)",
        help: "C <- [76543210] <- 0",
        flags: "NvxbdiZC",
        variants: &[
            v("ACC", 0x0A, 2, 0),
            v("ZPG", 0x06, 5, 0),
            v("ZPX", 0x16, 6, 0),
            v("ABS", 0x0E, 6, 0),
            v("ABX", 0x1E, 7, 0),
        ],
    },
    Instruction {
        mnemonic: "BCC",
        description: "branch on carry clear",
        help: "branch on C = 0",
        flags: "nvxbdizc",
        variants: &[v("REL", 0x90, 2, 2)],
    },
    Instruction {
        mnemonic: "BCS",
        description: "branch on carry set",
        help: "branch on C = 1",
        flags: "nvxbdizc",
        variants: &[v("REL", 0xB0, 2, 2)],
    },
    Instruction {
        mnemonic: "BEQ",
        description: "branch on result zero",
        help: "branch on Z = 1",
        flags: "nvxbdizc",
        variants: &[v("REL", 0xF0, 2, 2)],
    },
    Instruction {
        mnemonic: "BIT",
        description: "test bits in memory with accumulator",
        help: "N <- M.7; V <- M.6; Z <- A AND M",
        flags: "NVxbdiZc",
        variants: &[v("ZPG", 0x24, 3, 0), v("ABS", 0x2C, 4, 0)],
    },
    Instruction {
        mnemonic: "BMI",
        description: "branch on result minus",
        help: "branch on N = 1",
        flags: "nvxbdizc",
        variants: &[v("REL", 0x30, 2, 2)],
    },
    Instruction {
        mnemonic: "BNE",
        description: "branch on result not zero",
        help: "branch on Z = 0",
        flags: "nvxbdizc",
        variants: &[v("REL", 0xD0, 2, 2)],
    },
    Instruction {
        mnemonic: "BPL",
        description: "branch on result plus",
        help: "branch on N = 0",
        flags: "nvxbdizc",
        variants: &[v("REL", 0x10, 2, 2)],
    },
    Instruction {
        mnemonic: "BRK",
        description: "force break",
        help: "interrupt; push PC+2; push PSR",
        flags: "nvxBdIzc",
        variants: &[v("IMP", 0x00, 7, 0)],
    },
    Instruction {
        mnemonic: "BVC",
        description: "branch on overflow clear",
        help: "branch on V = 0",
        flags: "nvxbdizc",
        variants: &[v("REL", 0x50, 2, 2)],
    },
    Instruction {
        mnemonic: "BVS",
        description: "branch on overflow set",
        help: "branch on V = 1",
        flags: "nvxbdizc",
        variants: &[v("REL", 0x70, 2, 2)],
    },
    Instruction {
        mnemonic: "CLC",
        description: "clear carry flag",
        help: "C <- 0",
        flags: "nvxbdizC",
        variants: &[v("IMP", 0x18, 2, 0)],
    },
    Instruction {
        mnemonic: "CLD",
        description: "clear decimal flag",
        help: "D <- 0",
        flags: "nvxbDizc",
        variants: &[v("IMP", 0xD8, 2, 0)],
    },
    Instruction {
        mnemonic: "CLI",
        description: "clear interrupt disable flag",
        help: "I <- 0 (enabled)",
        flags: "nvxbdIzc",
        variants: &[v("IMP", 0x58, 2, 0)],
    },
    Instruction {
        mnemonic: "CLV",
        description: "clear overflow flag",
        help: "V <- 0",
        flags: "nVxbdizc",
        variants: &[v("IMP", 0xB8, 2, 0)],
    },
    Instruction {
        mnemonic: "CMP",
        description: "compare memory with accumulator",
        help: "A - M",
        flags: "NvxbdiZC",
        variants: &[
            v("IMM", 0xC9, 2, 0),
            v("ZPG", 0xC5, 3, 0),
            v("ZPX", 0xD5, 4, 0),
            v("ABS", 0xCD, 4, 0),
            v("ABX", 0xDD, 4, 1),
            v("ABY", 0xD9, 4, 1),
            v("ZXI", 0xC1, 6, 0),
            v("ZIY", 0xD1, 5, 1),
        ],
    },
    Instruction {
        mnemonic: "CPX",
        description: "compare memory and index X",
        help: "X - M",
        flags: "NvxbdiZC",
        variants: &[v("IMM", 0xE0, 2, 0), v("ZPG", 0xE4, 3, 0), v("ABS", 0xEC, 4, 0)],
    },
    Instruction {
        mnemonic: "CPY",
        description: "compare memory and index Y",
        help: "Y - M",
        flags: "NvxbdiZC",
        variants: &[v("IMM", 0xC0, 2, 0), v("ZPG", 0xC4, 3, 0), v("ABS", 0xCC, 4, 0)],
    },
    Instruction {
        mnemonic: "DEC",
        description: "decrement memory by one",
        help: "M <- M - 1",
        flags: "NvxbdiZc",
        variants: &[
            v("ZPG", 0xC6, 5, 0),
            v("ZPX", 0xD6, 6, 0),
            v("ABS", 0xCE, 6, 0),
            v("ABX", 0xDE, 7, 0),
        ],
    },
    Instruction {
        mnemonic: "DEX",
        description: "decrement index X by one",
        help: "X <- X - 1",
        flags: "NvxbdiZc",
        variants: &[v("IMP", 0xCA, 2, 0)],
    },
    Instruction {
        mnemonic: "DEY",
        description: "decrement index Y by one",
        help: "Y <- Y - 1",
        flags: "NvxbdiZc",
        variants: &[v("IMP", 0x88, 2, 0)],
    },
    Instruction {
        mnemonic: "EOR",
        description: "EOR (exclusive-or) memory with accumulator",
        help: "A <- A EOR M",
        flags: "NvxbdiZc",
        variants: &[
            v("IMM", 0x49, 2, 0),
            v("ZPG", 0x45, 3, 0),
            v("ZPX", 0x55, 4, 0),
            v("ABS", 0x4D, 4, 0),
            v("ABX", 0x5D, 4, 1),
            v("ABY", 0x59, 4, 1),
            v("ZXI", 0x41, 6, 0),
            v("ZIY", 0x51, 5, 1),
        ],
    },
    Instruction {
        mnemonic: "INC",
        description: "increment memory by one",
        help: "M <- M + 1",
        flags: "NvxbdiZc",
        variants: &[
            v("ZPG", 0xE6, 5, 0),
            v("ZPX", 0xF6, 6, 0),
            v("ABS", 0xEE, 6, 0),
            v("ABX", 0xFE, 7, 0),
        ],
    },
    Instruction {
        mnemonic: "INX",
        description: "increment index X by one",
        help: "X <- X + 1",
        flags: "NvxbdiZc",
        variants: &[v("IMP", 0xE8, 2, 0)],
    },
    Instruction {
        mnemonic: "INY",
        description: "increment index Y by one",
        help: "Y <- Y + 1",
        flags: "NvxbdiZc",
        variants: &[v("IMP", 0xC8, 2, 0)],
    },
    Instruction {
        mnemonic: "JMP",
        description: "jump to new location",
        help: "PCL <- (PC+1); PCH <- (PC+2)",
        flags: "nvxbdizc",
        variants: &[v("ABS", 0x4C, 3, 0), v("IND", 0x6C, 5, 0)],
    },
    Instruction {
        mnemonic: "JSR",
        description: "jump to new location saving return address",
        help: "push (PC+2); PCL <- (PC+1); PCH <- (PC+2)",
        flags: "nvxbdizc",
        variants: &[v("ABS", 0x20, 6, 0)],
    },
    Instruction {
        mnemonic: "LDA",
        description: "load accumulator with memory",
        help: "A <- M",
        flags: "NvxbdiZc",
        variants: &[
            v("IMM", 0xA9, 2, 0),
            v("ZPG", 0xA5, 3, 0),
            v("ZPX", 0xB5, 4, 0),
            v("ABS", 0xAD, 4, 0),
            v("ABX", 0xBD, 4, 1),
            v("ABY", 0xB9, 4, 1),
            v("ZXI", 0xA1, 6, 0),
            v("ZIY", 0xB1, 5, 1),
        ],
    },
    Instruction {
        mnemonic: "LDX",
        description: "load index X with memory",
        help: "X <- M",
        flags: "NvxbdiZc",
        variants: &[
            v("IMM", 0xA2, 2, 0),
            v("ZPG", 0xA6, 3, 0),
            v("ZPY", 0xB6, 4, 0),
            v("ABS", 0xAE, 4, 0),
            v("ABY", 0xBE, 4, 1),
        ],
    },
    Instruction {
        mnemonic: "LDY",
        description: "load index Y with memory",
        help: "Y <- M",
        flags: "NvxbdiZc",
        variants: &[
            v("IMM", 0xA0, 2, 0),
            v("ZPG", 0xA4, 3, 0),
            v("ZPX", 0xB4, 4, 0),
            v("ABS", 0xAC, 4, 0),
            v("ABX", 0xBC, 4, 1),
        ],
    },
    Instruction {
        mnemonic: "LSR",
        description: "logic shift one bit right (memory or accumulator)",
        help: "0 -> [76543210] -> C",
        flags: "NvxbdiZC",
        variants: &[
            v("ACC", 0x4A, 2, 0),
            v("ZPG", 0x46, 5, 0),
            v("ZPX", 0x56, 6, 0),
            v("ABS", 0x4E, 6, 0),
            v("ABX", 0x5E, 7, 0),
        ],
    },
    Instruction {
        mnemonic: "NOP",
        description: "no operation",
        help: "skip",
        flags: "nvxbdizc",
        variants: &[v("IMP", 0xEA, 2, 0)],
    },
    Instruction {
        mnemonic: "ORA",
        description: "OR memory with accumulator",
        help: "A <- A OR M",
        flags: "NvxbdiZc",
        variants: &[
            v("IMM", 0x09, 2, 0),
            v("ZPG", 0x05, 3, 0),
            v("ZPX", 0x15, 4, 0),
            v("ABS", 0x0D, 4, 0),
            v("ABX", 0x1D, 4, 1),
            v("ABY", 0x19, 4, 1),
            v("ZXI", 0x01, 6, 0),
            v("ZIY", 0x11, 5, 1),
        ],
    },
    Instruction {
        mnemonic: "PHA",
        description: "push accumulator on stack",
        help: "push A",
        flags: "nvxbdizc",
        variants: &[v("IMP", 0x48, 3, 0)],
    },
    Instruction {
        mnemonic: "PHP",
        description: "push processor status register on stack",
        help: "push PSR",
        flags: "nvxbdizc",
        variants: &[v("IMP", 0x08, 3, 0)],
    },
    Instruction {
        mnemonic: "PLA",
        description: "pull accumulator from stack",
        help: "pull A",
        flags: "NvxbdiZc",
        variants: &[v("IMP", 0x68, 4, 0)],
    },
    Instruction {
        mnemonic: "PLP",
        description: "pull processor status register from stack",
        help: "pull PSR",
        flags: "NVxbDIZC",
        variants: &[v("IMP", 0x28, 4, 0)],
    },
    Instruction {
        mnemonic: "ROL",
        description: "rotate one bit left (memory or accumulator)",
        help: "C <- [76543210] <- C",
        flags: "NvxbdiZC",
        variants: &[
            v("ACC", 0x2A, 2, 0),
            v("ZPG", 0x26, 5, 0),
            v("ZPX", 0x36, 6, 0),
            v("ABS", 0x2E, 6, 0),
            v("ABX", 0x3E, 7, 0),
        ],
    },
    Instruction {
        mnemonic: "ROR",
        description: "rotate one bit right (memory or accumulator)",
        help: "C -> [76543210] -> C",
        flags: "NvxbdiZC",
        variants: &[
            v("ACC", 0x6A, 2, 0),
            v("ZPG", 0x66, 5, 0),
            v("ZPX", 0x76, 6, 0),
            v("ABS", 0x6E, 6, 0),
            v("ABX", 0x7E, 7, 0),
        ],
    },
    Instruction {
        mnemonic: "RTI",
        description: "return from interrupt",
        help: "pull PSR; pull PCL; pull PCH",
        flags: "NVxbDIZC",
        variants: &[v("IMP", 0x40, 6, 0)],
    },
    Instruction {
        mnemonic: "RTS",
        description: "return from subroutine",
        help: "pull PCL; pull PCH; PC <- PC+1",
        flags: "nvxbdizc",
        variants: &[v("IMP", 0x60, 6, 0)],
    },
    Instruction {
        mnemonic: "SBC",
        description: "subtract memory from accumulator with borrow",
        help: "A <- A - M - C",
        flags: "NVxbdiZC",
        variants: &[
            v("IMM", 0xE9, 2, 0),
            v("ZPG", 0xE5, 3, 0),
            v("ZPX", 0xF5, 4, 0),
            v("ABS", 0xED, 4, 0),
            v("ABX", 0xFD, 4, 1),
            v("ABY", 0xF9, 4, 1),
            v("ZXI", 0xE1, 6, 0),
            v("ZIY", 0xF1, 5, 1),
        ],
    },
    Instruction {
        mnemonic: "SEC",
        description: "set carry flag",
        help: "C <- 1",
        flags: "nvxbdizC",
        variants: &[v("IMP", 0x38, 2, 0)],
    },
    Instruction {
        mnemonic: "SED",
        description: "set decimal flag",
        help: "D <- 1",
        flags: "nvxbDizc",
        variants: &[v("IMP", 0xF8, 2, 0)],
    },
    Instruction {
        mnemonic: "SEI",
        description: "set interrupt disable flag",
        help: "I <- 1 (disabled)",
        flags: "nvxbdIzc",
        variants: &[v("IMP", 0x78, 2, 0)],
    },
    Instruction {
        mnemonic: "STA",
        description: "store accumulator in memory",
        help: "M <- A",
        flags: "nvxbdizc",
        variants: &[
            v("ZPG", 0x85, 3, 0),
            v("ZPX", 0x95, 4, 0),
            v("ABS", 0x8D, 4, 0),
            v("ABX", 0x9D, 5, 0),
            v("ABY", 0x99, 5, 0),
            v("ZXI", 0x81, 6, 0),
            v("ZIY", 0x91, 6, 0),
        ],
    },
    Instruction {
        mnemonic: "STX",
        description: "store index X in memory",
        help: "M <- X",
        flags: "nvxbdizc",
        variants: &[v("ZPG", 0x86, 3, 0), v("ZPY", 0x96, 4, 0), v("ABS", 0x8E, 4, 0)],
    },
    Instruction {
        mnemonic: "STY",
        description: "store index Y in memory",
        help: "M <- Y",
        flags: "nvxbdizc",
        variants: &[v("ZPG", 0x84, 3, 0), v("ZPX", 0x94, 4, 0), v("ABS", 0x8C, 4, 0)],
    },
    Instruction {
        mnemonic: "TAX",
        description: "transfer accumulator to index X",
        help: "X <- A",
        flags: "NvxbdiZc",
        variants: &[v("IMP", 0xAA, 2, 0)],
    },
    Instruction {
        mnemonic: "TAY",
        description: "transfer accumulator to index Y",
        help: "Y <- A",
        flags: "NvxbdiZc",
        variants: &[v("IMP", 0xA8, 2, 0)],
    },
    Instruction {
        mnemonic: "TSX",
        description: "transfer stack pointer to index X",
        help: "X <- SP",
        flags: "NvxbdiZc",
        variants: &[v("IMP", 0xBA, 2, 0)],
    },
    Instruction {
        mnemonic: "TXA",
        description: "transfer index X to accumulator",
        help: "A <- X",
        flags: "NvxbdiZc",
        variants: &[v("IMP", 0x8A, 2, 0)],
    },
    Instruction {
        mnemonic: "TXS",
        description: "transfer index X to stack register",
        help: "SP <- X",
        flags: "nvxbdizc",
        variants: &[v("IMP", 0x9A, 2, 0)],
    },
    Instruction {
        mnemonic: "TYA",
        description: "transfer index Y to accumulator",
        help: "A <- Y",
        flags: "NvxbdiZc",
        variants: &[v("IMP", 0x98, 2, 0)],
    },
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InstructionSetError {
    #[error("instruction set not sorted by mnemonic: '{0}' listed before '{1}'")]
    NotSorted(&'static str, &'static str),
    #[error("instruction '{0}' refers to unknown addressing mode '{1}'")]
    UnknownMode(&'static str, &'static str),
    #[error("instruction '{0}' repeats addressing mode '{1}'")]
    DuplicateMode(&'static str, &'static str),
}

/// The ordered, immutable instruction set.
///
/// Index 0 is the sentinel entry; real instructions start at index 1 and
/// are sorted by mnemonic, like the addressing mode catalog.
#[derive(Debug, PartialEq, Eq)]
pub struct InstructionSet {
    instructions: &'static [Instruction],
}

impl InstructionSet {
    pub fn build(instructions: &'static [Instruction]) -> Result<Self, InstructionSetError> {
        for pair in instructions.windows(2) {
            if pair[0].mnemonic.to_ascii_uppercase() >= pair[1].mnemonic.to_ascii_uppercase() {
                return Err(InstructionSetError::NotSorted(
                    pair[0].mnemonic,
                    pair[1].mnemonic,
                ));
            }
        }

        for ins in instructions {
            for (ix, var) in ins.variants.iter().enumerate() {
                if CATALOG.find(var.mode) == SENTINEL {
                    return Err(InstructionSetError::UnknownMode(ins.mnemonic, var.mode));
                }
                if ins.variants[..ix].iter().any(|other| other.mode == var.mode) {
                    return Err(InstructionSetError::DuplicateMode(ins.mnemonic, var.mode));
                }
            }
        }

        Ok(Self { instructions })
    }

    /// All entries, sentinel included.
    pub fn instructions(&self) -> &'static [Instruction] {
        self.instructions
    }

    pub fn get(&self, iix: usize) -> &'static Instruction {
        &self.instructions[iix]
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Look up an instruction by mnemonic, case-insensitively.
    ///
    /// Returns the instruction's index, or [`SENTINEL`] if no such
    /// mnemonic exists. Only the first three characters are considered.
    #[tracing::instrument]
    pub fn find(&self, mnemonic: &str) -> usize {
        let name: String = mnemonic
            .chars()
            .take(3)
            .map(|c| c.to_ascii_uppercase())
            .collect();
        match self.instructions[SENTINEL + 1..]
            .binary_search_by(|ins| ins.mnemonic.cmp(name.as_str()))
        {
            Ok(ix) => ix + 1,
            Err(_) => SENTINEL,
        }
    }

    /// The variant of instruction `iix` in addressing mode `aix`, if the
    /// instruction supports that mode.
    pub fn variant(&self, iix: usize, aix: usize) -> Option<&'static Variant> {
        self.instructions[iix]
            .variants
            .iter()
            .find(|var| CATALOG.find(var.mode) == aix)
    }
}

lazy_static! {
    /// The process-wide instruction set.
    pub static ref INSTRUCTION_SET: InstructionSet =
        InstructionSet::build(INSTRUCTIONS).expect("embedded instruction table is invalid");
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_embedded_instruction_set_is_valid() {
        assert!(InstructionSet::build(INSTRUCTIONS).is_ok());
    }

    #[test]
    fn test_build_results_are_comparable() {
        assert_eq!(
            InstructionSet::build(INSTRUCTIONS),
            Ok(InstructionSet {
                instructions: INSTRUCTIONS
            })
        );
    }

    #[test]
    fn test_find() {
        let tests = vec![
            ("LDA", true),
            ("lda", true),
            ("Brk", true),
            ("TYA", true),
            ("XXX", false),
            ("", false),
            ("0EI", false), // the sentinel itself is never found
        ];
        for (mnemonic, expect_found) in tests {
            let iix = INSTRUCTION_SET.find(mnemonic);
            assert_eq!(iix != SENTINEL, expect_found, "mnemonic: '{}'", mnemonic);
            if expect_found {
                assert!(INSTRUCTION_SET
                    .get(iix)
                    .mnemonic
                    .eq_ignore_ascii_case(mnemonic));
            }
        }
    }

    #[test]
    fn test_variant_lookup() {
        let iix = INSTRUCTION_SET.find("LDA");
        let abs = CATALOG.find("ABS");
        let var = INSTRUCTION_SET.variant(iix, abs).expect("LDA has ABS");
        assert_eq!(var.opcode, 0xAD);
        assert_eq!(var.cycles, 4);

        let imp = CATALOG.find("IMP");
        assert_eq!(INSTRUCTION_SET.variant(iix, imp), None);
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        static BAD: &[Instruction] = &[
            Instruction {
                mnemonic: "0EI",
                description: "?error",
                help: "?error",
                flags: "????????",
                variants: &[],
            },
            Instruction {
                mnemonic: "LDA",
                description: "load accumulator with memory",
                help: "A <- M",
                flags: "NvxbdiZc",
                variants: &[v("XYZ", 0xA9, 2, 0)],
            },
        ];
        assert_eq!(
            InstructionSet::build(BAD),
            Err(InstructionSetError::UnknownMode("LDA", "XYZ"))
        );
    }

    #[test]
    fn test_documented_instruction_count() {
        // 56 documented 6502 instructions plus the sentinel.
        assert_eq!(INSTRUCTION_SET.len(), 57);
    }
}
