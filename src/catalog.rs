use lazy_static::lazy_static;
use thiserror::Error;

use crate::syntax::decompose::decompose_template;

/// Reserved catalog index meaning "no such addressing mode".
///
/// Entry 0 of the catalog (and of the instruction set) is an error entry
/// that is never rendered and never returned by a successful match, so a
/// zeroed index traps uninitialized or failed lookups.
pub const SENTINEL: usize = 0;

/// Definition of one addressing mode, e.g. what `ABS` means.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct ModeTemplate {
    /// Three letter name of the addressing mode (e.g. `ABS`).
    pub code: &'static str,
    /// Number of bytes an instruction in this mode encodes to,
    /// opcode byte included (1, 2 or 3).
    pub bytes: u8,
    /// Human readable description of the addressing mode.
    pub description: &'static str,
    /// Notation in assembly language, e.g. `OPC (LL,X)`.
    ///
    /// The leading `OPC` stands for the mnemonic and is stripped before
    /// the template is used. `HHLL`, `LL` and `NN` are operand
    /// placeholders; `ACC` instead carries the literal register name `A`.
    /// Everything else is decoration that must appear verbatim.
    pub syntax: &'static str,
}

// Sorted by code so lookups can binary search. The mode codes for the
// zero page indirect modes are ZXI/ZIY rather than the historical INX/INY,
// which would collide with the INX/INY instruction mnemonics.
static MODE_TEMPLATES: &[ModeTemplate] = &[
    ModeTemplate {
        code: "0ER",
        bytes: 1,
        description: "?error",
        syntax: "??err??",
    },
    ModeTemplate {
        code: "ABS",
        bytes: 3,
        description: "Absolute",
        syntax: "OPC HHLL",
    },
    ModeTemplate {
        code: "ABX",
        bytes: 3,
        description: "Absolute, indexed with X",
        syntax: "OPC HHLL,X",
    },
    ModeTemplate {
        code: "ABY",
        bytes: 3,
        description: "Absolute, indexed with Y",
        syntax: "OPC HHLL,Y",
    },
    ModeTemplate {
        code: "ACC",
        bytes: 1,
        description: "Accumulator",
        syntax: "OPC A",
    },
    ModeTemplate {
        code: "IMM",
        bytes: 2,
        description: "Immediate",
        syntax: "OPC #NN",
    },
    ModeTemplate {
        code: "IMP",
        bytes: 1,
        description: "Implied",
        syntax: "OPC",
    },
    ModeTemplate {
        code: "IND",
        bytes: 3,
        description: "Indirect",
        syntax: "OPC (HHLL)",
    },
    ModeTemplate {
        code: "REL",
        bytes: 2,
        description: "Relative to PC",
        syntax: "OPC +NN",
    },
    ModeTemplate {
        code: "ZIY",
        bytes: 2,
        description: "Zero page, indirect, indexed with Y",
        syntax: "OPC (LL),Y",
    },
    ModeTemplate {
        code: "ZPG",
        bytes: 2,
        description: "Zero page",
        syntax: "OPC *LL",
    },
    ModeTemplate {
        code: "ZPX",
        bytes: 2,
        description: "Zero page, indexed with X",
        syntax: "OPC *LL,X",
    },
    ModeTemplate {
        code: "ZPY",
        bytes: 2,
        description: "Zero page, indexed with Y",
        syntax: "OPC *LL,Y",
    },
    ModeTemplate {
        code: "ZXI",
        bytes: 2,
        description: "Zero page, indexed with X, indirect",
        syntax: "OPC (LL,X)",
    },
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog not sorted by code: '{0}' listed before '{1}'")]
    NotSorted(&'static str, &'static str),
    #[error("addressing modes '{0}' and '{1}' have the same syntax shape")]
    AmbiguousShape(&'static str, &'static str),
    #[error("addressing mode code '{0}' collides with an instruction mnemonic")]
    MnemonicCollision(&'static str),
}

/// The ordered, immutable set of addressing mode templates.
///
/// Index 0 is the [`SENTINEL`] entry; real modes start at index 1 and
/// are sorted by code. Built once at startup as [`struct@CATALOG`] and
/// read-only afterwards.
#[derive(Debug, PartialEq, Eq)]
pub struct Catalog {
    modes: &'static [ModeTemplate],
}

impl Catalog {
    /// Validate the mode table and wrap it in a catalog.
    ///
    /// A failure means the embedded table itself is wrong, so this is
    /// only fallible for the benefit of the test suite; [`struct@CATALOG`]
    /// panics on it.
    pub fn build(modes: &'static [ModeTemplate]) -> Result<Self, CatalogError> {
        for pair in modes.windows(2) {
            if pair[0].code.to_ascii_uppercase() >= pair[1].code.to_ascii_uppercase() {
                return Err(CatalogError::NotSorted(pair[0].code, pair[1].code));
            }
        }

        // The matcher compares only decoration shapes, never operand
        // contents, so two modes with the same shape would be ambiguous.
        let real = &modes[SENTINEL + 1..];
        for (ix, mode) in real.iter().enumerate() {
            let shape = decompose_template(mode.syntax);
            for other in &real[ix + 1..] {
                let other_shape = decompose_template(other.syntax);
                if shape.prefix.eq_ignore_ascii_case(other_shape.prefix)
                    && shape.operand.same_shape(&other_shape.operand)
                    && shape.suffix.eq_ignore_ascii_case(other_shape.suffix)
                {
                    return Err(CatalogError::AmbiguousShape(mode.code, other.code));
                }
            }
        }

        // Mode codes and instruction mnemonics share one namespace in the
        // command interpreter, so a collision would make name resolution
        // ambiguous there.
        for mode in real {
            for ins in crate::instruction::INSTRUCTIONS {
                if mode.code.eq_ignore_ascii_case(ins.mnemonic) {
                    return Err(CatalogError::MnemonicCollision(mode.code));
                }
            }
        }

        Ok(Self { modes })
    }

    /// All entries, sentinel included. Real modes are `modes()[1..]`.
    pub fn modes(&self) -> &'static [ModeTemplate] {
        self.modes
    }

    pub fn get(&self, aix: usize) -> &'static ModeTemplate {
        &self.modes[aix]
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    /// Look up a mode by its three letter code, case-insensitively.
    ///
    /// Returns the mode's catalog index, or [`SENTINEL`] if no mode with
    /// that code exists. Only the first three characters of `code` are
    /// considered.
    #[tracing::instrument]
    pub fn find(&self, code: &str) -> usize {
        let name: String = code.chars().take(3).map(|c| c.to_ascii_uppercase()).collect();
        match self.modes[SENTINEL + 1..].binary_search_by(|mode| mode.code.cmp(name.as_str())) {
            Ok(ix) => ix + 1,
            Err(_) => SENTINEL,
        }
    }
}

lazy_static! {
    /// The process-wide addressing mode catalog.
    pub static ref CATALOG: Catalog =
        Catalog::build(MODE_TEMPLATES).expect("embedded addressing mode table is invalid");
}
