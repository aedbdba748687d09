/// Static tables of the 6502 instruction set architecture and the
/// addressing-mode syntax engine built on top of them.
///
/// The engine is bidirectional:
/// 1. **Rendering** - formatting a mode's assembly syntax with a concrete
///    operand substituted, e.g. `ZXI` + `4A` becomes `(4A,X)`
/// 2. **Matching** - recognizing which addressing mode a raw operand
///    expression is written in, e.g. `(4A,X)` is `ZXI` with operand `4A`
///
/// Both directions share the same template decomposition, which guarantees
/// that whatever the renderer produces the matcher recognizes again.
pub mod syntax;

/// The addressing mode catalog: one syntax template per mode.
pub mod catalog;

/// The instruction set: mnemonics, descriptions and per-mode opcodes.
pub mod instruction;

/// Opcode lookup: which instruction variant a byte encodes.
pub mod opcode;
