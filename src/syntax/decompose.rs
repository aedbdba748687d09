use super::OperandZone;

// Characters that may decorate a template before the operand.
const PREFIX_DECORATIONS: &[u8] = b"#(+*";

// Characters that end the operand zone. Decorations after the operand
// (`)`, `,X`, `,Y`) always start with one of these.
const OPERAND_STOPPERS: &[u8] = b"),";

/// A template or input split into its three decoration zones.
///
/// The zones are contiguous borrows of the original text:
/// `(4A,X)` splits into prefix `(`, operand `4A` and suffix `,X)`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct SyntaxParts<'a> {
    /// Decoration before the operand, drawn from `#`, `(`, `+`, `*`.
    pub prefix: &'a str,
    /// The operand zone, see [`OperandZone`].
    pub operand: OperandZone<'a>,
    /// Everything from the first `)` or `,` to the end.
    pub suffix: &'a str,
}

/// Decompose operand-only text into prefix, operand zone and suffix.
///
/// Decorations never nest and never overlap the operand, so a single
/// left-to-right scan with three stopping predicates is enough:
/// 1. the prefix is the maximal run of decoration characters,
/// 2. the operand runs up to the first `)`, `,` or end of text,
/// 3. the suffix is the rest.
///
/// A bare `A` (case-insensitive) is the literal accumulator token, not a
/// one character operand; `OPC A` would otherwise be indistinguishable
/// from `OPC HHLL` once the placeholder text is ignored.
pub fn decompose(text: &str) -> SyntaxParts<'_> {
    let bytes = text.as_bytes();

    let mut ix = 0;
    while ix < bytes.len() && PREFIX_DECORATIONS.contains(&bytes[ix]) {
        ix += 1;
    }
    let prefix = &text[..ix];

    let rest = &text[ix..];
    if prefix.is_empty() && rest.eq_ignore_ascii_case("A") {
        return SyntaxParts {
            prefix,
            operand: OperandZone::Accumulator,
            suffix: &text[text.len()..],
        };
    }

    let mut end = ix;
    while end < bytes.len() && !OPERAND_STOPPERS.contains(&bytes[end]) {
        end += 1;
    }
    let operand = if end > ix {
        OperandZone::Value(&text[ix..end])
    } else {
        OperandZone::Absent
    };

    SyntaxParts {
        prefix,
        operand,
        suffix: &text[end..],
    }
}

/// Decompose a catalog syntax template such as `OPC (LL,X)`.
///
/// Same as [`decompose`] but first strips the `OPC` mnemonic stand-in
/// and the spaces separating it from the operand notation; neither is
/// part of the returned zones.
pub fn decompose_template(syntax: &str) -> SyntaxParts<'_> {
    let bytes = syntax.as_bytes();
    let mut ix = 0;
    while ix < bytes.len() && matches!(bytes[ix], b'O' | b'P' | b'C') {
        ix += 1;
    }
    while ix < bytes.len() && bytes[ix] == b' ' {
        ix += 1;
    }
    decompose(&syntax[ix..])
}
