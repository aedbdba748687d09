use crate::{
    catalog::{Catalog, SENTINEL},
    syntax::decompose::{decompose, decompose_template},
};

/// Result of matching operand text against the catalog.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct OperandMatch<'a> {
    /// Catalog index of the matched mode, or [`SENTINEL`] for no match.
    pub aix: usize,
    /// The bare operand with the mode's decoration stripped. For the
    /// accumulator this is the literal `A`, which callers treat as "no
    /// operand"; on no match it is the untouched input.
    pub operand: &'a str,
}

impl OperandMatch<'_> {
    pub fn is_match(&self) -> bool {
        self.aix != SENTINEL
    }
}

/// Determine which addressing mode `input` is written in.
///
/// The input and every template are decomposed the same way, and a
/// template matches when prefix and suffix are equal (case-insensitive)
/// and the operand zones have the same shape. Operand contents are never
/// compared: any value text matches any placeholder run, so numeric
/// validation stays with the caller.
///
/// The scan runs in ascending catalog order and returns the first match.
/// Catalog construction guarantees at most one template can match (see
/// [`Catalog::build`]), but ascending order is the contractual tie-break
/// regardless.
#[tracing::instrument]
pub fn parse_operand<'a>(catalog: &Catalog, input: &'a str) -> OperandMatch<'a> {
    let parts = decompose(input);

    for (aix, mode) in catalog.modes().iter().enumerate().skip(SENTINEL + 1) {
        let shape = decompose_template(mode.syntax);
        if parts.prefix.eq_ignore_ascii_case(shape.prefix)
            && parts.operand.same_shape(&shape.operand)
            && parts.suffix.eq_ignore_ascii_case(shape.suffix)
        {
            return OperandMatch {
                aix,
                operand: parts.operand.text(),
            };
        }
    }

    OperandMatch {
        aix: SENTINEL,
        operand: input,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CATALOG;

    use pretty_assertions::assert_eq;

    fn parse(input: &str) -> (&'static str, &str) {
        let matched = parse_operand(&CATALOG, input);
        (CATALOG.get(matched.aix).code, matched.operand)
    }

    #[test]
    fn test_parse() {
        let tests = vec![
            ("4AFE", ("ABS", "4AFE")),
            ("4AFE,X", ("ABX", "4AFE")),
            ("4AFE,Y", ("ABY", "4AFE")),
            ("#12", ("IMM", "12")),
            ("", ("IMP", "")),
            ("(1234)", ("IND", "1234")),
            ("+1F", ("REL", "1F")),
            ("(4A),Y", ("ZIY", "4A")),
            ("*4A", ("ZPG", "4A")),
            ("*4A,X", ("ZPX", "4A")),
            ("*4A,Y", ("ZPY", "4A")),
            ("(4A,X)", ("ZXI", "4A")),
        ];
        for (input, expected) in tests {
            assert_eq!(parse(input), expected, "input: '{}'", input);
        }
    }

    #[test]
    fn test_parse_accumulator() {
        // `A` is the accumulator; anything longer is an absolute operand.
        assert_eq!(parse("A"), ("ACC", "A"));
        assert_eq!(parse("a"), ("ACC", "A"));
        assert_eq!(parse("AB"), ("ABS", "AB"));
        assert_eq!(parse("A8"), ("ABS", "A8"));
    }

    #[test]
    fn test_parse_parenthesis_disambiguation() {
        assert_eq!(parse("(12,X)"), ("ZXI", "12"));
        assert_eq!(parse("(12),Y"), ("ZIY", "12"));
        assert_eq!(parse("(1234)"), ("IND", "1234"));
    }

    #[test]
    fn test_parse_is_case_insensitive_on_decoration() {
        assert_eq!(parse("(4a,x)"), ("ZXI", "4a"));
        assert_eq!(parse("(4a),y"), ("ZIY", "4a"));
        assert_eq!(parse("1234,x"), ("ABX", "1234"));
    }

    #[test]
    fn test_parse_does_not_validate_operand_contents() {
        // Shape matching only; `AB CD` is not a number but the indirect
        // decoration around it is intact.
        assert_eq!(parse("(AB CD)"), ("IND", "AB CD"));
    }

    #[test]
    fn test_parse_no_match() {
        let tests = vec![
            "(((",     // decoration with no operand
            "12)",     // closing paren without an opening one
            "(12",     // opening paren without a closing one
            "(12,Y)",  // the 6502 has no (zp,Y) mode
            "#12,X",   // immediate cannot be indexed
            ",X",      // suffix with no operand
            "12,Z",    // no Z index register
        ];
        for input in tests {
            let matched = parse_operand(&CATALOG, input);
            assert_eq!(matched.aix, SENTINEL, "input: '{}'", input);
            assert!(!matched.is_match(), "input: '{}'", input);
            // No match leaves the operand untouched.
            assert_eq!(matched.operand, input, "input: '{}'", input);
        }
    }
}
