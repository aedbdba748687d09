use crate::{
    catalog::ModeTemplate,
    syntax::{decompose::decompose_template, OperandZone},
};

// Write `parts` into `buf` with `snprintf`-style truncation: at most
// `buf.len() - 1` bytes plus a NUL terminator, returning the length the
// full text would have had.
fn write_bounded(buf: &mut [u8], parts: &[&str]) -> usize {
    let wanted = parts.iter().map(|part| part.len()).sum();
    if buf.is_empty() {
        return wanted;
    }

    let limit = buf.len() - 1;
    let mut written = 0;
    'copy: for part in parts {
        for &byte in part.as_bytes() {
            if written == limit {
                break 'copy;
            }
            buf[written] = byte;
            written += 1;
        }
    }
    buf[written] = 0;

    wanted
}

/// Render a mode's assembly syntax with `operand` substituted.
///
/// The operand replaces the template's placeholder run; without an
/// operand the raw placeholder text is kept, so `ZXI` renders as
/// `(4A,X)` with operand `4A` and as `(LL,X)` without. The accumulator's
/// literal `A` and the decorations are emitted as-is, operand or not.
///
/// At most `buf.len() - 1` bytes are written, followed by a NUL
/// terminator; the returned wanted length is always that of the full
/// text, terminator excluded, and callers detect truncation by comparing
/// it against the capacity they supplied. An empty `buf` writes nothing
/// and just measures, which callers use to size a buffer for a second
/// call.
#[tracing::instrument]
pub fn render_operand(mode: &ModeTemplate, operand: Option<&str>, buf: &mut [u8]) -> usize {
    let parts = decompose_template(mode.syntax);
    let middle = match (parts.operand, operand) {
        (OperandZone::Value(_), Some(operand)) => operand,
        (zone, _) => zone.text(),
    };
    write_bounded(buf, &[parts.prefix, middle, parts.suffix])
}

/// Render a mode's three letter code, left-justified and space-padded
/// to at least `min_width`, under the same truncation contract as
/// [`render_operand`]. Used for fixed-column tabular display.
#[tracing::instrument]
pub fn render_name(mode: &ModeTemplate, min_width: usize, buf: &mut [u8]) -> usize {
    let padding = " ".repeat(min_width.saturating_sub(mode.code.len()));
    write_bounded(buf, &[mode.code, &padding])
}

/// Convenience for callers that want an owned, untruncated string.
#[tracing::instrument]
pub fn render_operand_string(mode: &ModeTemplate, operand: Option<&str>) -> String {
    let parts = decompose_template(mode.syntax);
    let middle = match (parts.operand, operand) {
        (OperandZone::Value(_), Some(operand)) => operand,
        (zone, _) => zone.text(),
    };
    format!("{}{}{}", parts.prefix, middle, parts.suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CATALOG;

    use pretty_assertions::assert_eq;

    fn rendered(buf: &[u8]) -> &str {
        let nul = buf
            .iter()
            .position(|&b| b == 0)
            .expect("buffer is not terminated");
        std::str::from_utf8(&buf[..nul]).expect("buffer is not valid UTF-8")
    }

    #[test]
    fn test_render_with_operand() {
        let tests = vec![
            ("ABS", "4AFE", "4AFE"),
            ("ABX", "4AFE", "4AFE,X"),
            ("ABY", "4AFE", "4AFE,Y"),
            ("IMM", "12", "#12"),
            ("IND", "1234", "(1234)"),
            ("REL", "1F", "+1F"),
            ("ZIY", "4A", "(4A),Y"),
            ("ZPG", "4A", "*4A"),
            ("ZPX", "4A", "*4A,X"),
            ("ZPY", "4A", "*4A,Y"),
            ("ZXI", "4A", "(4A,X)"),
        ];
        for (code, operand, expected) in tests {
            let mode = CATALOG.get(CATALOG.find(code));
            let mut buf = [0u8; 16];
            let wanted = render_operand(mode, Some(operand), &mut buf);
            assert_eq!(rendered(&buf), expected, "code: '{}'", code);
            assert_eq!(wanted, expected.len(), "code: '{}'", code);
        }
    }

    #[test]
    fn test_render_placeholders() {
        // No operand keeps the raw placeholder text, as used by help and
        // table output.
        let tests = vec![
            ("ABS", "HHLL"),
            ("ACC", "A"),
            ("IMM", "#NN"),
            ("IMP", ""),
            ("ZXI", "(LL,X)"),
        ];
        for (code, expected) in tests {
            let mode = CATALOG.get(CATALOG.find(code));
            let mut buf = [0u8; 16];
            let wanted = render_operand(mode, None, &mut buf);
            assert_eq!(rendered(&buf), expected, "code: '{}'", code);
            assert_eq!(wanted, expected.len(), "code: '{}'", code);
        }
    }

    #[test]
    fn test_render_accumulator_ignores_operand() {
        // The accumulator's `A` is a fixed token, not a placeholder.
        let mode = CATALOG.get(CATALOG.find("ACC"));
        let mut buf = [0u8; 16];
        let wanted = render_operand(mode, Some("4A"), &mut buf);
        assert_eq!(rendered(&buf), "A");
        assert_eq!(wanted, 1);
    }

    #[test]
    fn test_render_truncation() {
        // A capacity of 3 holds two characters plus the terminator; the
        // wanted length still reports the full text.
        let mode = CATALOG.get(CATALOG.find("ABS"));
        let mut buf = [0xffu8; 3];
        let wanted = render_operand(mode, Some("ABCDEF"), &mut buf);
        assert_eq!(wanted, 6);
        assert_eq!(&buf, b"AB\0");
    }

    #[test]
    fn test_render_exact_fit() {
        let mode = CATALOG.get(CATALOG.find("IMM"));
        let mut buf = [0xffu8; 4];
        let wanted = render_operand(mode, Some("12"), &mut buf);
        assert_eq!(wanted, 3);
        assert_eq!(&buf, b"#12\0");
    }

    #[test]
    fn test_render_measure_only() {
        // Empty buffer: nothing written, wanted length still computed.
        let mode = CATALOG.get(CATALOG.find("ZXI"));
        let wanted = render_operand(mode, Some("4A"), &mut []);
        assert_eq!(wanted, "(4A,X)".len());
    }

    #[test]
    fn test_render_two_pass_sizing() {
        let mode = CATALOG.get(CATALOG.find("ZIY"));
        let wanted = render_operand(mode, Some("D2"), &mut []);
        let mut buf = vec![0u8; wanted + 1];
        let second = render_operand(mode, Some("D2"), &mut buf);
        assert_eq!(second, wanted);
        assert_eq!(rendered(&buf), "(D2),Y");
    }

    #[test]
    fn test_render_name() {
        let mode = CATALOG.get(CATALOG.find("ABS"));
        let mut buf = [0u8; 8];
        let wanted = render_name(mode, 5, &mut buf);
        assert_eq!(wanted, 5);
        assert_eq!(rendered(&buf), "ABS  ");
    }

    #[test]
    fn test_render_name_truncation() {
        let mode = CATALOG.get(CATALOG.find("ABS"));
        let mut buf = [0u8; 2];
        let wanted = render_name(mode, 5, &mut buf);
        assert_eq!(wanted, 5);
        assert_eq!(&buf, b"A\0");
    }

    #[test]
    fn test_render_name_wider_than_min_width() {
        let mode = CATALOG.get(CATALOG.find("ABS"));
        let mut buf = [0u8; 8];
        let wanted = render_name(mode, 1, &mut buf);
        assert_eq!(wanted, 3);
        assert_eq!(rendered(&buf), "ABS");
    }

    #[test]
    fn test_render_operand_string() {
        let mode = CATALOG.get(CATALOG.find("ZXI"));
        assert_eq!(render_operand_string(mode, Some("4A")), "(4A,X)");
        assert_eq!(render_operand_string(mode, None), "(LL,X)");
    }
}
