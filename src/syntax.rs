/// Splits a template or a candidate input into its decoration zones.
pub mod decompose;

/// Formats a mode's assembly syntax into a bounded buffer.
pub mod render;

/// Matches raw operand text against the catalog.
pub mod matcher;

/// The middle zone of a decomposed template or input.
///
/// Matching compares zones by shape only, never by content: any value
/// run matches any placeholder run. The accumulator's literal `A` is its
/// own shape so that the input `A` can only ever mean the accumulator
/// and never a one character address.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum OperandZone<'a> {
    /// No operand at all (implied mode).
    Absent,
    /// The literal accumulator token `A`.
    Accumulator,
    /// An operand value or a placeholder run such as `HHLL`.
    Value(&'a str),
}

impl<'a> OperandZone<'a> {
    pub fn is_present(&self) -> bool {
        !matches!(self, OperandZone::Absent)
    }

    /// The zone's text: empty when absent, `A` for the accumulator.
    pub fn text(&self) -> &'a str {
        match self {
            OperandZone::Absent => "",
            OperandZone::Accumulator => "A",
            OperandZone::Value(text) => text,
        }
    }

    /// Whether two zones agree for matching purposes. Value contents are
    /// deliberately not compared.
    pub fn same_shape(&self, other: &OperandZone) -> bool {
        matches!(
            (self, other),
            (OperandZone::Absent, OperandZone::Absent)
                | (OperandZone::Accumulator, OperandZone::Accumulator)
                | (OperandZone::Value(_), OperandZone::Value(_))
        )
    }
}
