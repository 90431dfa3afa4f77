use rowan::TextRange;

use crate::edit::TextEdit;

/// 1-based line and column of the start of `range`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
    pub range: TextRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fix {
    pub message: String,
    pub edits: Vec<TextEdit>,
}

/// A finding in the document. Findings are always reported as warnings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub location: Location,
    pub message: String,
    pub code: String,
    pub fix: Option<Fix>,
}

impl Diagnostic {
    pub fn warning(
        location: Location,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            location,
            message: message.into(),
            code: code.into(),
            fix: None,
        }
    }

    pub fn with_fix(mut self, fix: Fix) -> Self {
        self.fix = Some(fix);
        self
    }
}

impl Location {
    pub fn from_range(range: TextRange, input: &str) -> Self {
        let (line, column) = offset_to_line_col(input, range.start().into());
        Self {
            line,
            column,
            range,
        }
    }
}

/// Columns count characters, not bytes.
pub(crate) fn offset_to_line_col(input: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut column = 1;

    for (i, ch) in input.char_indices() {
        if i >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }

    (line, column)
}

/// Edits of every fix, ready for [`crate::edit::apply_all`].
pub fn fix_edits(diagnostics: &[Diagnostic]) -> impl Iterator<Item = &TextEdit> {
    diagnostics
        .iter()
        .filter_map(|d| d.fix.as_ref())
        .flat_map(|f| &f.edits)
}
