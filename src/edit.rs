//! Span replacements produced by actions.

use rowan::{TextRange, TextSize};

/// Replace the text in `range` with `new_text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub range: TextRange,
    pub new_text: String,
}

impl TextEdit {
    pub fn replace(range: TextRange, new_text: impl Into<String>) -> Self {
        Self {
            range,
            new_text: new_text.into(),
        }
    }

    pub fn insert(offset: TextSize, new_text: impl Into<String>) -> Self {
        Self::replace(TextRange::empty(offset), new_text)
    }

    pub fn delete(range: TextRange) -> Self {
        Self::replace(range, String::new())
    }

    pub fn apply(&self, text: &str) -> String {
        apply_all(text, std::slice::from_ref(self))
    }
}

/// Apply non-overlapping edits in one pass. Edits overlapping an earlier one
/// (by start offset) are skipped.
pub fn apply_all<'a>(text: &str, edits: impl IntoIterator<Item = &'a TextEdit>) -> String {
    let mut edits: Vec<&TextEdit> = edits.into_iter().collect();
    edits.sort_by_key(|e| e.range.start());

    let mut output = String::with_capacity(text.len());
    let mut last_end = 0;

    for edit in edits {
        let start: usize = edit.range.start().into();
        let end: usize = edit.range.end().into();
        if start < last_end {
            log::debug!("skipping overlapping edit at {start}..{end}");
            continue;
        }

        output.push_str(&text[last_end..start]);
        output.push_str(&edit.new_text);
        last_end = end;
    }

    output.push_str(&text[last_end..]);
    output
}
