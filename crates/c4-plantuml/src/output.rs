//! Append-only sink for diagram text.

/// Indentation written per nesting level.
const INDENT: &str = "  ";

/// Diagram text being assembled for a single view.
///
/// Text is only ever appended; a render call owns its `Output` for the whole
/// pass and hands the finished text to the caller.
#[derive(Debug, Default)]
pub struct Output {
    text: String,
}

impl Output {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `line` indented by `depth` levels, followed by a newline.
    pub fn line(&mut self, depth: usize, line: &str) {
        for _ in 0..depth {
            self.text.push_str(INDENT);
        }
        self.text.push_str(line);
        self.text.push('\n');
    }

    /// Appends an empty line.
    pub fn blank(&mut self) {
        self.text.push('\n');
    }

    /// Appends `text` verbatim.
    pub fn raw(&mut self, text: &str) {
        self.text.push_str(text);
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_new_is_empty() {
        assert_eq!(Output::new().into_string(), "");
    }

    #[test]
    fn test_line_indents_by_depth() {
        let mut output = Output::new();
        output.line(0, "a {");
        output.line(2, "b");
        output.blank();
        output.raw("c");

        assert_eq!(output.into_string(), "a {\n    b\n\nc");
    }
}
