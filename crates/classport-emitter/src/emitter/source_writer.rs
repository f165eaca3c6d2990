//! Indentation-aware text buffer used by the printer.

pub struct SourceWriter {
    output: String,
    indent_unit: String,
    indent_level: usize,
    at_line_start: bool,
}

impl SourceWriter {
    pub fn new(indent_unit: &str) -> Self {
        Self {
            output: String::with_capacity(1024),
            indent_unit: indent_unit.to_string(),
            indent_level: 0,
            at_line_start: true,
        }
    }

    /// Write text, indenting first if this starts a new line.
    pub fn write(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.at_line_start {
            for _ in 0..self.indent_level {
                self.output.push_str(&self.indent_unit);
            }
            self.at_line_start = false;
        }
        self.output.push_str(text);
    }

    pub fn write_line(&mut self) {
        self.output.push('\n');
        self.at_line_start = true;
    }

    /// Write text followed by a newline.
    pub fn line(&mut self, text: &str) {
        self.write(text);
        self.write_line();
    }

    pub fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn decrease_indent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    pub const fn indent_level(&self) -> usize {
        self.indent_level
    }

    pub fn finish(self) -> String {
        self.output
    }
}
