//! Output writer with indentation tracking
//!
//! Every line starts with a fixed base prefix (the column of the placeholder the region replaces) followed by the
//! current indentation. Indentation is written lazily, at the first character of a line, so a finished buffer never
//! carries a dangling indent on its last line.

/// Writer that tracks indentation and builds generated code
pub struct CodeWriter {
    /// The output buffer
    output: String,
    /// Prefix written before every non-empty line
    base: String,
    /// One level of indentation
    unit: String,
    /// Current indentation level
    indent_level: usize,
    /// Whether we're at the start of a line
    at_line_start: bool,
}

impl CodeWriter {
    /// Create a writer whose lines start with `base` and indent by `unit`
    pub fn new(base: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            output: String::new(),
            base: base.into(),
            unit: unit.into(),
            indent_level: 0,
            at_line_start: true,
        }
    }

    /// Get the generated output
    pub fn finish(self) -> String {
        self.output
    }

    /// Increase indentation level
    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    /// Decrease indentation level
    pub fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    /// Write indentation if at line start
    fn write_indent(&mut self) {
        if self.at_line_start {
            self.output.push_str(&self.base);
            for _ in 0..self.indent_level {
                self.output.push_str(&self.unit);
            }
            self.at_line_start = false;
        }
    }

    /// Write a string (with auto-indent). Embedded line breaks re-apply the indentation.
    pub fn write(&mut self, s: &str) {
        for (i, segment) in s.split('\n').enumerate() {
            if i > 0 {
                self.newline();
            }
            if !segment.is_empty() {
                self.write_indent();
                self.output.push_str(segment);
            }
        }
    }

    /// Write a string and newline
    pub fn writeln(&mut self, s: &str) {
        self.write(s);
        self.newline();
    }

    /// Write a line if there is one (block closers some languages do without)
    pub fn writeln_opt(&mut self, s: Option<String>) {
        if let Some(s) = s {
            self.writeln(&s);
        }
    }

    /// Write just a newline
    pub fn newline(&mut self) {
        self.output.push('\n');
        self.at_line_start = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tab_writer() -> CodeWriter {
        CodeWriter::new("", "\t")
    }

    // ========================================
    // Write tests
    // ========================================

    #[test]
    fn test_new_writer_empty_output() {
        let writer = tab_writer();
        assert_eq!(writer.finish(), "");
    }

    #[test]
    fn test_write_multiple() {
        let mut writer = tab_writer();
        writer.write("hello");
        writer.write(" ");
        writer.write("world");
        assert_eq!(writer.finish(), "hello world");
    }

    #[test]
    fn test_writeln_empty_string_has_no_indent() {
        let mut writer = tab_writer();
        writer.indent();
        writer.writeln("");
        assert_eq!(writer.finish(), "\n");
    }

    #[test]
    fn test_writeln_opt() {
        let mut writer = tab_writer();
        writer.writeln_opt(None);
        writer.writeln_opt(Some("}".to_string()));
        assert_eq!(writer.finish(), "}\n");
    }

    // ========================================
    // Indent/dedent tests
    // ========================================

    #[test]
    fn test_dedent_at_zero_stays_zero() {
        let mut writer = tab_writer();
        writer.dedent();
        writer.writeln("x");
        assert_eq!(writer.finish(), "x\n");
    }

    #[test]
    fn test_nested_indentation() {
        let mut writer = CodeWriter::new("", "  ");
        writer.writeln("int main() {");
        writer.indent();
        writer.writeln("if (x) {");
        writer.indent();
        writer.writeln("y();");
        writer.dedent();
        writer.writeln("}");
        writer.dedent();
        writer.writeln("}");
        assert_eq!(writer.finish(), "int main() {\n  if (x) {\n    y();\n  }\n}\n");
    }

    #[test]
    fn test_base_prefix_on_every_line() {
        let mut writer = CodeWriter::new("    ", "\t");
        writer.writeln("a");
        writer.indent();
        writer.writeln("b");
        assert_eq!(writer.finish(), "    a\n    \tb\n");
    }

    #[test]
    fn test_embedded_newlines_are_reindented() {
        let mut writer = tab_writer();
        writer.indent();
        writer.writeln("p0 = \"ab\" +\n\"cd\";");
        assert_eq!(writer.finish(), "\tp0 = \"ab\" +\n\t\"cd\";\n");
    }
}
