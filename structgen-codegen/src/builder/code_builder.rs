//! Code builder utility for generating properly indented code.

/// One indent level, as produced by gofmt.
const INDENT: &str = "\t";

/// Line-oriented builder for tab-indented Go source.
///
/// Methods return `&mut Self` so calls chain and also work inside loops.
///
/// # Example
///
/// ```
/// use structgen_codegen::builder::CodeBuilder;
///
/// let mut builder = CodeBuilder::new();
/// builder
///     .push_comment("Point is a location.")
///     .push_line("type Point struct {")
///     .push_indent()
///     .push_line("X int")
///     .push_dedent()
///     .push_line("}");
/// assert_eq!(
///     builder.build(),
///     "// Point is a location.\ntype Point struct {\n\tX int\n}\n"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct CodeBuilder {
    indent_level: usize,
    buffer: String,
}

impl CodeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line of code with current indentation.
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add a blank line (no indentation).
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Increase indentation level.
    pub fn push_indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    /// Decrease indentation level.
    pub fn push_dedent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Add a `//` comment, one comment line per line of `text`.
    pub fn push_comment(&mut self, text: &str) -> &mut Self {
        for line in text.lines() {
            self.write_indent();
            if line.trim().is_empty() {
                self.buffer.push_str("//");
            } else {
                self.buffer.push_str("// ");
                self.buffer.push_str(line.trim_end());
            }
            self.buffer.push('\n');
        }
        self
    }

    /// Consume the builder and return the generated code.
    pub fn build(self) -> String {
        self.buffer
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(INDENT);
        }
    }
}
