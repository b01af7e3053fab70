use unicode_width::UnicodeWidthStr;

/// Output buffer with lazy indentation.
///
/// Indentation is written together with the first text of a line, so blank
/// lines never carry trailing whitespace and callers can decide the depth at
/// the last moment.
#[derive(Debug)]
pub(crate) struct Writer {
    out: String,
    /// Display width of the current line.
    column: usize,
    indent_unit: String,
    indent_width: usize,
}

impl Writer {
    pub fn new(indent_unit: String, indent_width: usize) -> Self {
        Self {
            out: String::new(),
            column: 0,
            indent_unit,
            indent_width,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    pub fn at_line_start(&self) -> bool {
        self.out.is_empty() || self.out.ends_with('\n')
    }

    /// Column the next text would start at.
    pub fn next_column(&self, depth: usize, space: bool) -> usize {
        if self.at_line_start() {
            depth * self.indent_width
        } else {
            self.column + usize::from(space)
        }
    }

    pub fn write(&mut self, text: &str, depth: usize, space: bool) {
        if self.at_line_start() {
            for _ in 0..depth {
                self.out.push_str(&self.indent_unit);
            }
            self.column = depth * self.indent_width;
        } else if space {
            self.out.push(' ');
            self.column += 1;
        }
        self.out.push_str(text);
        match text.rfind('\n') {
            Some(pos) => self.column = text[pos + 1..].width(),
            None => self.column += text.width(),
        }
    }

    /// End the current line so that exactly `count` line breaks (at least)
    /// separate it from what follows. Does nothing on empty output.
    pub fn newlines(&mut self, count: usize) {
        if self.out.is_empty() {
            return;
        }
        let trimmed = self.out.trim_end_matches([' ', '\t']).len();
        self.out.truncate(trimmed);
        let existing = self.out.len() - self.out.trim_end_matches('\n').len();
        for _ in existing..count {
            self.out.push('\n');
        }
        self.column = 0;
    }

    /// Strip trailing whitespace so the next text continues the previous
    /// line. Returns how many line breaks were removed.
    pub fn pull_back(&mut self) -> usize {
        let trimmed = self.out.trim_end().len();
        let removed = self.out[trimmed..].matches('\n').count();
        self.out.truncate(trimmed);
        let line_start = self.out.rfind('\n').map_or(0, |pos| pos + 1);
        self.column = self.out[line_start..].width();
        removed
    }

    pub fn finish(mut self) -> String {
        let trimmed = self.out.trim_end().len();
        self.out.truncate(trimmed);
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn writer() -> Writer {
        Writer::new("  ".to_string(), 2)
    }

    #[test]
    fn test_lazy_indentation() {
        let mut w = writer();
        w.write("SELECT", 0, true);
        w.newlines(1);
        w.newlines(1);
        w.write("a", 1, true);
        w.write("=", 1, true);
        assert_eq!(w.finish(), "SELECT\n  a =");
    }

    #[test]
    fn test_newlines_is_idempotent_and_trims() {
        let mut w = writer();
        w.newlines(2);
        assert!(w.is_empty());
        w.write("x", 0, false);
        w.newlines(2);
        w.newlines(1);
        w.write("y", 0, false);
        assert_eq!(w.finish(), "x\n\ny");
    }

    #[test]
    fn test_columns_use_display_width() {
        let mut w = writer();
        w.write("'日本'", 1, false);
        assert_eq!(w.next_column(1, true), 2 + 6 + 1);
        w.newlines(1);
        assert_eq!(w.next_column(3, true), 6);
    }

    #[test]
    fn test_pull_back_counts_line_breaks() {
        let mut w = writer();
        w.write("a,", 1, false);
        w.newlines(2);
        assert_eq!(w.pull_back(), 2);
        assert!(!w.at_line_start());
        assert_eq!(w.next_column(1, true), 5);
        w.write("-- c", 1, true);
        assert_eq!(w.finish(), "  a, -- c");
    }
}
