//! Program input normalization.
//!
//! User programs read "one value per line". The raw text from the request is
//! turned into a fixed list of lines that the language wrappers feed to the
//! program, so an absent input still yields one (empty) line instead of an
//! immediate end-of-file.

/// Ordered, non-empty list of input lines for a single execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLines {
    lines: Vec<String>,
}

impl InputLines {
    pub fn parse(raw: Option<&str>) -> Self {
        let raw = match raw {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return Self::empty_line(),
        };

        let mut lines: Vec<String> = raw
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();

        while lines.last().is_some_and(|line| line.trim().is_empty()) {
            lines.pop();
        }

        if lines.is_empty() {
            return Self::empty_line();
        }
        Self { lines }
    }

    fn empty_line() -> Self {
        Self {
            lines: vec![String::new()],
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines joined by `\n` with a trailing newline, as a stdin stream
    pub fn joined(&self) -> String {
        let mut stream = self.lines.join("\n");
        stream.push('\n');
        stream
    }
}
