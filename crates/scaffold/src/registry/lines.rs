use crate::error::{ScaffoldError, ScaffoldErrorExt};
use std::fs;
use std::path::Path;

/// Line-oriented view of a registry file.
///
/// Every line keeps its own terminator (`\r\n`, `\n`, or nothing for an
/// unterminated final line), so rendering reproduces the original bytes. New
/// lines use the file's dominant style. When the final line is removed, the
/// line before it takes over its terminator, which undoes an earlier
/// [`LineBuffer::push`] byte for byte.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct LineBuffer {
    lines: Vec<Line>,
    crlf: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Line {
    text: String,
    ending: &'static str,
}

impl Line {
    fn text(&self) -> &str {
        self.text.trim_end_matches('\r')
    }
}

impl LineBuffer {
    pub(crate) fn parse(text: &str) -> Self {
        let lines: Vec<Line> = text
            .split_inclusive('\n')
            .map(|piece| {
                if let Some(body) = piece.strip_suffix("\r\n") {
                    Line { text: body.to_owned(), ending: "\r\n" }
                } else if let Some(body) = piece.strip_suffix('\n') {
                    Line { text: body.to_owned(), ending: "\n" }
                } else {
                    Line { text: piece.to_owned(), ending: "" }
                }
            })
            .collect();
        let crlf = lines.first().is_some_and(|l| l.ending == "\r\n");

        Self { lines, crlf }
    }

    pub(crate) fn read(path: &Path) -> Result<Self, ScaffoldError> {
        let text = fs::read_to_string(path)
            .context(format!("Failed to read registry: {}", path.display()))?;
        Ok(Self::parse(&text))
    }

    pub(crate) fn write(&self, path: &Path) -> Result<(), ScaffoldError> {
        fs::write(path, self.render())
            .context(format!("Failed to write registry: {}", path.display()))
    }

    pub(crate) fn render(&self) -> String {
        self.lines.iter().flat_map(|l| [l.text.as_str(), l.ending]).collect()
    }

    pub(crate) fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(Line::text)
    }

    /// Appends `line` as the new final line.
    ///
    /// It inherits the terminator of the previous final line; an unterminated
    /// previous final line is terminated in the file's style first.
    pub(crate) fn push(&mut self, line: &str) {
        let newline = self.newline();
        let ending = match self.lines.last_mut() {
            Some(last) if last.ending.is_empty() => {
                last.ending = newline;
                ""
            },
            Some(last) => last.ending,
            None => "",
        };
        self.lines.push(Line { text: line.to_owned(), ending });
    }

    /// Inserts `line` before the last line, which stays last verbatim.
    ///
    /// Returns `false` when there is no last line to keep in place.
    pub(crate) fn insert_before_last(&mut self, line: &str) -> bool {
        let Some(last) = self.lines.pop() else {
            return false;
        };
        self.lines.push(Line { text: line.to_owned(), ending: self.newline() });
        self.lines.push(last);
        true
    }

    /// Drops every line for which `matches` holds and returns how many were dropped.
    pub(crate) fn remove_where(&mut self, mut matches: impl FnMut(&str) -> bool) -> usize {
        let Some(final_line) = self.lines.last() else {
            return 0;
        };
        let final_ending = final_line.ending;
        let final_removed = matches(final_line.text());

        let removed = self.retain_unmatched(&mut matches);
        if final_removed {
            if let Some(last) = self.lines.last_mut() {
                last.ending = final_ending;
            }
        }
        removed
    }

    /// Like [`Self::remove_where`], but the last line is never considered.
    pub(crate) fn remove_where_before_last(&mut self, mut matches: impl FnMut(&str) -> bool) -> usize {
        let Some(last) = self.lines.pop() else {
            return 0;
        };
        let removed = self.retain_unmatched(&mut matches);
        self.lines.push(last);
        removed
    }

    pub(crate) fn last(&self) -> Option<&str> {
        self.lines.last().map(Line::text)
    }

    fn retain_unmatched(&mut self, matches: &mut impl FnMut(&str) -> bool) -> usize {
        let before = self.lines.len();
        self.lines.retain(|l| !matches(l.text()));
        before - self.lines.len()
    }

    const fn newline(&self) -> &'static str {
        if self.crlf { "\r\n" } else { "\n" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_preserves_input() {
        for text in ["", "a", "a\n", "a\nb", "a\nb\n", "\n", "\n\n", "a\r\nb\r\n"] {
            assert_eq!(LineBuffer::parse(text).render(), text, "input {text:?}");
        }
    }

    #[test]
    fn test_push_then_remove_restores_bytes() {
        for text in ["", "a", "a\n", "x\r\ny\r\n"] {
            let mut buf = LineBuffer::parse(text);
            buf.push("entry");
            assert_eq!(buf.remove_where(|l| l == "entry"), 1);
            assert_eq!(buf.render(), text);
        }
    }

    #[test]
    fn test_push_on_empty_file() {
        let mut buf = LineBuffer::parse("");
        buf.push("add_subdirectory(Gain)");
        assert_eq!(buf.render(), "add_subdirectory(Gain)");
    }

    #[test]
    fn test_push_after_trailing_newline() {
        let mut buf = LineBuffer::parse("project(Host)\n");
        buf.push("add_subdirectory(Gain)");
        assert_eq!(buf.render(), "project(Host)\nadd_subdirectory(Gain)\n");
    }

    #[test]
    fn test_insert_before_last_keeps_delimiter() {
        let mut buf = LineBuffer::parse("set(LIBS\n)\n");
        assert!(buf.insert_before_last("\tGain"));
        assert_eq!(buf.render(), "set(LIBS\n\tGain\n)\n");

        let mut empty = LineBuffer::parse("");
        assert!(!empty.insert_before_last("\tGain"));
    }

    #[test]
    fn test_remove_before_last_spares_delimiter() {
        let mut buf = LineBuffer::parse("set(LIBS\n\t)x\n)");
        assert_eq!(buf.remove_where_before_last(|l| l.contains(')')), 1);
        assert_eq!(buf.render(), "set(LIBS\n)");
        assert_eq!(buf.last(), Some(")"));
    }

    #[test]
    fn test_crlf_is_reused_for_new_lines() {
        let mut buf = LineBuffer::parse("a\r\n)\r\n");
        assert!(buf.insert_before_last("b"));
        assert_eq!(buf.render(), "a\r\nb\r\n)\r\n");
        assert_eq!(buf.lines().collect::<Vec<_>>(), ["a", "b", ")"]);
    }

    #[test]
    fn test_crlf_push_without_final_newline() {
        let mut buf = LineBuffer::parse("a\r\nb");
        buf.push("entry");
        assert_eq!(buf.render(), "a\r\nb\r\nentry");

        assert_eq!(buf.remove_where(|l| l == "entry"), 1);
        assert_eq!(buf.render(), "a\r\nb");
    }

    #[test]
    fn test_removing_final_line_hands_over_its_ending() {
        let mut buf = LineBuffer::parse("a\nb\nc");
        assert_eq!(buf.remove_where(|l| l != "a"), 2);
        assert_eq!(buf.render(), "a");
    }
}
