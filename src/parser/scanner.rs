//! Cursor over comment-stripped source
//!
//! Every character other than space, tab and line feed is discarded once, up
//! front. The scanner then only ever sees the three-symbol alphabet, but it
//! remembers where each surviving symbol sat in the original text so that
//! errors and listings can point back at it.
//!
//! All matching methods are all-or-nothing: the cursor moves only when the
//! whole pattern matched.

use super::instruction::{render_symbols, SourceLocation, Symbol};

pub struct Scanner {
    symbols: Vec<Symbol>,
    locations: Vec<SourceLocation>,
    position: usize,
    end_location: SourceLocation,
}

impl Scanner {
    /// Strip comments from `source` and position the cursor at the first symbol.
    pub fn new(source: &str) -> Self {
        let mut symbols = Vec::new();
        let mut locations = Vec::new();
        let mut line = 1;
        let mut column = 1;

        for ch in source.chars() {
            if let Some(symbol) = Symbol::from_char(ch) {
                symbols.push(symbol);
                locations.push(SourceLocation::new(line, column));
            }
            if ch == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }

        Scanner {
            symbols,
            locations,
            position: 0,
            end_location: SourceLocation::new(line, column),
        }
    }

    /// Consume `pattern` if the input continues with it.
    pub fn scan(&mut self, pattern: &[Symbol]) -> bool {
        if self.remaining().starts_with(pattern) {
            self.position += pattern.len();
            true
        } else {
            false
        }
    }

    /// Try each `(pattern, value)` entry in turn and return the value of the
    /// first one that matched. Tables are prefix-free, so order is irrelevant.
    pub fn scan_table<'a, T>(
        &mut self,
        table: impl IntoIterator<Item = (&'a [Symbol], T)>,
    ) -> Option<T> {
        for (pattern, value) in table {
            if self.scan(pattern) {
                return Some(value);
            }
        }
        None
    }

    /// Consume a parameter: one or more spaces/tabs followed by a line feed.
    ///
    /// Returns the run without its terminator.
    pub fn scan_parameter(&mut self) -> Option<Vec<Symbol>> {
        let rest = self.remaining();
        let run = rest
            .iter()
            .take_while(|&&s| s != Symbol::LineFeed)
            .count();

        if run == 0 || rest.get(run) != Some(&Symbol::LineFeed) {
            return None;
        }

        let parameter = rest[..run].to_vec();
        self.position += run + 1;
        Some(parameter)
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.symbols.len()
    }

    /// Location of the next unconsumed symbol in the original text
    pub fn location(&self) -> SourceLocation {
        self.locations
            .get(self.position)
            .copied()
            .unwrap_or(self.end_location)
    }

    /// Up to `n` upcoming symbols in `S`/`T`/`L` notation, for diagnostics
    pub fn lookahead(&self, n: usize) -> String {
        let rest = self.remaining();
        if rest.is_empty() {
            "end of input".to_string()
        } else {
            render_symbols(&rest[..rest.len().min(n)])
        }
    }

    /// Number of meaningful symbols left after comment stripping
    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    fn remaining(&self) -> &[Symbol] {
        &self.symbols[self.position.min(self.symbols.len())..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::instruction::Symbol::{LineFeed, Space, Tab};

    #[test]
    fn test_comments_are_stripped() {
        let scanner = Scanner::new("a \tb\nc//ignored");
        assert_eq!(scanner.symbol_count(), 3);
    }

    #[test]
    fn test_locations_refer_to_original_text() {
        let mut scanner = Scanner::new("xx \n  y\t");
        assert_eq!(scanner.location(), SourceLocation::new(1, 3));
        assert!(scanner.scan(&[Space, LineFeed]));
        assert_eq!(scanner.location(), SourceLocation::new(2, 1));
        assert!(scanner.scan(&[Space, Space]));
        assert_eq!(scanner.location(), SourceLocation::new(2, 4));
    }

    #[test]
    fn test_failed_scan_does_not_advance() {
        let mut scanner = Scanner::new(" \t");
        assert!(!scanner.scan(&[Space, Space]));
        assert_eq!(scanner.lookahead(5), "ST");
        assert!(scanner.scan(&[Space, Tab]));
        assert!(scanner.is_at_end());
        assert_eq!(scanner.lookahead(5), "end of input");
    }

    #[test]
    fn test_scan_table() {
        let table: [(&[Symbol], u8); 3] = [
            (&[Space][..], 1),
            (&[Tab, Space][..], 2),
            (&[Tab, Tab][..], 3),
        ];
        let mut scanner = Scanner::new("\t\t \t ");
        assert_eq!(scanner.scan_table(table), Some(3));
        assert_eq!(scanner.scan_table(table), Some(1));
        assert_eq!(scanner.scan_table(table), Some(2));
        assert_eq!(scanner.scan_table(table), None);
    }

    #[test]
    fn test_scan_parameter() {
        let mut scanner = Scanner::new(" \t \n\n");
        assert_eq!(scanner.scan_parameter(), Some(vec![Space, Tab, Space]));
        // A bare line feed is not a parameter
        assert_eq!(scanner.scan_parameter(), None);
        assert!(!scanner.is_at_end());
    }

    #[test]
    fn test_unterminated_parameter() {
        let mut scanner = Scanner::new(" \t\t");
        assert_eq!(scanner.scan_parameter(), None);
        assert_eq!(scanner.location(), SourceLocation::new(1, 1));
    }
}
