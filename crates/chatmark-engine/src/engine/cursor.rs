/// A cursor for char-by-char scanning of rule input.
///
/// Positions are byte offsets into `s` and always sit on char boundaries.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The string being scanned.
    pub s: &'a str,
    /// Current byte index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a new cursor at the start of `s`.
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    /// Creates a cursor at byte offset `i` of `s`.
    pub fn at(s: &'a str, i: usize) -> Self {
        Self { s, i }
    }

    /// Returns the current byte position.
    pub fn pos(&self) -> usize {
        self.i
    }

    /// Returns true if at end of string.
    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// The unscanned remainder.
    pub fn rest(&self) -> &'a str {
        &self.s[self.i..]
    }

    /// Everything scanned so far.
    pub fn consumed(&self) -> &'a str {
        &self.s[..self.i]
    }

    /// Peeks at the current char without advancing.
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Peeks at the char after the current one.
    pub fn peek_second(&self) -> Option<char> {
        self.rest().chars().nth(1)
    }

    /// Checks if the remaining input starts with `pat`.
    pub fn starts_with(&self, pat: &str) -> bool {
        self.rest().starts_with(pat)
    }

    /// Advances by one char, returning the consumed char.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.i += c.len_utf8();
        Some(c)
    }

    /// Consumes `c` if it is next.
    pub fn eat_char(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.i += c.len_utf8();
            true
        } else {
            false
        }
    }

    /// Consumes `pat` if the remainder starts with it.
    pub fn eat_str(&mut self, pat: &str) -> bool {
        if self.starts_with(pat) {
            self.i += pat.len();
            true
        } else {
            false
        }
    }

    /// Consumes chars while `pred` holds, returning how many bytes were eaten.
    pub fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> usize {
        let start = self.i;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.i += c.len_utf8();
        }
        self.i - start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_basics() {
        let mut cur = Cursor::new("hello");
        assert_eq!(cur.pos(), 0);
        assert!(!cur.eof());
        assert_eq!(cur.peek(), Some('h'));
        assert_eq!(cur.bump(), Some('h'));
        assert_eq!(cur.pos(), 1);
        assert_eq!(cur.consumed(), "h");
        assert_eq!(cur.rest(), "ello");
    }

    #[test]
    fn multibyte_chars_advance_by_their_width() {
        let mut cur = Cursor::new("é😀x");
        assert_eq!(cur.bump(), Some('é'));
        assert_eq!(cur.pos(), 2);
        assert_eq!(cur.peek_second(), Some('x'));
        assert_eq!(cur.bump(), Some('😀'));
        assert_eq!(cur.pos(), 6);
    }

    #[test]
    fn eat_helpers_only_consume_on_match() {
        let mut cur = Cursor::new("```rust");
        assert!(!cur.eat_char('~'));
        assert!(cur.eat_str("```"));
        assert!(!cur.eat_str("```"));
        assert_eq!(cur.eat_while(|c| c.is_ascii_alphabetic()), 4);
        assert!(cur.eof());
    }

    #[test]
    fn empty_string_input() {
        let cur = Cursor::new("");
        assert!(cur.eof());
        assert_eq!(cur.peek(), None);
        assert_eq!(cur.pos(), 0);
    }

    #[test]
    fn bump_at_eof_returns_none() {
        let mut cur = Cursor::new("x");
        assert_eq!(cur.bump(), Some('x'));
        assert_eq!(cur.bump(), None);
        assert_eq!(cur.bump(), None);
    }

    #[test]
    fn cursor_can_start_mid_string() {
        let cur = Cursor::at("> quote", 2);
        assert_eq!(cur.peek(), Some('q'));
        assert_eq!(cur.consumed(), "> ");
    }
}
