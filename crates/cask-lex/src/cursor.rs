/// A minimal UTF-8 aware cursor over source text.
///
/// Mirrors the `next`/`backup`/`peek` trio the original scanner used:
/// `next` advances and returns a char, `backup` steps back exactly the
/// width of the last char returned, `peek` reads without consuming.
/// Tracking the last char's byte width (rather than assuming one byte)
/// is what makes `backup` safe on multi-byte input.
pub(crate) struct Cursor<'a> {
    source: &'a str,
    position: usize,
    last_width: usize,
}

pub(crate) const EOF_CHAR: char = '\0';

impl<'a> Cursor<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
            last_width: 0,
        }
    }

    /// Returns the next char and advances past it, or `EOF_CHAR` at the
    /// end of input (consuming nothing further).
    pub(crate) fn next(&mut self) -> char {
        match self.source[self.position..].chars().next() {
            Some(c) => {
                self.last_width = c.len_utf8();
                self.position += self.last_width;
                c
            }
            None => {
                self.last_width = 0;
                EOF_CHAR
            }
        }
    }

    /// Steps back over the char most recently returned by `next`.
    pub(crate) fn backup(&mut self) {
        self.position -= self.last_width;
    }

    /// Reads the next char without consuming it.
    pub(crate) fn peek(&mut self) -> char {
        let c = self.next();
        self.backup();
        c
    }

    pub(crate) fn position(&self) -> usize {
        self.position
    }

    /// The verbatim source slice between `start` and the current
    /// position.
    pub(crate) fn slice(&self, start: usize) -> &'a str {
        &self.source[start..self.position]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_and_backup_roundtrip() {
        let mut c = Cursor::new("ab");
        assert_eq!(c.next(), 'a');
        c.backup();
        assert_eq!(c.next(), 'a');
        assert_eq!(c.next(), 'b');
        assert_eq!(c.next(), EOF_CHAR);
    }

    #[test]
    fn handles_multibyte_chars() {
        let mut c = Cursor::new("á");
        assert_eq!(c.next(), 'á');
        c.backup();
        assert_eq!(c.slice(0), "");
        assert_eq!(c.next(), 'á');
        assert_eq!(c.slice(0), "á");
    }

    #[test]
    fn peek_does_not_consume() {
        let mut c = Cursor::new("xy");
        assert_eq!(c.peek(), 'x');
        assert_eq!(c.next(), 'x');
        assert_eq!(c.peek(), 'y');
    }
}
