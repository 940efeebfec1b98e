//! Code-point input stream shared by the notation readers.

/// Pulls one `char` at a time from an underlying iterator, tracking the
/// 0-based offset of the next rune and allowing a single rune of pushback.
#[derive(Debug, Clone)]
pub struct Scanner<I> {
    inner: I,
    pushed: Option<char>,
    offset: usize,
}

impl<I: Iterator<Item = char>> Scanner<I> {
    pub fn new(inner: I) -> Self {
        Self {
            inner,
            pushed: None,
            offset: 0,
        }
    }

    /// Next rune, or `None` at end of input.
    pub fn next_rune(&mut self) -> Option<char> {
        let c = self.pushed.take().or_else(|| self.inner.next())?;
        self.offset += 1;
        Some(c)
    }

    /// Push back the rune most recently read. Only one rune of pushback is
    /// held, so every `unread` must follow a `next_rune`.
    pub fn unread(&mut self, c: char) {
        debug_assert!(self.pushed.is_none(), "unread twice without a read in between");
        self.pushed = Some(c);
        self.offset = self.offset.saturating_sub(1);
    }

    /// Offset of the next rune to be read.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Drain everything left in the stream.
    pub fn rest(&mut self) -> String {
        self.by_ref().collect()
    }
}

impl<I: Iterator<Item = char>> Iterator for Scanner<I> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        self.next_rune()
    }
}
