/// Hands out positional parameter slots for one query compilation.
///
/// Indices start at `0`, grow by one, and are never handed out twice. The
/// generator is threaded by `&mut` through every conversion that belongs to
/// the same query so slots stay consistent across sibling passes.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParameterIndexGenerator {
    cursor: usize,
}

impl ParameterIndexGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_index(&mut self) -> usize {
        let index = self.cursor;
        self.cursor += 1;
        index
    }

    /// How many slots were handed out so far.
    pub fn issued(&self) -> usize {
        self.cursor
    }
}

impl Iterator for ParameterIndexGenerator {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_index())
    }
}
