/// A pagination window over an ordered list read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Page {
    pub offset: usize,
    pub limit: usize,
}

impl Page {
    pub fn new(offset: usize, limit: usize) -> Self {
        Self { offset, limit }
    }

    /// The first page of the given size.
    pub fn first(limit: usize) -> Self {
        Self::new(0, limit)
    }
}
