//! Core sizing trait for evictable values

/// Values stored in a [`Shard`](super::Shard) report their own size.
pub trait SizedValue {
    /// Size in bytes charged against the shard's budget
    fn size(&self) -> usize;
}

impl SizedValue for Vec<u8> {
    fn size(&self) -> usize {
        self.len()
    }
}

impl SizedValue for String {
    fn size(&self) -> usize {
        self.len()
    }
}
