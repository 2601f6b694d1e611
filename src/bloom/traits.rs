use crate::filter::FilterResult;

/// Fixed-size k=4 Bloom filter stored as a plain value.
///
/// Every operation is pure: `update` returns a new bitmap and leaves the
/// receiver alone, so bitmaps can be shared freely across threads.
pub trait ProbeFilter: Copy + Eq {
    type Index: Copy;

    /// Empty bitmap.
    fn empty() -> Self;

    /// Sets the four probe bits of `index`.
    fn update(self, index: Self::Index) -> Self;

    /// `MayExist` if all four probe bits are set, `NotFound` otherwise.
    fn test(self, index: Self::Index) -> FilterResult;

    /// Bitwise OR of two bitmaps of the same resolution.
    fn union(self, other: Self) -> Self;

    fn count_ones(self) -> usize;

    fn is_empty(self) -> bool {
        self == Self::empty()
    }

    fn update_all<I>(self, indices: I) -> Self
    where
        I: IntoIterator<Item = Self::Index>,
    {
        indices.into_iter().fold(self, Self::update)
    }
}
