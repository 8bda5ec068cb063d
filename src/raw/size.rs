use core::num::NonZero;

/// The number of nodes in a non-empty subtree, including its root.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub(crate) struct Size(NonZero<usize>);

impl Size {
    pub(crate) const ONE: Self = Self::from_usize(1);

    #[inline]
    pub(crate) const fn from_usize(size: usize) -> Self {
        match NonZero::new(size) {
            Some(size) => Self(size),
            None => panic!("`Size::from_usize()` - `size` == 0!"),
        }
    }

    #[inline]
    pub(crate) const fn to_usize(self) -> usize {
        self.0.get()
    }

    /// Size of a subtree rooted at `left` + self + `right`, given child counts.
    #[inline]
    pub(crate) const fn joining(left: usize, right: usize) -> Self {
        Self::from_usize(1 + left + right)
    }

    #[inline]
    pub(crate) const fn incremented(self) -> Self {
        Self::from_usize(self.to_usize() + 1)
    }

    #[inline]
    pub(crate) const fn decremented(self) -> Self {
        Self::from_usize(self.to_usize() - 1)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use static_assertions::assert_eq_size;

    // Verify our assumptions about `Size` and the niche optimization.
    assert_eq_size!(Size, Option<Size>);
    assert_eq_size!(Size, usize);

    #[test]
    #[should_panic(expected = "`Size::from_usize()` - `size` == 0!")]
    fn zero_size() {
        let _ = Size::from_usize(0);
    }

    #[test]
    fn joining_counts_self() {
        assert_eq!(Size::joining(0, 0), Size::ONE);
        assert_eq!(Size::joining(3, 4).to_usize(), 8);
        assert_eq!(Size::ONE.incremented().decremented(), Size::ONE);
    }

    #[test]
    #[should_panic(expected = "`Size::from_usize()` - `size` == 0!")]
    fn decrement_below_one() {
        let _ = Size::ONE.decremented();
    }

    proptest! {
        #[test]
        fn size_round_trip(size in 1..=usize::MAX) {
            prop_assert_eq!(Size::from_usize(size).to_usize(), size);
        }
    }
}
