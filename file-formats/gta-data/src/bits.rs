//! Helpers for fields packed into integer bit ranges

/// Get and replace a `width`-bit field starting at bit `shift`
pub trait BitField: Copy {
    /// Extract the field
    fn bits(self, shift: u32, width: u32) -> Self;

    /// Return `self` with the field replaced by the low bits of `value`
    #[must_use]
    fn with_bits(self, shift: u32, width: u32, value: Self) -> Self;

    /// Test a single bit
    fn bit(self, n: u32) -> bool;

    /// Return `self` with bit `n` set or cleared
    #[must_use]
    fn with_bit(self, n: u32, on: bool) -> Self;
}

macro_rules! impl_bit_field {
    ($($ty:ty),*) => {
        $(
            impl BitField for $ty {
                #[inline]
                fn bits(self, shift: u32, width: u32) -> Self {
                    (self >> shift) & mask::<$ty>(width)
                }

                #[inline]
                fn with_bits(self, shift: u32, width: u32, value: Self) -> Self {
                    let mask = mask::<$ty>(width);
                    (self & !(mask << shift)) | ((value & mask) << shift)
                }

                #[inline]
                fn bit(self, n: u32) -> bool {
                    self.bits(n, 1) != 0
                }

                #[inline]
                fn with_bit(self, n: u32, on: bool) -> Self {
                    self.with_bits(n, 1, Self::from(on))
                }
            }
        )*
    };
}

impl_bit_field!(u8, u16, u32);

#[inline]
fn mask<T>(width: u32) -> T
where
    T: TryFrom<u64> + Default,
{
    T::try_from((1u64 << width) - 1).unwrap_or_default()
}
