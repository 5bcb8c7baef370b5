use bitflags::bitflags;

bitflags! {
    /// Sticky IEEE 754 exception flags raised inside a scope.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FloatingPointFlags: u8 {
        const INVALID = 1 << 0;
        const DIVIDE_BY_ZERO = 1 << 1;
        const OVERFLOW = 1 << 2;
        const UNDERFLOW = 1 << 3;
        const INEXACT = 1 << 4;
    }
}
