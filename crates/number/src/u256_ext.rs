//! Extension trait for U256 rendering and `uint256` halves.

use {crate::uint256::Uint256Halves, alloy::primitives::U256};

/// Extension trait for U256 to add utility methods.
pub trait U256Ext: Sized {
    /// Lowercase hex digits without a 0x prefix or leading zeros. Zero is
    /// rendered as `0`.
    fn to_hex_string(&self) -> String;

    /// Combines a `uint256 { low, high }` pair into one integer.
    fn from_halves(halves: Uint256Halves) -> Self;

    /// Splits the integer into its low and high 128 bits.
    fn to_halves(&self) -> Uint256Halves;
}

impl U256Ext for U256 {
    fn to_hex_string(&self) -> String {
        format!("{self:x}")
    }

    fn from_halves(halves: Uint256Halves) -> Self {
        halves.combine()
    }

    fn to_halves(&self) -> Uint256Halves {
        crate::split(*self)
    }
}
