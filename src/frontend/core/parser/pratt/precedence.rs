//! Binding power levels for the Pratt parser, lowest first

pub const BP_LOWEST: u8 = 0;
/// `or`
pub const BP_OR: u8 = 1;
/// `and`
pub const BP_AND: u8 = 2;
/// `== != < <= > >= contains matches`
pub const BP_COMPARISON: u8 = 3;
/// `+ - ++`
pub const BP_ADDITIVE: u8 = 4;
/// `* / %`
pub const BP_MULTIPLICATIVE: u8 = 5;
/// prefix `-` and `not`
pub const BP_UNARY: u8 = 6;
/// `.member`, `[index]`, `exists`, `is Type`
pub const BP_POSTFIX: u8 = 7;
