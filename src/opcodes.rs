//! Script opcodes consulted while decoding
//!
//! Decoding never executes scripts; these bytes only select alternative input
//! layouts on forks that overload the first script byte.

/// OP_RETURN - Marks output as unspendable; TokenPay prefixes ring-signature inputs with it
pub const OP_RETURN: u8 = 0x6a;

/// OP_NOP10 - Second byte of a TokenPay ring-signature input script
pub const OP_ANON_MARKER: u8 = 0xb9;

/// OP_SIGMASPEND - Zcoin Sigma spend, first byte of the spending input's script
pub const OP_SIGMASPEND: u8 = 0xc4;
