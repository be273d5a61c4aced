//! Well-known programs and the instruction/address helpers built on them.

pub mod bubblegum;
pub mod spl_token;
pub mod stake;
pub mod system;
pub mod sysvar;
pub mod token_metadata;
