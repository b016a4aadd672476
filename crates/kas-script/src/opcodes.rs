//! Opcodes used by the standard Kaspa locking and signature scripts.
//!
//! Only the subset that the address templates and signature pushes need.

/// Push an empty byte array.
pub const OP_0: u8 = 0x00;
/// Push the next byte as data.
pub const OP_DATA_1: u8 = 0x01;
/// Push the next 32 bytes as data (Schnorr key or script hash).
pub const OP_DATA_32: u8 = 0x20;
/// Push the next 33 bytes as data (compressed ECDSA key).
pub const OP_DATA_33: u8 = 0x21;
/// Push the next 65 bytes as data (Schnorr signature plus sighash type).
pub const OP_DATA_65: u8 = 0x41;
/// Largest direct push opcode.
pub const OP_DATA_75: u8 = 0x4b;
/// The next byte holds the push length.
pub const OP_PUSHDATA1: u8 = 0x4c;
/// Compare the top two items for equality.
pub const OP_EQUAL: u8 = 0x87;
/// BLAKE2b-256 of the top item.
pub const OP_BLAKE2B: u8 = 0xaa;
/// Verify an ECDSA signature against a 33-byte key.
pub const OP_CHECKSIG_ECDSA: u8 = 0xab;
/// Verify a Schnorr signature against a 32-byte key.
pub const OP_CHECKSIG: u8 = 0xac;
