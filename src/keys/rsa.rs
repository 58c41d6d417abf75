use crate::error::{Error, ErrorKind, OsshResult};
use crate::sshbuf::wire_fields;

/// The key name of RSA keys
pub const RSA_NAME: &str = "ssh-rsa";
/// The short name of RSA
pub const RSA_SHORT_NAME: &str = "RSA";

/// Compute the key size in bits from the RSA key blob
///
/// The blob is laid out as `[type, e, n]`, with both integers in the SSH `mpint` encoding.
pub(crate) fn key_size(blob: &[u8]) -> OsshResult<usize> {
    let mut fields = wire_fields(blob);
    let _keytype = fields.next_field()?;
    let _e = fields.next_field()?;
    let n = fields.next_field()?;
    modulus_bits(n)
}

/// The bit length of the big endian modulus
///
/// A leading zero byte only keeps the sign bit clear, so it contributes nothing.
fn modulus_bits(n: &[u8]) -> OsshResult<usize> {
    let (first, rest) = n.split_first().ok_or_else(|| {
        Error::with_message(ErrorKind::MalformedWireData, "empty RSA modulus")
    })?;
    Ok(rest.len() * 8 + highest_bit(*first))
}

/// 1-based position of the most significant set bit, 0 for a zero byte
fn highest_bit(b: u8) -> usize {
    (u8::BITS - b.leading_zeros()) as usize
}
