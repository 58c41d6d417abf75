use crate::error::{Error, ErrorKind, OsshResult};
use crate::sshbuf::wire_fields;
use std::fmt;
use std::str::FromStr;

/// The prefix shared by all EcDSA key names
pub const ECDSA_PREFIX: &str = "ecdsa-";
/// The name of 256 bits curve key
pub const NIST_P256_NAME: &str = "ecdsa-sha2-nistp256";
/// The name of 384 bits curve key
pub const NIST_P384_NAME: &str = "ecdsa-sha2-nistp384";
/// The name of 521 bits curve key
pub const NIST_P521_NAME: &str = "ecdsa-sha2-nistp521";
/// The short name of ECDSA
pub const ECDSA_SHORT_NAME: &str = "ECDSA";

const NIST_CURVE_PREFIX: &str = "nistp";

/// A NIST prime curve, identified by the name carried in the key blob (e.g. `nistp256`)
///
/// The key size is the number following the `nistp` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EcCurve {
    ident: String,
    size: usize,
}

impl EcCurve {
    /// Read the curve from the EcDSA key blob
    ///
    /// The blob is laid out as `[type, curve name, public point]`.
    pub(crate) fn from_blob(blob: &[u8]) -> OsshResult<Self> {
        let mut fields = wire_fields(blob);
        let _keytype = fields.next_field()?;
        let ident = fields.next_field()?;
        let _point = fields.next_field()?;

        match std::str::from_utf8(ident) {
            Ok(ident) => ident.parse(),
            Err(_) => Err(Error::with_message(
                ErrorKind::UnsupportedCurve,
                String::from_utf8_lossy(ident),
            )),
        }
    }

    /// The curve identifier, such as `nistp256`
    pub fn ident(&self) -> &str {
        &self.ident
    }

    /// The key size of this curve
    pub fn size(&self) -> usize {
        self.size
    }
}

impl FromStr for EcCurve {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unsupported = || Error::with_message(ErrorKind::UnsupportedCurve, s);
        let digits = s.strip_prefix(NIST_CURVE_PREFIX).ok_or_else(unsupported)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(unsupported());
        }
        let size = digits.parse::<usize>().map_err(|_| unsupported())?;
        Ok(EcCurve {
            ident: s.to_owned(),
            size,
        })
    }
}

impl fmt::Display for EcCurve {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.ident)
    }
}
