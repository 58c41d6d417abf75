//! Parse, inspect and write OpenSSH public keys
//!
//! This crate handles the lines found in `authorized_keys` files and `.pub` files:
//! the leading options clause, the key type, the base64 key data and the comment.
//! The key size and the fingerprint are derived from the key data.
//!
//! ```
//! use sshkeys::PublicKey;
//!
//! let line = "no-pty ecdsa-sha2-nistp256 AAAAE2VjZHNhLXNoYTItbmlzdHAyNTYAAAAIbmlzdHAyNTYAAABBBKtcK82cEoqjiXyqPpyQAlkOQYs8LL5dDahPah5dqoaJfVHcKS5CJYBX0Ow+Dlj9xKtSQRCyJXOCEtJx+k4LUV0= user@host";
//! let key = PublicKey::parse(line).unwrap();
//! assert_eq!(key.keytype(), "ecdsa-sha2-nistp256");
//! assert_eq!(key.size(), 256);
//! assert_eq!(key.comment(), Some("user@host"));
//! assert_eq!(key.to_string(), line);
//! ```

pub mod authorized_keys;
pub mod error;
pub(crate) mod format;
pub mod keys;
pub mod sshbuf;

pub use error::{Error, ErrorKind, OsshResult};
pub use format::ParseConfig;
pub use keys::{FingerprintHash, KeyVariant, OptionValue, Options, PublicKey};
