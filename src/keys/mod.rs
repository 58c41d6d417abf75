use crate::error::*;
use crate::format::ossh_pubkey::*;
use crate::format::ParseConfig;
use crate::sshbuf::wire_fields;
use digest::Digest;
use indexmap::IndexMap;
use log::debug;
use md5::Md5;
use sha2::{Sha256, Sha512};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

/// DSA key type
pub mod dsa;
/// EcDSA key type
pub mod ecdsa;
/// RSA key type
pub mod rsa;

use self::ecdsa::EcCurve;

/// The size of the MD5 fingerprint in bytes
pub const FINGERPRINT_SIZE: usize = 16;

/// An enum representing the hash function used to generate fingerprint
///
/// Used with [`PublicKey::fingerprint_with()`](struct.PublicKey.html#method.fingerprint_with) to generate different types fingerprint.
///
/// # Hash Algorithm
/// MD5: This is the default fingerprint type in older versions of openssh.
///
/// SHA2-256: Since OpenSSH 6.8, this became the default option of fingerprint.
///
/// SHA2-512: Although not being documented, it can also be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FingerprintHash {
    MD5,
    SHA256,
    SHA512,
}

impl FingerprintHash {
    fn hash(self, data: &[u8]) -> Vec<u8> {
        fn digest_hash<D: Digest>(hasher: &mut D, data: &[u8]) -> Vec<u8> {
            hasher.update(data);
            hasher.finalize_reset().to_vec()
        }
        match self {
            FingerprintHash::MD5 => digest_hash(&mut Md5::default(), data),
            FingerprintHash::SHA256 => digest_hash(&mut Sha256::default(), data),
            FingerprintHash::SHA512 => digest_hash(&mut Sha512::default(), data),
        }
    }
}

/// The value of an `authorized_keys` option
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OptionValue {
    /// An option without value, like `no-pty`
    Flag,
    /// An option with a (unescaped) value, like `command="..."`
    Text(String),
}

impl OptionValue {
    /// The text value, `None` for a flag
    pub fn as_text(&self) -> Option<&str> {
        match self {
            OptionValue::Flag => None,
            OptionValue::Text(s) => Some(s),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::Text(s.to_owned())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        OptionValue::Text(s)
    }
}

/// The options of an `authorized_keys` line, in the order they first appeared
///
/// Inserting an existing name overwrites its value without moving it.
pub type Options = IndexMap<String, OptionValue>;

/// An enum representing the kind of key being stored
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeyVariant {
    RSA,
    DSA,
    ECDSA(EcCurve),
}

impl KeyVariant {
    /// Pick the variant for the decoded key type
    ///
    /// For EcDSA, the curve is read from the blob as well.
    pub(crate) fn from_keytype(keytype: &str, blob: &[u8]) -> OsshResult<Self> {
        match keytype {
            rsa::RSA_NAME => Ok(KeyVariant::RSA),
            dsa::DSA_NAME => Ok(KeyVariant::DSA),
            t if t.starts_with(ecdsa::ECDSA_PREFIX) => {
                Ok(KeyVariant::ECDSA(EcCurve::from_blob(blob)?))
            }
            _ => Err(Error::with_message(ErrorKind::UnknownKeyType, keytype)),
        }
    }

    /// The size in bits of the key stored in `blob`
    pub(crate) fn size(&self, blob: &[u8]) -> OsshResult<usize> {
        match self {
            KeyVariant::RSA => rsa::key_size(blob),
            KeyVariant::DSA => Ok(dsa::DSA_SIZE),
            KeyVariant::ECDSA(curve) => Ok(curve.size()),
        }
    }

    /// The short name of the key type
    pub fn short_name(&self) -> &'static str {
        match self {
            KeyVariant::RSA => rsa::RSA_SHORT_NAME,
            KeyVariant::DSA => dsa::DSA_SHORT_NAME,
            KeyVariant::ECDSA(_) => ecdsa::ECDSA_SHORT_NAME,
        }
    }
}

/// The attributes derived from the key blob
#[derive(Debug, Clone)]
struct Derived {
    keytype: String,
    variant: KeyVariant,
    size: usize,
    fingerprint: [u8; FINGERPRINT_SIZE],
}

impl Derived {
    fn from_blob(blob: &[u8]) -> OsshResult<Self> {
        let keytype = match wire_fields(blob).next() {
            Some(field) => field?,
            None => {
                return Err(Error::with_message(
                    ErrorKind::MalformedWireData,
                    "missing key type field",
                ))
            }
        };
        let keytype = match std::str::from_utf8(keytype) {
            Ok(s) if s.is_ascii() => s.to_owned(),
            _ => {
                return Err(Error::with_message(
                    ErrorKind::UnknownKeyType,
                    String::from_utf8_lossy(keytype),
                ))
            }
        };
        let variant = KeyVariant::from_keytype(&keytype, blob)?;
        let size = variant.size(blob)?;

        let mut fingerprint = [0u8; FINGERPRINT_SIZE];
        fingerprint.copy_from_slice(&FingerprintHash::MD5.hash(blob));

        Ok(Derived {
            keytype,
            variant,
            size,
            fingerprint,
        })
    }
}

/// An OpenSSH public key record
///
/// This is what a line of `authorized_keys` or a `.pub` file holds:
/// the wire encoded key blob, an optional comment, and the options controlling the login.
///
/// The key type, the variant, the size and the fingerprint are all derived from the blob
/// when the record is built, and again whenever the blob is replaced.
#[derive(Debug, Clone)]
pub struct PublicKey {
    data: Vec<u8>,
    derived: Derived,
    comment: Option<String>,
    options: Options,
}

impl PublicKey {
    /// Build a record from the raw key blob
    ///
    /// The key type is read from the blob itself.
    pub fn new(data: Vec<u8>, comment: Option<String>, options: Options) -> OsshResult<Self> {
        let derived = Derived::from_blob(&data)?;
        debug!(
            "Loaded {} key ({} bits, {})",
            derived.keytype,
            derived.size,
            readable_fingerprint(&derived.fingerprint)
        );
        Ok(PublicKey {
            data,
            derived,
            comment,
            options,
        })
    }

    /// Parse a line in the OpenSSH public key format
    ///
    /// The line looks like `[options ]type base64data[ comment]`.
    /// Leading and trailing whitespaces are ignored.
    pub fn parse(line: &str) -> OsshResult<Self> {
        Self::parse_with(line, &ParseConfig::default())
    }

    /// Parse a line in the OpenSSH public key format with the given configuration
    pub fn parse_with(line: &str, config: &ParseConfig) -> OsshResult<Self> {
        parse_ossh_pubkey(line, config)
    }

    /// Read a public key from a reader holding a key line (a `.pub` file)
    ///
    /// Only the first line is parsed, the rest of the source is left unread.
    pub fn from_reader<R: Read>(reader: R) -> OsshResult<Self> {
        let mut keystr = String::new();
        BufReader::new(reader).read_line(&mut keystr)?;
        Self::parse(&keystr)
    }

    /// Read a public key from a `.pub` file
    pub fn from_path<P: AsRef<Path>>(path: P) -> OsshResult<Self> {
        Self::from_reader(File::open(path)?)
    }

    /// The key type, as decoded from the key blob (e.g. `ssh-rsa`)
    pub fn keytype(&self) -> &str {
        &self.derived.keytype
    }

    /// Indicate the kind of key being stored
    pub fn variant(&self) -> &KeyVariant {
        &self.derived.variant
    }

    /// The size in bits of the key
    pub fn size(&self) -> usize {
        self.derived.size
    }

    /// The wire encoded key blob
    pub fn key_data(&self) -> &[u8] {
        &self.data
    }

    /// Replace the key blob
    ///
    /// Every derived attribute is recomputed. On error, the key is left unchanged.
    pub fn set_key_data(&mut self, data: Vec<u8>) -> OsshResult<()> {
        let derived = Derived::from_blob(&data)?;
        self.data = data;
        self.derived = derived;
        Ok(())
    }

    /// Get the comment of the key
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Set or clear the comment of the key
    pub fn set_comment<S: Into<String>>(&mut self, comment: Option<S>) {
        self.comment = comment.map(Into::into);
    }

    /// Get the options of the key
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Get the mutable reference of the key options
    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }

    /// The MD5 digest of the key blob
    pub fn fingerprint(&self) -> [u8; FINGERPRINT_SIZE] {
        self.derived.fingerprint
    }

    /// The MD5 fingerprint in the form `xx:xx:...:xx`
    pub fn readable_fingerprint(&self) -> String {
        readable_fingerprint(&self.derived.fingerprint)
    }

    /// Hash the blob of the public key to generate the fingerprint
    pub fn fingerprint_with(&self, hash: FingerprintHash) -> Vec<u8> {
        hash.hash(&self.data)
    }

    /// The SHA2-256 fingerprint as printed by OpenSSH, like `SHA256:zoVoh6gre0C/...`
    pub fn fingerprint_sha256_string(&self) -> String {
        format!(
            "SHA256:{}",
            base64::encode_config(
                &self.fingerprint_with(FingerprintHash::SHA256),
                base64::STANDARD_NO_PAD
            )
        )
    }

    /// Serialize as OpenSSH format of the public key
    pub fn serialize(&self) -> OsshResult<String> {
        serialize_ossh_pubkey(self)
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
            && self.comment == other.comment
            && self.options.iter().eq(other.options.iter())
    }
}

impl Eq for PublicKey {}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_ossh_pubkey(f, self)
    }
}

impl FromStr for PublicKey {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Format the digest in lowercase hex, two characters per byte, joined by `:`
pub fn readable_fingerprint(digest: &[u8]) -> String {
    digest
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(":")
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::sshbuf::SshWriteExt;
    use hex_literal::hex;

    fn blob(fields: &[&[u8]]) -> Vec<u8> {
        let mut buf = Vec::new();
        for f in fields {
            buf.write_string(f).unwrap();
        }
        buf
    }

    fn rsa_blob(bits: usize) -> Vec<u8> {
        let mut n = vec![0u8];
        n.push(0x80);
        n.extend(std::iter::repeat(0x5a).take(bits / 8 - 1));
        blob(&[b"ssh-rsa", &[1, 0, 1], &n])
    }

    #[test]
    fn readable_format() {
        assert_eq!(
            readable_fingerprint(&hex!("b9e2581a74fc621352adf7280b099154")),
            "b9:e2:58:1a:74:fc:62:13:52:ad:f7:28:0b:09:91:54"
        );
        assert_eq!(readable_fingerprint(&[0x00, 0x0f]), "00:0f");
        assert_eq!(readable_fingerprint(&[]), "");
    }

    #[test]
    fn new_derives_attributes() {
        let key = PublicKey::new(rsa_blob(2048), None, Options::new()).unwrap();
        assert_eq!(key.keytype(), "ssh-rsa");
        assert_eq!(key.variant(), &KeyVariant::RSA);
        assert_eq!(key.size(), 2048);
        assert_eq!(key.readable_fingerprint().len(), 47);
        assert_eq!(
            key.fingerprint().to_vec(),
            key.fingerprint_with(FingerprintHash::MD5)
        );
    }

    #[test]
    fn dsa_size_is_fixed() {
        let key = PublicKey::new(blob(&[b"ssh-dss", b"p", b"q"]), None, Options::new()).unwrap();
        assert_eq!(key.variant(), &KeyVariant::DSA);
        assert_eq!(key.size(), 1024);
    }

    #[test]
    fn ecdsa_variant_carries_curve() {
        let key = PublicKey::new(
            blob(&[b"ecdsa-sha2-nistp521", b"nistp521", &[4; 133]]),
            None,
            Options::new(),
        )
        .unwrap();
        match key.variant() {
            KeyVariant::ECDSA(curve) => assert_eq!(curve.ident(), "nistp521"),
            v => panic!("unexpected variant {:?}", v),
        }
        assert_eq!(key.size(), 521);
        assert_eq!(key.variant().short_name(), "ECDSA");
    }

    #[test]
    fn unknown_keytype() {
        let err = PublicKey::new(blob(&[b"ssh-ed25519", &[0; 32]]), None, Options::new())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownKeyType);
        assert_eq!(err.message(), Some("ssh-ed25519"));
    }

    #[test]
    fn empty_blob() {
        let err = PublicKey::new(Vec::new(), None, Options::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedWireData);
    }

    #[test]
    fn set_key_data_rederives() {
        let mut key = PublicKey::new(rsa_blob(2048), Some("c".into()), Options::new()).unwrap();
        let old_fp = key.fingerprint();

        key.set_key_data(rsa_blob(4096)).unwrap();
        assert_eq!(key.size(), 4096);
        assert_ne!(key.fingerprint(), old_fp);

        key.set_key_data(blob(&[b"ssh-dss"])).unwrap();
        assert_eq!(key.keytype(), "ssh-dss");
        assert_eq!(key.size(), 1024);
        assert_eq!(key.comment(), Some("c"));
    }

    #[test]
    fn failed_set_key_data_keeps_key() {
        let mut key = PublicKey::new(rsa_blob(2048), None, Options::new()).unwrap();
        let before = key.clone();
        let err = key.set_key_data(blob(&[b"ssh-foo"])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownKeyType);
        assert_eq!(key, before);
        assert_eq!(key.size(), 2048);
    }

    #[test]
    fn comment_does_not_change_fingerprint() {
        let mut key = PublicKey::new(rsa_blob(1024), Some("a".into()), Options::new()).unwrap();
        let fp = key.fingerprint();
        key.set_comment(Some("b"));
        key.options_mut().insert("no-pty".into(), OptionValue::Flag);
        assert_eq!(key.fingerprint(), fp);
        assert_eq!(key.comment(), Some("b"));
        key.set_comment(None::<String>);
        assert_eq!(key.comment(), None);
    }

    #[test]
    fn option_overwrite_keeps_order() {
        let mut options = Options::new();
        options.insert("a".into(), OptionValue::Flag);
        options.insert("b".into(), "1".into());
        options.insert("a".into(), "2".into());
        let names: Vec<&str> = options.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(options["a"].as_text(), Some("2"));
    }
}
