use std::error::Error as StdError;

/// The result type used across this crate
pub type OsshResult<T> = Result<T, Error>;

/// The error type of this crate
///
/// It carries an [`ErrorKind`](enum.ErrorKind.html) for programmatic matching,
/// an optional message describing the offending input,
/// and an optional underlying error from a collaborator (I/O, base64 decoder).
#[derive(Debug, thiserror::Error)]
#[error("{kind}{}", detail(.message, .inner))]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    #[source]
    inner: Option<Box<dyn StdError + Send + Sync>>,
}

/// The `: message` and `: cause` suffixes of the displayed error
fn detail(message: &Option<String>, inner: &Option<Box<dyn StdError + Send + Sync>>) -> String {
    let mut s = String::new();
    if let Some(msg) = message {
        s.push_str(": ");
        s.push_str(msg);
    }
    if let Some(cause) = inner {
        s.push_str(": ");
        s.push_str(&cause.to_string());
    }
    s
}

impl Error {
    pub(crate) fn from_kind(kind: ErrorKind) -> Self {
        Error {
            kind,
            message: None,
            inner: None,
        }
    }

    pub(crate) fn with_message<S: Into<String>>(kind: ErrorKind, message: S) -> Self {
        Error {
            kind,
            message: Some(message.into()),
            inner: None,
        }
    }

    pub(crate) fn with_error<E: StdError + Send + Sync + 'static>(kind: ErrorKind, err: E) -> Self {
        Error {
            kind,
            message: None,
            inner: Some(Box::new(err)),
        }
    }

    /// Prefix the message with some context, keeping the kind and the cause
    pub(crate) fn context<S: AsRef<str>>(mut self, ctx: S) -> Self {
        self.message = Some(match self.message.take() {
            Some(msg) => format!("{}: {}", ctx.as_ref(), msg),
            None => ctx.as_ref().to_owned(),
        });
        self
    }

    /// The kind of this error
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The detail message, if any
    ///
    /// For [`UnknownKeyType`](enum.ErrorKind.html#variant.UnknownKeyType) and
    /// [`UnsupportedCurve`](enum.ErrorKind.html#variant.UnsupportedCurve),
    /// this contains the offending identifier.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self::from_kind(kind)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::with_error(ErrorKind::IOError, err)
    }
}
impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Self::with_error(ErrorKind::FmtError, err)
    }
}
impl From<base64::DecodeError> for Error {
    fn from(err: base64::DecodeError) -> Self {
        Self::with_error(ErrorKind::InvalidKeyData, err)
    }
}

/// Indicate the reason of the error
#[derive(Debug, Clone, Copy, Eq, PartialEq, thiserror::Error)]
pub enum ErrorKind {
    /// A length prefix is truncated or points past the end of the buffer
    #[error("Malformed Wire Data")]
    MalformedWireData,
    /// The key data is not valid base64
    #[error("Invalid Key Data")]
    InvalidKeyData,
    /// The key line has fewer than the type and data fields
    #[error("Insufficient Fields")]
    InsufficientFields,
    /// The key line has more fields than the grammar allows
    #[error("Too Many Fields")]
    TooManyFields,
    /// Nothing left after stripping the options
    #[error("Empty Key")]
    EmptyKey,
    /// The decoded key type is not supported
    #[error("Unknown Key Type")]
    UnknownKeyType,
    /// The elliptic curve is not supported
    #[error("Unsupported Elliptic Curve")]
    UnsupportedCurve,
    /// Reading a key file or stream failed
    #[error("I/O Error")]
    IOError,
    /// Writing a key line failed
    #[error("Formatter Error")]
    FmtError,
}

impl ErrorKind {
    /// The human readable name of the kind, as displayed
    pub fn name(self) -> &'static str {
        use ErrorKind::*;

        match self {
            MalformedWireData => "Malformed Wire Data",
            InvalidKeyData => "Invalid Key Data",
            InsufficientFields => "Insufficient Fields",
            TooManyFields => "Too Many Fields",
            EmptyKey => "Empty Key",
            UnknownKeyType => "Unknown Key Type",
            UnsupportedCurve => "Unsupported Elliptic Curve",
            IOError => "I/O Error",
            FmtError => "Formatter Error",
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display_with_message() {
        let err = Error::with_message(ErrorKind::UnknownKeyType, "ssh-foo");
        assert_eq!(err.to_string(), "Unknown Key Type: ssh-foo");
        assert_eq!(err.message(), Some("ssh-foo"));
    }

    #[test]
    fn context_keeps_kind() {
        let err = Error::with_message(ErrorKind::UnsupportedCurve, "brainpool")
            .context("line 3");
        assert_eq!(err.kind(), ErrorKind::UnsupportedCurve);
        assert_eq!(err.message(), Some("line 3: brainpool"));
    }

    #[test]
    fn base64_error_is_invalid_key_data() {
        let err: Error = base64::decode("!!!!").unwrap_err().into();
        assert_eq!(err.kind(), ErrorKind::InvalidKeyData);
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("Invalid Key Data: "));
    }

    #[test]
    fn display_matches_name() {
        let kinds = [
            ErrorKind::MalformedWireData,
            ErrorKind::InvalidKeyData,
            ErrorKind::InsufficientFields,
            ErrorKind::TooManyFields,
            ErrorKind::EmptyKey,
            ErrorKind::UnknownKeyType,
            ErrorKind::UnsupportedCurve,
            ErrorKind::IOError,
            ErrorKind::FmtError,
        ];
        for kind in kinds.iter() {
            assert_eq!(kind.to_string(), kind.name());
            assert_eq!(Error::from_kind(*kind).to_string(), kind.name());
        }
    }

    #[test]
    fn io_error_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = Error::from(io).context("key.pub");
        assert_eq!(err.kind(), ErrorKind::IOError);
        assert_eq!(err.to_string(), "I/O Error: key.pub: gone");
        assert_eq!(err.source().unwrap().to_string(), "gone");
    }
}
