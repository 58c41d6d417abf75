pub(crate) mod options;
pub(crate) mod ossh_pubkey;

/// Settings for parsing public key lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseConfig {
    /// Reject comments containing whitespace with
    /// [`ErrorKind::TooManyFields`](../error/enum.ErrorKind.html#variant.TooManyFields).
    ///
    /// By default, the comment extends to the end of the line.
    pub strict_comment: bool,
}

impl ParseConfig {
    /// The configuration allowing only single-token comments
    pub fn strict() -> Self {
        ParseConfig {
            strict_comment: true,
        }
    }
}
