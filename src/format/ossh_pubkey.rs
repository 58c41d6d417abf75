use super::options::{parse_options, write_options};
use super::ParseConfig;
use crate::error::{Error, ErrorKind, OsshResult};
use crate::keys::PublicKey;
use log::warn;
use std::fmt;

/// Split at the first whitespace run, returning the token and the rest
fn split_token(s: &str) -> (&str, &str) {
    match s.find(char::is_whitespace) {
        Some(i) => (&s[..i], s[i..].trim_start()),
        None => (s, ""),
    }
}

/// Split the option-less part of a line into type, key data and comment
fn split_fields<'a>(
    keystr: &'a str,
    config: &ParseConfig,
) -> OsshResult<(&'a str, &'a str, Option<&'a str>)> {
    let (keytype, rest) = split_token(keystr);
    let (data, comment) = split_token(rest);
    if data.is_empty() {
        return Err(Error::with_message(
            ErrorKind::InsufficientFields,
            "expected the key type and the key data",
        ));
    }
    if comment.contains(|c| c == '\n' || c == '\r') {
        return Err(Error::with_message(
            ErrorKind::TooManyFields,
            "the comment spans more than one line",
        ));
    }
    if config.strict_comment && comment.contains(char::is_whitespace) {
        return Err(Error::with_message(
            ErrorKind::TooManyFields,
            "the comment contains whitespace",
        ));
    }
    let comment = if comment.is_empty() {
        None
    } else {
        Some(comment)
    };
    Ok((keytype, data, comment))
}

pub(crate) fn parse_ossh_pubkey(line: &str, config: &ParseConfig) -> OsshResult<PublicKey> {
    let (options, keystr) = parse_options(line.trim());
    let keystr = keystr.trim();
    if keystr.is_empty() {
        return Err(ErrorKind::EmptyKey.into());
    }

    let (keytype, data, comment) = split_fields(keystr, config)?;
    let blob = base64::decode(data)?;
    let key = PublicKey::new(blob, comment.map(String::from), options)?;
    if key.keytype() != keytype {
        warn!(
            "Key type {:?} does not match the key data ({:?}), using the latter",
            keytype,
            key.keytype()
        );
    }
    Ok(key)
}

/// Write the key line `[options ]type base64data[ comment]`
pub(crate) fn write_ossh_pubkey<W: fmt::Write>(w: &mut W, key: &PublicKey) -> fmt::Result {
    if !key.options().is_empty() {
        write_options(w, key.options())?;
        w.write_char(' ')?;
    }
    write!(w, "{} {}", key.keytype(), base64::encode(key.key_data()))?;
    if let Some(comment) = key.comment() {
        write!(w, " {}", comment)?;
    }
    Ok(())
}

pub(crate) fn serialize_ossh_pubkey(key: &PublicKey) -> OsshResult<String> {
    let mut keystr = String::new();
    write_ossh_pubkey(&mut keystr, key)?;
    Ok(keystr)
}
