use crate::keys::dsa::DSA_NAME;
use crate::keys::ecdsa::ECDSA_PREFIX;
use crate::keys::rsa::RSA_NAME;
use crate::keys::{OptionValue, Options};
use log::trace;
use std::fmt;

/// Other key names OpenSSH knows about; they are not supported,
/// but must not be mistaken for an option.
const FOREIGN_KEY_NAMES: &[&str] = &["ssh-ed25519", "ssh-ed448"];
const FOREIGN_KEY_PREFIXES: &[&str] = &["sk-"];
const CERT_SUFFIX: &str = "-cert-v01@openssh.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Name,
    Value,
    QuotedValue,
}

/// Whether the token is a key type rather than an option
fn is_keytype_token(token: &str) -> bool {
    token == RSA_NAME
        || token == DSA_NAME
        || token.starts_with(ECDSA_PREFIX)
        || FOREIGN_KEY_NAMES.contains(&token)
        || FOREIGN_KEY_PREFIXES.iter().any(|p| token.starts_with(p))
        || token.ends_with(CERT_SUFFIX)
}

fn is_separator(c: char) -> bool {
    c == ' ' || c == '\t'
}

fn commit(options: &mut Options, name: &mut String, value: &mut Option<String>) {
    let value = match value.take() {
        Some(text) => OptionValue::Text(text),
        None => OptionValue::Flag,
    };
    trace!("option {:?} = {:?}", name, value);
    options.insert(std::mem::take(name), value);
}

/// Split the leading option clause from a trimmed key line
///
/// Returns the options and the rest of the line.
/// If the clause never ends with a whitespace, the line is assumed to have no options
/// and is returned unchanged, so that the field splitting reports the problem.
pub(crate) fn parse_options(line: &str) -> (Options, &str) {
    let mut options = Options::new();
    let mut state = ScanState::Name;
    let mut name = String::new();
    let mut name_start = 0;
    let mut value: Option<String> = None;
    let mut escaped = false;
    let mut chars = line.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match state {
            ScanState::Name => match c {
                '=' => {
                    value = Some(String::new());
                    if let Some((_, '"')) = chars.peek() {
                        chars.next();
                        state = ScanState::QuotedValue;
                    } else {
                        state = ScanState::Value;
                    }
                }
                ',' => {
                    commit(&mut options, &mut name, &mut value);
                    name_start = i + c.len_utf8();
                }
                c if is_separator(c) => {
                    if is_keytype_token(&name) {
                        trace!("no more options, key type {:?} found", name);
                        return (options, &line[name_start..]);
                    }
                    commit(&mut options, &mut name, &mut value);
                    return (options, &line[i + c.len_utf8()..]);
                }
                c => name.push(c),
            },
            ScanState::Value => match c {
                ',' => {
                    commit(&mut options, &mut name, &mut value);
                    name_start = i + c.len_utf8();
                    state = ScanState::Name;
                }
                c if is_separator(c) => {
                    commit(&mut options, &mut name, &mut value);
                    return (options, &line[i + c.len_utf8()..]);
                }
                c => value.get_or_insert_with(String::new).push(c),
            },
            ScanState::QuotedValue => {
                let text = value.get_or_insert_with(String::new);
                if escaped {
                    // Only quotes are really escaped, other backslashes are kept
                    if c != '"' {
                        text.push('\\');
                    }
                    text.push(c);
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == '"' {
                    state = ScanState::Name;
                } else {
                    text.push(c);
                }
            }
        }
    }

    trace!("option clause not terminated, assuming no options");
    (Options::new(), line)
}

/// Write the options as a comma separated clause
///
/// Only the double quotes of the values are escaped.
pub(crate) fn write_options<W: fmt::Write>(w: &mut W, options: &Options) -> fmt::Result {
    for (i, (name, value)) in options.iter().enumerate() {
        if i > 0 {
            w.write_char(',')?;
        }
        match value {
            OptionValue::Flag => w.write_str(name)?,
            OptionValue::Text(text) => write!(w, "{}=\"{}\"", name, text.replace('"', "\\\""))?,
        }
    }
    Ok(())
}
