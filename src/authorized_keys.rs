//! Reading whole `authorized_keys` files
//!
//! Blank lines and lines starting with `#` are skipped.
//! Every other line must be a valid key line; the first failure is returned,
//! with the line number added to its message.

use crate::error::OsshResult;
use crate::format::ParseConfig;
use crate::keys::PublicKey;
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

fn is_skipped(line: &str) -> bool {
    let line = line.trim_start();
    line.is_empty() || line.starts_with('#')
}

fn parse_line(lineno: usize, line: &str, config: &ParseConfig) -> OsshResult<PublicKey> {
    PublicKey::parse_with(line, config).map_err(|e| e.context(format!("line {}", lineno)))
}

/// Parse the content of an `authorized_keys` file
pub fn parse_str(content: &str) -> OsshResult<Vec<PublicKey>> {
    parse_str_with(content, &ParseConfig::default())
}

/// Parse the content of an `authorized_keys` file with the given configuration
pub fn parse_str_with(content: &str, config: &ParseConfig) -> OsshResult<Vec<PublicKey>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !is_skipped(line))
        .map(|(i, line)| parse_line(i + 1, line, config))
        .collect()
}

/// Read an `authorized_keys` file from a buffered reader
pub fn from_reader<R: BufRead>(reader: R, config: &ParseConfig) -> OsshResult<Vec<PublicKey>> {
    let mut keys = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if is_skipped(&line) {
            continue;
        }
        keys.push(parse_line(i + 1, &line, config)?);
    }
    debug!("Read {} key(s)", keys.len());
    Ok(keys)
}

/// Read an `authorized_keys` file
pub fn from_path<P: AsRef<Path>>(path: P, config: &ParseConfig) -> OsshResult<Vec<PublicKey>> {
    from_reader(BufReader::new(File::open(path)?), config)
}
