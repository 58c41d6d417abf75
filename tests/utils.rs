#![allow(dead_code)]

use sshkeys::PublicKey;
use std::fs;
use std::path::{Path, PathBuf};

pub fn locate_crate_files<P: AsRef<Path>>(path: P) -> PathBuf {
    let mut abspath = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    abspath.push(path);
    abspath
}

/// The first line of a key file, without the line ending
pub fn read_keyline<P: AsRef<Path>>(path: P) -> String {
    let content = fs::read_to_string(locate_crate_files(path)).unwrap();
    content.trim().to_owned()
}

/// Decode a `xx:xx:...` fingerprint
pub fn bin_fp(readable: &str) -> Vec<u8> {
    hex::decode(readable.replace(':', "")).unwrap()
}

#[inline]
pub fn fingerprint_assert(key1: &PublicKey, key2: &PublicKey) {
    assert_eq!(key1.fingerprint(), key2.fingerprint());
    assert_eq!(key1.readable_fingerprint(), key2.readable_fingerprint());
}

/// The 4096 bits RSA key from `assets/rsa4096.pub`, without its comment
pub const RSA4096_KEY: &str = "ssh-rsa AAAAB3NzaC1yc2EAAAADAQABAAACAQDDN2n2kt99/aYpPbOZRJeGVyFs74R1/QCqN351cuXLGK93lalDyIuIiUvMEYezregae1xDWXtCD+q9HMQpfl62R2R1h3b8CMX8fpcGGXHJAxFWg/Sz8qXcbOeTRKdnBIWlUrkDi/7hWKZdXLsiSPJeX9wmLhA5HCdHye1yFlGxSixTVK2fXyS9ZFEbBcIL8Aiq2EMQktCy2gDOiJArpCF7pvsGqiLUxdCpOT+wuL+oGV47yVveGt9TcesnmZ1HxESXAIS22Vo2MnTABxdNxNrs1ih3+4wdJ+gpoLo0lRNdjARRlcoH/fJvrXdbOrf//ARzuR9JKfyKz+9aUEPxGtlEStbVysTjY2M3+Z4msbxh4x3ezpujhzpFCeLDHcAPg/HS6GoO7zGcdJ8knCZK5ujOvFku03Es+jLrGNjACDOlLSYf9RHPqHvo/Fn+lCLJWZoc0qiuICuHbEDU0fJ4qbVovZtdQtTwzQ8Az+VsLhJfehhadvb5hOCw3o4i9j1dJzcNfKJiBhab25GdfEYE097fDoYu/M0mi14AHWR0KI9o9Fd526x9B6c6gfljbHJZcMGXhzfyO6nIsbZK6teJR7qh/8EQ7shOyfdcJkexvsbeNm12VTW34ar+FjrApgN1QtY1+/6SDNSeOQqnBu2qENQVllSCfxOholMnVpO5ly1G2Q==";
pub const RSA4096_FP: &str = "b9:e2:58:1a:74:fc:62:13:52:ad:f7:28:0b:09:91:54";
