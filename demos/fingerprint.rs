use sshkeys::{authorized_keys, OsshResult, ParseConfig};
use std::env;
use std::fmt::Display;
use std::path::Path;

fn print_fingerprints<P: Display + AsRef<Path>>(path: P) -> OsshResult<()> {
    println!("{}:", path);
    match authorized_keys::from_path(&path, &ParseConfig::default()) {
        Ok(keys) => {
            for key in keys {
                println!(
                    "  {} MD5:{} {} {} ({})",
                    key.size(),
                    key.readable_fingerprint(),
                    key.fingerprint_sha256_string(),
                    key.comment().unwrap_or("no comment"),
                    key.variant().short_name()
                );
            }
        }
        Err(e) => {
            println!("  {}", e);
        }
    }
    Ok(())
}

fn main() -> OsshResult<()> {
    let mut argv = env::args();
    argv.next();
    for arg in argv {
        print_fingerprints(&arg)?;
    }
    Ok(())
}
