/// The key name of DSA keys
pub const DSA_NAME: &str = "ssh-dss";
/// The short name of DSA
pub const DSA_SHORT_NAME: &str = "DSA";
/// DSA keys in OpenSSH are always 1024 bits
pub const DSA_SIZE: usize = 1024;
