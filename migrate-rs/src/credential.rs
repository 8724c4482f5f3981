//! Random password generation for migrated accounts
//!
//! Passwords are real account credentials, so characters are drawn from the
//! operating system CSPRNG rather than a seeded statistical generator.

use rand::rngs::OsRng;
use rand::Rng;
use serde::Serialize;
use std::fmt;

/// Default generated password length
pub const DEFAULT_PASSWORD_LENGTH: usize = 12;

/// Letters, digits and ASCII punctuation (94 symbols)
pub const PASSWORD_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz\
ABCDEFGHIJKLMNOPQRSTUVWXYZ\
0123456789\
!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// A freshly generated password, sent once and never logged
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GeneratedCredential(String);

impl GeneratedCredential {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for GeneratedCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("GeneratedCredential(<redacted>)")
    }
}

/// Generate a password of `length` characters, each drawn uniformly from
/// [`PASSWORD_ALPHABET`]
pub fn generate_password(length: usize) -> GeneratedCredential {
    let mut rng = OsRng;

    let password = (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..PASSWORD_ALPHABET.len());
            PASSWORD_ALPHABET[idx] as char
        })
        .collect();

    GeneratedCredential(password)
}
