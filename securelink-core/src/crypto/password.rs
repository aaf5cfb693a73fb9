//! Secure random password generator

use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use rand::{CryptoRng, Rng};

/// Length of every generated password
pub const PASSWORD_LENGTH: usize = 16;

/// Character sets for password generation
pub struct CharacterSets;

impl CharacterSets {
    pub const UPPERCASE: &'static [u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    pub const LOWERCASE: &'static [u8] = b"abcdefghijklmnopqrstuvwxyz";
    pub const DIGITS: &'static [u8] = b"0123456789";
    /// A subset of the characters the strength check accepts as special
    pub const SYMBOLS: &'static [u8] = b"!@#$%^&*";
    /// Combined alphabet used for the free positions (70 characters)
    pub const ALL: &'static [u8] =
        b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*";
}

fn pick<R: Rng>(charset: &[u8], rng: &mut R) -> u8 {
    charset[rng.gen_range(0..charset.len())]
}

/// Generate a password from the given CSPRNG
///
/// One uppercase letter, one lowercase letter, one digit and one symbol
/// fill the first four slots, the remaining twelve are drawn uniformly from
/// the combined alphabet, and a Fisher-Yates shuffle then spreads the
/// guaranteed characters over every position with equal probability.
pub fn generate_password_with<R: Rng + CryptoRng>(rng: &mut R) -> String {
    let mut password = Vec::with_capacity(PASSWORD_LENGTH);

    password.push(pick(CharacterSets::UPPERCASE, rng));
    password.push(pick(CharacterSets::LOWERCASE, rng));
    password.push(pick(CharacterSets::DIGITS, rng));
    password.push(pick(CharacterSets::SYMBOLS, rng));

    while password.len() < PASSWORD_LENGTH {
        password.push(pick(CharacterSets::ALL, rng));
    }

    password.shuffle(rng);

    password.into_iter().map(char::from).collect()
}

/// Generate a 16-character password that satisfies every strength criterion
pub fn generate_password() -> String {
    generate_password_with(&mut OsRng)
}
