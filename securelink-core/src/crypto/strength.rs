//! Password strength scoring against five independent criteria.
//!
//! Advisory only: a weak password is never refused for encryption.

use serde::Serialize;

/// Minimum length that satisfies the length criterion
pub const MIN_LENGTH: usize = 8;

/// Characters that satisfy the special-character criterion
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>?";

/// Strength rating for a password
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StrengthLevel {
    /// Empty password
    None,
    /// Two or fewer criteria met
    Weak,
    /// Three criteria met
    Fair,
    /// Four criteria met
    Good,
    /// All five criteria met
    Strong,
}

impl StrengthLevel {
    /// Map a count of satisfied criteria to a level
    ///
    /// A count of zero from a non-empty password is still `Weak`; only the
    /// empty password is `None`.
    pub fn from_count(count: u8) -> Self {
        match count {
            0..=2 => StrengthLevel::Weak,
            3 => StrengthLevel::Fair,
            4 => StrengthLevel::Good,
            _ => StrengthLevel::Strong,
        }
    }

    /// Get the level as a lowercase identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            StrengthLevel::None => "none",
            StrengthLevel::Weak => "weak",
            StrengthLevel::Fair => "fair",
            StrengthLevel::Good => "good",
            StrengthLevel::Strong => "strong",
        }
    }

    /// Get the level as a display label
    pub fn label(&self) -> &'static str {
        match self {
            StrengthLevel::None => "None",
            StrengthLevel::Weak => "Weak",
            StrengthLevel::Fair => "Fair",
            StrengthLevel::Good => "Good",
            StrengthLevel::Strong => "Strong",
        }
    }

    /// Get the color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            StrengthLevel::None => "\x1b[0m",
            StrengthLevel::Weak => "\x1b[31m",   // Red
            StrengthLevel::Fair => "\x1b[33m",   // Yellow
            StrengthLevel::Good => "\x1b[32m",   // Green
            StrengthLevel::Strong => "\x1b[36m", // Cyan
        }
    }
}

/// The five criteria, evaluated independently
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StrengthCriteria {
    /// At least `MIN_LENGTH` UTF-16 code units, as a browser counts length
    pub length: bool,
    pub uppercase: bool,
    pub lowercase: bool,
    pub digit: bool,
    /// Contains one of `SPECIAL_CHARACTERS`
    pub special: bool,
}

impl StrengthCriteria {
    pub fn evaluate(password: &str) -> Self {
        Self {
            length: password.encode_utf16().count() >= MIN_LENGTH,
            uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
            lowercase: password.chars().any(|c| c.is_ascii_lowercase()),
            digit: password.chars().any(|c| c.is_ascii_digit()),
            special: password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)),
        }
    }

    /// Number of satisfied criteria (0-5)
    pub fn count(&self) -> u8 {
        [self.length, self.uppercase, self.lowercase, self.digit, self.special]
            .into_iter()
            .filter(|&met| met)
            .count() as u8
    }
}

/// Password scoring result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StrengthResult {
    pub level: StrengthLevel,
    pub count: u8,
}

/// Score a password
pub fn score_password(password: &str) -> StrengthResult {
    if password.is_empty() {
        return StrengthResult {
            level: StrengthLevel::None,
            count: 0,
        };
    }

    let count = StrengthCriteria::evaluate(password).count();
    StrengthResult {
        level: StrengthLevel::from_count(count),
        count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_password() {
        let result = score_password("");
        assert_eq!(result.level, StrengthLevel::None);
        assert_eq!(result.count, 0);
    }

    #[test]
    fn test_lowercase_only() {
        // Only the lowercase criterion holds
        let result = score_password("abc");
        assert_eq!(result.count, 1);
        assert_eq!(result.level, StrengthLevel::Weak);
    }

    #[test]
    fn test_no_criteria_is_still_weak() {
        let result = score_password("   ");
        assert_eq!(result.count, 0);
        assert_eq!(result.level, StrengthLevel::Weak);
    }

    #[test]
    fn test_strong_password() {
        let result = score_password("Abc123!@");
        assert_eq!(result.count, 5);
        assert_eq!(result.level, StrengthLevel::Strong);
    }

    #[test]
    fn test_levels_by_count() {
        assert_eq!(score_password("abcdefgh").level, StrengthLevel::Weak); // length + lower
        assert_eq!(score_password("Abcdefgh").level, StrengthLevel::Fair);
        assert_eq!(score_password("Abcdefg1").level, StrengthLevel::Good);
        assert_eq!(score_password("Abcdef1;").level, StrengthLevel::Strong);
    }

    #[test]
    fn test_every_special_character_counts() {
        for c in SPECIAL_CHARACTERS.chars() {
            assert!(StrengthCriteria::evaluate(&c.to_string()).special, "{:?}", c);
        }
        assert!(!StrengthCriteria::evaluate("~`/").special);
    }

    #[test]
    fn test_length_counts_utf16_units() {
        // Each emoji is a surrogate pair, so four of them reach eight units
        assert!(StrengthCriteria::evaluate("😀😀😀😀").length);
        assert_eq!(score_password("😀😀😀😀").count, 1);
        assert_eq!(score_password("😀😀😀😀").level, StrengthLevel::Weak);

        // Seven BMP characters stay at seven units despite fourteen bytes
        assert!(!StrengthCriteria::evaluate("ééééééé").length);
        assert!(StrengthCriteria::evaluate("ééééééé1").length);
        assert!(!StrengthCriteria::evaluate("éééé").length);
    }

    #[test]
    fn test_non_ascii_letters_do_not_count() {
        let criteria = StrengthCriteria::evaluate("ÄÖÜäöü");
        assert!(!criteria.uppercase);
        assert!(!criteria.lowercase);
    }

    #[test]
    fn test_labels() {
        assert_eq!(StrengthLevel::Good.as_str(), "good");
        assert_eq!(StrengthLevel::Good.label(), "Good");
        assert!(StrengthLevel::Strong > StrengthLevel::Weak);
    }
}
