//! Password strength scoring.
//!
//! Informational only: a weak password that meets the minimum length is
//! still accepted by the forms.

use super::MIN_PASSWORD_LENGTH;

/// Score out of five, with one feedback line per unmet criterion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordStrength {
    pub score: u8,
    pub feedback: Vec<String>,
}

impl PasswordStrength {
    /// Four or more criteria met.
    pub fn is_strong(&self) -> bool {
        self.score >= 4
    }
}

const SPECIAL_CHARACTERS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Scores a password on length, case mix, digits and special characters.
pub fn password_strength(password: &str) -> PasswordStrength {
    let criteria: [(bool, String); 5] = [
        (
            password.chars().count() >= MIN_PASSWORD_LENGTH,
            format!(
                "Password must be at least {} characters long",
                MIN_PASSWORD_LENGTH
            ),
        ),
        (
            password.chars().any(|c| c.is_ascii_uppercase()),
            "Password must contain at least one uppercase letter".to_string(),
        ),
        (
            password.chars().any(|c| c.is_ascii_lowercase()),
            "Password must contain at least one lowercase letter".to_string(),
        ),
        (
            password.chars().any(|c| c.is_ascii_digit()),
            "Password must contain at least one number".to_string(),
        ),
        (
            password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)),
            "Password must contain at least one special character".to_string(),
        ),
    ];

    let mut score = 0;
    let mut feedback = Vec::new();
    for (met, hint) in criteria {
        if met {
            score += 1;
        } else {
            feedback.push(hint);
        }
    }
    PasswordStrength { score, feedback }
}
