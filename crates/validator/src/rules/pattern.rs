//! Text format rules
//!
//! Every rule here passes null and empty values. Compose with `required()`
//! to make a property mandatory.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ConfigError, ConfigResult};

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
    ).unwrap()
});

static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:https?|ftp)://[^\s/$.?#].[^\s]*$").unwrap());

static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9 ().\-]+$").unwrap());

const PHONE_MIN_DIGITS: usize = 7;
const PHONE_MAX_DIGITS: usize = 15;

const CARD_MIN_DIGITS: usize = 12;
const CARD_MAX_DIGITS: usize = 19;

// ============================================================================
// REGEX
// ============================================================================

crate::text_rule! {
    /// Validates that text matches a regular expression.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keel_validator::foundation::{Property, Rule};
    /// use keel_validator::rules::matches_regex;
    ///
    /// let rule = matches_regex(r"^\d{3}-\d{4}$").unwrap();
    /// assert!(rule.evaluate(&Property::new("Extension", "123-4567")).is_success());
    /// assert!(rule.evaluate(&Property::new("Extension", "invalid")).is_failure());
    /// ```
    pub MatchesRegex { pattern: Regex };
    code: "regex";
    accept(self, text) { self.pattern.is_match(text) }
    message(self, name) { format!("The field {name} must match the regular expression '{}'.", self.pattern.as_str()) }
    params(self) { vec![("pattern", self.pattern.as_str().to_owned())] }
}

impl MatchesRegex {
    /// Compiles `pattern`.
    ///
    /// Returns [`ConfigError::InvalidPattern`] if it does not compile.
    pub fn new(pattern: &str) -> ConfigResult<Self> {
        let pattern =
            Regex::new(pattern).map_err(|error| ConfigError::invalid_pattern(pattern, &error))?;
        Ok(Self {
            pattern,
            message: None,
        })
    }
}

/// Creates a [`MatchesRegex`] rule.
pub fn matches_regex(pattern: &str) -> ConfigResult<MatchesRegex> {
    MatchesRegex::new(pattern)
}

// ============================================================================
// EMAIL
// ============================================================================

crate::text_rule! {
    /// Validates email address format.
    pub Email {};
    code: "email";
    accept(self, text) { EMAIL_REGEX.is_match(text) }
    message(self, name) { format!("The {name} field is not a valid e-mail address.") }
}

/// Creates an [`Email`] rule.
#[must_use]
pub fn email() -> Email {
    Email::new()
}

// ============================================================================
// URL
// ============================================================================

crate::text_rule! {
    /// Validates an absolute `http`, `https` or `ftp` URL.
    pub Url {};
    code: "url";
    accept(self, text) { URL_REGEX.is_match(text) }
    message(self, name) { format!("The {name} field is not a valid fully-qualified http, https, or ftp URL.") }
}

/// Creates a [`Url`] rule.
#[must_use]
pub fn url() -> Url {
    Url::new()
}

// ============================================================================
// PHONE
// ============================================================================

crate::text_rule! {
    /// Validates a phone number.
    ///
    /// Allows an optional leading `+` and the separators space, `-`, `.`,
    /// `(` and `)`. The number must carry 7 to 15 digits.
    pub Phone {};
    code: "phone";
    accept(self, text) {
        let digits = text.chars().filter(char::is_ascii_digit).count();
        PHONE_REGEX.is_match(text) && (PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits)
    }
    message(self, name) { format!("The {name} field is not a valid phone number.") }
}

/// Creates a [`Phone`] rule.
#[must_use]
pub fn phone() -> Phone {
    Phone::new()
}

// ============================================================================
// CREDIT CARD
// ============================================================================

crate::text_rule! {
    /// Validates a payment card number with the Luhn checksum.
    ///
    /// Spaces and dashes are ignored.
    pub CreditCard {};
    code: "credit_card";
    accept(self, text) { is_card_number(text) }
    message(self, name) { format!("The {name} field is not a valid credit card number.") }
}

/// Creates a [`CreditCard`] rule.
#[must_use]
pub fn credit_card() -> CreditCard {
    CreditCard::new()
}

fn is_card_number(text: &str) -> bool {
    let mut digits = Vec::with_capacity(CARD_MAX_DIGITS);
    for c in text.chars().filter(|c| *c != ' ' && *c != '-') {
        match c.to_digit(10) {
            Some(digit) => digits.push(digit),
            None => return false,
        }
    }
    (CARD_MIN_DIGITS..=CARD_MAX_DIGITS).contains(&digits.len()) && luhn(&digits)
}

fn luhn(digits: &[u32]) -> bool {
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum();
    sum % 10 == 0
}

// ============================================================================
// TESTS
// ============================================================================
