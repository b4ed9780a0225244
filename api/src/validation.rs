//! Predicates over raw form input.

use thiserror::Error;

/// Why a payment amount was refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("payment amount must be positive, got {0}")]
    NotPositive(i64),
    #[error("payment amount {amount} exceeds the limit of {limit}")]
    AboveLimit { amount: i64, limit: i64 },
}

/// A service that checks user input before the engine acts on it.
pub trait Validator {
    /// Returns `true` if `phone` is an acceptable login number.
    fn validate_phone(&self, phone: &str) -> bool;

    /// Checks that `amount` may be charged.
    fn validate_payment_amount(&self, amount: i64) -> Result<(), ValidationError>;
}

/// The stock validator: Iranian mobile numbers and bounded positive amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultValidator {
    pub max_amount: i64,
}

impl DefaultValidator {
    pub const MAX_AMOUNT: i64 = 50_000_000;
}

impl Default for DefaultValidator {
    fn default() -> Self {
        Self {
            max_amount: Self::MAX_AMOUNT,
        }
    }
}

impl Validator for DefaultValidator {
    /// Accepts `09xxxxxxxxx`, `989xxxxxxxxx` and `+989xxxxxxxxx`. Spaces and
    /// dashes are ignored, and Persian or Arabic-Indic digits count as digits.
    fn validate_phone(&self, phone: &str) -> bool {
        let mut digits = String::with_capacity(phone.len());
        for (i, c) in phone.trim().chars().enumerate() {
            match c {
                ' ' | '-' => continue,
                '+' if i == 0 => digits.push('+'),
                _ => match normalize_digit(c) {
                    Some(d) => digits.push(d),
                    None => return false,
                },
            }
        }

        let national = if let Some(rest) = digits.strip_prefix("+98") {
            rest
        } else if let Some(rest) = digits.strip_prefix("98") {
            rest
        } else if let Some(rest) = digits.strip_prefix('0') {
            rest
        } else {
            return false;
        };

        national.len() == 10 && national.starts_with('9') && national.bytes().all(|b| b.is_ascii_digit())
    }

    fn validate_payment_amount(&self, amount: i64) -> Result<(), ValidationError> {
        if amount <= 0 {
            return Err(ValidationError::NotPositive(amount));
        }
        if amount > self.max_amount {
            return Err(ValidationError::AboveLimit {
                amount,
                limit: self.max_amount,
            });
        }
        Ok(())
    }
}

/// Maps ASCII, Persian (U+06F0..) and Arabic-Indic (U+0660..) digits to ASCII.
fn normalize_digit(c: char) -> Option<char> {
    match c {
        '0'..='9' => Some(c),
        '\u{06F0}'..='\u{06F9}' => char::from_digit(c as u32 - 0x06F0, 10),
        '\u{0660}'..='\u{0669}' => char::from_digit(c as u32 - 0x0660, 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_mobile_formats() {
        let v = DefaultValidator::default();
        assert!(v.validate_phone("09121234567"));
        assert!(v.validate_phone("0912-123-4567"));
        assert!(v.validate_phone("+98 912 123 4567"));
        assert!(v.validate_phone("989121234567"));
        assert!(v.validate_phone("۰۹۱۲۱۲۳۴۵۶۷"));
    }

    #[test]
    fn rejects_malformed_numbers() {
        let v = DefaultValidator::default();
        assert!(!v.validate_phone(""));
        assert!(!v.validate_phone("0912123456"));
        assert!(!v.validate_phone("02112345678"));
        assert!(!v.validate_phone("0912abc4567"));
        assert!(!v.validate_phone("9+8912123456"));
    }

    #[test]
    fn bounds_payment_amounts() {
        let v = DefaultValidator { max_amount: 1_000 };
        assert_eq!(v.validate_payment_amount(1_000), Ok(()));
        assert_eq!(
            v.validate_payment_amount(0),
            Err(ValidationError::NotPositive(0))
        );
        assert_eq!(
            v.validate_payment_amount(1_001),
            Err(ValidationError::AboveLimit {
                amount: 1_001,
                limit: 1_000
            })
        );
    }
}
