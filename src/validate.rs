// Input validation - character blacklist + numeric range check
// Runs before any network traffic; bad input never reaches the API

use thiserror::Error;

/// Characters that are never valid in a creature name or id
pub const FORBIDDEN_CHARS: &[char] = &['%', '&', '*', '(', '@', ')', '!', ';', ':', '<', '>'];

/// Highest creature id the API knows about
pub const MAX_CREATURE_ID: i64 = 1025;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("please enter a creature name or id")]
    Empty,

    #[error("invalid character detected: {0}")]
    ForbiddenCharacter(char),

    #[error("creature id must be between 0 and {MAX_CREATURE_ID}")]
    IdOutOfRange(i64),
}

/// Validate a user-entered identifier before looking it up.
///
/// Rules apply in order, first failure wins:
/// 1. blank input is rejected
/// 2. any blacklisted character is rejected, naming the offending character
/// 3. fully-numeric input must be a valid creature id; anything else is
///    treated as a name lookup and passes
pub fn validate(input: &str) -> Result<(), ValidationError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }

    for c in FORBIDDEN_CHARS {
        if trimmed.contains(*c) {
            return Err(ValidationError::ForbiddenCharacter(*c));
        }
    }

    if let Some(id) = parse_numeric(trimmed) {
        if !(0..=MAX_CREATURE_ID).contains(&id) {
            return Err(ValidationError::IdOutOfRange(id));
        }
    }

    Ok(())
}

/// Parse input that is entirely numeric, saturating on overflow so that
/// absurdly long digit strings still fail the range check instead of being
/// mistaken for names.
fn parse_numeric(s: &str) -> Option<i64> {
    let digits = s
        .strip_prefix('+')
        .or_else(|| s.strip_prefix('-'))
        .unwrap_or(s);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let saturated = if s.starts_with('-') { i64::MIN } else { i64::MAX };
    Some(s.parse::<i64>().unwrap_or(saturated))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_rejected() {
        assert_eq!(validate(""), Err(ValidationError::Empty));
        assert_eq!(validate("   "), Err(ValidationError::Empty));
    }

    #[test]
    fn test_every_forbidden_character_rejected() {
        for c in FORBIDDEN_CHARS {
            let input = format!("pika{c}chu");
            assert_eq!(
                validate(&input),
                Err(ValidationError::ForbiddenCharacter(*c)),
                "expected {input:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_forbidden_character_identified() {
        assert_eq!(
            validate("pika;chu"),
            Err(ValidationError::ForbiddenCharacter(';'))
        );
    }

    #[test]
    fn test_names_pass() {
        assert!(validate("pikachu").is_ok());
        assert!(validate("mr-mime").is_ok());
        assert!(validate("Charizard").is_ok());
    }

    #[test]
    fn test_id_range_boundaries() {
        assert!(validate("0").is_ok());
        assert!(validate("25").is_ok());
        assert!(validate("1025").is_ok());
        assert_eq!(validate("1026"), Err(ValidationError::IdOutOfRange(1026)));
        assert_eq!(validate("-1"), Err(ValidationError::IdOutOfRange(-1)));
    }

    #[test]
    fn test_overflowing_digits_are_out_of_range() {
        assert!(matches!(
            validate("99999999999999999999999"),
            Err(ValidationError::IdOutOfRange(_))
        ));
    }

    #[test]
    fn test_mixed_alphanumeric_is_a_name() {
        // not fully numeric, so the range rule does not apply
        assert!(validate("25a").is_ok());
    }

    #[test]
    fn test_surrounding_whitespace_ignored() {
        assert!(validate("  pikachu  ").is_ok());
        assert!(validate(" 1025 ").is_ok());
    }
}
