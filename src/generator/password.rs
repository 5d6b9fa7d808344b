use std::fmt;

use rand::Rng;

use super::alphabet::{CharClasses, PASSWORD_SYMBOLS};
use super::error::GeneratorResult;

pub const DEFAULT_LENGTH: usize = 16;
const MAX_STRENGTH: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordOptions {
    pub length: usize,
    pub classes: CharClasses,
}

impl Default for PasswordOptions {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            classes: CharClasses::default(),
        }
    }
}

/// Draws `length` characters independently and uniformly from a non-empty
/// `alphabet`.
pub(crate) fn draw<R: Rng + ?Sized>(alphabet: &[char], length: usize, rng: &mut R) -> String {
    (0..length)
        .map(|_| alphabet[rng.random_range(0..alphabet.len())])
        .collect()
}

pub fn generate_password<R: Rng + ?Sized>(
    options: &PasswordOptions,
    rng: &mut R,
) -> GeneratorResult<String> {
    let alphabet = options.classes.alphabet(PASSWORD_SYMBOLS)?;
    Ok(draw(&alphabet, options.length, rng))
}

/// Additive score: one point per length threshold (8, 12, 16) plus one per
/// character class present, capped at 5.
pub fn strength_score(password: &str) -> u8 {
    if password.is_empty() {
        return 0;
    }
    let length = password.chars().count();
    let length_points = [8, 12, 16]
        .into_iter()
        .filter(|threshold| length >= *threshold)
        .count();
    let class_points = [
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_lowercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ]
    .into_iter()
    .filter(|present| *present)
    .count();

    let total = u8::try_from(length_points + class_points).unwrap_or(MAX_STRENGTH);
    total.min(MAX_STRENGTH)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strength {
    VeryWeak,
    Weak,
    Moderate,
    Strong,
    VeryStrong,
}

impl Strength {
    /// `None` for an empty password (score 0).
    pub fn from_score(score: u8) -> Option<Self> {
        match score {
            0 => None,
            1 => Some(Self::VeryWeak),
            2 => Some(Self::Weak),
            3 => Some(Self::Moderate),
            4 => Some(Self::Strong),
            _ => Some(Self::VeryStrong),
        }
    }

    pub fn of(password: &str) -> Option<Self> {
        Self::from_score(strength_score(password))
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::VeryWeak => "Very Weak",
            Self::Weak => "Weak",
            Self::Moderate => "Moderate",
            Self::Strong => "Strong",
            Self::VeryStrong => "Very Strong",
        }
    }

    /// Indicator color, red through emerald.
    pub const fn color(self) -> &'static str {
        match self {
            Self::VeryWeak => "#EF4444",
            Self::Weak => "#F97316",
            Self::Moderate => "#EAB308",
            Self::Strong => "#22C55E",
            Self::VeryStrong => "#10B981",
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::GeneratorError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn digits_only_password_has_requested_shape() {
        let options = PasswordOptions {
            length: 10,
            classes: CharClasses {
                digits: true,
                ..CharClasses::none()
            },
        };
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let password = generate_password(&options, &mut rng).unwrap();
            assert_eq!(password.len(), 10);
            assert!(password.chars().all(|c| c.is_ascii_digit()), "{password}");
        }
    }

    #[test]
    fn symbols_come_from_the_password_set() {
        let options = PasswordOptions {
            length: 64,
            classes: CharClasses {
                symbols: true,
                ..CharClasses::none()
            },
        };
        let password = generate_password(&options, &mut StdRng::seed_from_u64(1)).unwrap();
        assert!(password.chars().all(|c| PASSWORD_SYMBOLS.contains(c)));
    }

    #[test]
    fn no_classes_reports_empty_alphabet() {
        let options = PasswordOptions {
            length: 8,
            classes: CharClasses::none(),
        };
        assert_eq!(
            generate_password(&options, &mut StdRng::seed_from_u64(0)),
            Err(GeneratorError::EmptyAlphabet)
        );
    }

    #[test]
    fn strength_adds_length_and_class_points() {
        assert_eq!(strength_score(""), 0);
        assert_eq!(strength_score("abc"), 1);
        assert_eq!(strength_score("abcdefgh"), 2);
        assert_eq!(strength_score("abcdefgh1234"), 4);
        assert_eq!(strength_score("Abcdefgh1234!xyz"), 5);
        assert_eq!(Strength::of("abc"), Some(Strength::VeryWeak));
        assert_eq!(Strength::of("Abcdefgh1234!xyz"), Some(Strength::VeryStrong));
        assert_eq!(Strength::of(""), None);
    }

    #[test]
    fn strength_colors_run_red_to_emerald() {
        assert_eq!(Strength::VeryWeak.color(), "#EF4444");
        assert_eq!(Strength::Moderate.color(), "#EAB308");
        assert_eq!(Strength::VeryStrong.color(), "#10B981");
    }
}
