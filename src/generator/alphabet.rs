use super::error::{GeneratorError, GeneratorResult};

pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const DIGITS: &str = "0123456789";
pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*()_+[]{}|;:,.<>?";
pub const STRING_SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?/";

/// Which character classes a generator may draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharClasses {
    pub uppercase: bool,
    pub lowercase: bool,
    pub digits: bool,
    pub symbols: bool,
}

impl Default for CharClasses {
    fn default() -> Self {
        Self {
            uppercase: true,
            lowercase: true,
            digits: true,
            symbols: true,
        }
    }
}

impl CharClasses {
    pub const fn none() -> Self {
        Self {
            uppercase: false,
            lowercase: false,
            digits: false,
            symbols: false,
        }
    }

    /// Concatenates the enabled classes in a fixed order.
    pub fn alphabet(self, symbols: &str) -> GeneratorResult<Vec<char>> {
        let alphabet: Vec<char> = [
            (self.uppercase, UPPERCASE),
            (self.lowercase, LOWERCASE),
            (self.digits, DIGITS),
            (self.symbols, symbols),
        ]
        .into_iter()
        .filter(|(enabled, _)| *enabled)
        .flat_map(|(_, set)| set.chars())
        .collect();

        if alphabet.is_empty() {
            return Err(GeneratorError::EmptyAlphabet);
        }
        Ok(alphabet)
    }
}
