pub mod alphabet;
pub mod error;
pub mod password;
pub mod random;

pub use alphabet::{CharClasses, PASSWORD_SYMBOLS, STRING_SYMBOLS};
pub use error::{GeneratorError, GeneratorResult};
pub use password::{generate_password, strength_score, PasswordOptions, Strength, DEFAULT_LENGTH};
pub use random::{generate, RandomRequest};

use rand::rngs::StdRng;
use rand::SeedableRng;

/// A fresh generator seeded from the thread-local source.
pub fn default_rng() -> StdRng {
    StdRng::from_rng(&mut rand::rng())
}
