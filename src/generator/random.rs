use chrono::{NaiveDate, TimeDelta};
use rand::seq::IndexedRandom;
use rand::Rng;

use super::alphabet::{CharClasses, STRING_SYMBOLS};
use super::error::{GeneratorError, GeneratorResult};
use super::password::draw;

const MAX_DECIMALS: usize = 10;
const MAX_COLOR: u32 = 0xFF_FFFF;

const FIRST_NAMES: &[&str] = &[
    "Anh", "Binh", "Cuong", "Dung", "Huong", "Lan", "Mai", "Nam", "Phuong", "Quang", "Thanh",
    "Tuan", "Viet", "Xuan", "Yen", "John", "Mary", "James", "Patricia", "Robert", "Jennifer",
    "Michael", "Linda", "William", "Elizabeth", "David", "Susan", "Richard", "Jessica", "Joseph",
];

const LAST_NAMES: &[&str] = &[
    "Nguyen", "Tran", "Le", "Pham", "Hoang", "Huynh", "Vu", "Bui", "Do", "Dang", "Dinh", "Trinh",
    "Vo", "Ngo", "Duong", "Smith", "Johnson", "Williams", "Jones", "Brown", "Davis", "Miller",
    "Wilson", "Taylor", "Clark", "Hall", "White", "Harris", "Martin", "Thompson",
];

#[derive(Debug, Clone, PartialEq)]
pub enum RandomRequest {
    /// Uniform in `[min, max)`, printed with `decimals` fraction digits.
    /// Reversed bounds are swapped.
    Number { min: f64, max: f64, decimals: usize },
    Text { length: usize, classes: CharClasses },
    Uuid,
    /// `#rrggbb`.
    Color,
    /// Uniform day between the bounds, inclusive.
    Date { start: NaiveDate, end: NaiveDate },
    Name {
        first: bool,
        last: bool,
        count: usize,
    },
}

pub fn generate<R: Rng + ?Sized>(request: &RandomRequest, rng: &mut R) -> GeneratorResult<String> {
    match request {
        RandomRequest::Number { min, max, decimals } => number(*min, *max, *decimals, rng),
        RandomRequest::Text { length, classes } => {
            let alphabet = classes.alphabet(STRING_SYMBOLS)?;
            Ok(draw(&alphabet, *length, rng))
        }
        RandomRequest::Uuid => Ok(uuid::Builder::from_random_bytes(rng.random())
            .into_uuid()
            .to_string()),
        RandomRequest::Color => Ok(format!("#{:06x}", rng.random_range(0..MAX_COLOR))),
        RandomRequest::Date { start, end } => Ok(date(*start, *end, rng)),
        RandomRequest::Name { first, last, count } => names(*first, *last, *count, rng),
    }
}

fn number<R: Rng + ?Sized>(min: f64, max: f64, decimals: usize, rng: &mut R) -> GeneratorResult<String> {
    let (low, high) = if min <= max { (min, max) } else { (max, min) };
    let span = high - low;
    if !low.is_finite() || !high.is_finite() || !span.is_finite() {
        return Err(GeneratorError::InvalidRange {
            min: min.to_string(),
            max: max.to_string(),
        });
    }
    let value = low + rng.random::<f64>() * span;
    Ok(format!("{value:.prec$}", prec = decimals.min(MAX_DECIMALS)))
}

fn date<R: Rng + ?Sized>(start: NaiveDate, end: NaiveDate, rng: &mut R) -> String {
    let (low, high) = if start <= end { (start, end) } else { (end, start) };
    let span = (high - low).num_days();
    let offset = rng.random_range(0..=span);
    low.checked_add_signed(TimeDelta::days(offset))
        .unwrap_or(high)
        .format("%Y-%m-%d")
        .to_string()
}

fn names<R: Rng + ?Sized>(first: bool, last: bool, count: usize, rng: &mut R) -> GeneratorResult<String> {
    if !first && !last {
        return Err(GeneratorError::NoNameParts);
    }
    let mut pick = |list: &[&'static str]| list.choose(rng).copied().unwrap_or_default();
    let generated: Vec<String> = (0..count.max(1))
        .map(|_| {
            let parts: Vec<&str> = [(first, FIRST_NAMES), (last, LAST_NAMES)]
                .into_iter()
                .filter(|(enabled, _)| *enabled)
                .map(|(_, list)| pick(list))
                .collect();
            parts.join(" ")
        })
        .collect();
    Ok(generated.join(", "))
}
