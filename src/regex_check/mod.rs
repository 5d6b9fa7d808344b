use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use regex::{Regex, RegexBuilder};
use thiserror::Error;

pub const MARK_OPEN: &str = "<mark>";
pub const MARK_CLOSE: &str = "</mark>";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegexCheckError {
    #[error("{message}")]
    PatternError { message: String },
    #[error("unknown regex flag {flag:?}, expected some of gimsuy")]
    UnknownFlag { flag: char },
}

pub type RegexCheckResult<T> = std::result::Result<T, RegexCheckError>;

/// `g`, `m`, `i`, `u`, `y`, `s`. Defaults to global only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flags {
    pub global: bool,
    pub multiline: bool,
    pub case_insensitive: bool,
    /// Accepted for compatibility; matching is always Unicode-aware.
    pub unicode: bool,
    pub sticky: bool,
    pub dot_all: bool,
}

impl Default for Flags {
    fn default() -> Self {
        Self {
            global: true,
            ..Self::none()
        }
    }
}

impl Flags {
    pub const fn none() -> Self {
        Self {
            global: false,
            multiline: false,
            case_insensitive: false,
            unicode: false,
            sticky: false,
            dot_all: false,
        }
    }
}

impl FromStr for Flags {
    type Err = RegexCheckError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut flags = Self::none();
        for flag in value.chars() {
            match flag {
                'g' => flags.global = true,
                'm' => flags.multiline = true,
                'i' => flags.case_insensitive = true,
                'u' => flags.unicode = true,
                'y' => flags.sticky = true,
                's' => flags.dot_all = true,
                other => return Err(RegexCheckError::UnknownFlag { flag: other }),
            }
        }
        Ok(flags)
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letters = [
            (self.global, 'g'),
            (self.case_insensitive, 'i'),
            (self.multiline, 'm'),
            (self.dot_all, 's'),
            (self.unicode, 'u'),
            (self.sticky, 'y'),
        ];
        for (_, letter) in letters.into_iter().filter(|(enabled, _)| *enabled) {
            write!(f, "{letter}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedGroup {
    pub name: String,
    /// `None` when the group did not take part in the match.
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegexMatch {
    pub text: String,
    /// Offset in characters from the start of the input.
    pub index: usize,
    pub bytes: Range<usize>,
    pub groups: Vec<NamedGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchReport {
    pub matches: Vec<RegexMatch>,
    pub highlighted: String,
}

impl MatchReport {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    fn unmatched(text: &str) -> Self {
        Self {
            matches: Vec::new(),
            highlighted: text.to_string(),
        }
    }
}

pub fn compile(pattern: &str, flags: Flags) -> RegexCheckResult<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(flags.case_insensitive)
        .multi_line(flags.multiline)
        .dot_matches_new_line(flags.dot_all)
        .build()
        .map_err(|err| RegexCheckError::PatternError {
            message: err.to_string(),
        })
}

/// Runs `pattern` over `text`. Without the global flag only the first match
/// is reported; with the sticky flag matches must follow one another from
/// the start of the input.
pub fn check(pattern: &str, flags: Flags, text: &str) -> RegexCheckResult<MatchReport> {
    if pattern.is_empty() || text.is_empty() {
        return Ok(MatchReport::unmatched(text));
    }
    let regex = compile(pattern, flags)?;
    let names: Vec<(usize, &str)> = regex
        .capture_names()
        .enumerate()
        .filter_map(|(slot, name)| name.map(|name| (slot, name)))
        .collect();

    let mut matches = Vec::new();
    let mut expected_start = 0;
    for captures in regex.captures_iter(text) {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        if flags.sticky && whole.start() != expected_start {
            break;
        }
        expected_start = whole.end();

        let groups = names
            .iter()
            .map(|(slot, name)| NamedGroup {
                name: (*name).to_string(),
                value: captures.get(*slot).map(|group| group.as_str().to_string()),
            })
            .collect();
        matches.push(RegexMatch {
            text: whole.as_str().to_string(),
            index: text[..whole.start()].chars().count(),
            bytes: whole.range(),
            groups,
        });
        if !flags.global {
            break;
        }
    }

    tracing::debug!(pattern, %flags, matches = matches.len(), "regex checked");
    let highlighted = highlight(text, &matches);
    Ok(MatchReport {
        matches,
        highlighted,
    })
}

/// Wraps each match in [`MARK_OPEN`]/[`MARK_CLOSE`], splicing from the last
/// match backwards so earlier byte offsets stay valid.
pub fn highlight(text: &str, matches: &[RegexMatch]) -> String {
    let mut ordered: Vec<&RegexMatch> = matches.iter().collect();
    ordered.sort_by(|a, b| b.bytes.start.cmp(&a.bytes.start));

    let mut output = text.to_string();
    for found in ordered {
        let marked = format!("{MARK_OPEN}{}{MARK_CLOSE}", found.text);
        output.replace_range(found.bytes.clone(), &marked);
    }
    output
}
