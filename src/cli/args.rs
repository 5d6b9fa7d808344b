use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::color::Notation;
use crate::datetime::{InputNotation, OutputNotation, Unit};
use crate::file_convert::Conversion;
use crate::imaging::{PixelFilter, ResizeOption, TargetFormat};
use crate::pomodoro::Phase;
use crate::regex_check::Flags;

/// Everyday conversion and generator utilities
#[derive(Parser, Debug, Clone)]
#[command(name = "toolhub", version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Log debug output (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also put the result on the clipboard
    #[arg(short, long, global = true)]
    pub copy: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Convert a color between hex, rgb, hsl, cmyk and hsv
    Color {
        /// Color literal, e.g. "#3B82F6" or "rgb(59, 130, 246)"
        value: String,

        /// Notation of the input
        #[arg(short, long, default_value = "hex")]
        from: Notation,

        /// Print only this notation
        #[arg(short, long)]
        to: Option<Notation>,
    },

    /// Parse, format and calculate with dates
    #[command(subcommand)]
    Date(DateCommand),

    /// Re-encode or compress images
    #[command(subcommand)]
    Image(ImageCommand),

    /// Generate a password and rate its strength
    Password {
        /// Number of characters (default from config, else 16)
        #[arg(short, long)]
        length: Option<usize>,

        #[command(flatten)]
        classes: ClassToggles,
    },

    /// Generate random values
    #[command(subcommand)]
    Random(RandomCommand),

    /// Pretty-print or minify JSON
    Json {
        /// Input file; stdin when omitted or "-"
        #[arg(value_hint = clap::ValueHint::FilePath)]
        input: Option<PathBuf>,

        /// Indent width (default from config, else 2); 0 minifies
        #[arg(short, long, conflicts_with = "minify")]
        indent: Option<usize>,

        /// Strip all insignificant whitespace
        #[arg(short, long)]
        minify: bool,
    },

    /// Test a regular expression against some text
    Regex {
        pattern: String,

        text: String,

        /// Any of g, i, m, s, u, y
        #[arg(short, long, default_value = "g")]
        flags: Flags,
    },

    /// Convert between txt, json, csv and yaml files
    File {
        /// One of txt-to-json, json-to-csv, csv-to-json, json-to-yaml, yaml-to-json
        conversion: Conversion,

        #[arg(value_hint = clap::ValueHint::FilePath)]
        input: PathBuf,
    },

    /// Run a pomodoro countdown in the terminal
    Pomodoro(PomodoroArgs),
}

#[derive(Subcommand, Debug, Clone)]
pub enum DateCommand {
    /// Parse a date in one notation and print it in another
    Convert {
        input: String,

        #[arg(short, long, default_value = "iso")]
        from: InputNotation,

        #[arg(short, long, default_value = "long")]
        to: OutputNotation,

        /// Custom output template with YYYY MM DD HH mm ss tokens; replaces --to
        #[arg(long, conflicts_with = "to")]
        template: Option<String>,

        /// Zone for wall-clock notations (default from config, else UTC)
        #[arg(short, long)]
        zone: Option<String>,
    },

    /// Add (or with a negative amount, subtract) a duration
    Shift {
        base: String,

        #[arg(allow_negative_numbers = true)]
        amount: i64,

        /// years, months, days, hours, minutes or seconds
        unit: Unit,

        #[arg(short, long, default_value = "long")]
        to: OutputNotation,

        #[arg(short, long)]
        zone: Option<String>,
    },

    /// Distance between two dates
    Diff {
        start: String,

        end: String,

        #[arg(short, long)]
        zone: Option<String>,
    },

    /// Show a date's wall-clock time in other zones
    Zone {
        input: String,

        /// Target zones; all quick-pick zones when omitted
        #[arg(short, long = "to", value_name = "ZONE")]
        targets: Vec<String>,

        /// Zone the input is written in
        #[arg(short, long)]
        from: Option<String>,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ImageCommand {
    /// Resize, filter and re-encode an image into the output directory
    Convert {
        #[arg(value_hint = clap::ValueHint::FilePath)]
        input: PathBuf,

        #[arg(short, long, default_value = "webp")]
        format: TargetFormat,

        /// 1-100, jpeg only (default from config, else 90)
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=100))]
        quality: Option<u8>,

        /// original, small, medium, large, WxH, or WxH! to ignore aspect
        #[arg(short, long, default_value = "original")]
        resize: ResizeOption,

        /// none, grayscale, sepia, invert or blur
        #[arg(long, default_value = "none")]
        filter: PixelFilter,
    },

    /// Shrink images to fit a size budget as JPEG
    Compress {
        #[arg(required = true, value_hint = clap::ValueHint::FilePath)]
        inputs: Vec<PathBuf>,

        /// Byte budget per image
        #[arg(long, default_value_t = crate::imaging::compress::DEFAULT_MAX_BYTES)]
        max_bytes: u64,

        /// Longest allowed side in pixels
        #[arg(long, default_value_t = crate::imaging::compress::DEFAULT_MAX_DIMENSION)]
        max_dimension: u32,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum RandomCommand {
    /// A number in a range
    Number {
        #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
        min: f64,

        #[arg(long, default_value_t = 100.0, allow_negative_numbers = true)]
        max: f64,

        #[arg(short, long, default_value_t = 0)]
        decimals: usize,
    },

    /// A string of random characters
    String {
        #[arg(short, long, default_value_t = 10)]
        length: usize,

        #[arg(long)]
        no_uppercase: bool,

        #[arg(long)]
        no_lowercase: bool,

        #[arg(long)]
        no_digits: bool,

        /// Allow symbols as well
        #[arg(short, long)]
        symbols: bool,
    },

    /// A version 4 UUID
    Uuid,

    /// A #rrggbb color
    Color,

    /// A day between two dates, inclusive
    Date {
        #[arg(long, default_value = "2000-01-01")]
        start: NaiveDate,

        #[arg(long, default_value = "2030-12-31")]
        end: NaiveDate,
    },

    /// Person names
    Name {
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,

        #[arg(long, conflicts_with = "no_last")]
        no_first: bool,

        #[arg(long)]
        no_last: bool,
    },
}

/// Character classes to leave out.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct ClassToggles {
    #[arg(long)]
    pub no_uppercase: bool,

    #[arg(long)]
    pub no_lowercase: bool,

    #[arg(long)]
    pub no_digits: bool,

    #[arg(long)]
    pub no_symbols: bool,
}

#[derive(Args, Debug, Clone)]
pub struct PomodoroArgs {
    /// Phase to begin with
    #[arg(short, long, default_value = "work")]
    pub phase: Phase,

    /// Stop after this many completed work sessions
    #[arg(short, long, default_value_t = 1)]
    pub sessions: u32,

    /// Work minutes (default from config, else 25)
    #[arg(long)]
    pub work: Option<u32>,

    #[arg(long)]
    pub short_break: Option<u32>,

    #[arg(long)]
    pub long_break: Option<u32>,

    /// Work sessions per long break
    #[arg(long)]
    pub interval: Option<u32>,

    /// Do not show desktop notifications
    #[arg(long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_tree_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_work_after_subcommands() {
        let cli = Cli::try_parse_from(["toolhub", "color", "#fff", "--copy", "-v"]).unwrap();
        assert!(cli.copy);
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Color {
                from: Notation::Hex,
                to: None,
                ..
            }
        ));
    }

    #[test]
    fn negative_shift_amounts_parse() {
        let cli =
            Cli::try_parse_from(["toolhub", "date", "shift", "2024-01-31", "-2", "days"]).unwrap();
        let Commands::Date(DateCommand::Shift { amount, unit, .. }) = cli.command else {
            panic!("expected date shift");
        };
        assert_eq!(amount, -2);
        assert_eq!(unit, Unit::Days);
    }

    #[test]
    fn bad_values_are_rejected_by_the_parser() {
        assert!(Cli::try_parse_from(["toolhub", "color", "x", "--from", "lab"]).is_err());
        assert!(Cli::try_parse_from(["toolhub", "regex", "a", "b", "--flags", "gq"]).is_err());
        assert!(Cli::try_parse_from(["toolhub", "image", "convert", "a.png", "-q", "0"]).is_err());
        assert!(Cli::try_parse_from(["toolhub", "file", "pdf-to-txt", "a.pdf"]).is_err());
    }

    #[test]
    fn template_stands_in_for_output_notation() {
        let cli = Cli::try_parse_from(["toolhub", "date", "convert", "now", "--template", "YYYY"]).unwrap();
        let Commands::Date(DateCommand::Convert { template, .. }) = cli.command else {
            panic!("expected date convert");
        };
        assert_eq!(template.as_deref(), Some("YYYY"));

        let both = ["toolhub", "date", "convert", "now", "--to", "unix", "--template", "YYYY"];
        assert!(Cli::try_parse_from(both).is_err());
    }
}
