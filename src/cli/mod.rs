//! Command dispatch. Every command turns into an [`Output`]; printing and
//! clipboard handling happen in one place afterwards.

pub mod args;
mod pomodoro;

use std::io::Read;
use std::path::Path;

use crate::clipboard::ClipboardBackend;
use crate::color::{self, Notation};
use crate::config::AppConfig;
use crate::datetime::{resolve_zone, DateContext, OutputNotation, COMMON_ZONES};
use crate::error::AppResult;
use crate::file_convert;
use crate::generator::{self, CharClasses, RandomRequest, Strength};
use crate::imaging::{self, format_file_size, CompressOptions, ImagingError, RenderOptions};
use crate::json_format::{self, Layout};
use crate::regex_check::{self, MatchReport};
use crate::storage::StorageService;

pub use args::{Cli, ClassToggles, Commands, DateCommand, ImageCommand, RandomCommand};

/// What `--copy` puts on the clipboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Text(String),
    Bytes {
        bytes: Vec<u8>,
        mime_type: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    /// Printed to stdout.
    pub text: String,
    pub payload: Option<Payload>,
}

impl Output {
    /// Printed text that is also the copyable result.
    fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            payload: Some(Payload::Text(text.clone())),
            text,
        }
    }

    fn with_payload(text: impl Into<String>, payload: Payload) -> Self {
        Self {
            text: text.into(),
            payload: Some(payload),
        }
    }

    fn report(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            payload: None,
        }
    }
}

pub struct Runner<C: ClipboardBackend> {
    config: AppConfig,
    clipboard: C,
}

impl<C: ClipboardBackend> Runner<C> {
    pub fn new(config: AppConfig, clipboard: C) -> Self {
        Self { config, clipboard }
    }

    pub fn execute(&self, cli: &Cli) -> AppResult<Output> {
        let output = self.dispatch(&cli.command)?;
        if cli.copy {
            self.copy(&output)?;
        }
        Ok(output)
    }

    fn copy(&self, output: &Output) -> AppResult<()> {
        match &output.payload {
            Some(Payload::Text(text)) => self.clipboard.copy_text(text)?,
            Some(Payload::Bytes { bytes, mime_type }) => {
                self.clipboard.copy_bytes(bytes, mime_type)?
            }
            None => tracing::warn!("this command has nothing to copy"),
        }
        Ok(())
    }

    fn dispatch(&self, command: &Commands) -> AppResult<Output> {
        tracing::debug!(?command, "dispatching command");
        match command {
            Commands::Color { value, from, to } => color_command(value, *from, *to),
            Commands::Date(command) => self.date(command),
            Commands::Image(command) => self.image(command),
            Commands::Password { length, classes } => self.password(*length, *classes),
            Commands::Random(command) => random_command(command),
            Commands::Json {
                input,
                indent,
                minify,
            } => {
                let text = read_input(input.as_deref())?;
                let layout = if *minify {
                    Layout::Minified
                } else {
                    Layout::Pretty(indent.unwrap_or(self.config.json.indent))
                };
                Ok(Output::plain(json_format::format(&text, layout)?))
            }
            Commands::Regex {
                pattern,
                text,
                flags,
            } => {
                let report = regex_check::check(pattern, *flags, text)?;
                Ok(Output::plain(describe_matches(&report)))
            }
            Commands::File { conversion, input } => {
                let converted = file_convert::convert_file(*conversion, input)?;
                let path = self
                    .storage()?
                    .save_output(&converted.name, converted.contents.as_bytes())?;
                Ok(Output::with_payload(
                    format!("saved {}", path.display()),
                    Payload::Text(converted.contents),
                ))
            }
            Commands::Pomodoro(args) => pomodoro::run(args, self.config.pomodoro),
        }
    }

    fn storage(&self) -> AppResult<StorageService> {
        Ok(StorageService::with_default_paths(
            self.config.output_dir.as_deref(),
        )?)
    }

    fn date_context(&self, zone: Option<&str>) -> AppResult<DateContext> {
        let zone = resolve_zone(zone.unwrap_or(&self.config.datetime.zone))?;
        Ok(DateContext::current(zone))
    }

    fn date(&self, command: &DateCommand) -> AppResult<Output> {
        match command {
            DateCommand::Convert {
                input,
                from,
                to,
                template,
                zone,
            } => {
                let context = self.date_context(zone.as_deref())?;
                let to = match template {
                    Some(template) => OutputNotation::Custom(template.clone()),
                    None => to.clone(),
                };
                Ok(Output::plain(context.convert(input, *from, &to)?))
            }
            DateCommand::Shift {
                base,
                amount,
                unit,
                to,
                zone,
            } => {
                let context = self.date_context(zone.as_deref())?;
                let shifted = context.shift(base, *amount, *unit)?;
                Ok(Output::plain(context.format(shifted, to)))
            }
            DateCommand::Diff { start, end, zone } => {
                let context = self.date_context(zone.as_deref())?;
                let difference = context.difference(start, end)?;
                Ok(Output::with_payload(
                    format!("{difference}\n{} ms in total", difference.total_ms),
                    Payload::Text(difference.to_string()),
                ))
            }
            DateCommand::Zone {
                input,
                targets,
                from,
            } => {
                let context = self.date_context(from.as_deref())?;
                if let [target] = targets.as_slice() {
                    return Ok(Output::plain(context.convert_zone(input, target)?));
                }
                let zones: Vec<&str> = if targets.is_empty() {
                    COMMON_ZONES.iter().map(|(zone, _)| *zone).collect()
                } else {
                    targets.iter().map(String::as_str).collect()
                };
                let lines = zones
                    .into_iter()
                    .map(|zone| -> AppResult<String> {
                        Ok(format!("{zone:<20} {}", context.convert_zone(input, zone)?))
                    })
                    .collect::<AppResult<Vec<_>>>()?;
                Ok(Output::plain(lines.join("\n")))
            }
        }
    }

    fn image(&self, command: &ImageCommand) -> AppResult<Output> {
        match command {
            ImageCommand::Convert {
                input,
                format,
                quality,
                resize,
                filter,
            } => {
                let bytes = read_image(input)?;
                let original = bytes.len() as u64;
                let options = RenderOptions {
                    format: *format,
                    quality: quality.unwrap_or(self.config.image.quality),
                    resize: *resize,
                    filter: *filter,
                };
                let encoded = imaging::convert(bytes, None, options)?;
                let name = encoded.file_name(&display_name(input));
                let path = self.storage()?.save_output(&name, &encoded.bytes)?;
                let text = format!(
                    "saved {} ({}x{}, {} -> {})",
                    path.display(),
                    encoded.size.width,
                    encoded.size.height,
                    format_file_size(original),
                    format_file_size(encoded.bytes.len() as u64),
                );
                let mime_type = encoded.mime_type();
                Ok(Output::with_payload(
                    text,
                    Payload::Bytes {
                        bytes: encoded.bytes,
                        mime_type,
                    },
                ))
            }
            ImageCommand::Compress {
                inputs,
                max_bytes,
                max_dimension,
            } => {
                let options = CompressOptions {
                    max_bytes: *max_bytes,
                    max_dimension: *max_dimension,
                };
                let storage = self.storage()?;
                let mut lines = Vec::with_capacity(inputs.len());
                for input in inputs {
                    let decoded = imaging::decode_file(input)?;
                    let compressed = imaging::compress(&decoded, &options)?;
                    let name = compressed.file_name(&display_name(input));
                    let path = storage.save_output(&name, &compressed.bytes)?;
                    lines.push(format!(
                        "{}: {} -> {} ({}% saved, quality {})",
                        path.display(),
                        format_file_size(compressed.original_bytes),
                        format_file_size(compressed.compressed_bytes()),
                        compressed.savings_percent(),
                        compressed.quality,
                    ));
                }
                Ok(Output::report(lines.join("\n")))
            }
        }
    }

    fn password(&self, length: Option<usize>, toggles: ClassToggles) -> AppResult<Output> {
        let mut options = self.config.password.options();
        if let Some(length) = length {
            options.length = length;
        }
        options.classes = toggles.apply(options.classes);

        let password = generator::generate_password(&options, &mut generator::default_rng())?;
        let strength = Strength::of(&password)
            .map(|strength| strength.label())
            .unwrap_or("none");
        Ok(Output::with_payload(
            format!("{password}\nstrength: {strength}"),
            Payload::Text(password),
        ))
    }
}

impl ClassToggles {
    /// Clears every class switched off on the command line.
    pub fn apply(self, classes: CharClasses) -> CharClasses {
        CharClasses {
            uppercase: classes.uppercase && !self.no_uppercase,
            lowercase: classes.lowercase && !self.no_lowercase,
            digits: classes.digits && !self.no_digits,
            symbols: classes.symbols && !self.no_symbols,
        }
    }
}

fn color_command(value: &str, from: Notation, to: Option<Notation>) -> AppResult<Output> {
    let values = color::convert(value, from)?;
    let text = match to {
        Some(notation) => values.render(notation),
        None => Notation::ALL
            .into_iter()
            .map(|notation| format!("{:<5} {}", notation.name(), values.render(notation)))
            .collect::<Vec<_>>()
            .join("\n"),
    };
    Ok(Output::plain(text))
}

fn random_command(command: &RandomCommand) -> AppResult<Output> {
    let request = match command {
        RandomCommand::Number { min, max, decimals } => RandomRequest::Number {
            min: *min,
            max: *max,
            decimals: *decimals,
        },
        RandomCommand::String {
            length,
            no_uppercase,
            no_lowercase,
            no_digits,
            symbols,
        } => RandomRequest::Text {
            length: *length,
            classes: CharClasses {
                uppercase: !no_uppercase,
                lowercase: !no_lowercase,
                digits: !no_digits,
                symbols: *symbols,
            },
        },
        RandomCommand::Uuid => RandomRequest::Uuid,
        RandomCommand::Color => RandomRequest::Color,
        RandomCommand::Date { start, end } => RandomRequest::Date {
            start: *start,
            end: *end,
        },
        RandomCommand::Name {
            count,
            no_first,
            no_last,
        } => RandomRequest::Name {
            first: !no_first,
            last: !no_last,
            count: *count,
        },
    };
    let value = generator::generate(&request, &mut generator::default_rng())?;
    Ok(Output::plain(value))
}

fn describe_matches(report: &MatchReport) -> String {
    if report.is_empty() {
        return "No matches found".to_string();
    }
    let noun = if report.matches.len() == 1 { "match" } else { "matches" };
    let mut lines = vec![format!("{} {noun}", report.matches.len())];
    for (number, found) in report.matches.iter().enumerate() {
        lines.push(format!(
            "Match {}: {:?} at position {}",
            number + 1,
            found.text,
            found.index
        ));
        for group in &found.groups {
            let value = group.value.as_deref().unwrap_or("(unmatched)");
            lines.push(format!("  {}: {value}", group.name));
        }
    }
    lines.push(report.highlighted.clone());
    lines.join("\n")
}

fn read_input(path: Option<&Path>) -> AppResult<String> {
    match path {
        Some(path) if path != Path::new("-") => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn read_image(path: &Path) -> AppResult<Vec<u8>> {
    std::fs::read(path).map_err(|source| {
        ImagingError::ReadFile {
            path: path.to_path_buf(),
            source,
        }
        .into()
    })
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::ClipboardResult;
    use crate::error::ErrorKind;
    use clap::Parser;
    use std::cell::RefCell;
    use std::path::PathBuf;

    #[derive(Default)]
    struct RecordingClipboard {
        copied: RefCell<Vec<(Vec<u8>, String)>>,
    }

    impl ClipboardBackend for RecordingClipboard {
        fn copy_bytes(&self, bytes: &[u8], mime_type: &str) -> ClipboardResult<()> {
            self.copied
                .borrow_mut()
                .push((bytes.to_vec(), mime_type.to_string()));
            Ok(())
        }
    }

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("toolhub-cli-{tag}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn runner_with_output(dir: Option<PathBuf>) -> Runner<RecordingClipboard> {
        let config = AppConfig {
            output_dir: dir,
            ..AppConfig::default()
        };
        Runner::new(config, RecordingClipboard::default())
    }

    fn run(runner: &Runner<RecordingClipboard>, args: &[&str]) -> AppResult<Output> {
        let mut argv = vec!["toolhub"];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).expect("arguments parse");
        runner.execute(&cli)
    }

    #[test]
    fn color_lists_every_notation() {
        let output = run(&runner_with_output(None), &["color", "#3b82f6"]).unwrap();
        assert_eq!(
            output.text,
            "hex   #3B82F6\nrgb   rgb(59, 130, 246)\nhsl   hsl(217, 91%, 60%)\ncmyk  cmyk(76%, 47%, 0%, 4%)\nhsv   hsv(217, 76%, 96%)"
        );
    }

    #[test]
    fn copy_flag_puts_selected_notation_on_clipboard() {
        let runner = runner_with_output(None);
        let output = run(&runner, &["color", "59,130,246", "--from", "rgb", "--to", "hex", "--copy"])
            .unwrap();
        assert_eq!(output.text, "#3B82F6");
        let copied = runner.clipboard.copied.borrow();
        assert_eq!(copied.len(), 1);
        assert_eq!(copied[0].0, b"#3B82F6".to_vec());
    }

    #[test]
    fn password_without_classes_is_an_empty_alphabet() {
        let err = run(
            &runner_with_output(None),
            &[
                "password",
                "--no-uppercase",
                "--no-lowercase",
                "--no-digits",
                "--no-symbols",
            ],
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyAlphabet);
    }

    #[test]
    fn password_copy_excludes_strength_line() {
        let runner = runner_with_output(None);
        let output = run(&runner, &["password", "-l", "12", "--copy"]).unwrap();
        let (password, strength) = output.text.split_once('\n').unwrap();
        assert_eq!(password.chars().count(), 12);
        assert!(strength.starts_with("strength: "));
        assert_eq!(runner.clipboard.copied.borrow()[0].0, password.as_bytes());
    }

    #[test]
    fn random_uuid_and_digits_only_string() {
        let runner = runner_with_output(None);
        let uuid = run(&runner, &["random", "uuid"]).unwrap();
        assert_eq!(uuid.text.len(), 36);

        let digits = run(
            &runner,
            &["random", "string", "-l", "10", "--no-uppercase", "--no-lowercase"],
        )
        .unwrap();
        assert_eq!(digits.text.len(), 10);
        assert!(digits.text.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn regex_report_lists_matches_and_highlight() {
        let output = run(&runner_with_output(None), &["regex", r"\d+", "a1b22c333"]).unwrap();
        let lines: Vec<&str> = output.text.lines().collect();
        assert_eq!(lines[0], "3 matches");
        assert_eq!(lines[1], "Match 1: \"1\" at position 1");
        assert_eq!(lines[3], "Match 3: \"333\" at position 6");
        assert_eq!(lines[4], "a<mark>1</mark>b<mark>22</mark>c<mark>333</mark>");
    }

    #[test]
    fn date_diff_and_convert_use_requested_zone() {
        let runner = runner_with_output(None);
        let diff = run(
            &runner,
            &["date", "diff", "2023-01-01T00:00:00Z", "2023-01-02T01:01:01Z"],
        )
        .unwrap();
        assert!(diff.text.starts_with("1 days, 1 hours, 1 minutes, 1 seconds"));

        let converted = run(
            &runner,
            &[
                "date",
                "convert",
                "2023-04-15T12:30:45Z",
                "--template",
                "YYYY-MM-DD HH:mm",
                "--zone",
                "Asia/Tokyo",
            ],
        )
        .unwrap();
        assert_eq!(converted.text, "2023-04-15 21:30");

        let err = run(&runner, &["date", "diff", "now-ish", "2023-01-01"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDate);
    }

    #[test]
    fn json_reads_file_and_minifies() {
        let dir = scratch_dir("json");
        let path = dir.join("input.json");
        std::fs::write(&path, "{ \"a\": 1, \"b\": [1, 2] }").unwrap();
        let output = run(
            &runner_with_output(None),
            &["json", path.to_str().unwrap(), "--minify"],
        )
        .unwrap();
        std::fs::remove_dir_all(&dir).unwrap();
        assert_eq!(output.text, r#"{"a":1,"b":[1,2]}"#);
    }

    #[test]
    fn file_conversion_is_saved_to_output_dir() {
        let dir = scratch_dir("file");
        let input = dir.join("people.csv");
        std::fs::write(&input, "name,age\nAda,36\n").unwrap();
        let out_dir = dir.join("out");
        let runner = runner_with_output(Some(out_dir.clone()));

        let output = run(&runner, &["file", "csv-to-json", input.to_str().unwrap()]).unwrap();
        let saved = std::fs::read_to_string(out_dir.join("people.json")).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        assert!(output.text.starts_with("saved "));
        let value: serde_json::Value = serde_json::from_str(&saved).unwrap();
        assert_eq!(value, serde_json::json!([{"name": "Ada", "age": "36"}]));
    }

    #[test]
    fn image_convert_writes_target_format() {
        let dir = scratch_dir("image");
        let input = dir.join("square.png");
        image::RgbaImage::from_pixel(20, 10, image::Rgba([200, 10, 10, 255]))
            .save(&input)
            .unwrap();
        let out_dir = dir.join("out");
        let runner = runner_with_output(Some(out_dir.clone()));

        let output = run(
            &runner,
            &[
                "image",
                "convert",
                input.to_str().unwrap(),
                "--format",
                "jpeg",
                "--resize",
                "10x0",
                "--copy",
            ],
        )
        .unwrap();
        let saved = std::fs::read(out_dir.join("square.jpg")).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        assert!(output.text.contains("10x5"), "{}", output.text);
        assert_eq!(image::guess_format(&saved).unwrap(), image::ImageFormat::Jpeg);
        let copied = runner.clipboard.copied.borrow();
        assert_eq!(copied[0].1, "image/jpeg");
        assert_eq!(copied[0].0, saved);
    }
}
