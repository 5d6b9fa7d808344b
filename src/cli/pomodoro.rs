use std::io::Write;

use crate::error::AppResult;
use crate::pomodoro::{
    format_clock, DesktopNotifier, Phase, PomodoroEvent, PomodoroSettings, PomodoroTimer, Status,
    ThreadTickSource,
};

use super::args::PomodoroArgs;
use super::Output;

pub(super) fn settings_for(args: &PomodoroArgs, defaults: PomodoroSettings) -> PomodoroSettings {
    PomodoroSettings {
        work_minutes: args.work.unwrap_or(defaults.work_minutes),
        short_break_minutes: args.short_break.unwrap_or(defaults.short_break_minutes),
        long_break_minutes: args.long_break.unwrap_or(defaults.long_break_minutes),
        long_break_interval: args.interval.unwrap_or(defaults.long_break_interval),
        notifications: defaults.notifications && !args.quiet,
        ..defaults
    }
}

/// Counts down in the terminal until `args.sessions` work sessions are done.
/// Phases that would wait for a manual start are started right away.
pub(super) fn run(args: &PomodoroArgs, defaults: PomodoroSettings) -> AppResult<Output> {
    let (source, ticks) = ThreadTickSource::channel();
    let mut timer = PomodoroTimer::new(settings_for(args, defaults), source, DesktopNotifier)?;
    if args.phase != Phase::Work {
        timer.transition(PomodoroEvent::Select(args.phase))?;
    }

    let mut stderr = std::io::stderr();
    while timer.completed_work_sessions() < args.sessions {
        if timer.status() == Status::Idle {
            tracing::info!(phase = %timer.phase(), "starting phase");
            timer.transition(PomodoroEvent::Start)?;
        }
        let Ok(tick) = ticks.recv() else {
            break;
        };
        if timer.deliver(tick)?.is_none() {
            continue;
        }
        let _ = write!(
            stderr,
            "\r{:<12} {}  {:>3.0}%",
            timer.phase().label(),
            timer.display(),
            timer.progress_percent()
        );
        let _ = stderr.flush();
    }
    let _ = writeln!(stderr);

    Ok(Output::report(format!(
        "{} work sessions completed, {} focused",
        timer.completed_work_sessions(),
        format_clock(timer.total_work_secs())
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use crate::cli::Commands;
    use clap::Parser;

    fn parse(args: &[&str]) -> PomodoroArgs {
        let mut argv = vec!["toolhub", "pomodoro"];
        argv.extend_from_slice(args);
        match Cli::try_parse_from(argv).expect("arguments parse").command {
            Commands::Pomodoro(args) => args,
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn flags_override_configured_settings() {
        let defaults = PomodoroSettings {
            long_break_minutes: 20,
            ..PomodoroSettings::default()
        };
        let settings = settings_for(&parse(&["--work", "50", "--interval", "2", "--quiet"]), defaults);
        assert_eq!(settings.work_minutes, 50);
        assert_eq!(settings.long_break_interval, 2);
        assert_eq!(settings.long_break_minutes, 20);
        assert!(!settings.notifications);
        assert!(settings.auto_start_breaks);
    }

    #[test]
    fn zero_sessions_finish_immediately() {
        let output = run(&parse(&["--sessions", "0", "--quiet"]), PomodoroSettings::default()).unwrap();
        assert_eq!(output.text, "0 work sessions completed, 00:00 focused");
    }
}
