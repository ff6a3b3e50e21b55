// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Custom event formatter for [`tracing`].
//!
//! Produces a two-line log entry: a colorized header (timestamp, span, level, message)
//! followed by wrapped key/value field lines. Colors are emitted as raw 24-bit SGR
//! sequences rather than through a styling abstraction, since this crate's only
//! dependents on color are the VT100 emulator's own color model, which a log formatter
//! has no business depending on.

use crate::{ColWidth, InlineString, RgbValue, inline_string, width};
use chrono::Local;
use std::fmt::{self, Write as _};
use textwrap::{Options, WordSeparator, wrap};
use tracing::{Event, Subscriber,
              field::{Field, Visit}};
use tracing_subscriber::{fmt::{FormatEvent, FormatFields},
                         registry::LookupSpan};

const SPACER: &str = " ";
const FIRST_LINE_PREFIX: &str = "  \u{2022} ";
const SUBSEQUENT_LINE_PREFIX: &str = "    ";
const DEFAULT_DISPLAY_WIDTH: usize = 100;

const BODY_FG_COLOR: RgbValue = RgbValue { red: 175, green: 175, blue: 175 };
const INFO_FG_COLOR: RgbValue = RgbValue { red: 233, green: 150, blue: 122 };
const ERROR_FG_COLOR: RgbValue = RgbValue { red: 255, green: 99, blue: 99 };
const WARN_FG_COLOR: RgbValue = RgbValue { red: 255, green: 140, blue: 0 };
const DEBUG_FG_COLOR: RgbValue = RgbValue { red: 255, green: 255, blue: 0 };
const TRACE_FG_COLOR: RgbValue = RgbValue { red: 186, green: 85, blue: 211 };

fn colorize(text: &str, color: RgbValue, bold: bool) -> InlineString {
    let sgr_bold = if bold { "1;" } else { "" };
    inline_string!(
        "\x1b[{sgr_bold}38;2;{r};{g};{b}m{text}\x1b[0m",
        r = color.red,
        g = color.green,
        b = color.blue
    )
}

fn level_sigil_and_color(level: tracing::Level) -> (&'static str, RgbValue) {
    match level {
        tracing::Level::ERROR => ("E", ERROR_FG_COLOR),
        tracing::Level::WARN => ("W", WARN_FG_COLOR),
        tracing::Level::INFO => ("I", INFO_FG_COLOR),
        tracing::Level::DEBUG => ("D", DEBUG_FG_COLOR),
        tracing::Level::TRACE => ("T", TRACE_FG_COLOR),
    }
}

/// Marker struct registered with `tracing_subscriber` via `.event_format(..)`.
#[derive(Debug, Default)]
pub struct CustomEventFormatter;

impl<S, N> FormatEvent<S, N> for CustomEventFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut f: tracing_subscriber::fmt::format::Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let timestamp = Local::now().format("%I:%M%P");
        write!(f, "{timestamp}{SPACER}")?;

        if let Some(scope) = ctx.lookup_current() {
            write!(f, "[{}]{SPACER}", scope.name())?;
        }

        let (sigil, color) = level_sigil_and_color(*event.metadata().level());
        write!(f, "{}{SPACER}", colorize(&inline_string!("{sigil}:"), color, true))?;

        let mut fields = CollectFields::default();
        event.record(&mut fields);

        if let Some(message) = &fields.message {
            writeln!(f, "{message}")?;
        } else {
            writeln!(f)?;
        }

        let max_width = width(DEFAULT_DISPLAY_WIDTH);
        let wrap_opts = Options::new(max_width.as_usize())
            .initial_indent(FIRST_LINE_PREFIX)
            .subsequent_indent(SUBSEQUENT_LINE_PREFIX)
            .word_separator(WordSeparator::UnicodeBreakProperties);

        for (name, value) in &fields.kv {
            if value.is_empty() {
                continue;
            }
            let line = inline_string!("{name} = {value}");
            for wrapped_line in wrap(&line, &wrap_opts) {
                writeln!(f, "{}", colorize(&wrapped_line, BODY_FG_COLOR, false))?;
            }
        }

        writeln!(f, "{}", separator_line(max_width))
    }
}

fn separator_line(max_width: ColWidth) -> InlineString {
    let mut acc = InlineString::new();
    for _ in 0..max_width.as_usize() {
        acc.push('-');
    }
    acc
}

/// Pulls the special `message` field out as the header text; everything else becomes a
/// key/value body line.
#[derive(Debug, Default)]
struct CollectFields {
    message: Option<InlineString>,
    kv: Vec<(InlineString, InlineString)>,
}

impl Visit for CollectFields {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let value_str = inline_string!("{value:?}");
        if field.name() == "message" {
            self.message = Some(value_str);
        } else {
            self.kv.push((field.name().into(), value_str));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.into());
        } else {
            self.kv.push((field.name().into(), value.into()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::{info, subscriber::set_default};
    use tracing_subscriber::fmt::SubscriberBuilder;

    #[test]
    fn test_custom_formatter_message_and_fields() {
        let subscriber = SubscriberBuilder::default()
            .event_format(CustomEventFormatter)
            .with_writer(std::io::sink)
            .finish();

        let _drop_guard = set_default(subscriber);
        info!(message = "started up", "port" = 8080);
    }

    #[test]
    fn test_colorize_wraps_in_sgr_reset() {
        let out = colorize("hi", RgbValue { red: 1, green: 2, blue: 3 }, false);
        assert!(out.starts_with("\x1b[38;2;1;2;3m"));
        assert!(out.ends_with("\x1b[0m"));
    }
}
