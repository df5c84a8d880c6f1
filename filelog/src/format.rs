use std::borrow::Cow;
use std::fmt::Write as _;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};

use crate::context::{context_to_string, indent, Context, INDENT};
use crate::error::{LoggerError, Result};
use crate::level::Level;
use crate::options::LoggerOptions;

const LEVEL_COLUMN: usize = 9;

// Checked up front so rendering a timestamp never fails later.
pub fn validate_date_format(pattern: &str) -> Result<()> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(LoggerError::InvalidDateFormat(pattern.to_owned()));
    }
    Ok(())
}

pub fn timestamp(pattern: &str, now: &DateTime<Local>) -> String {
    let mut out = String::new();
    let _ = write!(out, "{}", now.format(pattern));
    out
}

/// Builds the exact bytes written for one record, line terminator included.
pub fn format_record(
    options: &LoggerOptions,
    level: Level,
    message: &str,
    context: &Context,
    now: &DateTime<Local>,
) -> String {
    let date = timestamp(&options.date_format, now);

    let mut line = match options.log_format.as_deref() {
        Some(template) => {
            let fields = Fields {
                date: &date,
                level,
                message,
                context,
            };
            render_template(template, &fields)
        }
        None => format!("[{date}] [{level}] {message}"),
    };

    if options.append_context && !context.is_empty() {
        line.push('\n');
        line.push_str(&indent(&context_to_string(context), INDENT));
    }

    line.push('\n');
    line
}

struct Fields<'a> {
    date: &'a str,
    level: Level,
    message: &'a str,
    context: &'a Context,
}

impl Fields<'_> {
    fn lookup(&self, name: &str) -> Option<Cow<'_, str>> {
        let value = match name {
            "date" => Cow::Borrowed(self.date),
            "level" => Cow::Owned(self.level.as_str().to_uppercase()),
            "level-padding" => {
                let width = LEVEL_COLUMN.saturating_sub(self.level.as_str().len());
                Cow::Owned(" ".repeat(width))
            }
            "priority" => Cow::Owned(self.level.priority().to_string()),
            "message" => Cow::Borrowed(self.message),
            "context" => Cow::Owned(serde_json::to_string(self.context).unwrap_or_default()),
            _ => return None,
        };
        Some(value)
    }
}

// Single pass over the template. Substituted values are copied out and never
// scanned again, so a message containing `{date}` stays literal.
fn render_template(template: &str, fields: &Fields<'_>) -> String {
    let mut out = String::with_capacity(template.len() + fields.message.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open + 1..];

        let substituted = tail
            .find('}')
            .and_then(|close| fields.lookup(&tail[..close]).map(|value| (close, value)));

        match substituted {
            Some((close, value)) => {
                out.push_str(&value);
                rest = &tail[close + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }

    out.push_str(rest);
    out
}
