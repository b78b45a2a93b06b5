//! Custom date patterns for `{today:...}`, `{now:...}` and `{file:...}`.
//!
//! Patterns use the familiar custom tokens: `yyyy yy MMMM MMM MM M dddd ddd
//! dd d HH H hh h mm m ss s fff ff f tt t`. Text in single or double quotes
//! is copied verbatim, as is a character escaped with `\`. Every other
//! character is a literal.

use chrono::{Datelike, NaiveDateTime, NaiveTime, Timelike};

/// `yyyy-MM-dd` at midnight, `yyyy-MM-dd HH:mm:ss` otherwise
pub fn default_date_string(dt: &NaiveDateTime) -> String {
    if dt.time() == NaiveTime::MIN {
        dt.format("%Y-%m-%d").to_string()
    } else {
        dt.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Render a date, using the default layout when `spec` is empty
pub fn format_date_value(dt: &NaiveDateTime, spec: &str) -> String {
    if spec.is_empty() {
        default_date_string(dt)
    } else {
        format_date(dt, spec)
    }
}

/// Render `dt` with a custom pattern
pub fn format_date(dt: &NaiveDateTime, pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut pos = 0;

    while pos < chars.len() {
        let c = chars[pos];
        match c {
            '\'' | '"' => {
                pos += 1;
                while pos < chars.len() && chars[pos] != c {
                    out.push(chars[pos]);
                    pos += 1;
                }
                // closing quote
                pos += 1;
            }
            '\\' => {
                if let Some(&next) = chars.get(pos + 1) {
                    out.push(next);
                }
                pos += 2;
            }
            'y' | 'M' | 'd' | 'H' | 'h' | 'm' | 's' | 'f' | 't' => {
                let run = chars[pos..].iter().take_while(|&&x| x == c).count();
                push_field(&mut out, dt, c, run);
                pos += run;
            }
            other => {
                out.push(other);
                pos += 1;
            }
        }
    }

    out
}

fn push_field(out: &mut String, dt: &NaiveDateTime, field: char, run: usize) {
    let rendered = match field {
        'y' => match run {
            1 => (dt.year() % 100).to_string(),
            2 => format!("{:02}", dt.year() % 100),
            n => format!("{:0width$}", dt.year(), width = n),
        },
        'M' => match run {
            1 => dt.month().to_string(),
            2 => format!("{:02}", dt.month()),
            3 => dt.format("%b").to_string(),
            _ => dt.format("%B").to_string(),
        },
        'd' => match run {
            1 => dt.day().to_string(),
            2 => format!("{:02}", dt.day()),
            3 => dt.format("%a").to_string(),
            _ => dt.format("%A").to_string(),
        },
        'H' => two_digit(dt.hour(), run),
        'h' => {
            let hour = match dt.hour() % 12 {
                0 => 12,
                h => h,
            };
            two_digit(hour, run)
        }
        'm' => two_digit(dt.minute(), run),
        's' => two_digit(dt.second(), run),
        'f' => {
            let digits = run.min(9);
            let nanos = dt.nanosecond() % 1_000_000_000;
            let full = format!("{:09}", nanos);
            full[..digits].to_string()
        }
        't' => {
            let marker = if dt.hour() < 12 { "AM" } else { "PM" };
            if run == 1 {
                marker[..1].to_string()
            } else {
                marker.to_string()
            }
        }
        _ => String::new(),
    };
    out.push_str(&rendered);
}

fn two_digit(value: u32, run: usize) -> String {
    if run == 1 {
        value.to_string()
    } else {
        format!("{:02}", value)
    }
}
