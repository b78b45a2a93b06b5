//! Built-in string methods shared by the evaluator and the compiler.
//!
//! Indices and widths count characters, not bytes, so names in any script
//! slice and pad the same way.

use super::ast::Literal;

/// The fixed method set callable on a template value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Upper,
    Lower,
    Trim,
    Replace,
    Sub,
    Slice,
    PadLeft,
    PadRight,
}

impl Method {
    /// Resolve a method name, ignoring case
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "upper" => Some(Method::Upper),
            "lower" => Some(Method::Lower),
            "trim" => Some(Method::Trim),
            "replace" => Some(Method::Replace),
            "sub" => Some(Method::Sub),
            "slice" => Some(Method::Slice),
            "padleft" => Some(Method::PadLeft),
            "padright" => Some(Method::PadRight),
            _ => None,
        }
    }

    pub fn canonical_name(&self) -> &'static str {
        match self {
            Method::Upper => "upper",
            Method::Lower => "lower",
            Method::Trim => "trim",
            Method::Replace => "replace",
            Method::Sub => "sub",
            Method::Slice => "slice",
            Method::PadLeft => "padLeft",
            Method::PadRight => "padRight",
        }
    }

    /// Apply the method to an already evaluated target and arguments
    pub fn apply(&self, target: &str, args: &[Literal]) -> String {
        match self {
            Method::Upper => target.to_uppercase(),
            Method::Lower => target.to_lowercase(),
            Method::Trim => target.trim().to_string(),
            Method::Replace => replace(target, args.first(), args.get(1)),
            Method::Sub | Method::Slice => substring(target, args.first(), args.get(1)),
            Method::PadLeft => pad(target, args.first(), args.get(1), PadSide::Left),
            Method::PadRight => pad(target, args.first(), args.get(1), PadSide::Right),
        }
    }
}

/// Inline marker emitted for a method name outside the built-in set
pub fn unknown_method_placeholder(name: &str) -> String {
    format!("[Unknown method: {}]", name)
}

fn literal_as_int(value: &Literal) -> Option<i64> {
    match value {
        Literal::Int(n) => Some(*n),
        Literal::Str(s) => s.trim().parse().ok(),
    }
}

/// Resolve an index argument against a string of `len` characters.
///
/// Non-numeric arguments fall back to `default`; negative values count
/// from the end. The result is clamped to `[0, len]`.
pub fn resolve_index(value: Option<&Literal>, len: usize, default: i64) -> usize {
    let len_i = len as i64;
    let mut index = value.and_then(literal_as_int).unwrap_or(default);
    if index < 0 {
        index += len_i;
    }
    index.clamp(0, len_i) as usize
}

/// Substring used by `sub`, `slice` and `[start:end]`.
///
/// No start returns the target unchanged; no end runs to the end of the
/// string; an empty range yields an empty string.
pub fn substring(target: &str, start: Option<&Literal>, end: Option<&Literal>) -> String {
    let Some(start) = start else {
        return target.to_string();
    };

    let len = target.chars().count();
    let start = resolve_index(Some(start), len, 0);
    let end = match end {
        Some(end) => resolve_index(Some(end), len, len as i64),
        None => len,
    };

    if start >= end {
        return String::new();
    }
    target.chars().skip(start).take(end - start).collect()
}

/// Substring with integer bounds, as produced by slice syntax
pub fn slice_bounds(target: &str, start: Option<i64>, end: Option<i64>) -> String {
    // [:end] behaves as slice(0, end)
    let start = match (start, end) {
        (None, Some(_)) => Some(0),
        (start, _) => start,
    };
    let start = start.map(Literal::Int);
    let end = end.map(Literal::Int);
    substring(target, start.as_ref(), end.as_ref())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadSide {
    Left,
    Right,
}

/// Widest padding target honored; wider requests leave the target unchanged
pub const MAX_PAD_WIDTH: i64 = u16::MAX as i64;

/// Pad to `width` characters with the first character of `fill` (space by default)
pub fn pad(target: &str, width: Option<&Literal>, fill: Option<&Literal>, side: PadSide) -> String {
    let Some(width) = width.and_then(literal_as_int) else {
        return target.to_string();
    };

    if width > MAX_PAD_WIDTH {
        return target.to_string();
    }
    let Ok(width) = usize::try_from(width) else {
        return target.to_string();
    };

    let len = target.chars().count();
    if width <= len {
        return target.to_string();
    }

    let fill_char = fill
        .map(|f| f.to_string())
        .and_then(|f| f.chars().next())
        .unwrap_or(' ');
    let padding: String = std::iter::repeat(fill_char)
        .take(width - len)
        .collect();

    match side {
        PadSide::Left => format!("{}{}", padding, target),
        PadSide::Right => format!("{}{}", target, padding),
    }
}

/// Replace every occurrence of `old` with `new`. Missing arguments or an
/// empty search string leave the target unchanged.
pub fn replace(target: &str, old: Option<&Literal>, new: Option<&Literal>) -> String {
    match (old, new) {
        (Some(old), Some(new)) => {
            let old = old.to_string();
            if old.is_empty() {
                return target.to_string();
            }
            target.replace(&old, &new.to_string())
        }
        _ => target.to_string(),
    }
}
