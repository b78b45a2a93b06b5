//! File-metadata formatting for `{file}` and `{file:...}`.
//!
//! Named specs pick a timestamp (`createtime`, `edittime`/`lastwritetime`,
//! `accesstime`/`lastaccesstime`) rendered as `yyyy-MM-dd HH:mm:ss`. Any
//! other spec is a date pattern applied to the creation time.

use super::date::format_date;
use crate::context::FileInfo;
use chrono::NaiveDateTime;

const TIMESTAMP_PATTERN: &str = "yyyy-MM-dd HH:mm:ss";

/// No spec renders the full path; a missing file renders an empty string
pub fn format_file(full_path: &str, info: &FileInfo, spec: &str) -> String {
    if spec.is_empty() {
        return full_path.to_string();
    }
    if !info.exists {
        return String::new();
    }

    let (time, pattern): (Option<NaiveDateTime>, &str) = match spec.to_lowercase().as_str() {
        "createtime" => (info.created_or_modified(), TIMESTAMP_PATTERN),
        "edittime" | "lastwritetime" => (info.modified_at, TIMESTAMP_PATTERN),
        "accesstime" | "lastaccesstime" => (info.accessed_at, TIMESTAMP_PATTERN),
        _ => (info.created_or_modified(), spec),
    };

    time.map(|t| format_date(&t, pattern)).unwrap_or_default()
}
