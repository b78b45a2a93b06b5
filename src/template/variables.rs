//! Canonical template variables and their metadata.

use serde::{Deserialize, Serialize};

/// Variables a template can reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variable {
    /// File name without extension: {name}
    Name,
    /// Extension without the dot: {ext}
    Ext,
    /// File name with extension: {fullname}
    FullName,
    /// Name of the containing directory: {dirname}
    DirName,
    /// Zero-based position in the batch: {i}
    Index,
    /// Reverse position, TotalCount - 1 - Index: {iv}
    ReverseIndex,
    /// Current date: {today}
    Today,
    /// Current date and time: {now}
    Now,
    /// Image dimensions: {image}
    Image,
    /// File metadata: {file}
    File,
    /// File size in bytes: {size}
    Size,
}

impl Variable {
    pub const ALL: [Variable; 11] = [
        Variable::Name,
        Variable::Ext,
        Variable::FullName,
        Variable::DirName,
        Variable::Index,
        Variable::ReverseIndex,
        Variable::Today,
        Variable::Now,
        Variable::Image,
        Variable::File,
        Variable::Size,
    ];

    /// Resolve a variable name, ignoring case
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "name" => Some(Variable::Name),
            "ext" => Some(Variable::Ext),
            "fullname" => Some(Variable::FullName),
            "dirname" => Some(Variable::DirName),
            "i" => Some(Variable::Index),
            "iv" => Some(Variable::ReverseIndex),
            "today" => Some(Variable::Today),
            "now" => Some(Variable::Now),
            "image" => Some(Variable::Image),
            "file" => Some(Variable::File),
            "size" => Some(Variable::Size),
            _ => None,
        }
    }

    /// Name as written in templates
    pub fn canonical_name(&self) -> &'static str {
        match self {
            Variable::Name => "name",
            Variable::Ext => "ext",
            Variable::FullName => "fullname",
            Variable::DirName => "dirname",
            Variable::Index => "i",
            Variable::ReverseIndex => "iv",
            Variable::Today => "today",
            Variable::Now => "now",
            Variable::Image => "image",
            Variable::File => "file",
            Variable::Size => "size",
        }
    }

    pub fn kind(&self) -> VariableKind {
        match self {
            Variable::Name | Variable::Ext | Variable::FullName | Variable::DirName => {
                VariableKind::String
            }
            Variable::Index | Variable::ReverseIndex => VariableKind::Number,
            Variable::Today => VariableKind::Date,
            Variable::Now => VariableKind::DateTime,
            Variable::Image => VariableKind::Image,
            Variable::File => VariableKind::File,
            Variable::Size => VariableKind::Size,
        }
    }

    /// Whether a `:SPEC` suffix changes how the variable renders
    pub fn supports_format(&self) -> bool {
        self.kind() != VariableKind::String
    }
}

/// Value category of a variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableKind {
    String,
    Number,
    Date,
    DateTime,
    Image,
    File,
    Size,
}

/// A suggested `:SPEC` value for a variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatOption {
    pub text: &'static str,
    pub description: &'static str,
}

/// Descriptive metadata for one variable, for editors and help output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableInfo {
    pub name: &'static str,
    pub kind: VariableKind,
    pub description: &'static str,
    pub format_options: Vec<FormatOption>,
}

const fn option(text: &'static str, description: &'static str) -> FormatOption {
    FormatOption { text, description }
}

fn number_format_options() -> Vec<FormatOption> {
    vec![
        option("零", "Chinese numerals from zero: 零, 一, 二..."),
        option("1", "Numbers from 1: 1, 2, 3..."),
        option("一", "Chinese numerals from one: 一, 二, 三..."),
        option("壹", "Formal Chinese numerals from one: 壹, 贰, 叁..."),
        option("00", "2 digits from 00: 00, 01, 02..."),
        option("01", "2 digits from 01: 01, 02, 03..."),
        option("000", "3 digits from 000: 000, 001, 002..."),
        option("001", "3 digits from 001: 001, 002, 003..."),
        option("0000", "4 digits from 0000: 0000, 0001, 0002..."),
        option("0001", "4 digits from 0001: 0001, 0002, 0003..."),
        option("00000", "5 digits from 00000: 00000, 00001, 00002..."),
        option("00001", "5 digits from 00001: 00001, 00002, 00003..."),
    ]
}

impl VariableInfo {
    pub fn for_variable(variable: Variable) -> Self {
        let (description, format_options) = match variable {
            Variable::Name => ("File name without extension", vec![]),
            Variable::Ext => ("File extension without the dot", vec![]),
            Variable::FullName => ("File name including extension", vec![]),
            Variable::DirName => ("Name of the folder containing the file", vec![]),
            Variable::Index => (
                "Position in the batch, from 0. Formats: {i:00}, {i:01}, {i:1}, {i:零}, {i:一}, {i:壹}. Expressions: {2*i+1:000}, {i*3-2:00}",
                number_format_options(),
            ),
            Variable::ReverseIndex => (
                "Reverse position: with 10 files the first has iv=9 and the last iv=0. Same formats as {i}",
                number_format_options(),
            ),
            Variable::Today => (
                "Current date. Formats: {today:yyyy-MM-dd}, {today:yyyyMMdd}",
                vec![
                    option("yyyy-MM-dd", "2024-01-01"),
                    option("yyyyMMdd", "20240101"),
                    option("yyyy年MM月dd日", "2024年01月01日"),
                    option("MM-dd", "01-01"),
                ],
            ),
            Variable::Now => (
                "Current date and time. Formats: {now:yyyyMMdd_HHmmss}",
                vec![
                    option("yyyy-MM-dd HH:mm:ss", "2024-01-01 12:30:45"),
                    option("yyyyMMdd_HHmmss", "20240101_123045"),
                    option("HHmmss", "123045"),
                ],
            ),
            Variable::Image => (
                "Image dimensions, empty for non-images",
                vec![
                    option("wxh", "Width x height: 1920x1080"),
                    option("w", "Width: 1920"),
                    option("h", "Height: 1080"),
                ],
            ),
            Variable::File => (
                "File metadata, the full path by default",
                vec![
                    option("createtime", "Creation time"),
                    option("edittime", "Last modification time"),
                    option("accesstime", "Last access time"),
                    option("yyyyMMdd", "Creation date with a custom pattern"),
                ],
            ),
            Variable::Size => (
                "File size, auto unit by default",
                vec![
                    option("1b", "Bytes: 1024 B"),
                    option("1kb", "Kilobytes: 1 KB"),
                    option("1mb", "Megabytes: 0.98 MB"),
                    option(".2f", "Auto unit with 2 decimals: 1.50 MB"),
                    option(".0f", "Auto unit without decimals: 2 MB"),
                ],
            ),
        };

        Self {
            name: variable.canonical_name(),
            kind: variable.kind(),
            description,
            format_options,
        }
    }
}

/// Metadata for every canonical variable
pub fn all_variables() -> Vec<VariableInfo> {
    Variable::ALL.iter().copied().map(VariableInfo::for_variable).collect()
}
