//! Compile and link diagnostics.
//!
//! GLSL compilers report errors as lines of the form `ERROR: <source>:<line>: <message>`. The
//! scanner in this module recognises the grammar
//!
//! ```text
//! ERROR: <whitespace>* <digits> : <digits>
//! ```
//!
//! and captures the second number as the 1-based source line. Whitespace is any Unicode
//! whitespace, as `\s` in a regex. Each match owns the log text from its start up to the next
//! match (or the end of the log), with trailing whitespace trimmed from the message so that
//! annotations do not end in blank lines. Anything that does not match is left alone: the raw
//! log is always kept, so unfamiliar driver formats still reach the user.

use std::{collections::HashMap, fmt};

use crate::abs::StageKind;

const ERROR_TAG: &str = "ERROR:";

/// What failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiagnosticKind {
    CompileError(StageKind),
    LinkError,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::CompileError(stage) => write!(f, "{stage} shader compile error"),
            DiagnosticKind::LinkError => f.write_str("program link error"),
        }
    }
}

/// One error found in a compiler log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogError {
    /// 1-based source line as reported by the compiler.
    pub line: usize,
    /// The log text belonging to this error, starting at its `ERROR:` tag.
    pub message: String,
}

/// Error report for a failed compile or link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// The backend's info log, unmodified.
    pub log: String,
    /// Errors located in the log. Always empty for link errors.
    pub errors: Vec<LogError>,
    /// The numbered source with errors inlined. `None` for link errors.
    pub annotated_source: Option<String>,
}

impl Diagnostic {
    /// Builds the diagnostic for a stage that failed to compile.
    pub fn compile(stage: StageKind, source: &str, log: impl Into<String>) -> Self {
        let log = log.into();
        let errors = parse_log(&log);
        let annotated_source = Some(annotate_source(source, &errors));
        Self {
            kind: DiagnosticKind::CompileError(stage),
            log,
            errors,
            annotated_source,
        }
    }

    /// Builds the diagnostic for a program that failed to link.
    pub fn link(log: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::LinkError,
            log: log.into(),
            errors: Vec::new(),
            annotated_source: None,
        }
    }

    pub fn is_compile_error(&self) -> bool {
        matches!(self.kind, DiagnosticKind::CompileError(_))
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.log.trim_end())?;
        match &self.annotated_source {
            Some(source) if !self.errors.is_empty() => write!(f, "\n{source}"),
            _ => Ok(()),
        }
    }
}

impl std::error::Error for Diagnostic {}

/// Start offset and captured line number of one `ERROR:` match.
struct Match {
    start: usize,
    line: usize,
}

fn digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Finds every match of the error grammar, in order.
fn find_matches(log: &str) -> Vec<Match> {
    let bytes = log.as_bytes();
    let mut matches = Vec::new();
    let mut from = 0;

    while let Some(offset) = log[from..].find(ERROR_TAG) {
        let start = from + offset;
        from = start + ERROR_TAG.len();

        let rest = &log[from..];
        let mut i = from + rest.len() - rest.trim_start().len();

        let source_len = digits(&bytes[i..]);
        if source_len == 0 || bytes.get(i + source_len) != Some(&b':') {
            continue;
        }
        i += source_len + 1;

        let line_len = digits(&bytes[i..]);
        if line_len == 0 {
            continue;
        }

        // Absurdly long numbers still count as a match, they just never name a real line.
        let line = log[i..i + line_len].parse().unwrap_or(usize::MAX);
        matches.push(Match { start, line });
    }

    matches
}

/// Splits a compiler log into located errors.
pub fn parse_log(log: &str) -> Vec<LogError> {
    let matches = find_matches(log);
    matches
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let end = matches.get(i + 1).map_or(log.len(), |next| next.start);
            LogError {
                line: m.line,
                message: log[m.start..end].trim_end().to_string(),
            }
        })
        .collect()
}

/// Numbers every source line as `<n>: <text>` and puts `^^^ <message>` under each line that has
/// an error. Errors naming line 0 or a line past the end are not inlined.
pub fn annotate_source(source: &str, errors: &[LogError]) -> String {
    let mut by_line: HashMap<usize, Vec<&str>> = HashMap::new();
    for error in errors {
        if let Some(index) = error.line.checked_sub(1) {
            by_line.entry(index).or_default().push(&error.message);
        }
    }

    source
        .split('\n')
        .enumerate()
        .map(|(index, text)| {
            let mut line = format!("{}: {}", index + 1, text);
            for message in by_line.get(&index).into_iter().flatten() {
                line.push_str("\n\n^^^ ");
                line.push_str(message);
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}
