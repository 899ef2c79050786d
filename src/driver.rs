use std::io::Write;

use serde::Serialize;
use tracing::debug;

use crate::translate::{Skip, TranslateError, Translator};

/// A line that produced no translation and was echoed as a comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fallback {
    pub line_no: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkipAt {
    pub line_no: usize,
    #[serde(flatten)]
    pub skip: Skip,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub lines: usize,
    pub translated: usize,
    pub fallbacks: Vec<Fallback>,
    pub skips: Vec<SkipAt>,
}

#[derive(thiserror::Error, Debug)]
pub enum DriverError {
    #[error("line {line_no}: {source}")]
    Translate {
        line_no: usize,
        #[source]
        source: TranslateError,
    },
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Translate a whole source text, one output line per input line.
/// Stops at the first fatal line; everything before it has been written.
pub fn translate_source<W: Write>(
    src: &str,
    tr: &Translator,
    mut out: W,
) -> Result<Summary, DriverError> {
    let mut summary = Summary::default();
    for (i, text) in src.lines().enumerate() {
        let line_no = i + 1;
        let line = tr
            .translate_line(text)
            .map_err(|source| DriverError::Translate { line_no, source })?;
        writeln!(out, "{}", line.render())?;

        summary.lines += 1;
        if line.written {
            summary.translated += 1;
        } else {
            summary.fallbacks.push(Fallback {
                line_no,
                text: text.to_string(),
            });
        }
        summary
            .skips
            .extend(line.skipped.into_iter().map(|skip| SkipAt { line_no, skip }));
    }
    debug!(
        lines = summary.lines,
        translated = summary.translated,
        "source translated"
    );
    out.flush()?;
    Ok(summary)
}
