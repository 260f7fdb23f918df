use std::fs::File;
use std::io;
use std::path::Path;

use crate::manifest::{ResultEntry, TestManifest, TestRecord, DEFAULT_OUTPUT_ADDR};

#[derive(Debug)]
pub enum ConvertError {
    Io(io::Error),
    Json(serde_json::Error),
    LogFormat(String),
}

impl From<io::Error> for ConvertError {
    fn from(value: io::Error) -> Self {
        ConvertError::Io(value)
    }
}

impl From<serde_json::Error> for ConvertError {
    fn from(value: serde_json::Error) -> Self {
        ConvertError::Json(value)
    }
}

/// Read the result log at `input_path` and write the JSON manifest to
/// `output_path`. ROM paths in the manifest are built relative to the
/// directory containing the log. `output_addr` replaces the default
/// sample address for every record when given.
pub fn process_log_file(
    input_path: &Path,
    output_path: &Path,
    output_addr: Option<&str>,
) -> Result<(), ConvertError> {
    let folder = input_path.parent().unwrap_or(Path::new(""));
    let text = std::fs::read_to_string(input_path)?;
    let manifest = parse_log(folder, &text, output_addr)?;
    let output_file = File::create(output_path)?;
    serde_json::to_writer_pretty(output_file, &manifest)?;
    Ok(())
}

/// Scan the log text and build the manifest.
///
/// Sections are delimited by separator lines (a run of hyphens and nothing
/// else before the newline); the line above a separator names the ROM. Each
/// new section starts with the implicit pass entry, and numbered lines of
/// the shape `<digits>) <message>` add failure entries to it. A section
/// that never accumulated more than the implicit entry is dropped again
/// when the next separator appears; the final section is always kept.
pub fn parse_log(
    folder: &Path,
    text: &str,
    output_addr: Option<&str>,
) -> Result<TestManifest, ConvertError> {
    let output_addr = output_addr.unwrap_or(DEFAULT_OUTPUT_ADDR);
    let lines: Vec<&str> = text.split_inclusive('\n').collect();
    let mut manifest = TestManifest::default();

    for (i, line) in lines.iter().enumerate() {
        if is_separator(line) {
            if manifest.tests.last().is_some_and(|t| t.results.len() == 1) {
                manifest.tests.pop();
            }
            if i == 0 {
                return Err(ConvertError::LogFormat(String::from(
                    "separator on the first line has no ROM name above it",
                )));
            }
            let base = strip_terminator(lines[i - 1]).trim();
            let rom = rom_path(folder, base);
            manifest.tests.push(TestRecord::new(rom, output_addr));
        } else if let Some((code, message)) = match_result(line) {
            // The code is compared as text: a literal "1" restates the
            // implicit pass entry and is skipped, but "01" is not.
            if code == "1" {
                continue;
            }
            let code: u32 = code.parse().map_err(|_| {
                ConvertError::LogFormat(format!("result code '{code}' out of range"))
            })?;
            match manifest.tests.last_mut() {
                Some(record) => record.results.push(ResultEntry::failure(code, message)),
                None => {
                    return Err(ConvertError::LogFormat(String::from(
                        "result line before the first separator",
                    )))
                }
            }
        }
    }

    Ok(manifest)
}

// A separator is a run of '-' with nothing else before the newline. A final
// hyphen run with no newline is plain text, not a separator.
fn is_separator(line: &str) -> bool {
    let Some(body) = line.strip_suffix('\n') else {
        return false;
    };
    let body = body.strip_suffix('\r').unwrap_or(body);
    !body.is_empty() && body.bytes().all(|b| b == b'-')
}

fn strip_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

// Match "<digits>) <message>", returning the digit run as text along with
// the message. Anything else, including "<digits>)" without the space,
// is not a result line.
fn match_result(line: &str) -> Option<(&str, &str)> {
    let body = strip_terminator(line);
    let digits = body.len() - body.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    let message = body[digits..].strip_prefix(") ")?;
    Some((&body[..digits], message))
}

// The manifest is consumed by the test runner with forward-slash paths, no
// matter what the host separator is.
fn rom_path(folder: &Path, base: &str) -> String {
    folder
        .join(format!("{base}.nes"))
        .to_string_lossy()
        .replace('\\', "/")
}
