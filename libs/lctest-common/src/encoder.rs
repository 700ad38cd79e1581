/// Argument Encoder - Test Payload to Subprocess Arguments
///
/// Pure transform, no I/O. Output shape is fixed:
/// `test "<file>"` optionally followed by `-t "<payload>"`.
///
/// **Encoding Rules:**
/// - File path is wrapped in double quotes
/// - Double quotes inside the payload are removed, not escaped
/// - File payloads have every `\r\n` / `\n` replaced with the two characters `\n`
/// - Payload is wrapped in double quotes
///
/// Quote removal is lossy: a literal `"` cannot reach the judge.

use crate::types::{CommandInvocation, PayloadOrigin, TestPayload};
use std::path::Path;

pub const TEST_SUBCOMMAND: &str = "test";
pub const TEST_FLAG: &str = "-t";

fn quote(value: &str) -> String {
    format!("\"{}\"", value)
}

fn strip_quotes(value: &str) -> String {
    value.replace('"', "")
}

/// Replace real line breaks with the escape sequence `\n`; lone `\r` is kept
fn collapse_line_breaks(value: &str) -> String {
    value.replace("\r\n", "\\n").replace('\n', "\\n")
}

/// Encode a payload into its final quoted argument
pub fn encode_payload(payload: &TestPayload) -> String {
    let stripped = strip_quotes(payload.text());
    let body = match payload.origin() {
        PayloadOrigin::Direct => stripped,
        PayloadOrigin::File => collapse_line_breaks(&stripped),
    };
    quote(&body)
}

/// Build the `test` argument list for a solution file
pub fn encode_arguments(file_path: &Path, payload: Option<&TestPayload>) -> Vec<String> {
    let mut args = vec![
        TEST_SUBCOMMAND.to_string(),
        quote(&file_path.to_string_lossy()),
    ];

    if let Some(payload) = payload {
        args.push(TEST_FLAG.to_string());
        args.push(encode_payload(payload));
    }

    args
}

/// Build the full invocation: `<runtime> <cli_path> test "<file>" [-t "<payload>"]`
///
/// Takes the payload by value so it cannot be encoded into a second invocation.
pub fn build_invocation(
    runtime: &str,
    cli_path: &str,
    file_path: &Path,
    payload: Option<TestPayload>,
) -> CommandInvocation {
    let mut args = Vec::with_capacity(5);
    args.push(cli_path.to_string());
    args.extend(encode_arguments(file_path, payload.as_ref()));

    CommandInvocation::new(runtime.to_string(), args)
}
