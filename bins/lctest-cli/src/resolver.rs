/// Input Source Resolver
///
/// Asks which test source to use and turns the answer into an optional
/// [`TestPayload`]. Touches only prompts and the selected test file; never
/// the subprocess layer.

use crate::prompt::{MenuItem, Prompter};
use anyhow::Result;
use lctest_common::error::{is_blank, validate_test_case, InputError};
use lctest_common::types::{SourceKind, TestPayload, TestSource};
use std::path::PathBuf;
use tracing::debug;

pub const SOURCE_PROMPT: &str = "Choose test cases";
pub const INPUT_PROMPT: &str = "Enter the test cases.";
pub const INPUT_PLACEHOLDER: &str = "[1,2,3]\\n4";
pub const FILE_PROMPT: &str = "Path to the test case file";

/// What the resolver produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Run with this payload; `None` means the judge's default cases
    Ready(Option<TestPayload>),
    /// User dismissed a prompt
    Cancelled,
    /// Input was rejected and the user has already been told
    Rejected,
}

pub fn source_menu() -> Vec<MenuItem> {
    SourceKind::ALL.iter().copied().map(MenuItem::from).collect()
}

/// Show the three-way source menu and collect the matching input
pub async fn choose_source<P: Prompter>(prompter: &mut P) -> Result<Option<TestSource>> {
    let menu = source_menu();
    let Some(index) = prompter.select(SOURCE_PROMPT, &menu).await? else {
        return Ok(None);
    };
    let Some(kind) = SourceKind::from_index(index) else {
        return Ok(None);
    };
    debug!(source = %kind, "Test source selected");

    let source = match kind {
        SourceKind::Default => Some(TestSource::Default),
        SourceKind::Direct => read_direct_input(prompter).await?.map(TestSource::Direct),
        SourceKind::File => prompter.pick_file(FILE_PROMPT).await?.map(TestSource::File),
    };

    Ok(source)
}

/// Prompt until the input is non-blank or the user cancels
async fn read_direct_input<P: Prompter>(prompter: &mut P) -> Result<Option<String>> {
    loop {
        let Some(input) = prompter.input_text(INPUT_PROMPT, INPUT_PLACEHOLDER).await? else {
            return Ok(None);
        };
        match validate_test_case(&input) {
            Ok(()) => return Ok(Some(input)),
            Err(e) => prompter.show_validation(&e.to_string()),
        }
    }
}

async fn read_test_file(path: PathBuf) -> Result<String, InputError> {
    tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| InputError::ReadTestFile { path, source })
}

/// Turn a chosen source into a payload. An empty test file is reported
/// through the prompter and rejected.
pub async fn load_payload<P: Prompter>(source: TestSource, prompter: &mut P) -> Result<Resolution> {
    debug!(source = %source.kind(), "Loading test payload");
    match source {
        TestSource::Default => Ok(Resolution::Ready(None)),
        TestSource::Direct(text) => Ok(Resolution::Ready(Some(TestPayload::direct(text)))),
        TestSource::File(path) => {
            let content = read_test_file(path.clone()).await?;
            if is_blank(&content) {
                let err = InputError::EmptyTestFile { path };
                prompter.show_error(&err.to_string());
                return Ok(Resolution::Rejected);
            }
            Ok(Resolution::Ready(Some(TestPayload::from_file(content))))
        }
    }
}

/// Choose a source, then load it
pub async fn resolve_test_input<P: Prompter>(prompter: &mut P) -> Result<Resolution> {
    match choose_source(prompter).await? {
        Some(source) => load_payload(source, prompter).await,
        None => Ok(Resolution::Cancelled),
    }
}
