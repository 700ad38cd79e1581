use chrono::{DateTime, Utc};
use std::fmt;
use std::path::PathBuf;
use uuid::Uuid;

/// The three test-input strategies offered to the user, in menu order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Default,
    Direct,
    File,
}

impl SourceKind {
    pub const ALL: [SourceKind; 3] = [SourceKind::Default, SourceKind::Direct, SourceKind::File];

    pub fn icon(&self) -> &'static str {
        match self {
            SourceKind::Default => "☰",
            SourceKind::Direct => "✎",
            SourceKind::File => "📄",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SourceKind::Default => "Default test cases",
            SourceKind::Direct => "Write directly...",
            SourceKind::File => "Browse...",
        }
    }

    pub fn detail(&self) -> &'static str {
        match self {
            SourceKind::Default => "Test with the default cases",
            SourceKind::Direct => "Write test cases in input box",
            SourceKind::File => "Test with the written cases in file",
        }
    }

    /// Position of this entry in [`SourceKind::ALL`]
    pub fn index(&self) -> usize {
        match self {
            SourceKind::Default => 0,
            SourceKind::Direct => 1,
            SourceKind::File => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SourceKind::Default => write!(f, "default"),
            SourceKind::Direct => write!(f, "direct"),
            SourceKind::File => write!(f, "file"),
        }
    }
}

/// The user's chosen test source. Immutable once chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestSource {
    Default,
    Direct(String),
    File(PathBuf),
}

impl TestSource {
    pub fn kind(&self) -> SourceKind {
        match self {
            TestSource::Default => SourceKind::Default,
            TestSource::Direct(_) => SourceKind::Direct,
            TestSource::File(_) => SourceKind::File,
        }
    }
}

/// Where a payload came from; file payloads get their line breaks re-encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadOrigin {
    Direct,
    File,
}

/// Raw test-case text handed from the resolver to the encoder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestPayload {
    text: String,
    origin: PayloadOrigin,
}

impl TestPayload {
    pub fn direct(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            origin: PayloadOrigin::Direct,
        }
    }

    pub fn from_file(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            origin: PayloadOrigin::File,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn origin(&self) -> PayloadOrigin {
        self.origin
    }
}

/// A fully built external command. Only the encoder constructs these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    id: Uuid,
    created_at: DateTime<Utc>,
    program: String,
    args: Vec<String>,
}

impl CommandInvocation {
    pub(crate) fn new(program: String, args: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            program,
            args,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Space-joined command line as handed to the shell
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

impl fmt::Display for CommandInvocation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.command_line())
    }
}

/// Outcome of one subprocess run, handed to the presenter exactly once
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionResult {
    Success(String),
    Failure(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserStatus {
    SignedIn(String),
    SignedOut,
}
