// Test doubles for the prompt and subprocess seams
use crate::channel::OutputChannel;
use crate::prompt::{MenuItem, Prompter};
use crate::runner::{CommandRunner, RunError};
use anyhow::Result;
use lctest_common::types::CommandInvocation;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::PathBuf;

/// Prompter that replays queued answers and records every notification.
/// An exhausted queue answers as if the user dismissed the prompt.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    selections: VecDeque<Option<usize>>,
    texts: VecDeque<Option<String>>,
    files: VecDeque<Option<PathBuf>>,
    confirms: VecDeque<bool>,
    pub prompts: Vec<String>,
    pub validations: Vec<String>,
    pub errors: Vec<String>,
    pub confirmations: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(mut self, answer: Option<usize>) -> Self {
        self.selections.push_back(answer);
        self
    }

    pub fn text(mut self, answer: Option<&str>) -> Self {
        self.texts.push_back(answer.map(str::to_string));
        self
    }

    pub fn file(mut self, answer: Option<PathBuf>) -> Self {
        self.files.push_back(answer);
        self
    }

    pub fn confirm(mut self, answer: bool) -> Self {
        self.confirms.push_back(answer);
        self
    }

    /// Everything the user was told, in any form
    pub fn notification_count(&self) -> usize {
        self.errors.len() + self.confirmations.len()
    }
}

impl Prompter for ScriptedPrompter {
    async fn select(&mut self, prompt: &str, _items: &[MenuItem]) -> Result<Option<usize>> {
        self.prompts.push(prompt.to_string());
        Ok(self.selections.pop_front().flatten())
    }

    async fn input_text(&mut self, prompt: &str, _placeholder: &str) -> Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.texts.pop_front().flatten())
    }

    async fn pick_file(&mut self, prompt: &str) -> Result<Option<PathBuf>> {
        self.prompts.push(prompt.to_string());
        Ok(self.files.pop_front().flatten())
    }

    fn show_validation(&mut self, message: &str) {
        self.validations.push(message.to_string());
    }

    fn show_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    async fn confirm_action(&mut self, message: &str, _action: &str) -> Result<bool> {
        self.confirmations.push(message.to_string());
        Ok(self.confirms.pop_front().unwrap_or(false))
    }
}

/// Runner that records invocations and replies with a canned result
pub struct RecordingRunner {
    reply: Box<dyn Fn(&CommandInvocation) -> Result<String, RunError>>,
    pub invocations: RefCell<Vec<CommandInvocation>>,
}

impl RecordingRunner {
    pub fn succeeding(stdout: &str) -> Self {
        let stdout = stdout.to_string();
        Self {
            reply: Box::new(move |_: &CommandInvocation| Ok(stdout.clone())),
            invocations: RefCell::new(Vec::new()),
        }
    }

    pub fn failing(code: i32, stderr: &str) -> Self {
        let stderr = stderr.to_string();
        Self {
            reply: Box::new(move |invocation: &CommandInvocation| {
                Err(RunError::NonZeroExit {
                    command: invocation.command_line(),
                    code: Some(code),
                    stderr: stderr.clone(),
                })
            }),
            invocations: RefCell::new(Vec::new()),
        }
    }

    pub fn spawn_count(&self) -> usize {
        self.invocations.borrow().len()
    }

    pub fn last_args(&self) -> Option<Vec<String>> {
        self.invocations.borrow().last().map(|i| i.args().to_vec())
    }
}

impl CommandRunner for RecordingRunner {
    async fn run(
        &self,
        invocation: &CommandInvocation,
        channel: &mut OutputChannel,
    ) -> Result<String, RunError> {
        channel.append_line(&format!("$ {}", invocation.command_line()));
        self.invocations.borrow_mut().push(invocation.clone());
        let reply = (self.reply)(invocation);
        if let Err(RunError::NonZeroExit { stderr, .. }) = &reply {
            channel.append_output("stderr", stderr);
        }
        reply
    }
}
