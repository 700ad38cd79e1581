/// User Interaction Surface
///
/// Every question the flow asks goes through [`Prompter`]. A `None` answer
/// means the user dismissed the prompt; callers treat it as cancellation.
///
/// Implementations:
/// - [`TerminalPrompter`]: interactive terminal prompts (dialoguer)
/// - [`PresetPrompter`]: answers from command-line flags, then defers to an inner prompter

use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use lctest_common::types::SourceKind;
use std::io;
use std::path::{Path, PathBuf};

/// One entry of a single-choice menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub icon: &'static str,
    pub label: &'static str,
    pub detail: &'static str,
}

impl MenuItem {
    pub fn render(&self) -> String {
        format!("{} {}  ({})", self.icon, self.label, self.detail)
    }
}

impl From<SourceKind> for MenuItem {
    fn from(kind: SourceKind) -> Self {
        MenuItem {
            icon: kind.icon(),
            label: kind.label(),
            detail: kind.detail(),
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait Prompter {
    /// Single-choice menu; returns the chosen index
    async fn select(&mut self, prompt: &str, items: &[MenuItem]) -> Result<Option<usize>>;

    /// Free-text input, returned verbatim
    async fn input_text(&mut self, prompt: &str, placeholder: &str) -> Result<Option<String>>;

    /// Choose an existing file
    async fn pick_file(&mut self, prompt: &str) -> Result<Option<PathBuf>>;

    /// Inline validation message shown before re-prompting
    fn show_validation(&mut self, message: &str);

    /// Error notification
    fn show_error(&mut self, message: &str);

    /// Error notification with one action button; true if the action was taken
    async fn confirm_action(&mut self, message: &str, action: &str) -> Result<bool>;
}

/// Map a terminal interrupt to a dismissed prompt
fn dismissed_on_interrupt<T>(result: dialoguer::Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(dialoguer::Error::IO(e)) if e.kind() == io::ErrorKind::Interrupted => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Interactive prompts on the controlling terminal
///
/// dialoguer blocks, so each prompt runs on the blocking pool.
#[derive(Debug, Default, Clone)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    async fn select(&mut self, prompt: &str, items: &[MenuItem]) -> Result<Option<usize>> {
        let prompt = prompt.to_string();
        let labels: Vec<String> = items.iter().map(MenuItem::render).collect();

        let choice = tokio::task::spawn_blocking(move || {
            Select::with_theme(&ColorfulTheme::default())
                .with_prompt(&prompt)
                .items(&labels)
                .default(0)
                .interact_opt()
        })
        .await??;

        Ok(choice)
    }

    async fn input_text(&mut self, prompt: &str, placeholder: &str) -> Result<Option<String>> {
        let prompt = format!("{} Example: {}", prompt, placeholder);

        let result = tokio::task::spawn_blocking(move || {
            Input::<String>::with_theme(&ColorfulTheme::default())
                .with_prompt(&prompt)
                .allow_empty(true)
                .interact_text()
        })
        .await?;

        dismissed_on_interrupt(result)
    }

    async fn pick_file(&mut self, prompt: &str) -> Result<Option<PathBuf>> {
        let prompt = format!("{} (leave empty to cancel)", prompt);

        let result = tokio::task::spawn_blocking(move || {
            Input::<String>::with_theme(&ColorfulTheme::default())
                .with_prompt(&prompt)
                .allow_empty(true)
                .validate_with(|s: &String| -> Result<(), String> {
                    let trimmed = s.trim();
                    if trimmed.is_empty() || Path::new(trimmed).is_file() {
                        Ok(())
                    } else {
                        Err(format!("No such file: {}", trimmed))
                    }
                })
                .interact_text()
        })
        .await?;

        Ok(dismissed_on_interrupt(result)?
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from))
    }

    fn show_validation(&mut self, message: &str) {
        eprintln!("⚠️  {}", message);
    }

    fn show_error(&mut self, message: &str) {
        eprintln!("❌ {}", message);
    }

    async fn confirm_action(&mut self, message: &str, action: &str) -> Result<bool> {
        eprintln!("❌ {}", message);
        let prompt = format!("{}?", action);

        let answer = tokio::task::spawn_blocking(move || {
            Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt(&prompt)
                .default(false)
                .interact_opt()
        })
        .await??;

        Ok(answer.unwrap_or(false))
    }
}

/// Answers taken from command-line flags. Each preset is used once; after
/// that, or when a flag was not given, the inner prompter asks.
pub struct PresetPrompter<P> {
    inner: P,
    source: Option<SourceKind>,
    input: Option<String>,
    test_file: Option<PathBuf>,
}

impl<P: Prompter> PresetPrompter<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            source: None,
            input: None,
            test_file: None,
        }
    }

    pub fn with_source(mut self, source: Option<SourceKind>) -> Self {
        self.source = source;
        self
    }

    pub fn with_input(mut self, input: Option<String>) -> Self {
        self.input = input;
        self
    }

    pub fn with_test_file(mut self, test_file: Option<PathBuf>) -> Self {
        self.test_file = test_file;
        self
    }
}

impl<P: Prompter> Prompter for PresetPrompter<P> {
    async fn select(&mut self, prompt: &str, items: &[MenuItem]) -> Result<Option<usize>> {
        match self.source.take() {
            Some(kind) if kind.index() < items.len() => {
                tracing::debug!(source = %kind, "Using preset test source");
                Ok(Some(kind.index()))
            }
            _ => self.inner.select(prompt, items).await,
        }
    }

    async fn input_text(&mut self, prompt: &str, placeholder: &str) -> Result<Option<String>> {
        match self.input.take() {
            Some(input) => Ok(Some(input)),
            None => self.inner.input_text(prompt, placeholder).await,
        }
    }

    async fn pick_file(&mut self, prompt: &str) -> Result<Option<PathBuf>> {
        match self.test_file.take() {
            Some(path) => Ok(Some(path)),
            None => self.inner.pick_file(prompt).await,
        }
    }

    fn show_validation(&mut self, message: &str) {
        self.inner.show_validation(message)
    }

    fn show_error(&mut self, message: &str) {
        self.inner.show_error(message)
    }

    async fn confirm_action(&mut self, message: &str, action: &str) -> Result<bool> {
        self.inner.confirm_action(message, action).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedPrompter;

    fn source_menu() -> Vec<MenuItem> {
        SourceKind::ALL.iter().copied().map(MenuItem::from).collect()
    }

    #[test]
    fn test_menu_item_render() {
        let item = MenuItem::from(SourceKind::Direct);
        assert_eq!(item.render(), "✎ Write directly...  (Write test cases in input box)");
    }

    #[tokio::test]
    async fn test_preset_answers_once_then_defers() {
        let inner = ScriptedPrompter::new()
            .select(None)
            .text(Some("from terminal"));
        let mut prompter = PresetPrompter::new(inner)
            .with_source(Some(SourceKind::File))
            .with_input(Some("from flag".to_string()));

        let menu = source_menu();
        assert_eq!(prompter.select("pick", &menu).await.unwrap(), Some(2));
        assert_eq!(prompter.select("pick", &menu).await.unwrap(), None);

        assert_eq!(
            prompter.input_text("enter", "x").await.unwrap().as_deref(),
            Some("from flag")
        );
        assert_eq!(
            prompter.input_text("enter", "x").await.unwrap().as_deref(),
            Some("from terminal")
        );
    }

    #[tokio::test]
    async fn test_preset_test_file_once_then_defers() {
        let inner = ScriptedPrompter::new().file(Some(PathBuf::from("inner.txt")));
        let mut prompter =
            PresetPrompter::new(inner).with_test_file(Some(PathBuf::from("cases.txt")));

        assert_eq!(
            prompter.pick_file("path").await.unwrap(),
            Some(PathBuf::from("cases.txt"))
        );
        assert_eq!(
            prompter.pick_file("path").await.unwrap(),
            Some(PathBuf::from("inner.txt"))
        );
        assert_eq!(prompter.pick_file("path").await.unwrap(), None);
        // The preset never reaches the inner prompter
        assert_eq!(prompter.inner.prompts, vec!["path".to_string(), "path".to_string()]);
    }

    #[tokio::test]
    async fn test_preset_forwards_notifications() {
        let mut prompter = PresetPrompter::new(ScriptedPrompter::new());
        prompter.show_error("boom");
        prompter.show_validation("again");

        let inner = prompter.inner;
        assert_eq!(inner.errors, vec!["boom".to_string()]);
        assert_eq!(inner.validations, vec!["again".to_string()]);
    }
}
