//! Modal alert front-ends.

use std::collections::VecDeque;

use dialoguer::Select;
use dialoguer::console::Term;
use dialoguer::theme::ColorfulTheme;

use crate::infra::config::PresenterKind;

/// A modal alert: a title, a message body, and one or two buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
    pub buttons: Vec<String>,
    /// Button pre-selected when the alert opens.
    pub default_button: usize,
    /// Button reported when the alert is dismissed with escape or closed.
    pub escape_button: usize,
}

impl Alert {
    /// Informational alert with a single acknowledgement button.
    pub fn info(title: impl Into<String>, message: impl Into<String>, ok: &str) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            buttons: vec![ok.to_owned()],
            default_button: 0,
            escape_button: 0,
        }
    }

    /// Yes/no question. Escape maps to the declining button.
    pub fn confirm(
        title: impl Into<String>,
        message: impl Into<String>,
        accept: &str,
        decline: &str,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            buttons: vec![accept.to_owned(), decline.to_owned()],
            default_button: 1,
            escape_button: 1,
        }
    }
}

/// Displays alerts and reports the index of the chosen button.
pub trait Presenter {
    fn show(&mut self, alert: &Alert) -> usize;
}

impl<P: Presenter + ?Sized> Presenter for Box<P> {
    fn show(&mut self, alert: &Alert) -> usize {
        (**self).show(alert)
    }
}

/// Settle `Auto` into a concrete front-end.
///
/// File managers start the add-on without a terminal, so `Auto` means native dialogs unless
/// stderr is interactive. Builds without the `desktop` feature always prompt on the terminal.
pub fn resolve_presenter(kind: PresenterKind, interactive: bool) -> PresenterKind {
    let desired = match kind {
        PresenterKind::Auto if interactive => PresenterKind::Terminal,
        PresenterKind::Auto => PresenterKind::Desktop,
        other => other,
    };

    if desired == PresenterKind::Desktop && !cfg!(feature = "desktop") {
        if kind == PresenterKind::Desktop {
            tracing::warn!("built without native dialogs, falling back to the terminal");
        }
        return PresenterKind::Terminal;
    }
    desired
}

/// Build the front-end for `kind`, checking whether stderr is a terminal.
pub fn presenter_for(kind: PresenterKind) -> Box<dyn Presenter> {
    let interactive = Term::stderr().is_term();
    match resolve_presenter(kind, interactive) {
        #[cfg(feature = "desktop")]
        PresenterKind::Desktop => Box::new(DesktopPresenter),
        _ => Box::new(TerminalPresenter::new()),
    }
}

/// Prompts on the controlling terminal.
///
/// Without an interactive terminal the alert is written to stderr and treated as dismissed.
#[derive(Debug)]
pub struct TerminalPresenter {
    term: Term,
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }
}

impl Default for TerminalPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Presenter for TerminalPresenter {
    fn show(&mut self, alert: &Alert) -> usize {
        let _ = self.term.write_line(&format!("{}\n", alert.title));
        let _ = self.term.write_line(alert.message.trim_end());

        if !self.term.is_term() {
            return alert.escape_button;
        }

        let choice = Select::with_theme(&ColorfulTheme::default())
            .items(&alert.buttons)
            .default(alert.default_button)
            .interact_on_opt(&self.term);

        match choice {
            Ok(Some(index)) => index,
            Ok(None) => alert.escape_button,
            Err(err) => {
                tracing::debug!(error = %err, "terminal prompt failed");
                alert.escape_button
            }
        }
    }
}

/// Native message boxes.
#[cfg(feature = "desktop")]
#[derive(Debug, Default)]
pub struct DesktopPresenter;

#[cfg(feature = "desktop")]
impl Presenter for DesktopPresenter {
    fn show(&mut self, alert: &Alert) -> usize {
        use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

        let (level, buttons) = match alert.buttons.as_slice() {
            [] => (MessageLevel::Info, MessageButtons::Ok),
            [ok] => (MessageLevel::Info, MessageButtons::OkCustom(ok.clone())),
            [accept, decline, ..] => (
                MessageLevel::Warning,
                MessageButtons::OkCancelCustom(accept.clone(), decline.clone()),
            ),
        };

        let result = MessageDialog::new()
            .set_level(level)
            .set_title(&alert.title)
            .set_description(alert.message.trim_end())
            .set_buttons(buttons)
            .show();

        match result {
            MessageDialogResult::Ok | MessageDialogResult::Yes => 0,
            MessageDialogResult::Custom(label) => alert
                .buttons
                .iter()
                .position(|button| *button == label)
                .unwrap_or(alert.escape_button),
            MessageDialogResult::No | MessageDialogResult::Cancel => alert.escape_button,
        }
    }
}

/// Answers alerts from a queue and keeps every alert it was shown.
///
/// Once the queue is empty each alert resolves to its default button.
#[derive(Debug, Default)]
pub struct ScriptedPresenter {
    answers: VecDeque<usize>,
    shown: Vec<Alert>,
}

impl ScriptedPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answering(answers: impl IntoIterator<Item = usize>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            shown: Vec::new(),
        }
    }

    pub fn shown(&self) -> &[Alert] {
        &self.shown
    }
}

impl Presenter for ScriptedPresenter {
    fn show(&mut self, alert: &Alert) -> usize {
        self.shown.push(alert.clone());
        self.answers.pop_front().unwrap_or(alert.default_button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirm_escapes_to_decline() {
        let alert = Alert::confirm("Title", "Proceed?", "Open all", "Cancel");
        assert_eq!(alert.buttons, ["Open all", "Cancel"]);
        assert_eq!(alert.escape_button, 1);
    }

    #[test]
    fn auto_prefers_terminal_when_interactive() {
        assert_eq!(
            resolve_presenter(PresenterKind::Auto, true),
            PresenterKind::Terminal
        );
        assert_eq!(
            resolve_presenter(PresenterKind::Terminal, false),
            PresenterKind::Terminal
        );
    }

    #[cfg(feature = "desktop")]
    #[test]
    fn auto_uses_native_dialogs_without_terminal() {
        assert_eq!(
            resolve_presenter(PresenterKind::Auto, false),
            PresenterKind::Desktop
        );
        assert_eq!(
            resolve_presenter(PresenterKind::Desktop, true),
            PresenterKind::Desktop
        );
    }

    #[cfg(not(feature = "desktop"))]
    #[test]
    fn without_native_dialogs_terminal_is_used() {
        assert_eq!(
            resolve_presenter(PresenterKind::Auto, false),
            PresenterKind::Terminal
        );
        assert_eq!(
            resolve_presenter(PresenterKind::Desktop, false),
            PresenterKind::Terminal
        );
    }

    #[test]
    fn boxed_presenter_forwards() {
        let mut presenter: Box<ScriptedPresenter> = Box::new(ScriptedPresenter::answering([1]));
        let alert = Alert::info("Title", "Done", "OK");
        assert_eq!(Presenter::show(&mut presenter, &alert), 1);
        assert_eq!(presenter.shown().len(), 1);
    }

    #[test]
    fn scripted_presenter_records_and_answers() {
        let mut presenter = ScriptedPresenter::answering([0]);
        let alert = Alert::confirm("Title", "Proceed?", "Yes", "No");

        assert_eq!(presenter.show(&alert), 0);
        assert_eq!(presenter.show(&alert), 1);
        assert_eq!(presenter.shown().len(), 2);
    }
}
