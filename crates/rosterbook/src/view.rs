//! Interactive form view.
//!
//! This module implements the registry's single interactive surface: a
//! line-oriented session that renders the collection, fills the draft
//! fields, and dispatches submit / begin-edit / delete. All blocking user
//! interaction goes through the [`Prompt`] trait so a test can script an
//! entire session.

use std::io::Write;

use tracing::debug;

use crate::error::Result;
use crate::record::Draft;
use crate::registry::{Registry, SubmitOutcome};

/// Warning shown when a submit is rejected for empty fields.
pub const FILL_ALL_FIELDS: &str = "Fill in all fields!";

/// Source of blocking user interaction.
///
/// `read_line` returns `None` at end of input, which ends the session the
/// same way `quit` does.
pub trait Prompt {
    /// Show a blocking warning to the user.
    fn alert(&mut self, message: &str);

    /// Ask a yes/no question; `false` aborts the pending action.
    fn confirm(&mut self, message: &str) -> bool;

    /// Read one line of input, shown behind the given prompt text.
    fn read_line(&mut self, prompt: &str) -> Option<String>;
}

/// A [`Prompt`] backed by stdin/stderr for real terminal sessions.
#[derive(Debug, Default)]
pub struct ConsolePrompt;

impl Prompt for ConsolePrompt {
    fn alert(&mut self, message: &str) {
        eprintln!("! {message}");
    }

    fn confirm(&mut self, message: &str) -> bool {
        match self.read_line(&format!("{message} [y/N] ")) {
            Some(answer) => matches!(answer.trim(), "y" | "Y" | "yes"),
            None => false,
        }
    }

    fn read_line(&mut self, prompt: &str) -> Option<String> {
        eprint!("{prompt}");
        let _ = std::io::stderr().flush();

        let mut line = String::new();
        match std::io::stdin().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
}

/// The interactive form over a registry.
///
/// Generic over its prompt source and output sink; production code uses
/// [`ConsolePrompt`] and stdout.
#[derive(Debug)]
pub struct FormView<P, W> {
    registry: Registry,
    prompt: P,
    out: W,
    confirm_delete: bool,
}

impl<P: Prompt, W: Write> FormView<P, W> {
    /// Create a form view over the given registry.
    pub fn new(registry: Registry, prompt: P, out: W, confirm_delete: bool) -> Self {
        Self {
            registry,
            prompt,
            out,
            confirm_delete,
        }
    }

    /// Give the registry back, consuming the view.
    #[must_use]
    pub fn into_registry(self) -> Registry {
        self.registry
    }

    /// Run the session until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if writing output or persisting the registry fails.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.render()?;

            let Some(line) = self.prompt.read_line("roster> ") else {
                break;
            };

            let line = line.trim();
            let (command, arg) = match line.split_once(' ') {
                Some((cmd, rest)) => (cmd, rest.trim()),
                None => (line, ""),
            };

            match command {
                "" => {}
                "add" | "save" | "a" | "s" => self.handle_submit()?,
                "edit" | "e" => self.handle_edit(arg),
                "delete" | "d" => self.handle_delete(arg)?,
                "quit" | "q" => break,
                other => {
                    self.prompt.alert(&format!(
                        "Unknown command: {other} (add, edit N, save, delete N, quit)"
                    ));
                }
            }
        }

        debug!("Form session ended");
        Ok(())
    }

    /// Render the record list and the form mode banner.
    fn render(&mut self) -> Result<()> {
        writeln!(self.out)?;
        if self.registry.users().is_empty() {
            writeln!(self.out, "No users registered yet.")?;
        } else {
            for (index, user) in self.registry.users().iter().enumerate() {
                writeln!(
                    self.out,
                    "{:>3}. {}  <{}>  {}",
                    index + 1,
                    user.name,
                    user.email,
                    user.city
                )?;
            }
        }

        match self.registry.editing() {
            Some(id) => writeln!(self.out, "-- editing user {id} --")?,
            None => writeln!(self.out, "-- new user --")?,
        }
        Ok(())
    }

    /// Read the three fields into the drafts and submit.
    ///
    /// When a draft field already holds a value (edit mode), an empty
    /// answer keeps it.
    fn handle_submit(&mut self) -> Result<()> {
        let mut draft = self.registry.draft().clone();
        draft.name = self.read_field("Name", &draft.name);
        draft.email = self.read_field("Email", &draft.email);
        draft.city = self.read_field("City", &draft.city);
        self.registry.set_draft(draft);

        match self.registry.submit()? {
            SubmitOutcome::Added(_) => writeln!(self.out, "User added.")?,
            SubmitOutcome::Updated(_) => writeln!(self.out, "Changes saved.")?,
            SubmitOutcome::MissingFields => self.prompt.alert(FILL_ALL_FIELDS),
        }
        Ok(())
    }

    /// Begin editing the Nth listed record.
    ///
    /// The drafts are prefilled from the record; the edit is applied by the
    /// next `save`.
    fn handle_edit(&mut self, arg: &str) {
        if let Some(id) = self.resolve_index(arg) {
            // resolve_index only returns ids that exist, so this cannot fail
            self.registry.begin_edit(id);
        }
    }

    /// Delete the Nth listed record behind a confirmation.
    fn handle_delete(&mut self, arg: &str) -> Result<()> {
        let Some(id) = self.resolve_index(arg) else {
            return Ok(());
        };

        let name = self
            .registry
            .get(id)
            .map(|u| u.name.clone())
            .unwrap_or_default();
        if self.confirm_delete && !self.prompt.confirm(&format!("Really delete {name}?")) {
            return Ok(());
        }

        if self.registry.delete(id)? {
            writeln!(self.out, "User deleted.")?;
        }
        Ok(())
    }

    /// Map a 1-based list position to a record id.
    fn resolve_index(&mut self, arg: &str) -> Option<i64> {
        let Ok(index) = arg.parse::<usize>() else {
            self.prompt.alert("Expected a list position, e.g. `edit 1`");
            return None;
        };
        match index
            .checked_sub(1)
            .and_then(|i| self.registry.users().get(i))
        {
            Some(user) => Some(user.id),
            None => {
                self.prompt.alert(&format!("No user at position {index}"));
                None
            }
        }
    }

    /// Read one form field, falling back to the current draft value on an
    /// empty answer.
    fn read_field(&mut self, label: &str, current: &str) -> String {
        let prompt = if current.is_empty() {
            format!("{label}: ")
        } else {
            format!("{label} [{current}]: ")
        };
        match self.prompt.read_line(&prompt) {
            Some(answer) if !answer.is_empty() => answer,
            _ => current.to_string(),
        }
    }
}

/// Apply a draft in one shot: set it and submit.
///
/// Convenience for non-interactive callers that share the registry
/// semantics without a session.
///
/// # Errors
///
/// Returns an error if persisting the collection fails.
pub fn submit_once(registry: &mut Registry, draft: Draft) -> Result<SubmitOutcome> {
    registry.set_draft(draft);
    registry.submit()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SlotStore;
    use std::collections::VecDeque;

    /// A prompt that replays a scripted session and records alerts.
    #[derive(Debug, Default)]
    struct ScriptedPrompt {
        lines: VecDeque<String>,
        confirms: VecDeque<bool>,
        alerts: Vec<String>,
    }

    impl ScriptedPrompt {
        fn new(lines: &[&str]) -> Self {
            Self {
                lines: lines.iter().map(ToString::to_string).collect(),
                confirms: VecDeque::new(),
                alerts: Vec::new(),
            }
        }

        fn with_confirms(mut self, answers: &[bool]) -> Self {
            self.confirms = answers.iter().copied().collect();
            self
        }
    }

    impl Prompt for ScriptedPrompt {
        fn alert(&mut self, message: &str) {
            self.alerts.push(message.to_string());
        }

        fn confirm(&mut self, _message: &str) -> bool {
            self.confirms.pop_front().unwrap_or(false)
        }

        fn read_line(&mut self, _prompt: &str) -> Option<String> {
            self.lines.pop_front()
        }
    }

    fn new_registry() -> Registry {
        Registry::open(SlotStore::open_in_memory().unwrap())
    }

    fn run_session(
        registry: Registry,
        prompt: ScriptedPrompt,
    ) -> (Registry, ScriptedPrompt, String) {
        let mut view = FormView::new(registry, prompt, Vec::new(), true);
        view.run().unwrap();
        let FormView {
            registry,
            prompt,
            out,
            ..
        } = view;
        (registry, prompt, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_add_user_session() {
        let prompt = ScriptedPrompt::new(&["add", "Ana", "a@x.com", "Rio", "quit"]);
        let (registry, prompt, out) = run_session(new_registry(), prompt);

        assert_eq!(registry.users().len(), 1);
        assert_eq!(registry.users()[0].name, "Ana");
        assert!(prompt.alerts.is_empty());
        assert!(out.contains("User added."));
        assert!(out.contains("Ana"));
    }

    #[test]
    fn test_empty_fields_trigger_alert() {
        let prompt = ScriptedPrompt::new(&["add", "Ana", "", "", "quit"]);
        let (registry, prompt, _) = run_session(new_registry(), prompt);

        assert!(registry.users().is_empty());
        assert_eq!(prompt.alerts, vec![FILL_ALL_FIELDS.to_string()]);
    }

    #[test]
    fn test_edit_keeps_unanswered_fields() {
        let mut registry = new_registry();
        submit_once(&mut registry, Draft::new("Ana", "a@x.com", "Rio")).unwrap();

        // edit 1 prefills the drafts; save keeps name and email, changes city
        let prompt = ScriptedPrompt::new(&["edit 1", "save", "", "", "SP", "quit"]);
        let (registry, _, out) = run_session(registry, prompt);

        assert_eq!(registry.users().len(), 1);
        let user = &registry.users()[0];
        assert_eq!(user.name, "Ana");
        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.city, "SP");
        assert!(out.contains("Changes saved."));
    }

    #[test]
    fn test_edit_shows_editing_banner_until_saved() {
        let mut registry = new_registry();
        submit_once(&mut registry, Draft::new("Ana", "a@x.com", "Rio")).unwrap();
        let id = registry.users()[0].id;

        let prompt = ScriptedPrompt::new(&["edit 1", "save", "", "", "SP", "quit"]);
        let (registry, _, out) = run_session(registry, prompt);

        // Banner shows edit mode between edit and save, creating mode after
        assert!(out.contains(&format!("-- editing user {id} --")));
        assert!(out.contains("-- new user --"));
        assert!(registry.editing().is_none());
    }

    #[test]
    fn test_delete_confirmed() {
        let mut registry = new_registry();
        submit_once(&mut registry, Draft::new("Ana", "a@x.com", "Rio")).unwrap();

        let prompt = ScriptedPrompt::new(&["delete 1", "quit"]).with_confirms(&[true]);
        let (registry, _, out) = run_session(registry, prompt);

        assert!(registry.users().is_empty());
        assert!(out.contains("User deleted."));
        assert!(out.contains("No users registered yet."));
    }

    #[test]
    fn test_delete_declined_changes_nothing() {
        let mut registry = new_registry();
        submit_once(&mut registry, Draft::new("Ana", "a@x.com", "Rio")).unwrap();

        let prompt = ScriptedPrompt::new(&["delete 1", "quit"]).with_confirms(&[false]);
        let (registry, _, out) = run_session(registry, prompt);

        assert_eq!(registry.users().len(), 1);
        assert!(!out.contains("User deleted."));
    }

    #[test]
    fn test_delete_without_confirmation_config() {
        let mut registry = new_registry();
        submit_once(&mut registry, Draft::new("Ana", "a@x.com", "Rio")).unwrap();

        // confirm_delete = false bypasses the prompt entirely
        let prompt = ScriptedPrompt::new(&["delete 1", "quit"]);
        let mut view = FormView::new(registry, prompt, Vec::new(), false);
        view.run().unwrap();
        let registry = view.into_registry();

        assert!(registry.users().is_empty());
    }

    #[test]
    fn test_out_of_range_position_alerts() {
        let prompt = ScriptedPrompt::new(&["delete 5", "quit"]);
        let (registry, prompt, _) = run_session(new_registry(), prompt);

        assert!(registry.users().is_empty());
        assert_eq!(prompt.alerts.len(), 1);
        assert!(prompt.alerts[0].contains("position 5"));
    }

    #[test]
    fn test_non_numeric_position_alerts() {
        let prompt = ScriptedPrompt::new(&["edit abc", "quit"]);
        let (_, prompt, _) = run_session(new_registry(), prompt);

        assert_eq!(prompt.alerts.len(), 1);
        assert!(prompt.alerts[0].contains("list position"));
    }

    #[test]
    fn test_unknown_command_alerts() {
        let prompt = ScriptedPrompt::new(&["frobnicate", "quit"]);
        let (_, prompt, _) = run_session(new_registry(), prompt);

        assert_eq!(prompt.alerts.len(), 1);
        assert!(prompt.alerts[0].contains("frobnicate"));
    }

    #[test]
    fn test_end_of_input_ends_session() {
        let prompt = ScriptedPrompt::new(&["add", "Ana", "a@x.com", "Rio"]);
        let (registry, _, _) = run_session(new_registry(), prompt);

        // Session ended cleanly at EOF after the add completed
        assert_eq!(registry.users().len(), 1);
    }

    #[test]
    fn test_empty_command_rerenders() {
        let prompt = ScriptedPrompt::new(&["", "quit"]);
        let (_, prompt, out) = run_session(new_registry(), prompt);

        assert!(prompt.alerts.is_empty());
        assert!(out.matches("No users registered yet.").count() >= 2);
    }

    #[test]
    fn test_submit_once_helper() {
        let mut registry = new_registry();
        let outcome = submit_once(&mut registry, Draft::new("Ana", "a@x.com", "Rio")).unwrap();
        assert!(matches!(outcome, SubmitOutcome::Added(_)));

        let outcome = submit_once(&mut registry, Draft::new("", "", "")).unwrap();
        assert_eq!(outcome, SubmitOutcome::MissingFields);
    }
}
