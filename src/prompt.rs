//! Questions asked of the person running the tool.

use crate::AuthError;

pub trait Prompter: Send + Sync {
    fn confirm(&self, message: &str) -> Result<bool, AuthError>;

    fn input(&self, message: &str) -> Result<String, AuthError>;

    /// Like [`Prompter::input`] without echoing what is typed.
    fn secret(&self, message: &str) -> Result<String, AuthError>;

    /// Returns `None` when nothing was chosen.
    fn select(&self, message: &str, choices: &[String]) -> Result<Option<String>, AuthError>;

    fn notice(&self, message: &str);
}

#[cfg(feature = "cli")]
pub use terminal::TerminalPrompter;

#[cfg(feature = "cli")]
mod terminal {
    use std::io::{self, BufRead, Write};

    use super::Prompter;
    use crate::AuthError;

    #[derive(Debug, Clone, Copy, Default)]
    pub struct TerminalPrompter;

    impl TerminalPrompter {
        fn ask(&self, message: &str) -> Result<String, AuthError> {
            let mut stderr = io::stderr();
            write!(stderr, "? {message} ")?;
            stderr.flush()?;

            let mut line = String::new();
            let read = io::stdin().lock().read_line(&mut line)?;
            if read == 0 {
                return Err(AuthError::Prompt("stdin closed".to_string()));
            }
            Ok(line.trim().to_string())
        }
    }

    impl Prompter for TerminalPrompter {
        fn confirm(&self, message: &str) -> Result<bool, AuthError> {
            let answer = self.ask(&format!("{message} (Y/n)"))?;
            Ok(parse_confirm(&answer))
        }

        fn input(&self, message: &str) -> Result<String, AuthError> {
            self.ask(message)
        }

        fn secret(&self, message: &str) -> Result<String, AuthError> {
            rpassword::prompt_password(format!("? {message} "))
                .map(|value| value.trim().to_string())
                .map_err(|err| AuthError::Prompt(err.to_string()))
        }

        fn select(&self, message: &str, choices: &[String]) -> Result<Option<String>, AuthError> {
            if choices.is_empty() {
                return Ok(None);
            }

            let mut stderr = io::stderr();
            writeln!(stderr, "? {message}")?;
            for (index, choice) in choices.iter().enumerate() {
                writeln!(stderr, "  {}) {choice}", index + 1)?;
            }
            let answer = self.ask("Choice:")?;
            Ok(parse_choice(&answer, choices))
        }

        fn notice(&self, message: &str) {
            eprintln!("! {message}");
        }
    }

    fn parse_confirm(answer: &str) -> bool {
        !matches!(answer.to_ascii_lowercase().as_str(), "n" | "no")
    }

    /// Accepts a 1-based index or the choice itself.
    fn parse_choice(answer: &str, choices: &[String]) -> Option<String> {
        if answer.is_empty() {
            return None;
        }
        if let Ok(index) = answer.parse::<usize>() {
            return index
                .checked_sub(1)
                .and_then(|index| choices.get(index))
                .cloned();
        }
        choices.iter().find(|choice| *choice == answer).cloned()
    }

}
