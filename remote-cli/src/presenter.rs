//! Terminal conflict dialog

use std::io::{BufRead, Write};

use async_trait::async_trait;
use remote_client::{ConflictDecision, ConflictPresenter, ConflictPrompt};

/// Asks on stdin how to settle a conflict; anything unrecognised cancels.
pub struct TerminalPresenter;

impl TerminalPresenter {
    fn ask(prompt: &ConflictPrompt) -> ConflictDecision {
        let mut stdout = std::io::stdout().lock();
        let _ = writeln!(stdout, "Conflict: {}", prompt.message);
        let _ = writeln!(stdout, "  1) {}", prompt.clone_label);
        let _ = writeln!(stdout, "  2) {}", prompt.displace_label);
        let _ = writeln!(stdout, "  3) {}", ConflictPrompt::CANCEL_LABEL);
        let _ = write!(stdout, "How would you like to resolve this? [1-3] ");
        let _ = stdout.flush();
        drop(stdout);

        let mut line = String::new();
        if std::io::stdin().lock().read_line(&mut line).is_err() {
            return ConflictDecision::Cancel;
        }
        parse_choice(&line)
    }
}

pub(crate) fn parse_choice(line: &str) -> ConflictDecision {
    match line.trim().to_ascii_lowercase().as_str() {
        "1" | "c" | "clone" => ConflictDecision::Clone,
        "2" | "d" | "displace" => ConflictDecision::Displace,
        _ => ConflictDecision::Cancel,
    }
}

#[async_trait]
impl ConflictPresenter for TerminalPresenter {
    async fn choose(&self, prompt: &ConflictPrompt) -> ConflictDecision {
        let prompt = prompt.clone();
        tokio::task::spawn_blocking(move || Self::ask(&prompt))
            .await
            .unwrap_or(ConflictDecision::Cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_choice() {
        assert_eq!(parse_choice("1\n"), ConflictDecision::Clone);
        assert_eq!(parse_choice(" Displace "), ConflictDecision::Displace);
        assert_eq!(parse_choice("3"), ConflictDecision::Cancel);
        assert_eq!(parse_choice(""), ConflictDecision::Cancel);
    }
}
