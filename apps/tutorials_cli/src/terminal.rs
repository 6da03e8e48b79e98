//! Terminal-backed confirmation and notice display.

use std::io::{self, BufRead, Write};

use client_core::{Confirmation, Notice, NoticeSink};

pub struct TerminalPrompt;

impl Confirmation for TerminalPrompt {
    fn confirm(&self, prompt: &str) -> bool {
        let mut stderr = io::stderr();
        let _ = write!(stderr, "{prompt} [y/N] ");
        let _ = stderr.flush();

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_affirmative(&answer),
            Err(err) => {
                tracing::warn!(error = %err, "failed to read confirmation");
                false
            }
        }
    }
}

impl NoticeSink for TerminalPrompt {
    fn notify(&self, notice: &Notice) {
        eprintln!("{notice}");
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
