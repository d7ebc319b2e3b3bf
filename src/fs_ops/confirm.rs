//! Overwrite confirmation.
//! The copy engine asks a [`Confirm`] implementation before replacing an existing
//! destination. The console implementation is a tty prompt; the others serve
//! headless runs and tests.

use std::collections::VecDeque;
use std::io::{self, BufRead};
use tracing::{debug, warn};

use crate::output as out;

/// Yes/no confirmation capability.
pub trait Confirm {
    /// Ask `prompt`; `true` means go ahead and overwrite.
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<P: Confirm + ?Sized> Confirm for Box<P> {
    fn confirm(&mut self, prompt: &str) -> bool {
        (**self).confirm(prompt)
    }
}

impl<P: Confirm + ?Sized> Confirm for &mut P {
    fn confirm(&mut self, prompt: &str) -> bool {
        (**self).confirm(prompt)
    }
}

/// `y` or `yes`, ignoring case and surrounding whitespace.
pub fn is_affirmative(answer: &str) -> bool {
    let a = answer.trim();
    a.eq_ignore_ascii_case("y") || a.eq_ignore_ascii_case("yes")
}

/// Interactive prompt on stderr, answer read from stdin.
/// Declines when stdin is not a terminal or cannot be read.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsolePrompt;

impl Confirm for ConsolePrompt {
    fn confirm(&mut self, prompt: &str) -> bool {
        if !atty::is(atty::Stream::Stdin) {
            warn!(prompt, "stdin is not a terminal; declining overwrite");
            return false;
        }
        out::print_prompt(prompt);
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) => false,
            Ok(_) => is_affirmative(&line),
            Err(e) => {
                warn!(error = %e, "failed to read answer; declining overwrite");
                false
            }
        }
    }
}

/// Always overwrite (prompting disabled in effect).
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysOverwrite;

impl Confirm for AlwaysOverwrite {
    fn confirm(&mut self, _prompt: &str) -> bool {
        true
    }
}

/// Never overwrite; existing destinations are kept.
#[derive(Debug, Default, Clone, Copy)]
pub struct NeverOverwrite;

impl Confirm for NeverOverwrite {
    fn confirm(&mut self, _prompt: &str) -> bool {
        false
    }
}

/// Replays a fixed list of answers and records every prompt it was shown.
/// Declines once the answers run out.
#[derive(Debug, Default, Clone)]
pub struct Scripted {
    answers: VecDeque<bool>,
    prompts: Vec<String>,
}

impl Scripted {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            prompts: Vec::new(),
        }
    }

    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }
}

impl Confirm for Scripted {
    fn confirm(&mut self, prompt: &str) -> bool {
        self.prompts.push(prompt.to_string());
        let answer = self.answers.pop_front().unwrap_or(false);
        debug!(prompt, answer, "scripted confirmation");
        answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn affirmative_answers() {
        for a in ["y", "Y", "yes", "YES", " Yes\n"] {
            assert!(is_affirmative(a), "{a:?}");
        }
        for a in ["", "n", "no", "yess", "ye"] {
            assert!(!is_affirmative(a), "{a:?}");
        }
    }

    #[test]
    fn scripted_replays_then_declines() {
        let mut s = Scripted::new([true, false]);
        assert!(s.confirm("one"));
        assert!(!s.confirm("two"));
        assert!(!s.confirm("three"));
        assert_eq!(s.prompts(), ["one", "two", "three"]);
    }

    #[test]
    fn boxed_dyn_confirm_dispatches() {
        let mut b: Box<dyn Confirm> = Box::new(AlwaysOverwrite);
        assert!(b.confirm("x"));
        let mut n = NeverOverwrite;
        let r: &mut dyn Confirm = &mut n;
        assert!(!r.confirm("x"));
    }
}
