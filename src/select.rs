//! Non-interactive selection prompts.
//!
//! Actions that need the user to pick from a list go through [`Selector`]. An
//! editor host would implement it with a completion UI; the CLI ships
//! [`FirstCandidate`] and [`Preselected`].

pub trait Selector {
    /// Pick one of `candidates`, or `None` to cancel.
    fn select_one(&mut self, prompt: &str, candidates: &[String]) -> Option<String>;

    /// Pick any number of `candidates`. Defaults to a single pick.
    fn select_many(&mut self, prompt: &str, candidates: &[String]) -> Vec<String> {
        self.select_one(prompt, candidates).into_iter().collect()
    }
}

/// Always takes the top-ranked candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstCandidate;

impl Selector for FirstCandidate {
    fn select_one(&mut self, prompt: &str, candidates: &[String]) -> Option<String> {
        let choice = candidates.first().cloned();
        log::debug!("{prompt} -> {choice:?}");
        choice
    }
}

/// Answers given ahead of time, e.g. on the command line.
///
/// Only answers that appear among the offered candidates are returned, unless
/// the candidate list is empty (free-form input).
#[derive(Debug, Clone, Default)]
pub struct Preselected(pub Vec<String>);

impl Preselected {
    fn accepted<'a>(&'a self, candidates: &'a [String]) -> impl Iterator<Item = &'a String> + 'a {
        self.0
            .iter()
            .filter(move |answer| candidates.is_empty() || candidates.contains(answer))
    }
}

impl Selector for Preselected {
    fn select_one(&mut self, prompt: &str, candidates: &[String]) -> Option<String> {
        let choice = self.accepted(candidates).next().cloned();
        log::debug!("{prompt} -> {choice:?}");
        choice
    }

    fn select_many(&mut self, prompt: &str, candidates: &[String]) -> Vec<String> {
        let choices: Vec<String> = self.accepted(candidates).cloned().collect();
        log::debug!("{prompt} -> {choices:?}");
        choices
    }
}
