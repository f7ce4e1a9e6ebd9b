use crate::types::Problem;

/// The ordered set of problems discovered in a single cycle. Built fresh
/// every cycle and never merged across cycles.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Report {
    pub problems: Vec<Problem>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, problem: Problem) {
        self.problems.push(problem);
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn problem_count(&self) -> usize {
        self.problems.len()
    }

    /// Render the report to its canonical text. This exact concatenation is
    /// what gets sent to the webhook and what deduplication compares, so the
    /// output depends on nothing but the problems and their order.
    pub fn render(&self) -> String {
        let mut message = String::new();
        for problem in &self.problems {
            message.push_str("**");
            message.push_str(&problem.summary);
            message.push_str("**\n");
            if !problem.description.is_empty() {
                message.push_str(&problem.description);
            }
            message.push('\n');
        }
        message
    }
}
