//! Summaries of analyzer output.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

use crate::{Problem, ProblemKind};

/// Problems of one analysis with counts per kind.
///
/// `Display` renders a plain-text summary followed by one line per problem.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemReport {
    counts: BTreeMap<ProblemKind, usize>,
    problems: Vec<Problem>,
}

impl ProblemReport {
    #[must_use]
    pub fn new(problems: Vec<Problem>) -> Self {
        let mut counts = BTreeMap::new();
        for problem in &problems {
            *counts.entry(problem.kind).or_default() += 1;
        }
        Self { counts, problems }
    }

    #[must_use]
    pub fn count(&self, kind: ProblemKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Non-zero counts in kind order.
    pub fn counts(&self) -> impl Iterator<Item = (ProblemKind, usize)> + '_ {
        self.counts.iter().map(|(&kind, &count)| (kind, count))
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.problems.len()
    }

    #[must_use]
    pub fn resolvable(&self) -> usize {
        self.problems.iter().filter(|p| p.is_resolvable()).count()
    }

    #[must_use]
    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl From<Vec<Problem>> for ProblemReport {
    fn from(problems: Vec<Problem>) -> Self {
        Self::new(problems)
    }
}

impl fmt::Display for ProblemReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} problems ({} resolvable)",
            self.total(),
            self.resolvable()
        )?;
        for (kind, count) in self.counts() {
            writeln!(f, "  {kind}: {count}")?;
        }
        for problem in &self.problems {
            writeln!(f, "{problem}")?;
        }
        Ok(())
    }
}
