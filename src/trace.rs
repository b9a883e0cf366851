use colored::*;

use crate::tableau::{Tableau, TableauIx};

/// One applied pivot, as seen by a [`TraceSink`].
#[derive(Debug)]
pub struct PivotStep<'a> {
    /// 1-based pivot count
    pub step: usize,
    pub entering: &'a str,
    pub leaving: &'a str,
    /// Row and column of the pivot element in `tableau`.
    pub ix: TableauIx,
    /// Tableau after the pivot.
    pub tableau: &'a Tableau,
}

/// Observer of the pivot loop. Receives read-only views only.
pub trait TraceSink {
    /// Called once with the starting tableau, before any pivot.
    fn on_start(&mut self, _tableau: &Tableau) {}

    fn on_pivot(&mut self, step: &PivotStep<'_>);
}

/// Prints the pivot narration and the tableau after every step.
#[derive(Debug, Default)]
pub struct ConsoleTrace {
    show_tableau: bool,
}

impl ConsoleTrace {
    pub fn new(show_tableau: bool) -> Self {
        Self { show_tableau }
    }

    pub(crate) fn format_step(&self, step: &PivotStep<'_>) -> String {
        let mut out = format!(
            "{} {}\n{} {} ({})\n",
            "pivot column is".bold(),
            step.entering,
            "pivot row is row".bold(),
            step.ix.i() + 1,
            step.leaving
        );
        if self.show_tableau {
            out.push('\n');
            out.push_str(&step.tableau.render(Some(step.ix)));
        }
        out
    }
}

impl TraceSink for ConsoleTrace {
    fn on_start(&mut self, tableau: &Tableau) {
        if self.show_tableau {
            println!("{}", tableau);
        }
    }

    fn on_pivot(&mut self, step: &PivotStep<'_>) {
        println!("{}", self.format_step(step));
    }
}

/// A pivot as stored by [`RecordingTrace`].
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedPivot {
    pub step: usize,
    pub entering: String,
    pub leaving: String,
    pub ix: TableauIx,
    pub tableau: Tableau,
}

/// Keeps a copy of every step for later inspection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordingTrace {
    pub initial: Option<Tableau>,
    pub steps: Vec<RecordedPivot>,
}

impl RecordingTrace {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TraceSink for RecordingTrace {
    fn on_start(&mut self, tableau: &Tableau) {
        self.initial = Some(tableau.clone());
    }

    fn on_pivot(&mut self, step: &PivotStep<'_>) {
        self.steps.push(RecordedPivot {
            step: step.step,
            entering: step.entering.to_string(),
            leaving: step.leaving.to_string(),
            ix: step.ix,
            tableau: step.tableau.clone(),
        });
    }
}
