use rustc_hash::FxHashMap;
use tabular::{Row, Table};

use std::fmt;

use crate::model::{OptDir, StandardFormModel};
use crate::simplex::{Termination, TerminalTableau};

/// Optimal objective value and variable assignment of a solved model.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution {
    objective_value: f64,
    sense: OptDir,
    assignment: Vec<(String, f64)>,
    index: FxHashMap<String, usize>,
    termination: Termination,
    pivots: usize,
}

impl Solution {
    /// Objective value in the sense of the model (a `Min` model reports its minimum).
    pub fn objective_value(&self) -> f64 {
        self.objective_value
    }

    pub fn sense(&self) -> OptDir {
        self.sense
    }

    /// `(name, value)` for every decision variable, in declaration order.
    pub fn assignment(&self) -> &[(String, f64)] {
        &self.assignment
    }

    pub fn value(&self, name: &str) -> Option<f64> {
        self.index.get(name).map(|&i| self.assignment[i].1)
    }

    pub fn values(&self) -> Vec<f64> {
        self.assignment.iter().map(|(_, v)| *v).collect()
    }

    pub fn termination(&self) -> Termination {
        self.termination
    }

    pub fn pivots(&self) -> usize {
        self.pivots
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut table = Table::new("{:<} {:>}");
        for (name, value) in &self.assignment {
            table.add_row(Row::new().with_cell(format!("{}:", name)).with_cell(value));
        }
        writeln!(f, "RESULT")?;
        write!(f, "{}", table)?;
        write!(
            f,
            "{} objective: {}",
            self.sense.to_string().to_lowercase(),
            self.objective_value
        )
    }
}

/// Reads the variable assignment off a terminal tableau.
pub struct SolutionExtractor;

impl SolutionExtractor {
    /// The basic variable of row `i` is `B[i]` with value `b[i] / row_scale[i]`;
    /// every decision variable not in `B` is zero. The objective is evaluated
    /// with the model's original coefficients. Values within `feas_tol` of
    /// zero are reported as exactly zero.
    pub fn extract(terminal: &TerminalTableau, mdl: &StandardFormModel, feas_tol: f64) -> Solution {
        let tbl = terminal.tableau();
        let n = mdl.n_variables();

        let mut x = vec![0.0_f64; n];
        for (row, id) in tbl.basic().iter().enumerate() {
            if !id.is_slack(n) {
                x[id.index()] = tbl.basic_value(row);
            }
        }
        for v in x.iter_mut() {
            if v.abs() < feas_tol {
                *v = 0.0;
            }
        }

        let objective_value = mdl
            .objective()
            .coefficients()
            .iter()
            .zip(&x)
            .fold(0.0_f64, |acc, (c, v)| acc + c * v);

        let assignment: Vec<(String, f64)> = mdl
            .variables()
            .iter()
            .map(|var| (var.name().to_string(), x[var.index()]))
            .collect();
        let index = assignment
            .iter()
            .enumerate()
            .map(|(i, (name, _))| (name.clone(), i))
            .collect();

        Solution {
            objective_value,
            sense: mdl.objective().sense(),
            assignment,
            index,
            termination: terminal.termination(),
            pivots: terminal.pivots(),
        }
    }
}
