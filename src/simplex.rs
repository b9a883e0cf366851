use log::{debug, info, warn};

use crate::error::{SolverError, SolverResult};
use crate::model::{Model, StandardFormModel};
use crate::pivot::{Dantzig, PivotRule};
use crate::settings::SimplexSettings;
use crate::solution::{Solution, SolutionExtractor};
use crate::tableau::{Tableau, TableauIx};
use crate::trace::{PivotStep, TraceSink};

/// Why the pivot loop stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Termination {
    /// No reduced cost exceeds the feasibility tolerance.
    Optimal,
    /// The entering column has no positive entry.
    Unbounded,
}

/// The tableau left by [`Simplex::run`], tagged with its termination reason.
#[derive(Clone, Debug, PartialEq)]
pub struct TerminalTableau {
    tableau: Tableau,
    termination: Termination,
    pivots: usize,
    unbounded_col: Option<usize>,
}

impl TerminalTableau {
    pub fn tableau(&self) -> &Tableau {
        &self.tableau
    }

    pub fn into_tableau(self) -> Tableau {
        self.tableau
    }

    pub fn termination(&self) -> Termination {
        self.termination
    }

    pub fn pivots(&self) -> usize {
        self.pivots
    }

    /// Column that could not be bounded, for an `Unbounded` termination.
    pub fn unbounded_col(&self) -> Option<usize> {
        self.unbounded_col
    }
}

/// Tableau simplex engine for `max c·x s.t. Ax ≤ b, x ≥ 0` with `b ≥ 0`.
#[derive(Clone, Debug)]
pub struct Simplex<R: PivotRule = Dantzig> {
    settings: SimplexSettings,
    rule: R,
}

impl Simplex<Dantzig> {
    pub fn new(settings: SimplexSettings) -> Self {
        Self {
            settings,
            rule: Dantzig,
        }
    }
}

impl Default for Simplex<Dantzig> {
    fn default() -> Self {
        Self::new(SimplexSettings::default())
    }
}

impl<R: PivotRule> Simplex<R> {
    pub fn with_rule(settings: SimplexSettings, rule: R) -> Self {
        Self { settings, rule }
    }

    pub fn settings(&self) -> &SimplexSettings {
        &self.settings
    }

    /// Pivots until the rule reports optimality or an unbounded column.
    pub fn run(
        &self,
        mut tbl: Tableau,
        mut trace: Option<&mut dyn TraceSink>,
    ) -> SolverResult<TerminalTableau> {
        let limit = self.settings.iteration_limit(tbl.n_cols(), tbl.n_rows());
        if let Some(sink) = trace.as_deref_mut() {
            sink.on_start(&tbl);
        }

        let mut pivots = 0;
        loop {
            let e = match self.rule.entering(&tbl, &self.settings) {
                Some(e) => e,
                None => {
                    debug!("optimal after {} pivot(s)", pivots);
                    return Ok(TerminalTableau {
                        tableau: tbl,
                        termination: Termination::Optimal,
                        pivots,
                        unbounded_col: None,
                    });
                }
            };

            let l = match self.rule.leaving(&tbl, e, &self.settings) {
                Some(l) => l,
                None => {
                    debug!(
                        "column {} ({}) is unbounded after {} pivot(s)",
                        e,
                        tbl.name(tbl.column(e)),
                        pivots
                    );
                    return Ok(TerminalTableau {
                        tableau: tbl,
                        termination: Termination::Unbounded,
                        pivots,
                        unbounded_col: Some(e),
                    });
                }
            };

            if pivots >= limit {
                return Err(SolverError::IterationLimitExceeded { limit });
            }

            let entering = tbl.column(e);
            let leaving = tbl.basic()[l];
            debug!(
                "pivot {}: {} enters at column {}, {} leaves row {} (ratio {})",
                pivots + 1,
                tbl.name(entering),
                e,
                tbl.name(leaving),
                l,
                tbl.b()[l] / tbl.a()[[l, e]]
            );

            let ix = TableauIx::new(l, e);
            tbl.pivot(ix, self.settings.pivot_tol)?;
            pivots += 1;
            self.check_feasible(&tbl);

            if let Some(sink) = trace.as_deref_mut() {
                sink.on_pivot(&PivotStep {
                    step: pivots,
                    entering: tbl.name(entering),
                    leaving: tbl.name(leaving),
                    ix,
                    tableau: &tbl,
                });
            }
        }
    }

    fn check_feasible(&self, tbl: &Tableau) {
        for (i, v) in tbl.b().iter().enumerate() {
            if *v < -self.settings.feas_tol {
                warn!("row {} lost feasibility: b = {}", i, v);
            }
        }
    }

    pub fn solve(&self, mdl: &Model) -> SolverResult<Solution> {
        let std = mdl.as_standard_form()?;
        self.solve_standard(&std, None)
    }

    /// Like [`Simplex::solve`], reporting every pivot to `trace`.
    pub fn solve_traced(&self, mdl: &Model, trace: &mut dyn TraceSink) -> SolverResult<Solution> {
        let std = mdl.as_standard_form()?;
        self.solve_standard(&std, Some(trace))
    }

    pub fn solve_standard(
        &self,
        std: &StandardFormModel,
        trace: Option<&mut dyn TraceSink>,
    ) -> SolverResult<Solution> {
        info!(
            "solving {} ({} variable(s), {} constraint(s))",
            std.objective().sense(),
            std.n_variables(),
            std.n_constraints()
        );
        let tbl = Tableau::initialize(std)?;
        let terminal = self.run(tbl, trace)?;

        match terminal.termination() {
            Termination::Optimal => {
                let sol = SolutionExtractor::extract(&terminal, std, self.settings.feas_tol);
                info!(
                    "optimal objective {} after {} pivot(s)",
                    sol.objective_value(),
                    sol.pivots()
                );
                Ok(sol)
            }
            Termination::Unbounded => {
                let col = terminal.unbounded_col().unwrap_or_default();
                let tableau = terminal.into_tableau();
                let entering = tableau.name(tableau.column(col)).to_string();
                info!("objective is unbounded along {}", entering);
                Err(SolverError::Unbounded {
                    entering,
                    tableau: Box::new(tableau),
                })
            }
        }
    }
}
