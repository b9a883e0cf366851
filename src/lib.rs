//! Tableau simplex solver for linear programs of the form
//! `max c·x s.t. Ax ≤ b, x ≥ 0` with `b ≥ 0`.
//!
//! ```
//! use tabsimplex::{Constraint, Model, OptDir, Simplex};
//!
//! let mut mdl = Model::new();
//! mdl.add_variable("x1");
//! mdl.add_variable("x2");
//! mdl.set_objective(OptDir::Max, [18.0, 12.5]);
//! mdl.add_constraint(Constraint::new([1, 1], 20));
//! mdl.add_constraint(Constraint::new([1, 0], 12));
//! mdl.add_constraint(Constraint::new([0, 1], 16));
//!
//! let simplex: Simplex = Simplex::default();
//! let sol = simplex.solve(&mdl).unwrap();
//! assert_eq!(sol.value("x1"), Some(12.0));
//! assert_eq!(sol.value("x2"), Some(8.0));
//! assert_eq!(sol.objective_value(), 316.0);
//! ```

mod constraint;
mod error;
pub mod expr;
mod model;
mod pivot;
mod settings;
mod simplex;
mod solution;
mod tableau;
pub mod trace;
mod var;

pub use crate::constraint::Constraint;
pub use crate::error::{ParseError, SolverError, SolverResult};
pub use crate::model::{Model, ObjectiveFunction, OptDir, StandardFormModel};
pub use crate::pivot::{Dantzig, PivotRule};
pub use crate::settings::{
    SettingsError, SimplexSettings, SimplexSettingsBuilder, SimplexSettingsBuilderError,
};
pub use crate::simplex::{Simplex, TerminalTableau, Termination};
pub use crate::solution::{Solution, SolutionExtractor};
pub use crate::tableau::{Tableau, TableauIx};
pub use crate::trace::{ConsoleTrace, PivotStep, RecordingTrace, TraceSink};
pub use crate::var::{DecisionVariable, VarId, VarNames};
