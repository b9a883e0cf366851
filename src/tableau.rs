use ndarray::{Array1, Array2};
use tabular::{Row, Table};

use std::fmt;

use crate::error::{SolverError, SolverResult};
use crate::model::StandardFormModel;
use crate::var::{VarId, VarNames};

/// Position of a pivot element: row `i` (leaving), column `j` (entering).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TableauIx {
    i: usize,
    j: usize,
}

impl TableauIx {
    pub fn new(i: usize, j: usize) -> Self {
        Self { i, j }
    }

    pub fn i(&self) -> usize {
        self.i
    }

    pub fn j(&self) -> usize {
        self.j
    }
}

/// Dictionary-form simplex tableau `(A, b, c, B, N)`.
///
/// Only the `n` decision-variable columns are stored, and column `j` always
/// holds the data of decision variable `j`. Slack columns are implicit, so a
/// slack that leaves the basis has no column and stays in `N` for good.
/// Rows other than the pivot row are not renormalized by a pivot, so the
/// implicit basic variable of row `i` carries the coefficient `row_scale[i]`
/// and has value `b[i] / row_scale[i]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Tableau {
    pub(crate) a: Array2<f64>,
    pub(crate) b: Array1<f64>,
    pub(crate) c: Array1<f64>,
    pub(crate) basic: Vec<VarId>,
    pub(crate) nonbasic: Vec<VarId>,
    pub(crate) columns: Vec<VarId>,
    pub(crate) row_scale: Array1<f64>,
    pub(crate) names: VarNames,
}

impl Tableau {
    /// Builds the all-slack starting tableau.
    pub fn initialize(mdl: &StandardFormModel) -> SolverResult<Self> {
        let n = mdl.n_variables();
        let m = mdl.n_constraints();
        if n < 1 {
            return Err(SolverError::InvalidModel(
                "at least one decision variable is required".to_string(),
            ));
        }
        if m < 1 {
            return Err(SolverError::InvalidModel(
                "at least one constraint is required".to_string(),
            ));
        }
        if mdl.a.dim() != (m, n) || mdl.c.len() != n {
            return Err(SolverError::InvalidModel(format!(
                "tableau shape {:?} does not match {} constraints and {} variables",
                mdl.a.dim(),
                m,
                n
            )));
        }

        if let Some((row, rhs)) = mdl.b.iter().enumerate().find(|(_, v)| **v < 0.0) {
            return Err(SolverError::InfeasibleStart { row, rhs: *rhs });
        }

        let tbl = Self {
            a: mdl.a.clone(),
            b: mdl.b.clone(),
            c: mdl.c.clone(),
            basic: (0..m).map(|i| VarId::slack(n, i)).collect(),
            nonbasic: (0..n).map(VarId).collect(),
            columns: (0..n).map(VarId).collect(),
            row_scale: Array1::ones(m),
            names: VarNames::new(mdl.variables(), m),
        };
        debug_assert!(tbl.is_partition());
        Ok(tbl)
    }

    pub fn n_rows(&self) -> usize {
        self.b.len()
    }

    pub fn n_cols(&self) -> usize {
        self.c.len()
    }

    pub fn a(&self) -> &Array2<f64> {
        &self.a
    }

    pub fn b(&self) -> &Array1<f64> {
        &self.b
    }

    /// Reduced costs, one per column.
    pub fn c(&self) -> &Array1<f64> {
        &self.c
    }

    pub fn basic(&self) -> &[VarId] {
        &self.basic
    }

    /// Nonbasic variables, in the order they left the basis.
    pub fn nonbasic(&self) -> &[VarId] {
        &self.nonbasic
    }

    /// Variable whose coefficients are stored in column `j`.
    pub fn column(&self, j: usize) -> VarId {
        self.columns[j]
    }

    pub fn columns(&self) -> &[VarId] {
        &self.columns
    }

    pub fn row_scale(&self) -> &Array1<f64> {
        &self.row_scale
    }

    pub fn name(&self, id: VarId) -> &str {
        self.names.name(id)
    }

    pub fn n_decision(&self) -> usize {
        self.names.n_decision()
    }

    /// Value of the basic variable of `row`.
    pub fn basic_value(&self, row: usize) -> f64 {
        self.b[row] / self.row_scale[row]
    }

    /// `B` and `N` together cover every variable id exactly once.
    pub fn is_partition(&self) -> bool {
        let mut seen = vec![false; self.names.len()];
        for id in self.basic.iter().chain(self.nonbasic.iter()) {
            match seen.get_mut(id.index()) {
                Some(s) if !*s => *s = true,
                _ => return false,
            }
        }
        seen.into_iter().all(|s| s)
    }

    /// Gauss-Jordan step making column `e` a unit vector with its 1 in row `l`,
    /// then moving the variable of column `e` into `B[l]` and the displaced
    /// `B[l]` into its slot in `N`. Column labels never change.
    ///
    /// All right-hand sides below refer to the pre-pivot tableau. A pivot
    /// element below `pivot_tol` or a column whose variable is already basic
    /// is a `PivotError`, and leaves the tableau unchanged.
    pub fn pivot(&mut self, ix: TableauIx, pivot_tol: f64) -> SolverResult<()> {
        let (l, e) = (ix.i(), ix.j());
        let (m, n) = self.a.dim();
        if l >= m || e >= n {
            return Err(SolverError::PivotError {
                row: l,
                col: e,
                value: f64::NAN,
            });
        }
        let piv = self.a[[l, e]];
        if !(piv.abs() >= pivot_tol) {
            return Err(SolverError::PivotError {
                row: l,
                col: e,
                value: piv,
            });
        }
        let entering = self.columns[e];
        let slot = match self.nonbasic.iter().position(|id| *id == entering) {
            Some(slot) => slot,
            None => {
                return Err(SolverError::PivotError {
                    row: l,
                    col: e,
                    value: piv,
                })
            }
        };

        let mut new_a = Array2::<f64>::zeros((m, n));
        let mut new_b = Array1::<f64>::zeros(m);
        let mut new_c = Array1::<f64>::zeros(n);

        //pivot row
        new_b[l] = self.b[l] / piv;
        for j in 0..n {
            if j != e {
                new_a[[l, j]] = self.a[[l, j]] / piv;
            }
        }
        new_a[[l, e]] = 1.0;

        //remaining rows, column e stays zero
        for i in 0..m {
            if i == l {
                continue;
            }
            let ratio = self.a[[i, e]];
            new_b[i] = piv * self.b[i] - ratio * self.b[l];
            for j in 0..n {
                if j != e {
                    new_a[[i, j]] = piv * self.a[[i, j]] - ratio * self.a[[l, j]];
                }
            }
        }

        //objective row
        let ce = self.c[e];
        for j in 0..n {
            if j != e {
                new_c[j] = piv * self.c[j] - ce * self.a[[l, j]];
            }
        }

        for i in 0..m {
            if i == l {
                self.row_scale[i] = 1.0;
            } else {
                self.row_scale[i] *= piv;
            }
        }

        self.a = new_a;
        self.b = new_b;
        self.c = new_c;
        self.nonbasic[slot] = std::mem::replace(&mut self.basic[l], entering);
        Ok(())
    }

    /// Renders the tableau with `Basic`, one column per decision variable, `Ans.` and
    /// a final `z` row. `highlight` puts a pivot element in brackets.
    pub fn render(&self, highlight: Option<TableauIx>) -> String {
        let n = self.n_cols();
        let spec = format!("{{:<}}{}", " {:>}".repeat(n + 1));
        let mut table = Table::new(&spec);

        let mut header = Row::new().with_cell("Basic");
        for id in &self.columns {
            header.add_cell(self.name(*id));
        }
        header.add_cell("Ans.");
        table.add_row(header);

        for (i, id) in self.basic.iter().enumerate() {
            let mut row = Row::new().with_cell(self.name(*id));
            for j in 0..n {
                let cell = match highlight {
                    Some(ix) if ix.i() == i && ix.j() == j => format!("[{:.1}]", self.a[[i, j]]),
                    _ => format!("{:.1}", self.a[[i, j]]),
                };
                row.add_cell(cell);
            }
            row.add_cell(format!("{:.1}", self.b[i]));
            table.add_row(row);
        }

        let mut z = Row::new().with_cell("z");
        for v in self.c.iter() {
            z.add_cell(format!("{:.1}", v));
        }
        z.add_cell("");
        table.add_row(z);

        table.to_string()
    }
}

impl fmt::Display for Tableau {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.render(None))
    }
}
