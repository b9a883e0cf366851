use ndarray::{Array1, Array2};
use num::ToPrimitive;
use rustc_hash::FxHashSet;
use tabular::{Row, Table};

use std::fmt;

use crate::constraint::Constraint;
use crate::error::{SolverError, SolverResult};
use crate::expr;
use crate::var::DecisionVariable;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OptDir {
    Max,
    Min,
}

impl fmt::Display for OptDir {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OptDir::Max => write!(f, "Max"),
            OptDir::Min => write!(f, "Min"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ObjectiveFunction {
    pub(crate) coefficients: Vec<f64>,
    pub(crate) sense: OptDir,
}

impl ObjectiveFunction {
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn sense(&self) -> OptDir {
        self.sense
    }
}

/// Builder for a linear program `opt c·x s.t. Ax ≤ b, x ≥ 0`.
#[derive(Clone, Debug, PartialEq)]
pub struct Model {
    variables: Vec<DecisionVariable>,
    objective: Option<ObjectiveFunction>,
    constraints: Vec<Constraint>,
    min_variables: usize,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    pub fn new() -> Self {
        Self {
            variables: Vec::new(),
            objective: None,
            constraints: Vec::new(),
            min_variables: 1,
        }
    }

    /// Require at least `n` decision variables when the model is standardized.
    pub fn with_min_variables(mut self, n: usize) -> Self {
        self.min_variables = n.max(1);
        self
    }

    pub fn add_variable<T: ToString>(&mut self, name: T) -> DecisionVariable {
        let var = DecisionVariable::new(name, self.variables.len());
        self.variables.push(var.clone());
        var
    }

    pub fn variables(&self) -> &[DecisionVariable] {
        &self.variables
    }

    pub fn objective(&self) -> Option<&ObjectiveFunction> {
        self.objective.as_ref()
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    //set objective function and optimization direction
    pub fn set_objective<I, T>(&mut self, sense: OptDir, coefficients: I)
    where
        I: IntoIterator<Item = T>,
        T: ToPrimitive,
    {
        let coefficients = coefficients
            .into_iter()
            .map(|c| c.to_f64().unwrap_or(f64::NAN))
            .collect();
        self.objective = Some(ObjectiveFunction { coefficients, sense });
    }

    /// Sets the objective from text such as `"18*x1 + 12.5*x2"`, where the
    /// names are those passed to [`Model::add_variable`].
    pub fn set_objective_str(&mut self, sense: OptDir, text: &str) -> SolverResult<()> {
        let coefficients = expr::parse_linear(text, &self.names())?;
        self.objective = Some(ObjectiveFunction { coefficients, sense });
        Ok(())
    }

    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    /// Adds a constraint from text such as `"x1 + x2 <= 20"`.
    pub fn add_constraint_str(&mut self, text: &str, label: Option<&str>) -> SolverResult<()> {
        let (coefficients, rhs) = expr::parse_constraint(text, &self.names())?;
        let mut cons = Constraint::new(coefficients, rhs);
        if let Some(label) = label {
            cons = cons.with_label(label);
        }
        self.constraints.push(cons);
        Ok(())
    }

    fn names(&self) -> Vec<&str> {
        self.variables.iter().map(|v| v.name()).collect()
    }

    fn validate(&self) -> SolverResult<&ObjectiveFunction> {
        let n = self.variables.len();
        if n < self.min_variables {
            return Err(SolverError::InvalidModel(format!(
                "need at least {} decision variable(s), got {}",
                self.min_variables, n
            )));
        }

        let mut seen = FxHashSet::default();
        for var in &self.variables {
            if var.name().is_empty() {
                return Err(SolverError::InvalidModel(format!(
                    "decision variable {} has an empty name",
                    var.index()
                )));
            }
            if !seen.insert(var.name()) {
                return Err(SolverError::InvalidModel(format!(
                    "duplicate variable name `{}`",
                    var.name()
                )));
            }
        }

        let obj = self
            .objective
            .as_ref()
            .ok_or_else(|| SolverError::InvalidModel("no objective function set".to_string()))?;
        if obj.coefficients.len() != n {
            return Err(SolverError::InvalidModel(format!(
                "objective has {} coefficients for {} variables",
                obj.coefficients.len(),
                n
            )));
        }
        if obj.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(SolverError::InvalidModel(
                "objective has a non-finite coefficient".to_string(),
            ));
        }

        if self.constraints.is_empty() {
            return Err(SolverError::InvalidModel("no constraints".to_string()));
        }
        for (i, cons) in self.constraints.iter().enumerate() {
            if cons.coefficients.len() != n {
                return Err(SolverError::InvalidModel(format!(
                    "constraint {} has {} coefficients for {} variables",
                    i,
                    cons.coefficients.len(),
                    n
                )));
            }
            if !cons.is_finite() {
                return Err(SolverError::InvalidModel(format!(
                    "constraint {} has a non-finite entry",
                    i
                )));
            }
        }
        Ok(obj)
    }

    /// Normalizes the model into maximization form. Negative right-hand sides
    /// pass through here and are rejected when the tableau is built.
    pub fn as_standard_form(&self) -> SolverResult<StandardFormModel> {
        let obj = self.validate()?;
        let n = self.variables.len();
        let m = self.constraints.len();

        let mut a = Array2::<f64>::zeros((m, n));
        let mut b = Array1::<f64>::zeros(m);
        for (i, cons) in self.constraints.iter().enumerate() {
            for (j, coeff) in cons.coefficients.iter().enumerate() {
                a[[i, j]] = *coeff;
            }
            b[i] = cons.rhs;
        }

        let mut c = Array1::from_vec(obj.coefficients.clone());
        if obj.sense == OptDir::Min {
            c.mapv_inplace(|v| -v);
        }

        Ok(StandardFormModel {
            variables: self.variables.clone(),
            labels: self.constraints.iter().map(|c| c.label.clone()).collect(),
            a,
            b,
            c,
            objective: obj.clone(),
        })
    }
}

/// Renders `coeffs · names` as `18*x1 + 12.5*x2`, skipping zero terms.
pub(crate) fn format_linear<S: AsRef<str>>(coeffs: &[f64], names: &[S]) -> String {
    let mut out = String::new();
    for (coeff, name) in coeffs.iter().zip(names) {
        if *coeff == 0.0 {
            continue;
        }
        if out.is_empty() {
            if *coeff < 0.0 {
                out.push('-');
            }
        } else if *coeff < 0.0 {
            out.push_str(" - ");
        } else {
            out.push_str(" + ");
        }
        if coeff.abs() != 1.0 {
            out.push_str(&format!("{}*", coeff.abs()));
        }
        out.push_str(name.as_ref());
    }
    if out.is_empty() {
        out.push('0');
    }
    out
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let names = self.names();
        let mut table = Table::new("{:<} {:^} {:<}");

        let (dir, obj) = match &self.objective {
            Some(obj) => (obj.sense.to_string(), format_linear(&obj.coefficients, &names)),
            None => ("Max".to_string(), "?".to_string()),
        };
        table.add_row(Row::new().with_cell(dir).with_cell(":").with_cell(obj));
        table.add_row(Row::new().with_cell("Subject to").with_cell(":").with_cell(""));

        for cons in &self.constraints {
            let label = cons.label.clone().unwrap_or_default();
            let body = format!(
                "{} \u{2264} {}",
                format_linear(&cons.coefficients, &names),
                cons.rhs
            );
            table.add_row(Row::new().with_cell(label).with_cell("").with_cell(body));
        }

        write!(f, "{}", table)
    }
}

/// The normalized, immutable input of the tableau engine. The objective
/// vector `c` is always to be maximized.
#[derive(Clone, Debug, PartialEq)]
pub struct StandardFormModel {
    pub(crate) variables: Vec<DecisionVariable>,
    pub(crate) labels: Vec<Option<String>>,
    pub(crate) a: Array2<f64>,
    pub(crate) b: Array1<f64>,
    pub(crate) c: Array1<f64>,
    pub(crate) objective: ObjectiveFunction,
}

impl StandardFormModel {
    pub fn variables(&self) -> &[DecisionVariable] {
        &self.variables
    }

    pub fn n_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn n_constraints(&self) -> usize {
        self.b.len()
    }

    pub fn a(&self) -> &Array2<f64> {
        &self.a
    }

    pub fn b(&self) -> &Array1<f64> {
        &self.b
    }

    /// Objective in maximization form.
    pub fn c(&self) -> &Array1<f64> {
        &self.c
    }

    /// The objective as the user wrote it, before any sign change.
    pub fn objective(&self) -> &ObjectiveFunction {
        &self.objective
    }

    pub fn label(&self, row: usize) -> Option<&str> {
        self.labels.get(row).and_then(|l| l.as_deref())
    }
}
