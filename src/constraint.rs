use num::ToPrimitive;

use std::fmt;

/// A `≤` constraint over the decision variables: `coefficients · x ≤ rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub(crate) coefficients: Vec<f64>,
    pub(crate) rhs: f64,
    pub(crate) label: Option<String>,
}

impl Constraint {
    /// Numbers that cannot be represented as `f64` become NaN and are rejected
    /// when the model is put into standard form.
    pub fn new<I, T, U>(coefficients: I, rhs: U) -> Self
    where
        I: IntoIterator<Item = T>,
        T: ToPrimitive,
        U: ToPrimitive,
    {
        Self {
            coefficients: coefficients
                .into_iter()
                .map(|c| c.to_f64().unwrap_or(f64::NAN))
                .collect(),
            rhs: rhs.to_f64().unwrap_or(f64::NAN),
            label: None,
        }
    }

    pub fn with_label<T: ToString>(mut self, label: T) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn rhs(&self) -> f64 {
        self.rhs
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.rhs.is_finite() && self.coefficients.iter().all(|c| c.is_finite())
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(label) = &self.label {
            write!(f, "{}: ", label)?;
        }
        write!(f, "{:?} \u{2264} {}", self.coefficients, self.rhs)
    }
}
