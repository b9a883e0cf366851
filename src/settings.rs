use derive_builder::Builder;
use thiserror::Error;

#[derive(Error, Debug)]
/// Error type returned by settings validation
pub enum SettingsError {
    /// An error attributable to one of the fields
    #[error("Bad value for field `{0}`")]
    BadFieldValue(&'static str),
}

/// Solver settings.
///
/// ```
/// use tabsimplex::SimplexSettingsBuilder;
///
/// let settings = SimplexSettingsBuilder::default()
///     .max_iter(Some(500))
///     .build()
///     .unwrap();
/// assert_eq!(settings.max_iter, Some(500));
/// ```
#[derive(Builder, Debug, Clone, PartialEq)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct SimplexSettings {
    ///maximum number of pivots, `None` derives a limit from the problem size
    #[builder(default = "None")]
    pub max_iter: Option<usize>,

    ///smallest accepted magnitude of a pivot element
    #[builder(default = "1e-12")]
    pub pivot_tol: f64,

    ///tolerance for feasibility/optimality checks and for snapping results to zero
    #[builder(default = "1e-9")]
    pub feas_tol: f64,
}

impl Default for SimplexSettings {
    fn default() -> SimplexSettings {
        SimplexSettingsBuilder::default().build().unwrap()
    }
}

impl SimplexSettings {
    /// Pivot limit for a tableau with `n` columns and `m` rows.
    pub fn iteration_limit(&self, n: usize, m: usize) -> usize {
        match self.max_iter {
            Some(limit) => limit,
            None => (50 * (n + m)).max(100),
        }
    }
}

impl From<SettingsError> for SimplexSettingsBuilderError {
    fn from(e: SettingsError) -> Self {
        SimplexSettingsBuilderError::ValidationError(e.to_string())
    }
}

/// Automatic pre-build settings validation
impl SimplexSettingsBuilder {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if let Some(Some(0)) = self.max_iter {
            return Err(SettingsError::BadFieldValue("max_iter"));
        }
        if let Some(tol) = self.pivot_tol {
            if !(tol.is_finite() && tol > 0.0) {
                return Err(SettingsError::BadFieldValue("pivot_tol"));
            }
        }
        if let Some(tol) = self.feas_tol {
            if !(tol.is_finite() && tol > 0.0) {
                return Err(SettingsError::BadFieldValue("feas_tol"));
            }
        }
        Ok(())
    }
}
