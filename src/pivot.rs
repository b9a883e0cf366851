use crate::settings::SimplexSettings;
use crate::tableau::Tableau;

/// Entering-column and leaving-row selection policy.
pub trait PivotRule {
    /// Column to bring into the basis, or `None` once no column can improve
    /// the objective by more than `settings.feas_tol`.
    fn entering(&self, tbl: &Tableau, settings: &SimplexSettings) -> Option<usize>;

    /// Row whose basic variable leaves when column `e` enters, or `None` if
    /// nothing bounds the step along `e`. Only entries above
    /// `settings.pivot_tol` may be chosen, so the pivot itself cannot fail.
    fn leaving(&self, tbl: &Tableau, e: usize, settings: &SimplexSettings) -> Option<usize>;
}

/// Dantzig's rule with the min-ratio test. Ties go to the smallest index on
/// both sides. Reduced costs within `feas_tol` of zero count as optimal and
/// column entries up to `pivot_tol` as non-positive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Dantzig;

impl PivotRule for Dantzig {
    fn entering(&self, tbl: &Tableau, settings: &SimplexSettings) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (j, &v) in tbl.c().iter().enumerate() {
            if v > settings.feas_tol && best.map_or(true, |(_, bv)| v > bv) {
                best = Some((j, v));
            }
        }
        best.map(|(j, _)| j)
    }

    fn leaving(&self, tbl: &Tableau, e: usize, settings: &SimplexSettings) -> Option<usize> {
        let a = tbl.a();
        let b = tbl.b();

        let mut best: Option<(usize, f64)> = None;
        for i in 0..tbl.n_rows() {
            let aie = a[[i, e]];
            if aie <= settings.pivot_tol {
                log::trace!("row {} skipped, pivot column entry {}", i, aie);
                continue;
            }
            let ratio = b[i] / aie;
            if best.map_or(true, |(_, br)| ratio < br) {
                best = Some((i, ratio));
            }
        }
        best.map(|(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::Constraint;
    use crate::model::{Model, OptDir};
    use crate::tableau::TableauIx;

    fn entering(tbl: &Tableau) -> Option<usize> {
        Dantzig.entering(tbl, &SimplexSettings::default())
    }

    fn leaving(tbl: &Tableau, e: usize) -> Option<usize> {
        Dantzig.leaving(tbl, e, &SimplexSettings::default())
    }

    fn tableau(obj: &[f64], rows: &[(&[f64], f64)]) -> Tableau {
        let mut mdl = Model::new();
        for j in 0..obj.len() {
            mdl.add_variable(format!("x{}", j + 1));
        }
        mdl.set_objective(OptDir::Max, obj.iter().copied());
        for (coeffs, rhs) in rows {
            mdl.add_constraint(Constraint::new(coeffs.iter().copied(), *rhs));
        }
        Tableau::initialize(&mdl.as_standard_form().unwrap()).unwrap()
    }

    #[test]
    fn largest_reduced_cost_enters() {
        let tbl = tableau(&[18.0, 12.5], &[(&[1.0, 1.0], 20.0)]);
        assert_eq!(entering(&tbl), Some(0));

        let tbl = tableau(&[1.0, 3.0, 2.0], &[(&[1.0, 1.0, 1.0], 1.0)]);
        assert_eq!(entering(&tbl), Some(1));
    }

    #[test]
    fn entering_ties_go_to_smallest_index() {
        let tbl = tableau(&[2.0, 5.0, 5.0], &[(&[1.0, 1.0, 1.0], 1.0)]);
        assert_eq!(entering(&tbl), Some(1));
    }

    #[test]
    fn no_positive_cost_is_optimal() {
        let tbl = tableau(&[0.0, -1.0], &[(&[1.0, 1.0], 1.0)]);
        assert_eq!(entering(&tbl), None);
    }

    #[test]
    fn min_ratio_row_leaves() {
        let tbl = tableau(
            &[18.0, 12.5],
            &[(&[1.0, 1.0], 20.0), (&[1.0, 0.0], 12.0), (&[0.0, 1.0], 16.0)],
        );
        assert_eq!(leaving(&tbl, 0), Some(1));
        assert_eq!(leaving(&tbl, 1), Some(2));
    }

    #[test]
    fn ratio_ties_go_to_smallest_row() {
        let tbl = tableau(&[1.0], &[(&[0.0], 1.0), (&[2.0], 6.0), (&[1.0], 3.0)]);
        assert_eq!(leaving(&tbl, 0), Some(1));
    }

    #[test]
    fn non_positive_entries_never_leave() {
        let tbl = tableau(&[1.0, 1.0], &[(&[-1.0, 1.0], 1.0), (&[0.0, 1.0], 5.0)]);
        assert_eq!(leaving(&tbl, 0), None);
        assert_eq!(leaving(&tbl, 1), Some(0));
    }

    #[test]
    fn reduced_costs_within_tolerance_are_optimal() {
        let tbl = tableau(&[1e-12, -1.0], &[(&[1.0, 1.0], 1.0)]);
        assert_eq!(entering(&tbl), None);
    }

    #[test]
    fn noise_level_entries_never_leave() {
        // 3x1 - x2 - 3x3 <= 7, -3x1 + x2 + 5x3 <= 1
        let mut tbl = tableau(
            &[0.0, 3.0, 6.0],
            &[(&[3.0, -1.0, -3.0], 7.0), (&[-3.0, 1.0, 5.0], 1.0)],
        );
        tbl.pivot(TableauIx::new(1, 2), 1e-12).unwrap();
        tbl.pivot(TableauIx::new(0, 0), 1e-12).unwrap();

        // cancellation leaves round-off in row 1 of the x2 column
        assert!(tbl.a()[[1, 1]].abs() < 1e-12);
        assert_eq!(entering(&tbl), Some(1));
        assert_eq!(leaving(&tbl, 1), None);
    }
}
