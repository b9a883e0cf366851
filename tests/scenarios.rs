use approx::assert_relative_eq;
use tabsimplex::{
    Constraint, Model, OptDir, RecordingTrace, Simplex, SimplexSettings, SolverError, Termination,
};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn simplex() -> Simplex {
    Simplex::new(SimplexSettings::default())
}

fn model(obj: &[f64], rows: &[(&[f64], f64)]) -> Model {
    let mut mdl = Model::new();
    for j in 0..obj.len() {
        mdl.add_variable(format!("x{}", j + 1));
    }
    mdl.set_objective(OptDir::Max, obj.iter().copied());
    for (coeffs, rhs) in rows {
        mdl.add_constraint(Constraint::new(coeffs.iter().copied(), *rhs));
    }
    mdl
}

#[test]
fn bounded_optimum() {
    init();
    let mdl = model(
        &[18.0, 12.5],
        &[(&[1.0, 1.0], 20.0), (&[1.0, 0.0], 12.0), (&[0.0, 1.0], 16.0)],
    );
    let mut rec = RecordingTrace::new();
    let sol = simplex().solve_traced(&mdl, &mut rec).unwrap();

    assert_eq!(sol.termination(), Termination::Optimal);
    assert_eq!(sol.pivots(), 2);
    assert_relative_eq!(sol.value("x1").unwrap(), 12.0);
    assert_relative_eq!(sol.value("x2").unwrap(), 8.0);
    assert_relative_eq!(sol.objective_value(), 316.0);

    let moves: Vec<(&str, &str)> = rec
        .steps
        .iter()
        .map(|s| (s.entering.as_str(), s.leaving.as_str()))
        .collect();
    assert_eq!(moves, vec![("x1", "s2"), ("x2", "s1")]);

    let last = &rec.steps[1].tableau;
    assert!(last.c().iter().all(|v| *v <= 1e-9));
}

#[test]
fn single_constraint() {
    init();
    let mdl = model(&[5.0], &[(&[1.0], 4.0)]);
    let sol = simplex().solve(&mdl).unwrap();

    assert_eq!(sol.pivots(), 1);
    assert_relative_eq!(sol.value("x1").unwrap(), 4.0);
    assert_relative_eq!(sol.objective_value(), 20.0);
}

#[test]
fn unbounded_column() {
    init();
    let mdl = model(&[1.0], &[(&[0.0], 5.0)]);
    match simplex().solve(&mdl) {
        Err(SolverError::Unbounded { entering, tableau }) => {
            assert_eq!(entering, "x1");
            assert_eq!(tableau.b()[0], 5.0);
        }
        other => panic!("expected unbounded, got {:?}", other),
    }
}

#[test]
fn zero_constraints_is_invalid() {
    let mdl = model(&[1.0], &[]);
    assert!(matches!(simplex().solve(&mdl), Err(SolverError::InvalidModel(_))));
}

#[test]
fn infeasible_start() {
    init();
    let mdl = model(&[1.0, 1.0], &[(&[1.0, 1.0], 4.0), (&[1.0, -1.0], -1.0)]);
    let mut rec = RecordingTrace::new();
    let err = simplex().solve_traced(&mdl, &mut rec).unwrap_err();

    assert!(matches!(err, SolverError::InfeasibleStart { row: 1, .. }));
    assert!(rec.initial.is_none());
    assert!(rec.steps.is_empty());
}

#[test]
fn ratio_tie_picks_lower_row() {
    init();
    let mdl = model(
        &[3.0, 2.0],
        &[(&[1.0, 1.0], 4.0), (&[2.0, 1.0], 8.0), (&[0.0, 1.0], 5.0)],
    );

    let mut first = RecordingTrace::new();
    let sol = simplex().solve_traced(&mdl, &mut first).unwrap();
    assert_eq!(first.steps[0].ix.i(), 0);
    assert_eq!(first.steps[0].leaving, "s1");
    assert_relative_eq!(sol.value("x1").unwrap(), 4.0);
    assert_relative_eq!(sol.objective_value(), 12.0);

    for _ in 0..5 {
        let mut again = RecordingTrace::new();
        let sol_again = simplex().solve_traced(&mdl, &mut again).unwrap();
        assert_eq!(again, first);
        assert_eq!(sol_again, sol);
    }
}

#[test]
fn text_model_solves_like_structured_model() {
    init();
    let mut mdl = Model::new().with_min_variables(2);
    mdl.add_variable("desks");
    mdl.add_variable("chairs");
    mdl.set_objective_str(OptDir::Max, "100 * chairs + 400 * desks").unwrap();
    mdl.add_constraint_str("5 * desks + 3 * chairs <= 40", Some("hours")).unwrap();
    mdl.add_constraint_str("2 * desks + chairs <= 10", Some("hardwood_panels")).unwrap();
    mdl.add_constraint_str("3 * desks - chairs <= 0", Some("storage")).unwrap();

    let sol = simplex().solve(&mdl).unwrap();
    assert_relative_eq!(sol.value("desks").unwrap(), 2.0, epsilon = 1e-9);
    assert_relative_eq!(sol.value("chairs").unwrap(), 6.0, epsilon = 1e-9);
    assert_relative_eq!(sol.objective_value(), 1400.0, epsilon = 1e-9);

    let structured = model(&[400.0, 100.0], &[
        (&[5.0, 3.0], 40.0),
        (&[2.0, 1.0], 10.0),
        (&[3.0, -1.0], 0.0),
    ]);
    assert_eq!(simplex().solve(&structured).unwrap().values(), sol.values());
}

#[test]
fn basic_variable_leaves_and_returns() {
    init();
    let mdl = model(
        &[-2.0, 2.0, 3.0],
        &[
            (&[-1.0, 4.0, -1.0], 5.0),
            (&[-3.0, 2.0, 4.0], 0.0),
            (&[-2.0, 2.0, 2.0], 0.0),
        ],
    );
    let mut rec = RecordingTrace::new();
    let sol = simplex().solve_traced(&mdl, &mut rec).unwrap();

    let moves: Vec<(&str, &str)> = rec
        .steps
        .iter()
        .map(|s| (s.entering.as_str(), s.leaving.as_str()))
        .collect();
    assert_eq!(moves, [("x3", "s2"), ("x2", "x3"), ("x1", "s3"), ("x3", "s1")]);

    assert_relative_eq!(sol.value("x1").unwrap(), 10.0, epsilon = 1e-9);
    assert_relative_eq!(sol.value("x2").unwrap(), 5.0, epsilon = 1e-9);
    assert_relative_eq!(sol.value("x3").unwrap(), 5.0, epsilon = 1e-9);
    assert_relative_eq!(sol.objective_value(), 5.0, epsilon = 1e-9);
}
