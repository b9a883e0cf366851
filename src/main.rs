use tabsimplex::{ConsoleTrace, Model, OptDir, Simplex, SolverResult};

fn furniture() -> SolverResult<Model> {
    let mut model = Model::new().with_min_variables(2);
    model.add_variable("x1");
    model.add_variable("x2");
    model.set_objective_str(OptDir::Max, "18 * x1 + 12.5 * x2")?;
    model.add_constraint_str("x1 + x2 <= 20", None)?;
    model.add_constraint_str("x1 <= 12", None)?;
    model.add_constraint_str("x2 <= 16", None)?;
    Ok(model)
}

fn workshop() -> SolverResult<Model> {
    let mut model = Model::new().with_min_variables(2);
    model.add_variable("desks");
    model.add_variable("chairs");
    model.set_objective_str(OptDir::Max, "100 * chairs + 400 * desks")?;
    model.add_constraint_str("5 * desks + 3 * chairs <= 40", Some("hours"))?;
    model.add_constraint_str("2 * desks + chairs <= 10", Some("hardwood_panels"))?;
    model.add_constraint_str("3 * desks - chairs <= 0", Some("storage"))?;
    Ok(model)
}

fn main() {
    env_logger::init();

    let simplex: Simplex = Simplex::default();
    let mut trace = ConsoleTrace::new(true);

    for build in [furniture, workshop] {
        let model = match build() {
            Ok(model) => model,
            Err(e) => {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        };
        println!("model:\n{}", model);

        match simplex.solve_traced(&model, &mut trace) {
            Ok(sol) => println!("{}\n", sol),
            Err(e) => eprintln!("error: {}\n", e),
        }
    }
}
