use cas_rewrite::{
    rewrite::{rewrite_fully, rewrite_fully_with_steps, rewrite_once_with_steps},
    rules,
    solve::{simplify, solve_equation, EquationSolver, SolveContext, SolveFailure},
    Error,
    Expr,
    Rule,
    Step,
    SolverStrategy,
    Symbol,
};
use pretty_assertions::assert_eq;

fn parse(s: &str) -> Expr {
    s.parse().unwrap()
}

fn simplified(s: &str) -> String {
    let result = simplify(&parse(s), rules::all()).unwrap();
    assert!(result.is_success(), "{}: {}", s, result.message);
    result.expr.to_string()
}

fn solved(s: &str, target: &str) -> String {
    let result = solve_equation(&parse(s), Symbol::new(target), rules::all()).unwrap();
    assert!(result.is_success(), "{}: {}", s, result.message);
    result.expr.to_string()
}

#[test]
fn like_terms() {
    assert_eq!(simplified("x + x"), "2 * x");
}

#[test]
fn multiply_by_zero() {
    assert_eq!(simplified("y * 0"), "0");
}

#[test]
fn multiply_by_one() {
    assert_eq!(simplified("(x + y) * 1"), "x + y");
}

#[test]
fn linear_equation() {
    assert_eq!(solved("2 * x + 5 = 15", "x"), "x = 5");
}

#[test]
fn gradient_of_constant() {
    assert_eq!(simplified("Grad(5, Vector(x, y))"), "Vector(0, 0)");
}

#[test]
fn curl_of_zero_field() {
    assert_eq!(simplified("Curl(Vector(0, 0, 0), Vector(x, y, z))"), "Vector(0, 0, 0)");
}

#[test]
fn contradiction_has_no_solution() {
    let result = solve_equation(&parse("x = x + 1"), Symbol::new("x"), rules::all()).unwrap();

    assert!(!result.is_success());
    assert!(result.message.contains("no further progress"), "{}", result.message);
}

#[test]
fn scaled_target_isolates_in_one_step() {
    let ctx = SolveContext::builder(rules::all())
        .target("x")
        .trace(true)
        .build();

    for (problem, solution) in [("3 * x = 12", "x = 4"), ("2.5 * x = 10", "x = 4"), ("4 * x = 2", "x = 0.5")] {
        let result = EquationSolver.solve(&parse(problem), &ctx).unwrap();
        assert_eq!(result.expr.to_string(), solution);

        let trace = result.trace.unwrap();
        assert_eq!(trace.len(), 1, "{}: {:?}", problem, trace);
    }
}

#[test]
fn decimal_arithmetic_is_exact() {
    assert_eq!(simplified("0.1 + 0.2"), "0.3");
    assert_eq!(simplified("x / 3 + x / 3 + x / 3"), "x");
}

#[test]
fn derivative_and_integral() {
    assert_eq!(simplified("Derivative(x ** 3 + 2 * x, x)"), "3 * x ** 2 + 2");
    assert_eq!(simplified("Integral(3 * x ** 2, x)"), "x ** 3");
}

#[test]
fn divergence_of_position() {
    assert_eq!(simplified("Div(Vector(x, y, z), Vector(x, y, z))"), "3");
}

#[test]
fn solving_through_functions() {
    assert_eq!(solved("exp(2 * x) = y", "x"), "x = 0.5 * log(y)");
    assert_eq!(solved("y = 3 * x - 6", "x"), "x = 1/3 * y + 2");
}

#[test]
fn absent_target() {
    let result = solve_equation(&parse("y = 2"), Symbol::new("x"), rules::all()).unwrap();

    assert_eq!(result.failure, Some(SolveFailure::TargetAbsent("x".to_string())));
    assert_eq!(result.expr, parse("y = 2"));
}

#[test]
fn custom_rules_with_conditions() {
    let rules = [
        Rule::new("square_of_sqrt", parse("sqrt(?a) ** 2"), parse("?a"))
            .with_condition(|b| b.get("a").is_some_and(|a| !a.contains_symbol("x"))),
    ];

    let result = rewrite_fully(&parse("sqrt(y) ** 2 + sqrt(x) ** 2"), &rules, 10).unwrap();
    assert!(result.is_fixpoint());
    assert_eq!(result.expr, parse("y + sqrt(x) ** 2"));
}

#[test]
fn unbound_template_wildcard_is_an_error() {
    let rules = [Rule::new("broken", parse("f(?a)"), parse("g(?a, ?b)"))];

    assert_eq!(rules[0].unbound_wildcards(), vec!["b".to_string()]);
    assert_eq!(
        rewrite_fully(&parse("f(1) + 2"), &rules, 10).unwrap_err(),
        Error::Rule {
            rule: "broken".to_string(),
            source: Box::new(Error::UnboundWildcard { name: "b".to_string() }),
        },
    );
}

#[test]
fn steps_are_recorded_in_order() {
    let mut steps: Vec<Step> = Vec::new();
    let (expr, changed) = rewrite_once_with_steps(&parse("sin(0) + x + x"), rules::all(), &mut steps)
        .unwrap();

    assert!(changed);
    assert_eq!(expr.to_string(), "2 * x");
    assert_eq!(
        steps.iter().map(|step| step.rule.as_str()).collect::<Vec<_>>(),
        vec!["sin(0)", "add_same_term"],
    );
    assert_eq!(steps[0].after, Expr::num(0));
}

#[test]
fn steps_across_passes() {
    let mut steps = Vec::new();
    let result = rewrite_fully_with_steps(
        &parse("Derivative(x ** 2, x)"),
        rules::all(),
        100,
        &mut steps,
    ).unwrap();

    assert_eq!(result.expr.to_string(), "2 * x");
    assert_eq!(result.passes, 2);
    assert_eq!(
        steps.iter().map(|step| step.rule.as_str()).collect::<Vec<_>>(),
        vec!["derivative_of_power", "derivative_of_variable"],
    );
}

#[test]
fn blocked_isolation_stagnates() {
    let problems = [
        // dividing by zero
        "6 / x = 0",
        "y / (x + 1) = 0",
        "x ** -1 = 0",
        // logarithms to base 0 and 1
        "log(x, 0) = 1",
        "log(x, 1) = 1",
        // the other factor has no inverse
        "x * 0 ** -1 = 3",
    ];

    for problem in problems {
        let result = solve_equation(&parse(problem), Symbol::new("x"), rules::all()).unwrap();
        assert_eq!(result.failure, Some(SolveFailure::Stagnant), "{}: {}", problem, result.expr);
        assert!(result.message.contains("no further progress"));
    }
}

#[test]
fn guards_leave_valid_cases_alone() {
    assert_eq!(solved("6 / x = 3", "x"), "x = 2");
    assert_eq!(solved("log(x, 2) = 3", "x"), "x = 8");
    assert_eq!(solved("x ** 2 = 0", "x"), "x = 0");
}
