mod error;

use cas_rewrite::{
    canonical::canonicalize,
    pattern::matches,
    rewrite::{rewrite_fully_with_steps, Step},
    rules,
    rule::Rule,
    solve::{
        EquationSolver,
        FullSimplification,
        SolveContext,
        SolveResult,
        SolverStrategy,
        DEFAULT_MAX_ITERATIONS,
    },
    Expr,
    Symbol,
};
use env_logger::Env;
use error::Error;
use log::debug;
use rustyline::{error::ReadlineError, DefaultEditor};
use std::io::{self, BufRead, IsTerminal};

const HELP: &str = "\
commands:
  <expr>                     simplify the expression
  simplify <expr>            simplify the expression
  solve <equation> for <x>   solve the equation for the variable x
  steps <expr>               show every rule applied while simplifying
  match <pattern> with <expr>
                             match a pattern such as `?a * x` against an expression
  :trace on|off              show the intermediate results of simplify and solve
  :iterations <n>            limit simplify and solve to n iterations
  :rules                     list the rules used by every command
  :help                      show this message";

/// A line of input, split into its command and arguments.
#[derive(Debug, PartialEq)]
enum Command<'a> {
    Simplify(&'a str),
    Solve { equation: &'a str, target: &'a str },
    Steps(&'a str),
    Match { pattern: &'a str, expr: &'a str },
    Trace(bool),
    Iterations(usize),
    Rules,
    Help,
}

impl<'a> Command<'a> {
    /// Parses a non-empty line of input.
    fn parse(line: &'a str) -> Result<Self, Error> {
        let usage = |msg: &str| Error::Usage(format!("{} (type :help for usage)", msg));

        if let Some(arg) = line.strip_prefix(':') {
            let (name, arg) = arg.split_once(' ').unwrap_or((arg, ""));
            return match (name, arg.trim()) {
                ("help", _) => Ok(Self::Help),
                ("rules", _) => Ok(Self::Rules),
                ("trace", "on") => Ok(Self::Trace(true)),
                ("trace", "off") => Ok(Self::Trace(false)),
                ("trace", _) => Err(usage("expected `:trace on` or `:trace off`")),
                ("iterations", n) => n.parse::<usize>()
                    .ok()
                    .filter(|&n| n > 0)
                    .map(Self::Iterations)
                    .ok_or_else(|| usage("expected a positive number of iterations")),
                _ => Err(usage(&format!("unknown command `:{}`", name))),
            };
        }

        let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
        match word {
            "simplify" => Ok(Self::Simplify(rest)),
            "steps" => Ok(Self::Steps(rest)),
            "solve" => {
                let (equation, target) = rest.rsplit_once(" for ")
                    .ok_or_else(|| usage("expected `solve <equation> for <variable>`"))?;
                let target = target.trim();
                if target.is_empty() || !target.chars().all(|c| c.is_alphanumeric() || c == '_') {
                    return Err(usage(&format!("`{}` is not a variable name", target)));
                }
                Ok(Self::Solve { equation, target })
            },
            "match" => {
                let (pattern, expr) = rest.split_once(" with ")
                    .ok_or_else(|| usage("expected `match <pattern> with <expr>`"))?;
                Ok(Self::Match { pattern, expr })
            },
            _ => Ok(Self::Simplify(line)),
        }
    }
}

/// Parses an expression to work on. Wildcards only make sense in patterns.
fn expression(input: &str) -> Result<Expr, Error> {
    let expr = Error::parse(input)?;
    if expr.contains_wild() {
        return Err(Error::Usage(
            "wildcards such as `?a` can only be used in the pattern of `match`".to_string(),
        ));
    }
    Ok(expr)
}

/// Formats a rule as `name: pattern => template`, marking rules that have a condition.
fn describe_rule(rule: &Rule) -> String {
    let condition = if rule.is_conditional() { " (conditional)" } else { "" };
    format!("{}: {} => {}{}", rule.name(), rule.pattern(), rule.template(), condition)
}

/// Formats a binding of a match, along with its shape if it is not a scalar.
fn describe_binding(name: &str, expr: &Expr) -> String {
    let shape = expr.shape();
    if shape.is_scalar() {
        format!("?{} = {}", name, expr)
    } else {
        format!("?{} = {} : {}", name, expr, shape)
    }
}

/// Options that persist between lines.
struct Session {
    trace: bool,
    max_iterations: usize,
}

impl Default for Session {
    fn default() -> Self {
        Self { trace: false, max_iterations: DEFAULT_MAX_ITERATIONS }
    }
}

impl Session {
    fn context(&self, target: Option<Symbol>) -> SolveContext<'static> {
        let mut builder = SolveContext::builder(rules::all())
            .max_iterations(self.max_iterations)
            .trace(self.trace);
        if let Some(target) = target {
            builder = builder.target(target);
        }
        builder.build()
    }

    /// Runs one line of input, printing the result to stdout.
    fn run(&mut self, line: &str) -> Result<(), Error> {
        let command = Command::parse(line)?;
        debug!("{:?}", command);

        match command {
            Command::Simplify(input) => {
                let expr = expression(input)?;
                print_result(&FullSimplification.solve(&expr, &self.context(None))?);
            },
            Command::Solve { equation, target } => {
                let expr = expression(equation)?;
                let ctx = self.context(Some(Symbol::new(target)));
                print_result(&EquationSolver.solve(&expr, &ctx)?);
            },
            Command::Steps(input) => {
                let expr = canonicalize(expression(input)?);
                let mut steps: Vec<Step> = Vec::new();
                let result = rewrite_fully_with_steps(&expr, rules::all(), self.max_iterations, &mut steps)?;
                for step in &steps {
                    println!("  {}: {} => {}", step.rule, step.before, step.after);
                }
                println!("{}", result.expr);
                if !result.is_fixpoint() {
                    eprintln!("stopped after {} passes", result.passes);
                }
            },
            Command::Match { pattern, expr } => {
                let pattern = Error::parse(pattern)?;
                let expr = canonicalize(expression(expr)?);
                match matches(&pattern, &expr) {
                    Some(bindings) => {
                        let mut bindings = bindings.iter().collect::<Vec<_>>();
                        bindings.sort_by_key(|(name, _)| *name);
                        println!("matched");
                        for (name, expr) in bindings {
                            println!("  {}", describe_binding(name, expr));
                        }
                    },
                    None => println!("no match"),
                }
            },
            Command::Trace(trace) => self.trace = trace,
            Command::Iterations(n) => self.max_iterations = n,
            Command::Rules => {
                for rule in rules::all() {
                    println!("{}", describe_rule(rule));
                }
            },
            Command::Help => println!("{}", HELP),
        }

        Ok(())
    }
}

/// Prints the result of a strategy. Failures print their message to stderr, followed by the
/// expression the strategy got to.
fn print_result(result: &SolveResult) {
    if let Some(trace) = &result.trace {
        for expr in trace {
            println!("  {}", expr);
        }
    }

    if result.is_success() {
        println!("{}", result.expr);
    } else {
        eprintln!("error: {}", result.message);
        println!("{}", result.expr);
    }
}

/// Runs a line, reporting any error to stderr.
fn run_line(session: &mut Session, line: &str) -> io::Result<()> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(());
    }

    match session.run(line) {
        Ok(()) => Ok(()),
        Err(err) => err.report_to_stderr(),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let mut session = Session::default();

    if !io::stdin().is_terminal() {
        // read commands from stdin, one per line
        for line in io::stdin().lock().lines() {
            run_line(&mut session, &line?)?;
        }
        return Ok(());
    }

    // run the repl / interactive mode
    let mut rl = DefaultEditor::new()?;
    loop {
        match rl.readline("> ") {
            Ok(line) => {
                rl.add_history_entry(&line)?;
                run_line(&mut session, &line)?;
            },
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}
