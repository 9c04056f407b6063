use crate::canonical::canonicalize;
use crate::error::Error;
use crate::expr::Expr;
use crate::pattern::{matches_with, substitute, Bindings};
use std::{fmt, sync::Arc};

/// A predicate over the bindings of a match, deciding whether a [`Rule`] may be applied.
pub type Condition = Arc<dyn Fn(&Bindings) -> bool + Send + Sync>;

/// A rewrite rule: wherever `pattern` matches (and `condition`, if any, accepts the bindings),
/// the matched subexpression can be replaced by `template` with its wildcards substituted.
///
/// Rules are immutable once built, and cheap to clone.
#[derive(Clone)]
pub struct Rule {
    name: String,
    pattern: Expr,
    template: Expr,
    condition: Option<Condition>,
}

impl Rule {
    /// Creates a rule without a condition.
    pub fn new(name: impl Into<String>, pattern: Expr, template: Expr) -> Self {
        Self { name: name.into(), pattern, template, condition: None }
    }

    /// Adds a condition to the rule, replacing any existing one.
    pub fn with_condition(
        mut self,
        condition: impl Fn(&Bindings) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.condition = Some(Arc::new(condition));
        self
    }

    /// The name of the rule, used in traces and steps.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The pattern the rule matches.
    pub fn pattern(&self) -> &Expr {
        &self.pattern
    }

    /// The replacement, with the wildcards bound by the pattern.
    pub fn template(&self) -> &Expr {
        &self.template
    }

    /// Returns true if the rule has a condition.
    pub fn is_conditional(&self) -> bool {
        self.condition.is_some()
    }

    /// Matches the rule's pattern against the expression, returning the bindings if the pattern
    /// matches and the condition accepts them.
    pub fn matches(&self, expr: &Expr) -> Option<Bindings> {
        match &self.condition {
            Some(condition) => matches_with(&self.pattern, expr, Bindings::new(), &**condition),
            None => matches_with(&self.pattern, expr, Bindings::new(), &|_| true),
        }
    }

    /// Applies the rule to the top of the expression.
    ///
    /// Returns `Ok(None)` if the rule does not match, or the canonicalized replacement if it does.
    pub fn apply(&self, expr: &Expr) -> Result<Option<Expr>, Error> {
        let Some(bindings) = self.matches(expr) else {
            return Ok(None);
        };

        let replaced = substitute(&self.template, &bindings)
            .map_err(|err| Error::Rule { rule: self.name.clone(), source: Box::new(err) })?;
        Ok(Some(canonicalize(replaced)))
    }

    /// Returns the names of the wildcards that appear in the template but not in the pattern.
    /// Applying a rule with any such wildcards always fails.
    pub fn unbound_wildcards(&self) -> Vec<String> {
        let mut names = self.template
            .post_order_iter()
            .filter_map(Expr::as_wild)
            .filter(|wild| {
                !self.pattern
                    .post_order_iter()
                    .filter_map(Expr::as_wild)
                    .any(|bound| bound.name == wild.name)
            })
            .map(|wild| wild.name.clone())
            .collect::<Vec<_>>();
        names.sort();
        names.dedup();
        names
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("pattern", &self.pattern)
            .field("template", &self.template)
            .field("conditional", &self.condition.is_some())
            .finish()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} => {}", self.name, self.pattern, self.template)
    }
}
