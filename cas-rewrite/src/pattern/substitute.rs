use crate::error::Error;
use crate::expr::{Expr, Primary};
use super::Bindings;

/// Replaces every wildcard in the template with the subexpression bound to its name.
///
/// The result is not canonicalized. Returns [`Error::UnboundWildcard`] if the template refers to
/// a name that has no binding.
pub fn substitute(template: &Expr, bindings: &Bindings) -> Result<Expr, Error> {
    match template {
        Expr::Primary(Primary::Wild(wild)) => bindings
            .get(&wild.name)
            .cloned()
            .ok_or_else(|| Error::UnboundWildcard { name: wild.name.clone() }),
        Expr::Primary(_) => Ok(template.clone()),
        _ => template.clone().try_map_children(|child| substitute(&child, bindings)),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn replaces_wildcards() {
        let bindings = [
            ("a".to_string(), Expr::sym("x")),
            ("n".to_string(), Expr::num(3)),
        ].into_iter().collect::<Bindings>();
        let template = "?n * ?a ** (?n - 1)".parse::<Expr>().unwrap();

        assert_eq!(substitute(&template, &bindings).unwrap().to_string(), "3 * x ** (3 - 1)");
    }

    #[test]
    fn unbound_wildcard() {
        let err = substitute(&Expr::wild("b"), &Bindings::new()).unwrap_err();

        assert_eq!(err, Error::UnboundWildcard { name: "b".to_string() });
    }
}
