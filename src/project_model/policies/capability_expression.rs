use crate::project_model::domain::ProjectCapabilitiesSnapshot;
use crate::shared::error::ProjectSystemError;
use std::fmt;

/// A parsed capability predicate such as `CSharp & DotNetCoreWeb | !VisualBasic`.
///
/// Grammar: alternatives separated by `|`, each a conjunction of terms
/// separated by `&`; a term is a capability name, optionally negated with
/// `!`. `&` binds tighter than `|`. Capability names compare
/// case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityExpression {
    source: String,
    alternatives: Vec<Vec<Term>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Term {
    capability: String,
    negated: bool,
}

impl CapabilityExpression {
    /// Parses an expression
    ///
    /// # Errors
    /// Returns [`ProjectSystemError::InvalidCapabilityExpression`] for empty
    /// expressions, empty alternatives or terms, and names containing
    /// characters other than letters, digits, `.`, `_` and `-`.
    pub fn parse(expression: &str) -> Result<Self, ProjectSystemError> {
        let invalid = |reason: &str| ProjectSystemError::InvalidCapabilityExpression {
            expression: expression.to_string(),
            reason: reason.to_string(),
        };

        if expression.trim().is_empty() {
            return Err(invalid("expression is empty"));
        }

        let mut alternatives = Vec::new();
        for alternative in expression.split('|') {
            let mut terms = Vec::new();
            for term in alternative.split('&') {
                let term = term.trim();
                let (negated, name) = match term.strip_prefix('!') {
                    Some(rest) => (true, rest.trim()),
                    None => (false, term),
                };
                if name.is_empty() {
                    return Err(invalid("missing capability name"));
                }
                if !name
                    .chars()
                    .all(|c| c.is_alphanumeric() || matches!(c, '.' | '_' | '-'))
                {
                    return Err(invalid("capability names may only contain letters, digits, '.', '_' and '-'"));
                }
                terms.push(Term {
                    capability: name.to_string(),
                    negated,
                });
            }
            alternatives.push(terms);
        }

        Ok(Self {
            source: expression.trim().to_string(),
            alternatives,
        })
    }

    pub fn is_satisfied_by(&self, capabilities: &ProjectCapabilitiesSnapshot) -> bool {
        self.alternatives.iter().any(|terms| {
            terms
                .iter()
                .all(|term| capabilities.is_present(&term.capability) != term.negated)
        })
    }
}

impl fmt::Display for CapabilityExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}
