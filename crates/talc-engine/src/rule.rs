//! Rewrite rules and rulesets.

use thiserror::Error;

use crate::filter::{is_sequence, is_wildcard, MatchFilter, PrefixFilter};
use crate::matcher::find_matching;
use crate::matching::Matching;
use crate::pattern::{preprocess, PatternError};
use talc_parser::{parse, SyntaxError};
use talc_syntax::{Grammar, Node, Payload};

/// Defects in a rule definition. Rules are engine configuration, not user
/// input, so these are not recoverable at runtime; the built-in library
/// treats them as fatal.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("missing `->` between pattern and template")]
    MissingArrow,
    #[error("pattern does not parse: {0}")]
    PatternSyntax(SyntaxError),
    #[error("template does not parse: {0}")]
    TemplateSyntax(SyntaxError),
    #[error(transparent)]
    Pattern(PatternError),
    #[error("a bare sequence variable cannot be a whole template")]
    SequenceTemplateRoot,
}

/// A [`RuleError`] with the line it came from.
#[derive(Debug, Error)]
#[error("rule on line {line}: {source}")]
pub struct RulesetError {
    pub line: usize,
    pub source: RuleError,
}

/// A rewrite rule: a pattern, a replacement template, and the filter
/// consulted when the pattern's variables bind.
pub struct Rule<P> {
    pattern: Node<P>,
    template: Node<P>,
    filter: Option<Box<dyn MatchFilter<P>>>,
}

impl<P: Payload> Rule<P> {
    /// Build a rule from already-parsed trees: preprocesses the pattern
    /// and stamps the same variable numbering onto the template. The
    /// prefix filter is installed by default; see
    /// [`with_filter`](Self::with_filter).
    pub fn new(mut pattern: Node<P>, mut template: Node<P>) -> Result<Self, RuleError> {
        let vars = preprocess(&mut pattern).map_err(RuleError::Pattern)?;
        if let Node::Variable { name, .. } = &template {
            // a span of zero-or-many nodes has no parent slot to land in
            if is_sequence(name) && !is_wildcard(name) {
                return Err(RuleError::SequenceTemplateRoot);
            }
        }
        vars.annotate(&mut template);
        Ok(Self {
            pattern,
            template,
            filter: Some(Box::new(PrefixFilter)),
        })
    }

    /// Parse `pattern -> template` with the ordinary expression parser.
    pub fn parse(text: &str, grammar: &Grammar) -> Result<Self, RuleError> {
        let (lhs, rhs) = text.split_once("->").ok_or(RuleError::MissingArrow)?;
        let pattern = parse(lhs.trim(), grammar).map_err(RuleError::PatternSyntax)?;
        let template = parse(rhs.trim(), grammar).map_err(RuleError::TemplateSyntax)?;
        Self::new(pattern, template)
    }

    pub fn with_filter(mut self, filter: Option<Box<dyn MatchFilter<P>>>) -> Self {
        self.filter = filter;
        self
    }

    pub fn pattern(&self) -> &Node<P> {
        &self.pattern
    }

    pub fn template(&self) -> &Node<P> {
        &self.template
    }
}

/// Replace every bound variable in the template copy. Sequence variables
/// splice their whole span into the parent's child list in place of the
/// single variable slot.
fn substitute<P: Payload>(template: &mut Node<P>, matching: &Matching<'_, '_, P>) {
    match template {
        Node::Operator { children, .. } => {
            let old = std::mem::take(children);
            let mut spliced = Vec::with_capacity(old.len());
            for mut child in old {
                let binding = match &child {
                    Node::Variable {
                        match_id: Some(id), ..
                    } => matching.get(*id),
                    _ => None,
                };
                match binding {
                    Some(bound) => spliced.extend(bound.nodes.iter().cloned()),
                    None => {
                        substitute(&mut child, matching);
                        spliced.push(child);
                    }
                }
            }
            *children = spliced;
        }
        Node::Variable { match_id, .. } => {
            if let Some(id) = *match_id {
                if let Some(bound) = matching.get(id) {
                    // the template root is never a sequence variable, so
                    // the span is exactly one node
                    *template = bound.nodes[0].clone();
                }
            }
        }
        Node::Constant { .. } => {}
    }
}

/// Rewrite the first matching subtree (pre-order) with the rule's
/// substituted template. Returns `false`, tree untouched, when the
/// pattern matches nowhere.
pub fn apply_rule<P: Payload>(tree: &mut Node<P>, rule: &Rule<P>) -> bool {
    let replaced = {
        let Some((path, matching)) = find_matching(&*tree, &rule.pattern, rule.filter.as_deref())
        else {
            return false;
        };
        let mut replacement = rule.template.clone();
        substitute(&mut replacement, &matching);
        (path, replacement)
    };
    let (path, replacement) = replaced;
    *tree.node_at_mut(&path) = replacement;
    true
}

/// An ordered list of rules applied greedily to fixpoint.
pub struct Ruleset<P> {
    rules: Vec<Rule<P>>,
}

impl<P> std::fmt::Debug for Ruleset<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ruleset")
            .field("rules", &self.rules.len())
            .finish()
    }
}

impl<P: Payload> Ruleset<P> {
    pub fn new(rules: Vec<Rule<P>>) -> Self {
        Self { rules }
    }

    /// Load rule text: one `pattern -> template` per line; blank lines and
    /// `#` comment lines are skipped.
    pub fn parse(text: &str, grammar: &Grammar) -> Result<Self, RulesetError> {
        let mut rules = Vec::new();
        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let rule = Rule::parse(line, grammar).map_err(|source| RulesetError {
                line: index + 1,
                source,
            })?;
            rules.push(rule);
        }
        Ok(Self { rules })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn prepend(&mut self, rule: Rule<P>) {
        self.rules.insert(0, rule);
    }

    /// One scan from rule index 0: apply the first rule that matches
    /// anywhere in the tree. `false` means a full pass found nothing.
    pub fn step(&self, tree: &mut Node<P>) -> bool {
        self.rules.iter().any(|rule| apply_rule(tree, rule))
    }

    /// Apply to fixpoint, restarting the scan from rule 0 after every
    /// successful application; returns the number of rewrites. Termination
    /// is up to the ruleset: a rule cycle loops forever, and callers that
    /// cannot trust their rules should drive [`step`](Self::step) with a
    /// budget instead.
    pub fn apply(&self, tree: &mut Node<P>) -> usize {
        let mut steps = 0;
        while self.step(tree) {
            steps += 1;
        }
        steps
    }
}
