//! The built-in rulesets of the normalization pipeline.

use crate::rule::{Rule, Ruleset};
use talc_parser::parse;
use talc_syntax::{Grammar, Node, Payload};

/// Operator elimination plus canonical function forms: everything becomes
/// variadic `sum`/`prod` and `pow`/`neg`, which the remaining stages
/// understand.
const DESUGAR: &str = "\
# operator elimination
+x -> x
--x -> x
x%% -> x / 100
# canonical forms
x + y -> sum(x, y)
x - y -> sum(x, neg(y))
x * y -> prod(x, y)
x / y -> prod(x, pow(y, neg(1)))
x ^ y -> pow(x, y)
-x -> neg(x)
sqrt(x) -> pow(x, 0.5)
";

/// Recursive elimination of `diff` nodes. The equal-arguments rule must
/// stay first: the catch-all zero rules below it only fire once no equal
/// pair is left anywhere in the tree.
const DERIVATIVE: &str = "\
diff(x, x) -> 1
diff(cx, v) -> 0
diff(bx, v) -> 0
diff(sum(), v) -> 0
diff(sum(x), v) -> diff(x, v)
diff(sum(x, [xs]), v) -> sum(diff(x, v), diff(sum([xs]), v))
diff(prod(), v) -> 0
diff(prod(x), v) -> diff(x, v)
diff(prod(x, [xs]), v) -> sum(prod(diff(x, v), [xs]), prod(x, diff(prod([xs]), v)))
diff(pow(x, cn), v) -> prod(cn, pow(x, sum(cn, neg(1))), diff(x, v))
diff(sin(x), v) -> prod(cos(x), diff(x, v))
diff(cos(x), v) -> prod(neg(sin(x)), diff(x, v))
diff(exp(x), v) -> prod(exp(x), diff(x, v))
diff(ln(x), v) -> prod(pow(x, neg(1)), diff(x, v))
";

/// Normal-form flattening of nested sums and products.
const FLATTEN: &str = "\
sum([xs], sum([ys]), [zs]) -> sum([xs], [ys], [zs])
prod([xs], prod([ys]), [zs]) -> prod([xs], [ys], [zs])
";

/// Core simplification: annihilators, units, and singleton collapse.
const SIMPLIFY: &str = "\
prod([xs], 0, [ys]) -> 0
prod([xs], 1, [ys]) -> prod([xs], [ys])
sum([xs], 0, [ys]) -> sum([xs], [ys])
pow(x, 1) -> x
pow(x, 0) -> 1
pow(1, x) -> 1
neg(neg(x)) -> x
neg(0) -> 0
sum(x) -> x
sum() -> 0
prod(x) -> x
prod() -> 1
";

/// Fold duplicate terms: `x + x` into `2x`, `x * x` into `x^2`. The two
/// occurrences need not be adjacent.
const REFOLD: &str = "\
sum([xs], x, [ys], x, [zs]) -> sum([xs], prod(2, x), [ys], [zs])
prod([xs], x, [ys], x, [zs]) -> prod([xs], pow(x, 2), [ys], [zs])
";

/// Canonical forms back to operator syntax for printing.
const RESUGAR: &str = "\
pow(x, 0.5) -> sqrt(x)
pow(x, y) -> x ^ y
sum(x, neg(y)) -> x - y
sum() -> 0
sum(x) -> x
sum(x, y, [ys]) -> sum(x + y, [ys])
prod() -> 1
prod(x) -> x
prod(x, y, [ys]) -> prod(x * y, [ys])
neg(x) -> -x
";

/// Constants-first ordering of binary sums and products.
const ORDER: &str = "\
dx + cy -> cy + dx
dx * cy -> cy * dx
";

/// The named rulesets run in sequence by the normalization pipeline.
pub struct Library<P> {
    pub desugar: Ruleset<P>,
    pub derivative: Ruleset<P>,
    pub flatten: Ruleset<P>,
    pub simplify: Ruleset<P>,
    pub refold: Ruleset<P>,
    pub resugar: Ruleset<P>,
    pub order: Ruleset<P>,
}

impl<P: Payload> Library<P> {
    /// Build the standard rulesets against `grammar`. Broken built-in rule
    /// text is a defect in the build itself, so it aborts immediately.
    pub fn standard(grammar: &Grammar) -> Self {
        let load = |name: &str, text: &str| {
            Ruleset::parse(text, grammar)
                .unwrap_or_else(|err| panic!("built-in ruleset `{name}` is broken: {err}"))
        };

        let mut resugar = load("resugar", RESUGAR);
        // `-1` lexes as a prefix minus, not a negative literal, so the
        // reciprocal patterns over folded constants are built in code.
        if let (Some(minus_one), Some(pow), Some(prod)) = (
            P::parse("-1"),
            grammar.function_op("pow"),
            grammar.function_op("prod"),
        ) {
            let reciprocal = Node::operator(
                pow,
                vec![Node::variable("x"), Node::constant(minus_one.clone())],
            );
            let division = Node::operator(
                prod,
                vec![
                    Node::variable("x"),
                    Node::operator(
                        pow,
                        vec![Node::variable("y"), Node::constant(minus_one)],
                    ),
                ],
            );
            let must = |rule: Result<Rule<P>, _>| {
                rule.unwrap_or_else(|err: crate::rule::RuleError| {
                    panic!("built-in ruleset `resugar` is broken: {err}")
                })
            };
            let load_template = |text: &str| {
                parse::<P>(text, grammar)
                    .unwrap_or_else(|err| panic!("built-in ruleset `resugar` is broken: {err}"))
            };
            resugar.prepend(must(Rule::new(reciprocal, load_template("1 / x"))));
            resugar.prepend(must(Rule::new(division, load_template("x / y"))));
        }

        Self {
            desugar: load("desugar", DESUGAR),
            derivative: load("derivative", DERIVATIVE),
            flatten: load("flatten", FLATTEN),
            simplify: load("simplify", SIMPLIFY),
            refold: load("refold", REFOLD),
            resugar,
            order: load("order", ORDER),
        }
    }

    /// The stages in pipeline order.
    pub fn stages(&self) -> [(&'static str, &Ruleset<P>); 7] {
        [
            ("desugar", &self.desugar),
            ("derivative", &self.derivative),
            ("flatten", &self.flatten),
            ("simplify", &self.simplify),
            ("refold", &self.refold),
            ("resugar", &self.resugar),
            ("order", &self.order),
        ]
    }

    /// Run every stage to fixpoint in order; returns the total rewrite
    /// count. Unbounded, like [`Ruleset::apply`].
    pub fn normalize(&self, tree: &mut Node<P>) -> usize {
        self.stages()
            .iter()
            .map(|(_, rules)| rules.apply(tree))
            .sum()
    }
}
