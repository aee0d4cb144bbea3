// End-to-end normalization through the same stage order the CLI drives:
// desugar, differentiate, flatten, simplify, fold, refold, resugar, order.

use talc_engine::Library;
use talc_eval::{fold_constants, Evaluator};
use talc_parser::parse;
use talc_syntax::{Grammar, Node};

fn normalize(library: &Library<f64>, grammar: &Grammar, tree: &mut Node<f64>) {
    library.desugar.apply(tree);
    fold_constants(tree, grammar);
    library.derivative.apply(tree);
    library.flatten.apply(tree);
    library.simplify.apply(tree);
    fold_constants(tree, grammar);
    library.simplify.apply(tree);
    library.refold.apply(tree);
    library.resugar.apply(tree);
    library.order.apply(tree);
}

fn contains_op(node: &Node<f64>, grammar: &Grammar, name: &str) -> bool {
    match node {
        Node::Operator { op, children } => {
            grammar.op(*op).name() == name
                || children.iter().any(|c| contains_op(c, grammar, name))
        }
        _ => false,
    }
}

fn assert_matches_function(
    grammar: &Grammar,
    tree: &Node<f64>,
    expected: impl Fn(f64) -> f64,
) {
    for x0 in [0.5, 2.0, 13.0] {
        let mut evaluator = Evaluator::new(grammar);
        evaluator.bind("x", x0);
        let got = evaluator.eval(tree).unwrap();
        assert!(
            (got - expected(x0)).abs() < 1e-9,
            "at x = {x0}: got {got}, expected {}",
            expected(x0)
        );
    }
}

#[test]
fn polynomial_derivative_normalizes_to_closed_form() {
    let grammar = Grammar::algebra();
    let library = Library::standard(&grammar);

    let mut tree = parse("diff(x^2 + 3*x, x)", &grammar).unwrap();
    normalize(&library, &grammar, &mut tree);

    assert!(!contains_op(&tree, &grammar, "diff"));
    assert_eq!(tree.render(&grammar).to_string(), "3 + 2 * x");
    assert_matches_function(&grammar, &tree, |x| 2.0 * x + 3.0);
}

#[test]
fn product_rule_derivative_is_numerically_correct() {
    let grammar = Grammar::algebra();
    let library = Library::standard(&grammar);

    let mut tree = parse("diff(x * sin(x), x)", &grammar).unwrap();
    normalize(&library, &grammar, &mut tree);

    assert!(!contains_op(&tree, &grammar, "diff"));
    assert_eq!(tree.render(&grammar).to_string(), "sin(x) + x * cos(x)");
    assert_matches_function(&grammar, &tree, |x| x.sin() + x * x.cos());
}

#[test]
fn closed_expressions_fold_to_a_single_constant() {
    let grammar = Grammar::algebra();
    let library = Library::standard(&grammar);

    let mut tree = parse("2 + 3 * 4", &grammar).unwrap();
    normalize(&library, &grammar, &mut tree);
    assert_eq!(tree.render(&grammar).to_string(), "14");

    let mut tree = parse("50%% + --1", &grammar).unwrap();
    normalize(&library, &grammar, &mut tree);
    assert_eq!(tree.render(&grammar).to_string(), "1.5");
}

#[test]
fn division_by_a_constant_differentiates_to_its_reciprocal() {
    let grammar = Grammar::algebra();
    let library = Library::standard(&grammar);

    let mut tree = parse("diff(x / 3, x)", &grammar).unwrap();
    normalize(&library, &grammar, &mut tree);
    assert!(!contains_op(&tree, &grammar, "diff"));
    assert_matches_function(&grammar, &tree, |_| 1.0 / 3.0);
}

#[test]
fn logarithm_derivative_resugars_as_a_division() {
    let grammar = Grammar::algebra();
    let library = Library::standard(&grammar);

    let mut tree = parse("diff(ln(x), x)", &grammar).unwrap();
    normalize(&library, &grammar, &mut tree);

    assert_eq!(tree.render(&grammar).to_string(), "1 / x");
    assert_matches_function(&grammar, &tree, |x| 1.0 / x);
}
