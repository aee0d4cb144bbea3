// Integration tests for rule application: substitution, fixpoint
// reduction, priority order, and configuration defects.

use talc_engine::{apply_rule, Library, Rule, RuleError, Ruleset};
use talc_parser::parse;
use talc_syntax::{Grammar, Node};

fn tree(grammar: &Grammar, text: &str) -> Node<f64> {
    parse(text, grammar).unwrap()
}

#[test]
fn identity_rule_applies_without_changing_tree_shape() {
    let g = Grammar::algebra();
    let rule = Rule::parse("x -> x", &g).unwrap();

    let mut t = tree(&g, "1 + sin(u)");
    let before = t.clone();
    assert!(apply_rule(&mut t, &rule));
    assert!(t.tree_eq(&before));
}

#[test]
fn operator_elimination_reaches_fixpoint() {
    let g = Grammar::algebra();
    let rules = Ruleset::parse("+x -> x\n--x -> x\nx%% -> x / 100", &g).unwrap();

    let mut t = tree(&g, "--5");
    assert!(rules.apply(&mut t) >= 1);
    assert_eq!(t.render(&g).to_string(), "5");

    let mut t = tree(&g, "+u");
    rules.apply(&mut t);
    assert_eq!(t.render(&g).to_string(), "u");

    let mut t = tree(&g, "5%%");
    rules.apply(&mut t);
    assert_eq!(t.render(&g).to_string(), "5 / 100");
}

#[test]
fn sequence_substitution_splices_whole_spans() {
    let g = Grammar::algebra();

    let rule = Rule::parse("prod([xs], 1, [ys]) -> prod([xs], [ys])", &g).unwrap();
    let mut t = tree(&g, "prod(a, 1, u, w)");
    assert!(apply_rule(&mut t, &rule));
    assert_eq!(t.render(&g).to_string(), "prod(a, u, w)");

    // a span spliced after a scalar keeps its internal order
    let rule = Rule::parse("sum(x, [xs]) -> sum([xs], x)", &g).unwrap();
    let mut t = tree(&g, "sum(a, u, w)");
    assert!(apply_rule(&mut t, &rule));
    assert_eq!(t.render(&g).to_string(), "sum(u, w, a)");
}

#[test]
fn nested_products_flatten_to_fixpoint() {
    let g = Grammar::algebra();
    let rules = Ruleset::parse("prod([xs], prod([ys]), [zs]) -> prod([xs], [ys], [zs])", &g)
        .unwrap();

    let mut t = tree(&g, "prod(a, prod(u, prod(w, s)), t)");
    assert_eq!(rules.apply(&mut t), 2);
    assert_eq!(t.render(&g).to_string(), "prod(a, u, w, s, t)");
}

#[test]
fn the_first_matching_rule_by_index_wins() {
    let g = Grammar::algebra();
    let rules = Ruleset::parse("1 + x -> sin(x)\nx + y -> cos(x)", &g).unwrap();

    let mut t = tree(&g, "1 + 5");
    assert!(rules.step(&mut t));
    assert_eq!(t.render(&g).to_string(), "sin(5)");

    let mut t = tree(&g, "2 + 5");
    assert!(rules.step(&mut t));
    assert_eq!(t.render(&g).to_string(), "cos(2)");
}

#[test]
fn no_match_returns_false_and_leaves_the_tree_alone() {
    let g = Grammar::algebra();
    let rule = Rule::parse("sin(x) -> x", &g).unwrap();
    let mut t = tree(&g, "1 + 2");
    let before = t.clone();
    assert!(!apply_rule(&mut t, &rule));
    assert!(t.tree_eq(&before));
}

#[test]
fn matching_the_root_replaces_the_root() {
    let g = Grammar::algebra();
    let rule = Rule::parse("x + y -> sum(x, y)", &g).unwrap();
    let mut t = tree(&g, "1 + 2");
    assert!(apply_rule(&mut t, &rule));
    assert_eq!(t.render(&g).to_string(), "sum(1, 2)");
}

#[test]
fn cyclic_rulesets_are_still_rewriting_when_the_cap_hits() {
    let g = Grammar::algebra();
    let rules = Ruleset::parse("1 -> 2\n2 -> 1", &g).unwrap();

    let mut t = tree(&g, "1");
    let mut steps = 0;
    while steps < 100 && rules.step(&mut t) {
        steps += 1;
    }
    assert_eq!(steps, 100);
}

#[test]
fn rule_text_defects_are_reported_with_their_line() {
    let g = Grammar::algebra();

    let err = Ruleset::<f64>::parse("x + y", &g).unwrap_err();
    assert_eq!(err.line, 1);
    assert!(matches!(err.source, RuleError::MissingArrow));

    let err = Ruleset::<f64>::parse("# comment\n\nx + -> 2", &g).unwrap_err();
    assert_eq!(err.line, 3);
    assert!(matches!(err.source, RuleError::PatternSyntax(_)));

    let err = Ruleset::<f64>::parse("x -> 2 +", &g).unwrap_err();
    assert!(matches!(err.source, RuleError::TemplateSyntax(_)));

    let err = Ruleset::<f64>::parse("x -> [xs", &g).unwrap_err();
    assert!(matches!(err.source, RuleError::SequenceTemplateRoot));

    let vars: Vec<String> = (1..=17).map(|i| format!("x{i}")).collect();
    let line = format!("sum({}) -> 0", vars.join(", "));
    let err = Ruleset::<f64>::parse(&line, &g).unwrap_err();
    assert!(matches!(err.source, RuleError::Pattern(_)));
}

#[test]
fn derivative_ruleset_differentiates_sine() {
    let g = Grammar::algebra();
    let library: Library<f64> = Library::standard(&g);

    let mut t = tree(&g, "diff(sin(u), u)");
    library.derivative.apply(&mut t);
    library.simplify.apply(&mut t);
    assert_eq!(t.render(&g).to_string(), "cos(u)");
}

#[test]
fn full_normalization_terminates_on_well_behaved_input() {
    let g = Grammar::algebra();
    let library: Library<f64> = Library::standard(&g);

    let mut t = tree(&g, "sin(u) * 1");
    let steps = library.normalize(&mut t);
    assert!(steps >= 2);
    assert_eq!(t.render(&g).to_string(), "sin(u)");
}
