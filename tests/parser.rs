use std::{collections::HashMap, rc::Rc};

use operon::{
    ast::Element,
    error::ParseError,
    interpreter::{
        environment::{FunctionTable, ReferenceTable},
        evaluator::function::builtins,
        parser::core::{Parser, Scope},
        symbols::{
            SymbolIndex, Tier,
            modifier::Modifier,
            operator::{Associativity, Operator},
            standard::{ADD, MUL},
        },
        value::core::Number,
    },
};
use pretty_assertions::assert_eq;

struct Tables {
    functions: FunctionTable,
    globals:   ReferenceTable,
}

impl Tables {
    fn new() -> Self {
        Self { functions: builtins().map(|f| ((f.name().to_string(), f.arity()), f))
                                    .collect(),
               globals:   HashMap::new(), }
    }

    /// Fresh tables after executing each line of `setup`.
    fn with(index: &SymbolIndex, setup: &str) -> Self {
        let mut tables = Self::new();
        for line in setup.lines() {
            tables.parse_with(index, line).unwrap().execute().unwrap();
        }
        tables
    }

    /// Executes `element`, then reads the variables `x`, `y` and `z`.
    fn outcome(&mut self, index: &SymbolIndex, element: &Element) -> [Option<Number>; 4] {
        let mut read = |name: &str| self.parse_with(index, name).unwrap().execute().unwrap();
        let value = element.execute().unwrap();
        [value, read("x"), read("y"), read("z")]
    }

    fn parse_with(&mut self, index: &SymbolIndex, text: &str) -> Result<Element, ParseError> {
        let scope = Scope { index,
                            functions: &self.functions,
                            globals: &mut self.globals,
                            locals: None,
                            starter: None };
        Parser::new(scope).parse(text)
                          .map(|element| element.unwrap_or_else(|| panic!("'{text}' parsed to nothing")))
    }
}

fn parse(text: &str) -> Result<Element, ParseError> {
    Tables::new().parse_with(&SymbolIndex::standard(), text)
}

/// The fully parenthesized grouping of `text`.
fn grouping(text: &str) -> String {
    parse(text).unwrap_or_else(|e| panic!("'{text}' failed to parse: {e}"))
               .to_string()
}

fn operator(index: &SymbolIndex, symbol: &str) -> Rc<Operator> {
    Rc::clone(&index.roles(symbol).unwrap().operator.as_ref().unwrap().behavior)
}

fn prefix(index: &SymbolIndex, symbol: &str) -> Rc<Modifier> {
    Rc::clone(&index.roles(symbol).unwrap().prefix.as_ref().unwrap().behavior)
}

fn postfix(index: &SymbolIndex, symbol: &str) -> Rc<Modifier> {
    Rc::clone(&index.roles(symbol).unwrap().postfix.as_ref().unwrap().behavior)
}

fn num(n: i64) -> Element {
    Element::from(Number::from(n))
}

#[test]
fn precedence() {
    assert_eq!(grouping("2 + 3 * 4"), "(2 + (3 * 4))");
    assert_eq!(grouping("2 * 3 + 4"), "((2 * 3) + 4)");
    assert_eq!(grouping("1 + 2 == 3"), "((1 + 2) == 3)");
    assert_eq!(grouping("1 || 0 && 0"), "(1 || (0 && 0))");
    assert_eq!(grouping("-2 ^ 2"), "(-(2 ^ 2))");
    assert_eq!(grouping("2 ^ -1"), "(2 ^ (-1))");
    assert_eq!(grouping("-3!"), "(-(3!))");
}

#[test]
fn associativity() {
    assert_eq!(grouping("10 - 4 - 3"), "((10 - 4) - 3)");
    assert_eq!(grouping("2 ^ 3 ^ 2"), "(2 ^ (3 ^ 2))");
    assert_eq!(grouping("a = b = 1"), "(a = (b = 1))");
    assert_eq!(grouping("1 ? 2 : 3"), "(1 ? (2 : 3))");
}

#[test]
fn reordered_grammar() {
    let index = SymbolIndex::builder().tier(Tier::operators(Associativity::LeftToRight,
                                                            [Operator::values("*", MUL)]))
                                      .tier(Tier::operators(Associativity::LeftToRight,
                                                            [Operator::values("+", ADD)]))
                                      .build()
                                      .unwrap();

    let element = Tables::new().parse_with(&index, "2 + 3 * 4").unwrap();
    assert_eq!(element.to_string(), "((2 + 3) * 4)");
    assert_eq!(element.execute().unwrap(), Some(Number::from(20)));
}

#[test]
fn implicit_multiplication() {
    assert_eq!(grouping("2 3"), "(2 * 3)");
    assert_eq!(grouping("2(3)"), "(2 * (3))");
    assert_eq!(grouping("2 3 + 1"), "((2 * 3) + 1)");
    assert_eq!(grouping("2 -3"), "(2 - 3)");
}

#[test]
fn modifier_roles_follow_context() {
    assert_eq!(grouping("8 - 3"), "(8 - 3)");
    assert_eq!(grouping("-3"), "(-3)");
    assert_eq!(grouping("8 * -3"), "(8 * (-3))");
    assert_eq!(grouping("x++ + 1"), "((x++) + 1)");
    assert_eq!(grouping("++x"), "(++x)");
    assert_eq!(grouping("!0"), "(!0)");
    assert_eq!(grouping("3!"), "(3!)");
}

#[test]
fn missing_operands_are_void() {
    assert_eq!(grouping("8**8"), "((8 * void) * 8)");
    assert_eq!(grouping("2 +"), "(2 + void)");

    assert_eq!(parse("8**8").unwrap().execute().unwrap(), None);
    assert_eq!(parse("2 +").unwrap().execute().unwrap(), None);
    assert_eq!(parse("+ 2").unwrap().execute().unwrap(), Some(Number::from(2)));
}

#[test]
fn calls_resolve_by_arity() {
    assert_eq!(grouping("max(1, 2)"), "max(1, 2)");
    assert_eq!(grouping("abs(-4) + 1"), "(abs((-4)) + 1)");
    assert_eq!(parse("max(1, min(5, 3))").unwrap().execute().unwrap(),
               Some(Number::from(3)));
}

#[test]
fn labels_become_variables() {
    let mut tables = Tables::new();
    tables.parse_with(&SymbolIndex::standard(), "speed * time").unwrap();
    assert!(tables.globals.contains_key("speed"));
    assert!(tables.globals.contains_key("time"));
}

#[test]
fn failed_parses_create_no_variables() {
    let mut tables = Tables::new();
    let index = SymbolIndex::standard();

    assert!(tables.parse_with(&index, "foo bar @").is_err());
    assert!(tables.parse_with(&index, "(speed + 1").is_err());
    assert!(tables.globals.is_empty());

    tables.parse_with(&index, "foo bar").unwrap();
    assert_eq!(tables.globals.len(), 2);
}

#[test]
fn errors() {
    assert!(matches!(parse("2 @ 3"), Err(ParseError::UnrecognizedToken { .. })));
    assert!(matches!(parse("(2 + 3"), Err(ParseError::UnbalancedBrackets { .. })));
    assert!(matches!(parse("2 + 3)"), Err(ParseError::UnbalancedBrackets { .. })));
    assert!(matches!(parse("2 + ++"), Err(ParseError::ElementExpected { .. })));
    assert!(matches!(parse("-"), Err(ParseError::ElementExpected { .. })));
}

#[test]
fn render_uses_minimal_parentheses() {
    for text in ["2 + 3 * 4",
                 "(2 + 3) * 4",
                 "10 - 4 - 3",
                 "2 ^ 3 ^ 2",
                 "-2 ^ 2",
                 "x++ + 1",
                 "1 ? 2 : 3",
                 "a = b = 1",
                 "max(1, 2) * 3"]
    {
        let index = SymbolIndex::standard();
        assert_eq!(parse(text).unwrap().render(&index), text);
    }
}

#[test]
fn render_round_trips_every_tier() {
    let index = SymbolIndex::standard();
    let setup = "x = 5\ny = 2";

    for text in ["z := x + y",
                 "x -= 1 ? 2 : 3",
                 "0 ? 1 : 0 ? 2 : 3",
                 "1 || 0 && 0",
                 "(1 || 0) && 0",
                 "x == 5 != 0",
                 "x < y + 3 == 1",
                 "x - y - 1",
                 "x // y * 3",
                 "!0 + 1",
                 "!(0 + 1)",
                 "-x ^ 2",
                 "$x + --y",
                 "x++ * 2"]
    {
        let mut first = Tables::with(&index, setup);
        let element = first.parse_with(&index, text).unwrap();
        let rendered = element.render(&index);
        assert_eq!(rendered, text);

        let mut second = Tables::with(&index, setup);
        let reparsed = second.parse_with(&index, &rendered).unwrap();
        assert_eq!(reparsed.render(&index), rendered);
        assert_eq!(second.outcome(&index, &reparsed), first.outcome(&index, &element), "{text}");
    }
}

#[test]
fn render_adds_needed_parentheses() {
    let index = SymbolIndex::standard();
    let minus = operator(&index, "-");
    let power = operator(&index, "^");
    let plus = operator(&index, "+");

    let cases = [(Element::operation(Rc::clone(&minus),
                                     num(10),
                                     Element::operation(Rc::clone(&minus), num(4), num(3))),
                  "10 - (4 - 3)"),
                 (Element::operation(Rc::clone(&power),
                                     Element::operation(Rc::clone(&power), num(2), num(3)),
                                     num(2)),
                  "(2 ^ 3) ^ 2"),
                 (Element::modification(prefix(&index, "-"),
                                        Element::operation(plus, num(1), num(2))),
                  "-(1 + 2)"),
                 (Element::modification(postfix(&index, "!"),
                                        Element::modification(prefix(&index, "-"), num(3))),
                  "(-3)!"),
                 (Element::operation(minus, num(2), num(-3)), "2 - (-3)")];

    for (tree, expected) in cases {
        let rendered = tree.render(&index);
        assert_eq!(rendered, expected);

        let reparsed = parse(&rendered).unwrap();
        assert_eq!(reparsed.execute().ok(), tree.execute().ok(), "{rendered}");
    }
}
