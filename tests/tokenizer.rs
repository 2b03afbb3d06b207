use operon::{
    error::TokenizerError,
    interpreter::tokenizer::{Tokenizer, TokenizerConfig, symbol_finder::SymbolFinder},
};
use pretty_assertions::assert_eq;

fn strings(symbols: &[&str]) -> Vec<String> {
    symbols.iter().map(ToString::to_string).collect()
}

fn tokenize(config: TokenizerConfig, text: &str) -> Vec<String> {
    Tokenizer::new(config).unwrap().tokenize(text)
}

#[test]
fn separators_are_emitted() {
    let config = TokenizerConfig { separators: strings(&["+", "+=", "="]),
                                   trim_whitespace: true,
                                   ..TokenizerConfig::default() };

    assert_eq!(tokenize(config, "x += 1 + y"), vec!["x", "+=", "1", "+", "y"]);
}

#[test]
fn delimiters_are_dropped() {
    let config = TokenizerConfig { delimiters: strings(&[","]),
                                   trim_whitespace: true,
                                   ..TokenizerConfig::default() };
    assert_eq!(tokenize(config.clone(), "a, b,,c"), vec!["a", "b", "c"]);

    let config = TokenizerConfig { include_empty: true,
                                   ..config };
    assert_eq!(tokenize(config, "a, b,,c"), vec!["a", "b", "", "c"]);
}

#[test]
fn brackets_protect_their_content() {
    let config = TokenizerConfig { separators: strings(&["+"]),
                                   open_brackets: strings(&["(", "["]),
                                   close_brackets: strings(&[")", "]"]),
                                   trim_whitespace: true,
                                   ..TokenizerConfig::default() };

    assert_eq!(tokenize(config, "a + (b + [c + d]) + e"),
               vec!["a", "+", "(b + [c + d])", "+", "e"]);
}

#[test]
fn quotes_protect_their_content() {
    let config = TokenizerConfig { separators: strings(&[","]),
                                   quotes: strings(&["\""]),
                                   ..TokenizerConfig::default() };

    assert_eq!(tokenize(config, "\"a,b\",c"), vec!["\"a,b\"", ",", "c"]);
}

#[test]
fn pre_and_post_breaks() {
    let config = TokenizerConfig { pre_breaks: strings(&["$"]),
                                   post_breaks: strings(&[";"]),
                                   ..TokenizerConfig::default() };

    assert_eq!(tokenize(config, "a$b;c"), vec!["a", "$b;", "c"]);
}

#[test]
fn brackets_as_breaks() {
    let config = TokenizerConfig { open_brackets: strings(&["("]),
                                   close_brackets: strings(&[")"]),
                                   pre_breaks: strings(&["("]),
                                   post_breaks: strings(&[")"]),
                                   trim_whitespace: true,
                                   ..TokenizerConfig::default() };

    assert_eq!(tokenize(config, "2(3 (4))x"), vec!["2", "(3 (4))", "x"]);
}

#[test]
fn whitespace_breaks_outside_brackets() {
    let config = TokenizerConfig { open_brackets: strings(&["("]),
                                   close_brackets: strings(&[")"]),
                                   break_on_whitespace: true,
                                   trim_whitespace: true,
                                   ..TokenizerConfig::default() };
    assert_eq!(tokenize(config, "f(a b)  c"), vec!["f(a b)", "c"]);

    let config = TokenizerConfig { break_on_whitespace: true,
                                   include_empty: true,
                                   ..TokenizerConfig::default() };
    assert_eq!(tokenize(config, "a b"), vec!["a", " ", "b"]);
}

#[test]
fn mismatched_bracket_sets() {
    let config = TokenizerConfig { open_brackets: strings(&["(", "["]),
                                   close_brackets: strings(&[")"]),
                                   ..TokenizerConfig::default() };

    assert_eq!(Tokenizer::new(config).unwrap_err(),
               TokenizerError::MismatchedBrackets { open:  2,
                                                    close: 1, });
}

#[test]
fn symbol_finder_prefers_longest_match() {
    let finder = SymbolFinder::new(["=", "==", "=>", "<", "<="]);

    let (length, id) = finder.longest_match("==1").unwrap();
    assert_eq!((length, finder.symbol(id)), (2, "=="));

    let (length, id) = finder.longest_match("=1").unwrap();
    assert_eq!((length, finder.symbol(id)), (1, "="));

    let (length, id) = finder.longest_match("<=>").unwrap();
    assert_eq!((length, finder.symbol(id)), (2, "<="));

    assert!(finder.longest_match("x<").is_none());
}

#[test]
fn matcher_feeds_incrementally() {
    let finder = SymbolFinder::new(["-", "--", "-="]);
    let mut matcher = finder.matcher();

    assert!(matcher.feed('-'));
    assert_eq!(matcher.best().map(|(_, id)| finder.symbol(id)), Some("-"));
    assert!(!matcher.feed('-'));
    assert_eq!(matcher.best().map(|(_, id)| finder.symbol(id)), Some("--"));
    assert!(!matcher.feed('x'));

    matcher.reset();
    assert!(matcher.best().is_none());
    assert!(!matcher.feed('x'));
}
