use std::{cell::RefCell, io, rc::Rc};

use operon::{
    error::{CommandError, Error, ParseError, RuntimeError},
    interpreter::{
        environment::{Environment, Outcome, Settings},
        evaluator::unary::negate,
        symbols::{
            Tier,
            modifier::{Modifier, ModifierRule},
            standard::standard_builder,
        },
        value::core::Number,
    },
    repl::{Joiner, statements},
};
use pretty_assertions::assert_eq;

/// An output sink the test can read back.
#[derive(Clone, Default)]
struct Captured(Rc<RefCell<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Captured {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

fn value(n: i64) -> Outcome {
    Outcome::Value(Some(Number::from(n)))
}

fn message(env: &mut Environment, line: &str) -> String {
    match env.run(line) {
        Ok(Outcome::Message(text)) => text,
        other => panic!("'{line}' gave {other:?}"),
    }
}

#[test]
fn answer_and_starter() {
    let mut env = Environment::new();

    assert_eq!(env.run("6 * 7").unwrap(), value(42));
    assert_eq!(env.answer(), Some(Number::from(42)));
    assert_eq!(env.run("* 2").unwrap(), value(84));
    assert_eq!(env.run("ans - 4").unwrap(), value(80));

    // Leading whitespace opts out of the starter.
    assert_eq!(env.run(" * 2").unwrap(), Outcome::Value(None));
    // Void results leave the answer alone.
    assert_eq!(env.answer(), Some(Number::from(80)));

    env.settings_mut().starter = false;
    assert_eq!(env.run("* 2").unwrap(), Outcome::Value(None));
}

#[test]
fn empty_lines() {
    let mut env = Environment::new();
    assert_eq!(env.run("").unwrap(), Outcome::Empty);
    assert_eq!(env.run("   ").unwrap(), Outcome::Empty);
}

#[test]
fn void_propagates() {
    let mut env = Environment::new();

    assert_eq!(env.run("x = void").unwrap(), Outcome::Value(None));
    assert_eq!(env.run("x * 2").unwrap(), Outcome::Value(None));
    assert_eq!(env.run("2 - x").unwrap(), Outcome::Value(None));
    assert_eq!(env.run("-x").unwrap(), Outcome::Value(None));
    assert_eq!(env.run("x + 1").unwrap(), value(1));
    assert_eq!(env.run("x == void").unwrap(), value(1));
    assert_eq!(env.run("5 ? 10 : 20").unwrap(), Outcome::Value(None));
    assert_eq!(env.run("x++").unwrap(), Outcome::Value(None));
}

#[test]
fn deferred_definitions_run_when_read() {
    let mut env = Environment::new();

    env.run("a = 42").unwrap();
    assert_eq!(env.run("ppa := ++a").unwrap(), Outcome::Value(None));
    assert_eq!(env.run("a").unwrap(), value(42));
    assert_eq!(env.run("ppa").unwrap(), value(43));
    assert_eq!(env.run("a").unwrap(), value(43));
}

#[test]
fn chained_definitions_bind_names() {
    let mut env = Environment::new();

    env.run("a = 5").unwrap();
    assert_eq!(env.run("c := b := a").unwrap(), Outcome::Value(None));
    assert_eq!(env.answer(), Some(Number::from(5)));
    env.run("a = 9").unwrap();
    assert_eq!(env.run("c").unwrap(), value(9));
    assert_eq!(message(&mut env, ":print c := b := a"), "c := b := a");
}

#[test]
fn self_reading_definition_is_an_error() {
    let mut env = Environment::new();

    env.run("a := a + 1").unwrap();
    assert!(matches!(env.run("a"),
                     Err(Error::Runtime(RuntimeError::RecursionLimit { name })) if name == "a"));
    assert_eq!(env.run("2 + 2").unwrap(), value(4));
    // The read depth recovers after the failure.
    assert!(matches!(env.run("a"), Err(Error::Runtime(RuntimeError::RecursionLimit { .. }))));
    env.run("a = 1").unwrap();
    assert_eq!(env.run("a").unwrap(), value(1));
}

#[test]
fn failed_lines_leave_the_tables_alone() {
    let mut env = Environment::new();

    assert!(env.run("foo bar @").is_err());
    assert!(env.reference("foo").is_none());
    assert!(env.reference("bar").is_none());

    assert!(env.run(":define g(x) = x + zed @").is_err());
    assert!(env.reference("zed").is_none());

    env.run("foo bar").unwrap();
    assert!(env.reference("foo").is_some());
}

#[test]
fn constants_are_not_redefinable() {
    let mut env = Environment::new();

    for line in ["pi = 3", "ans = 1", "3 = 4", "e += 1", "void++"] {
        assert!(matches!(env.run(line),
                         Err(Error::Runtime(RuntimeError::NotRedefinable { .. }))),
                "{line}");
    }
}

#[test]
fn runtime_errors() {
    let mut env = Environment::new();

    assert!(matches!(env.run("1 / 0"), Err(Error::Runtime(RuntimeError::DivisionByZero))));
    assert!(matches!(env.run("1 : 2"), Err(Error::Runtime(RuntimeError::MisplacedMessenger))));
    assert!(matches!(env.run("(-1)!"),
                     Err(Error::Runtime(RuntimeError::FactorialDomain { .. }))));
    assert!(matches!(env.run("assert(1 == 2)"), Err(Error::Runtime(RuntimeError::AssertionFailed))));

    env.run(":define spin(n) = spin(n + 1)").unwrap();
    assert!(matches!(env.run("spin(0)"),
                     Err(Error::Runtime(RuntimeError::RecursionLimit { .. }))));
    // The depth counter recovers after the failure.
    env.run(":define spin(n) = n").unwrap();
    assert_eq!(env.run("spin(7)").unwrap(), value(7));
}

#[test]
fn side_effects_before_a_failure_are_kept() {
    let mut env = Environment::new();

    assert!(env.run("y = 1 + (z = 5) / 0").is_err());
    assert_eq!(env.run("z").unwrap(), value(5));
}

#[test]
fn define_and_call() {
    let mut env = Environment::new();

    assert_eq!(message(&mut env, ":define f(x) = x + 1"), "Defined f(x).");
    assert_eq!(message(&mut env, ":define f(x, y) = x * y"), "Defined f(x, y).");
    assert_eq!(env.run("f(4)").unwrap(), value(5));
    assert_eq!(env.run("f(4, 5)").unwrap(), value(20));

    // Parameters shadow globals without touching them.
    env.run("x = 100").unwrap();
    assert_eq!(env.run("f(1)").unwrap(), value(2));
    assert_eq!(env.run("x").unwrap(), value(100));
}

#[test]
fn define_errors() {
    let mut env = Environment::new();

    assert!(matches!(env.run(":define abs(x) = x"),
                     Err(Error::Command(CommandError::AlreadyDefined { .. }))));
    assert!(matches!(env.run(":define f(x, x) = x"),
                     Err(Error::Command(CommandError::MalformedArguments { .. }))));
    assert!(matches!(env.run(":define f(x)"),
                     Err(Error::Command(CommandError::MalformedArguments { .. }))));
    assert!(matches!(env.run(":define f(x) = "),
                     Err(Error::Command(CommandError::MalformedArguments { .. }))));
    assert!(matches!(env.run(":define g(x) = x @"),
                     Err(Error::Command(CommandError::Parse(ParseError::UnrecognizedToken { .. })))));

    assert!(env.function("f", 1).is_none());
    assert!(env.function("g", 1).is_none());
    assert!(env.function("abs", 1).is_some_and(|f| f.is_builtin()));
}

#[test]
fn delete() {
    let mut env = Environment::new();
    env.run("x = 2").unwrap();
    env.run(":define f(x) = x").unwrap();

    assert_eq!(message(&mut env, ":delete f/1"), "Deleted f/1.");
    assert!(env.function("f", 1).is_none());
    assert_eq!(message(&mut env, ":delete x"), "Deleted x.");
    assert!(env.reference("x").is_none());

    assert!(matches!(env.run(":delete f/1"), Err(Error::Command(CommandError::NotFound { .. }))));
    assert!(matches!(env.run(":delete abs/1"), Err(Error::Command(CommandError::NotFound { .. }))));
    assert!(matches!(env.run(":delete nothing"),
                     Err(Error::Command(CommandError::NotFound { .. }))));
    assert!(matches!(env.run(":delete pi"),
                     Err(Error::Command(CommandError::AlreadyDefined { .. }))));
    assert!(matches!(env.run(":delete f/one"),
                     Err(Error::Command(CommandError::MalformedArguments { .. }))));
}

#[test]
fn list() {
    let mut env = Environment::new();
    env.run("x = 2").unwrap();
    env.run("y := x + 1").unwrap();
    env.run(":define f(a, b) = a - b").unwrap();

    let listing = message(&mut env, ":list");
    let lines = listing.lines().collect::<Vec<_>>();

    assert_eq!(lines[..2], ["x = 2", "y = x + 1"]);
    assert!(lines.contains(&"f(a, b) = a - b"));
    assert!(lines.contains(&"max/2"));
    assert!(!lines.iter().any(|l| l.starts_with("pi")));
}

#[test]
fn print_shows_grouping_without_running() {
    let mut env = Environment::new();
    env.run("x = 1").unwrap();

    assert_eq!(message(&mut env, ":print x = x + 1 * 2"), "x = x + 1 * 2");
    assert_eq!(message(&mut env, ":print 2(3)"), "2 * (3)");
    assert_eq!(env.run("x").unwrap(), value(1));

    assert!(matches!(env.run(":print"),
                     Err(Error::Command(CommandError::MalformedArguments { .. }))));
}

#[test]
fn help_and_unknown_commands() {
    let mut env = Environment::new();

    let help = message(&mut env, ":help");
    assert!(help.contains(":define"));
    assert!(help.contains("operators, right-to-left"));
    assert!(help.contains("post-modifiers"));

    assert!(matches!(env.run(":frobnicate"),
                     Err(Error::Command(CommandError::UnknownCommand { name })) if name == "frobnicate"));
}

#[test]
fn custom_command_prefix() {
    let mut env = Environment::new().with_settings(Settings { command_prefix: "/".to_string(),
                                                              starter:        true, });

    assert_eq!(message(&mut env, "/print 2 3"), "2 * 3");
    assert!(env.run(":print 2").is_err());
}

#[test]
fn custom_grammar() {
    let index = standard_builder().tier(Tier::prefixes([Modifier::new("~",
                                                                      ModifierRule::Values(negate))]))
                                  .build()
                                  .unwrap();
    let mut env = Environment::with_index(index);

    assert_eq!(env.run("~2 ^ 2").unwrap(), value(4));
    assert_eq!(env.run("-2 ^ 2").unwrap(), value(-4));
    assert_eq!(message(&mut env, ":print ~(2 ^ 2)"), "~(2 ^ 2)");
}

#[test]
fn show_writes_to_the_sink() {
    let sink = Captured::default();
    let mut env = Environment::new().with_output(Box::new(sink.clone()));

    let outcome = env.run("6 * 7").unwrap();
    env.show(&outcome).unwrap();
    let outcome = env.run("void").unwrap();
    env.show(&outcome).unwrap();
    let outcome = env.run(":print 1 + 2").unwrap();
    env.show(&outcome).unwrap();

    assert_eq!(sink.text(), "42\n1 + 2\n");
}

#[test]
fn statement_splitting() {
    assert_eq!(statements("# only a comment\n\n   \ny = 2"), vec![(4, "y = 2".to_string())]);
    assert_eq!(statements("a = 1 \\\n + 2 \\\n + 3\nb"),
               vec![(1, "a = 1 \n + 2 \n + 3".to_string()), (4, "b".to_string())]);
    assert!(statements("").is_empty());
}

#[test]
fn joiner_waits_for_continued_lines() {
    let mut joiner = Joiner::default();

    assert_eq!(joiner.feed(1, "x = 1 + \\"), None);
    assert!(joiner.is_pending());
    assert_eq!(joiner.feed(2, "  2 \\ # more"), None);
    assert_eq!(joiner.feed(3, "  + 3"), Some((1, "x = 1 + \n  2 \n  + 3".to_string())));
    assert!(!joiner.is_pending());

    assert_eq!(joiner.feed(4, "# nothing"), None);
    assert_eq!(joiner.feed(5, "y \\"), None);
    assert_eq!(joiner.finish(), Some((5, "y ".to_string())));

    assert_eq!(joiner.feed(6, "z \\"), None);
    joiner.discard();
    assert_eq!(joiner.feed(7, "w"), Some((7, "w".to_string())));
}
