use std::rc::Rc;

use crate::{
    ast::{Function, FunctionKind, Reference, ReferenceKind},
    error::CommandError,
    interpreter::{
        environment::{Environment, Outcome, ReferenceTable},
        lexer::is_label,
        parser::core::{Parser, Scope},
        symbols::{Tier, modifier::Orientation, operator::Associativity},
    },
};

type CommandResult = Result<Outcome, CommandError>;

/// Runs the command line `text`, with the command prefix already removed.
#[tracing::instrument(level = "debug", skip(env))]
pub(crate) fn run(env: &mut Environment, text: &str) -> CommandResult {
    let text = text.trim();
    let (name, arguments) = text.split_once(char::is_whitespace)
                                .map_or((text, ""), |(n, a)| (n, a.trim()));

    match name {
        "define" => define(env, arguments),
        "delete" => delete(env, arguments),
        "list" => Ok(list(env)),
        "print" => print(env, arguments),
        "help" => Ok(help(env)),
        _ => Err(CommandError::UnknownCommand { name: name.to_string() }),
    }
}

/// `define name(p1, p2) = body`
///
/// The function is registered before its body is parsed so the body can call
/// it. If the body fails to parse, the table is restored.
fn define(env: &mut Environment, arguments: &str) -> CommandResult {
    let malformed = |details: &str| CommandError::MalformedArguments { command: "define",
                                                                      details: details.to_string() };

    let (header, body) = arguments.split_once('=')
                                  .ok_or_else(|| malformed("expected 'name(parameters) = body'"))?;
    let header = header.trim();
    let (name, parameters) = header.strip_suffix(')')
                                   .and_then(|h| h.split_once('('))
                                   .ok_or_else(|| malformed("expected 'name(parameters)'"))?;
    let name = name.trim();
    if !is_label(name) {
        return Err(malformed(&format!("'{name}' is not a valid function name")));
    }

    let mut locals = ReferenceTable::new();
    let mut cells = Vec::new();
    for parameter in parameters.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        if !is_label(parameter) {
            return Err(malformed(&format!("'{parameter}' is not a valid parameter name")));
        }
        let cell = Reference::variable(parameter);
        if locals.insert(parameter.to_string(), Rc::clone(&cell)).is_some() {
            return Err(malformed(&format!("parameter '{parameter}' appears twice")));
        }
        cells.push(cell);
    }

    let key = (name.to_string(), cells.len());
    if env.functions.get(&key).is_some_and(|f| f.is_builtin()) {
        return Err(CommandError::AlreadyDefined { name: format!("{name}/{}", cells.len()) });
    }

    let function = Function::user(name, cells);
    let previous = env.functions.insert(key.clone(), Rc::clone(&function));

    let scope = Scope { index:     &env.index,
                        functions: &env.functions,
                        globals:   &mut env.globals,
                        locals:    Some(&locals),
                        starter:   None, };
    let parsed = Parser::new(scope).parse(body);

    let element = match parsed {
        Ok(Some(element)) => element,
        failed => {
            match previous {
                Some(previous) => env.functions.insert(key, previous),
                None => env.functions.remove(&key),
            };
            return Err(failed.err().map_or_else(|| malformed("the body is empty"), CommandError::Parse));
        },
    };

    function.set_body(element);
    tracing::debug!(signature = function.signature(), "defined function");
    Ok(Outcome::Message(format!("Defined {}.", function.signature())))
}

/// `delete name` removes a variable, `delete name/arity` a user function.
fn delete(env: &mut Environment, arguments: &str) -> CommandResult {
    if let Some((name, arity)) = arguments.split_once('/') {
        let name = name.trim();
        let arity = arity.trim()
                         .parse::<usize>()
                         .map_err(|_| CommandError::MalformedArguments { command: "delete",
                                                                         details: format!("'{arity}' is not an arity") })?;
        let key = (name.to_string(), arity);
        return match env.functions.get(&key) {
            Some(function) if !function.is_builtin() => {
                env.functions.remove(&key);
                Ok(Outcome::Message(format!("Deleted {name}/{arity}.")))
            },
            _ => Err(CommandError::NotFound { name: format!("{name}/{arity}") }),
        };
    }

    let name = arguments;
    match env.globals.get(name).map(|r| r.kind()) {
        Some(ReferenceKind::Variable) => {
            env.globals.remove(name);
            Ok(Outcome::Message(format!("Deleted {name}.")))
        },
        Some(ReferenceKind::Constant) => Err(CommandError::AlreadyDefined { name: name.to_string() }),
        None => Err(CommandError::NotFound { name: name.to_string() }),
    }
}

/// Variables with their definitions, then functions.
fn list(env: &Environment) -> Outcome {
    let mut variables = env.globals
                           .values()
                           .filter(|r| r.kind() == ReferenceKind::Variable)
                           .map(|r| format!("{} = {}", r.name(), r.definition().render(&env.index)))
                           .collect::<Vec<_>>();
    variables.sort();

    let mut functions = env.functions
                           .values()
                           .map(|f| match f.kind() {
                               FunctionKind::User { .. } => {
                                   let body = f.body().map(|b| b.render(&env.index)).unwrap_or_default();
                                   format!("{} = {body}", f.signature())
                               },
                               FunctionKind::Builtin { .. } => f.signature(),
                           })
                           .collect::<Vec<_>>();
    functions.sort();

    Outcome::Message(variables.into_iter().chain(functions).collect::<Vec<_>>().join("\n"))
}

/// The parsed expression, printed with minimal parentheses and not executed.
fn print(env: &mut Environment, arguments: &str) -> CommandResult {
    env.parse(arguments)?
       .map(|element| Outcome::Message(element.render(&env.index)))
       .ok_or_else(|| CommandError::MalformedArguments { command: "print",
                                                         details: "nothing to print".to_string() })
}

/// Commands and the grammar, loosest tier first.
fn help(env: &Environment) -> Outcome {
    let prefix = &env.settings.command_prefix;
    let mut lines = vec![format!("{prefix}define name(p1, p2) = body    define a function"),
                         format!("{prefix}delete name | name/arity      delete a variable or function"),
                         format!("{prefix}list                          list variables and functions"),
                         format!("{prefix}print expression              show how an expression groups"),
                         format!("{prefix}help                          show this help"),
                         String::new(),
                         "tier  kind                      symbols".to_string()];

    for (row, tier) in env.index.tiers().iter().enumerate() {
        let (kind, symbols) = match tier {
            Tier::Operators { associativity,
                              operators, } => {
                let kind = match associativity {
                    Associativity::LeftToRight => "operators, left-to-right",
                    Associativity::RightToLeft => "operators, right-to-left",
                };
                (kind, operators.iter().map(|o| o.symbol()).collect::<Vec<_>>())
            },
            Tier::Modifiers { orientation,
                              modifiers, } => {
                let kind = match orientation {
                    Orientation::Pre => "pre-modifiers",
                    Orientation::Post => "post-modifiers",
                };
                (kind, modifiers.iter().map(|m| m.symbol()).collect::<Vec<_>>())
            },
        };
        lines.push(format!("{row:<5} {kind:<25} {}", symbols.join(" ")));
    }
    Outcome::Message(lines.join("\n"))
}
