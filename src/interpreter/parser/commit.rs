use std::rc::Rc;

use crate::{
    ast::{Element, Reference},
    error::ParseError,
    interpreter::parser::{
        core::{ParseResult, Parser},
        items::{Item, Items},
    },
};

impl Parser<'_> {
    /// Stage 4: commits every symbol to one role, splices the default
    /// operator between adjacent operands and puts the starter in front of a
    /// line that opens with an operator.
    pub(crate) fn commit(&self, items: &mut Items, starter: Option<Rc<Reference>>) -> ParseResult<()> {
        let mut cursor = items.first();
        let mut after_operand = false;

        while let Some(id) = cursor {
            let next = items.next(id);
            let next_starts_operand = next.and_then(|n| items.get(n))
                                          .is_some_and(starts_operand);

            if let Some(Item::Symbol { text, roles }) = items.get(id) {
                let (text, roles) = (text.clone(), roles.clone());
                let committed = if after_operand {
                    let postfix_wins = roles.operator.is_none() || !next_starts_operand;
                    roles.postfix
                         .filter(|_| postfix_wins)
                         .map(Item::Postfix)
                         .or_else(|| roles.operator.map(Item::Operator))
                         .or_else(|| roles.prefix.map(Item::Prefix))
                } else {
                    roles.prefix
                         .map(Item::Prefix)
                         .or_else(|| roles.operator.map(Item::Operator))
                         .or_else(|| roles.postfix.map(Item::Postfix))
                };
                let committed = committed.ok_or(ParseError::UnrecognizedToken { token: text })?;
                tracing::trace!(item = %committed, "committed symbol");
                if let Some(slot) = items.get_mut(id) {
                    *slot = committed;
                }
            }

            let ends_operand = items.get(id).is_some_and(Item::ends_operand);
            if ends_operand && next.and_then(|n| items.get(n)).is_some_and(committed_start) {
                let default = self.scope.index.default_operator().clone();
                items.insert_before(next, Item::Operator(default));
                after_operand = false;
                cursor = next;
                continue;
            }

            after_operand = ends_operand;
            cursor = next;
        }

        if let Some(starter) = starter
           && let Some(first) = items.first()
           && matches!(items.get(first), Some(Item::Operator(_)))
        {
            tracing::trace!(name = starter.name(), "spliced starter");
            items.insert_before(Some(first), Item::Element(Element::Reference(starter)));
        }
        Ok(())
    }
}

/// Whether an item that follows a symbol lets that symbol be read as an
/// operator: elements do, and so do symbols that cannot be operators.
fn starts_operand(item: &Item) -> bool {
    match item {
        Item::Element(_) | Item::Prefix(_) => true,
        Item::Symbol { roles, .. } => roles.operator.is_none(),
        Item::Operator(_) | Item::Postfix(_) => false,
    }
}

/// Whether an item starts an operand. Symbols are judged by the role they
/// would take after an operand, which is the only place this is asked.
fn committed_start(item: &Item) -> bool {
    match item {
        Item::Element(_) | Item::Prefix(_) => true,
        Item::Symbol { roles, .. } => {
            roles.operator.is_none() && roles.postfix.is_none() && roles.prefix.is_some()
        },
        Item::Operator(_) | Item::Postfix(_) => false,
    }
}
