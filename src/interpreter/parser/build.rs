use crate::{
    ast::Element,
    error::ParseError,
    interpreter::{
        parser::{
            core::{ParseResult, Parser},
            group::Group,
            items::{Item, Items},
        },
        symbols::operator::Associativity,
    },
};

impl Parser<'_> {
    /// Stage 6: turns a grouping into an element tree, moving the element
    /// items out of `items`.
    ///
    /// Gaps become the void literal. Left-to-right chains fold from the left,
    /// right-to-left chains from the right.
    pub(crate) fn build(&self, items: &mut Items, group: Group) -> ParseResult<Element> {
        match group {
            Group::Gap => Ok(Element::void()),
            Group::Leaf(id) => match items.take(id) {
                Some(Item::Element(element)) => Ok(element),
                Some(other) => Err(ParseError::OperatorExpected { context: other.to_string() }),
                None => Err(ParseError::OperatorExpected { context: String::new() }),
            },
            Group::Modified { modifier, operand } => {
                Ok(Element::modification(modifier, self.build(items, *operand)?))
            },
            Group::Chain { associativity,
                           operators,
                           operands, } => {
                let mut operands = operands.into_iter()
                                           .map(|g| self.build(items, g))
                                           .collect::<ParseResult<Vec<_>>>()?;
                let mut operators = operators.into_iter();

                match associativity {
                    Associativity::LeftToRight => {
                        let mut rest = operands.drain(..);
                        let first = rest.next().unwrap_or_else(Element::void);
                        Ok(rest.fold(first, |left, right| match operators.next() {
                                   Some(operator) => Element::operation(operator, left, right),
                                   None => left,
                               }))
                    },
                    Associativity::RightToLeft => {
                        let mut operators = operators.rev();
                        let mut rest = operands.drain(..).rev();
                        let last = rest.next().unwrap_or_else(Element::void);
                        Ok(rest.fold(last, |right, left| match operators.next() {
                                   Some(operator) => Element::operation(operator, left, right),
                                   None => right,
                               }))
                    },
                }
            },
        }
    }
}
