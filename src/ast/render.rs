use crate::{
    ast::{Element, Execution, Messenger, Modification, Operation},
    interpreter::{
        symbols::{SymbolIndex, modifier::Orientation, operator::Associativity},
        value::core::display_value,
    },
};

/// Where an element sits relative to its parent.
#[derive(Clone, Copy)]
enum Slot {
    /// Top level, a container, a call argument or a messenger branch.
    Free,
    /// Left operand of an operator at `tier` with `associativity`.
    Left(Option<usize>, Option<Associativity>),
    /// Right operand of an operator at `tier` with `associativity`.
    Right(Option<usize>, Option<Associativity>),
    /// Operand of a modifier at `tier` with `orientation`.
    Modified(Option<usize>, Orientation),
}

impl Element {
    /// Prints the element with only the parentheses `index` needs to parse
    /// it back into the same tree.
    ///
    /// Explicit containers keep their parentheses. Symbols that `index` does
    /// not know are always wrapped.
    ///
    /// # Example
    /// ```
    /// use std::rc::Rc;
    ///
    /// use operon::{ast::Element, interpreter::symbols::SymbolIndex};
    ///
    /// let index = SymbolIndex::standard();
    /// let plus = Rc::clone(&index.roles("+").unwrap().operator.as_ref().unwrap().behavior);
    /// let times = Rc::clone(&index.roles("*").unwrap().operator.as_ref().unwrap().behavior);
    ///
    /// let one = || Element::from(operon::interpreter::value::core::Number::from(1));
    /// let sum = Element::operation(plus, one(), one());
    /// let product = Element::operation(times, sum, one());
    ///
    /// assert_eq!(product.render(&index), "(1 + 1) * 1");
    /// assert_eq!(product.to_string(), "((1 + 1) * 1)");
    /// ```
    #[must_use]
    pub fn render(&self, index: &SymbolIndex) -> String {
        self.render_in(index, Slot::Free)
    }

    fn render_in(&self, index: &SymbolIndex, slot: Slot) -> String {
        let text = match self {
            Self::Literal(value) => display_value(value),
            Self::Reference(reference) => reference.name().to_string(),
            Self::Operation(Operation { operator,
                                        left,
                                        right, }) => {
                let tier = index.operator_tier(operator.symbol());
                let associativity = index.associativity(operator.symbol());
                format!("{} {} {}",
                        left.render_in(index, Slot::Left(tier, associativity)),
                        operator.symbol(),
                        right.render_in(index, Slot::Right(tier, associativity)))
            },
            Self::Modification(Modification { modifier, operand }) => {
                let orientation = modifier.orientation();
                let tier = index.modifier_tier(modifier.symbol(), orientation);
                let inner = operand.render_in(index, Slot::Modified(tier, orientation));
                // Adjacent symbols would be read back as one longer symbol.
                let gap = match operand.as_ref() {
                    Self::Modification(m) if m.modifier.orientation() == orientation => " ",
                    _ => "",
                };
                match orientation {
                    Orientation::Pre => format!("{}{gap}{inner}", modifier.symbol()),
                    Orientation::Post => format!("{inner}{gap}{}", modifier.symbol()),
                }
            },
            Self::Execution(Execution { function, arguments }) => {
                let arguments = arguments.iter()
                                         .map(|a| a.render_in(index, Slot::Free))
                                         .collect::<Vec<_>>();
                return format!("{}({})", function.name(), arguments.join(", "));
            },
            Self::Container(inner) => return format!("({})", inner.render_in(index, Slot::Free)),
            Self::Messenger(Messenger { then_branch,
                                        else_branch, }) => {
                return format!("({} : {})",
                               then_branch.render_in(index, Slot::Free),
                               else_branch.render_in(index, Slot::Free));
            },
        };

        if self.needs_parentheses(index, slot) {
            format!("({text})")
        } else {
            text
        }
    }

    fn needs_parentheses(&self, index: &SymbolIndex, slot: Slot) -> bool {
        if matches!(slot, Slot::Free) {
            return false;
        }
        match self {
            Self::Literal(Some(number)) => number.is_compound_text(),
            Self::Operation(Operation { operator, .. }) => {
                let Some(own) = index.operator_tier(operator.symbol()) else {
                    return true;
                };
                match slot {
                    Slot::Free => false,
                    Slot::Left(Some(parent), associativity) => {
                        own < parent
                        || (own == parent && associativity != Some(Associativity::LeftToRight))
                    },
                    Slot::Right(Some(parent), associativity) => {
                        own < parent
                        || (own == parent && associativity != Some(Associativity::RightToLeft))
                    },
                    Slot::Modified(Some(parent), _) => own <= parent,
                    _ => true,
                }
            },
            Self::Modification(Modification { modifier, .. }) => {
                let orientation = modifier.orientation();
                let Some(own) = index.modifier_tier(modifier.symbol(), orientation) else {
                    return true;
                };
                match slot {
                    Slot::Free => false,
                    Slot::Left(Some(parent), _) | Slot::Right(Some(parent), _) => own < parent,
                    Slot::Modified(Some(parent), outer) => match (outer, orientation) {
                        (Orientation::Post, Orientation::Pre) => own < parent,
                        (Orientation::Pre, Orientation::Post) => own <= parent,
                        _ => false,
                    },
                    _ => true,
                }
            },
            _ => false,
        }
    }
}
