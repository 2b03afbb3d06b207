use std::fmt;

use crate::{
    ast::Element,
    interpreter::symbols::{
        Role, SymbolRoles,
        modifier::Modifier,
        operator::Operator,
    },
};

/// One entry of the linearized line.
#[derive(Debug, Clone)]
pub(crate) enum Item {
    /// A resolved base element.
    Element(Element),
    /// A symbol whose role is not decided yet.
    Symbol {
        /// The symbol text.
        text:  String,
        /// Every role registered for the text.
        roles: SymbolRoles,
    },
    /// A symbol committed as a binary operator.
    Operator(Role<Operator>),
    /// A symbol committed as a pre-modifier.
    Prefix(Role<Modifier>),
    /// A symbol committed as a post-modifier.
    Postfix(Role<Modifier>),
}

impl Item {
    /// Elements and post-modifiers end an operand.
    pub(crate) const fn ends_operand(&self) -> bool {
        matches!(self, Self::Element(_) | Self::Postfix(_))
    }

    /// The committed tier of a symbol item.
    pub(crate) const fn tier(&self) -> Option<usize> {
        match self {
            Self::Operator(role) => Some(role.tier),
            Self::Prefix(role) | Self::Postfix(role) => Some(role.tier),
            Self::Element(_) | Self::Symbol { .. } => None,
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element(element) => write!(f, "{element}"),
            Self::Symbol { text, .. } => write!(f, "{text}"),
            Self::Operator(role) => write!(f, "{}", role.behavior.symbol()),
            Self::Prefix(role) | Self::Postfix(role) => write!(f, "{}", role.behavior.symbol()),
        }
    }
}

#[derive(Debug)]
struct Node {
    item: Option<Item>,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Items addressed by index and linked in line order.
///
/// Insertions only relink neighbours, so the ids handed out earlier stay
/// valid through every stage.
#[derive(Debug, Default)]
pub(crate) struct Items {
    nodes: Vec<Node>,
    head:  Option<usize>,
    tail:  Option<usize>,
}

impl Items {
    /// Appends an item; returns its id.
    pub(crate) fn push_back(&mut self, item: Item) -> usize {
        let id = self.nodes.len();
        self.nodes.push(Node { item: Some(item),
                               prev: self.tail,
                               next: None, });
        match self.tail {
            Some(tail) => self.nodes[tail].next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        id
    }

    /// Inserts an item before `before`, or at the end for `None`.
    pub(crate) fn insert_before(&mut self, before: Option<usize>, item: Item) -> usize {
        let Some(before) = before else {
            return self.push_back(item);
        };
        let id = self.nodes.len();
        let prev = self.nodes[before].prev;
        self.nodes.push(Node { item: Some(item),
                               prev,
                               next: Some(before), });
        self.nodes[before].prev = Some(id);
        match prev {
            Some(prev) => self.nodes[prev].next = Some(id),
            None => self.head = Some(id),
        }
        id
    }

    /// Id of the first item.
    pub(crate) const fn first(&self) -> Option<usize> {
        self.head
    }

    /// Id of the item after `id`.
    pub(crate) fn next(&self, id: usize) -> Option<usize> {
        self.nodes.get(id).and_then(|n| n.next)
    }

    /// Ids in line order.
    pub(crate) fn ids(&self) -> Vec<usize> {
        std::iter::successors(self.head, |&id| self.next(id)).collect()
    }

    pub(crate) fn get(&self, id: usize) -> Option<&Item> {
        self.nodes.get(id).and_then(|n| n.item.as_ref())
    }

    pub(crate) fn get_mut(&mut self, id: usize) -> Option<&mut Item> {
        self.nodes.get_mut(id).and_then(|n| n.item.as_mut())
    }

    /// Moves an item out, leaving its slot empty.
    pub(crate) fn take(&mut self, id: usize) -> Option<Item> {
        self.nodes.get_mut(id).and_then(|n| n.item.take())
    }

    /// The items of `ids`, separated by spaces.
    pub(crate) fn describe(&self, ids: &[usize]) -> String {
        ids.iter()
           .filter_map(|&id| self.get(id))
           .map(ToString::to_string)
           .collect::<Vec<_>>()
           .join(" ")
    }
}
