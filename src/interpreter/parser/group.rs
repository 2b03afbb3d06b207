use std::rc::Rc;

use crate::{
    error::ParseError,
    interpreter::{
        parser::{
            core::{ParseResult, Parser},
            items::{Item, Items},
        },
        symbols::{
            Tier,
            modifier::{Modifier, Orientation},
            operator::{Associativity, Operator},
        },
    },
};

/// A precedence-correct grouping of items, still referring to element items
/// by id.
#[derive(Debug)]
pub(crate) enum Group {
    /// An empty operand slot of an operator chain.
    Gap,
    /// A single element item.
    Leaf(usize),
    /// A modifier and its grouped operand.
    Modified {
        modifier: Rc<Modifier>,
        operand:  Box<Group>,
    },
    /// Operands joined by operators of one tier.
    Chain {
        associativity: Associativity,
        operators:     Vec<Rc<Operator>>,
        operands:      Vec<Group>,
    },
}

/// An item not grouped yet, or a finished group.
enum Piece {
    Item(usize),
    Group(Group),
}

impl Parser<'_> {
    /// Stage 5: groups the items `ids` by precedence.
    pub(crate) fn group(&self, items: &Items, ids: &[usize]) -> ParseResult<Group> {
        self.group_pieces(items, ids.iter().map(|&id| Piece::Item(id)).collect())
    }

    /// Partitions the run at its loosest tier and recurses.
    fn group_pieces(&self, items: &Items, mut pieces: Vec<Piece>) -> ParseResult<Group> {
        let Some(tier) = pieces.iter().filter_map(|p| tier_of(items, p)).min() else {
            return match pieces.pop() {
                None => Ok(Group::Gap),
                Some(last) if pieces.is_empty() => Ok(into_group(last)),
                Some(last) => {
                    pieces.push(last);
                    Err(ParseError::OperatorExpected { context: describe(items, &pieces) })
                },
            };
        };

        match self.scope.index.tiers().get(tier) {
            Some(Tier::Operators { associativity, .. }) => {
                self.group_chain(items, pieces, tier, *associativity)
            },
            Some(Tier::Modifiers { orientation: Orientation::Pre,
                                   .. }) => {
                let pieces = self.group_prefixes(items, pieces, tier)?;
                self.group_pieces(items, pieces)
            },
            Some(Tier::Modifiers { orientation: Orientation::Post,
                                   .. }) => {
                let pieces = self.group_postfixes(items, pieces, tier)?;
                self.group_pieces(items, pieces)
            },
            None => Err(ParseError::OperatorExpected { context: describe(items, &pieces) }),
        }
    }

    /// Splits the run at every operator of `tier`.
    fn group_chain(&self,
                   items: &Items,
                   pieces: Vec<Piece>,
                   tier: usize,
                   associativity: Associativity)
                   -> ParseResult<Group> {
        let mut operators = Vec::new();
        let mut operands = Vec::new();
        let mut segment = Vec::new();

        for piece in pieces {
            if let Piece::Item(id) = piece
               && let Some(Item::Operator(role)) = items.get(id)
               && role.tier == tier
            {
                operators.push(Rc::clone(&role.behavior));
                operands.push(self.group_pieces(items, std::mem::take(&mut segment))?);
                continue;
            }
            segment.push(piece);
        }
        operands.push(self.group_pieces(items, segment)?);

        Ok(Group::Chain { associativity,
                          operators,
                          operands })
    }

    /// Groups the pre-modifiers of `tier`, rightmost first. Each takes
    /// everything to its right up to an operator or post-modifier of the
    /// same or a looser tier.
    fn group_prefixes(&self,
                      items: &Items,
                      mut pieces: Vec<Piece>,
                      tier: usize)
                      -> ParseResult<Vec<Piece>> {
        for i in (0..pieces.len()).rev() {
            let Some(modifier) = modifier_at(items, &pieces[i], tier, Orientation::Pre) else {
                continue;
            };
            let end = (i + 1..pieces.len()).find(|&j| stops(items, &pieces[j], tier, Orientation::Pre))
                                           .unwrap_or(pieces.len());
            let operand = pieces.drain(i + 1..end).collect::<Vec<_>>();
            let group = self.modified(items, modifier, operand)?;
            pieces[i] = Piece::Group(group);
        }
        Ok(pieces)
    }

    /// Groups the post-modifiers of `tier`, leftmost first. Each takes
    /// everything to its left down to an operator or pre-modifier of the same
    /// or a looser tier.
    fn group_postfixes(&self,
                       items: &Items,
                       mut pieces: Vec<Piece>,
                       tier: usize)
                       -> ParseResult<Vec<Piece>> {
        let mut i = 0;
        while i < pieces.len() {
            let Some(modifier) = modifier_at(items, &pieces[i], tier, Orientation::Post) else {
                i += 1;
                continue;
            };
            let start = (0..i).rev()
                              .find(|&j| stops(items, &pieces[j], tier, Orientation::Post))
                              .map_or(0, |j| j + 1);
            let operand = pieces.drain(start..i).collect::<Vec<_>>();
            let group = self.modified(items, modifier, operand)?;
            pieces[start] = Piece::Group(group);
            i = start + 1;
        }
        Ok(pieces)
    }

    fn modified(&self,
                items: &Items,
                modifier: Rc<Modifier>,
                operand: Vec<Piece>)
                -> ParseResult<Group> {
        match self.group_pieces(items, operand)? {
            Group::Gap => Err(ParseError::ElementExpected { symbol: modifier.symbol().to_string() }),
            operand => Ok(Group::Modified { modifier,
                                            operand: Box::new(operand) }),
        }
    }
}

/// Tier of a committed symbol piece.
fn tier_of(items: &Items, piece: &Piece) -> Option<usize> {
    match piece {
        Piece::Item(id) => items.get(*id).and_then(Item::tier),
        Piece::Group(_) => None,
    }
}

/// The modifier of `orientation` at `tier` held by `piece`, if any.
fn modifier_at(items: &Items,
               piece: &Piece,
               tier: usize,
               orientation: Orientation)
               -> Option<Rc<Modifier>> {
    let Piece::Item(id) = piece else {
        return None;
    };
    match (items.get(*id)?, orientation) {
        (Item::Prefix(role), Orientation::Pre) | (Item::Postfix(role), Orientation::Post)
            if role.tier == tier =>
        {
            Some(Rc::clone(&role.behavior))
        },
        _ => None,
    }
}

/// Whether `piece` ends the operand of a modifier of `orientation` at `tier`.
fn stops(items: &Items, piece: &Piece, tier: usize, orientation: Orientation) -> bool {
    let Piece::Item(id) = piece else {
        return false;
    };
    match (items.get(*id), orientation) {
        (Some(Item::Operator(role)), _) => role.tier <= tier,
        (Some(Item::Postfix(role)), Orientation::Pre) | (Some(Item::Prefix(role)), Orientation::Post) => {
            role.tier <= tier
        },
        _ => false,
    }
}

fn into_group(piece: Piece) -> Group {
    match piece {
        Piece::Item(id) => Group::Leaf(id),
        Piece::Group(group) => group,
    }
}

fn describe(items: &Items, pieces: &[Piece]) -> String {
    let ids = pieces.iter()
                    .filter_map(|p| match p {
                        Piece::Item(id) => Some(*id),
                        Piece::Group(_) => None,
                    })
                    .collect::<Vec<_>>();
    items.describe(&ids)
}
