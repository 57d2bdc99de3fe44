use crate::traits::{Block, Word};
use core::fmt;

/// A keyed block function on fixed-width word tuples.
///
/// Implementors are deterministic: for one key and one input block the
/// output block is always the same, and for a fixed key distinct inputs
/// produce distinct outputs for all practical purposes. Values are cheap to
/// copy and own nothing beyond their key.
///
/// The engine treats the input block as a counter and never inspects the
/// output beyond handing its words out in order, so any function with this
/// shape can drive a [crate::CounterEngine].
pub trait Prf: Copy + Clone + fmt::Debug + PartialEq + Eq {
    /// Word type of the domain, range, and key tuples.
    type Word: Word;
    /// Input and output block; the domain and range coincide.
    type Block: Block<Self::Word>;
    /// Key tuple. Not necessarily the same length as the block.
    type Key: Block<Self::Word>;

    /// Create an instance evaluating under `key`.
    fn with_key(key: Self::Key) -> Self;
    /// The key this instance evaluates under.
    fn key(&self) -> &Self::Key;
    /// Apply the block function to `input`.
    fn eval(&self, input: Self::Block) -> Self::Block;
}
