//! Counter-based random number engines after Salmon, Moraes, Dror, and
//! Shaw, "Parallel Random Numbers: As Easy as 1, 2, 3" (SC '11).
//!
//! Provides the Threefry and Philox keyed block functions together with a
//! [CounterEngine] adapter that presents either one as a conventional
//! uniform stream generator. The block-function input is split between a
//! caller-controlled *base counter*, which labels an independent stream,
//! and an engine-managed *sequence counter* occupying the input's top
//! `COUNTER_BITS` bits, whose increment drives successive invocations.
//!
//! # Features
//! - Threefry and Philox in all four `(N, W)` variants, bit-exact against
//!   the Random123 reference vectors, with type-level round-count control.
//! - `N * 2^COUNTER_BITS` words per stream; distinct base counters under
//!   one key yield disjoint, statistically independent streams.
//! - Constant-time `discard`, cheap restart and reseed, textual state
//!   round-trip, field-wise engine equality.
//! - Implements `RngCore` and `SeedableRng` for compatibility with the Rust
//!   random ecosystem.
//!
//! # Example
//! ```
//! use cb_rng::{CounterEngine, Threefry4x64};
//!
//! fn main() {
//!     let mut engine = CounterEngine::<Threefry4x64, 64>::new(7)
//!         .expect("a scalar seed leaves the reserved key bits clear");
//!     let first = engine.next().expect("fresh stream");
//!
//!     // Rewinding to the same base counter replays the stream.
//!     engine.restart([0; 4]).expect("zero base counter is always valid");
//!     assert_eq!(engine.next().expect("fresh stream"), first);
//!
//!     // A different base counter starts an unrelated stream.
//!     engine.restart([1, 0, 0, 0]).expect("low counter words are free");
//!     assert_ne!(engine.next().expect("fresh stream"), first);
//! }
//! ```

mod errors;
mod philox;
mod prf;
mod threefry;
mod traits;

use core::fmt;
use core::str::FromStr;
pub use errors::EngineError;
pub use philox::{Philox2x32, Philox2x64, Philox4x32, Philox4x64};
pub use prf::Prf;
use rand_core::{RngCore, SeedableRng};
pub use threefry::{Threefry2x32, Threefry2x64, Threefry4x32, Threefry4x64};
pub use traits::{Block, Word};

/// A uniform random number engine driving a counter-based block function.
///
/// `CounterEngine` adapts a [Prf] into a stream generator. Each invocation
/// input is the bitwise OR of the base counter with the sequence counter,
/// the latter packed into the `COUNTER_BITS` most significant bits of the
/// input viewed as a little-endian multi-word integer. One invocation
/// yields a block of `N` words which the engine hands out one draw at a
/// time before advancing the sequence counter.
///
/// # Generic Parameters
/// - `P` - The block function, e.g. [Threefry4x64] or [Philox4x32].
/// - `COUNTER_BITS` - Input bits reserved for the sequence counter, in
///   `1..=64` and at most the input width. Determines the stream length of
///   `N * 2^COUNTER_BITS` words.
///
/// # Parallel use
/// Engines are plain value types with no shared state. The intended
/// parallel idiom is instance-per-task: every task constructs or restarts
/// its own engine with a base counter encoding the task identity. Streams
/// under the same key never overlap as long as base counters are distinct.
///
/// # Reserved bits
/// The engine claims the top `COUNTER_BITS` of the counter input and the
/// top `ceil(log2(N * bits(W)))` bits of the key's highest-index word. Keys
/// or base counters with any of those bits set are rejected with
/// [EngineError::OutOfRange].
#[derive(Clone, Copy, Debug)]
pub struct CounterEngine<P: Prf, const COUNTER_BITS: u32> {
    prf: P,
    base: P::Block,
    /// Index of the next block to generate; the buffer, when partially
    /// read, holds block `seq - 1`.
    seq: u128,
    buffer: P::Block,
    index: usize,
}

impl<P: Prf, const COUNTER_BITS: u32> CounterEngine<P, COUNTER_BITS> {
    /// Smallest value [CounterEngine::next] can return.
    pub const MIN: P::Word = P::Word::ZERO;
    /// Largest value [CounterEngine::next] can return.
    pub const MAX: P::Word = P::Word::MAX;

    const WORDS: usize = <P::Block as Block<P::Word>>::LEN;
    const KEY_WORDS: usize = <P::Key as Block<P::Word>>::LEN;
    const DOMAIN_BITS: u32 = Self::WORDS as u32 * P::Word::BITS;
    /// One past the last addressable block.
    const SEQ_BOUND: u128 = 1u128 << COUNTER_BITS;
    /// One past the last addressable stream position, in words.
    const POSITION_BOUND: u128 = Self::SEQ_BOUND * Self::WORDS as u128;
    /// Key bits reserved in the highest-index key word.
    const KEY_RESERVED: u32 = u32::BITS - (Self::DOMAIN_BITS - 1).leading_zeros();
    const PARAMS_OK: () = assert!(
        COUNTER_BITS >= 1 && COUNTER_BITS <= 64 && COUNTER_BITS <= Self::DOMAIN_BITS,
        "COUNTER_BITS must lie in 1..=64 and fit the block-function input",
    );

    /// Create an engine from a scalar seed.
    ///
    /// The seed becomes the lowest-order key word and all other key words
    /// are zero. The base counter starts at zero.
    ///
    /// # Errors
    /// [EngineError::OutOfRange] if the seed intrudes on the reserved key
    /// bits, which is only possible when the key is a single word.
    pub fn new(seed: P::Word) -> Result<Self, EngineError> {
        let mut key = P::Key::default();
        key.as_mut()[0] = seed;
        Self::with_key(key)
    }

    /// Create an engine from a full key tuple, with a zero base counter.
    ///
    /// # Errors
    /// [EngineError::OutOfRange] if the reserved top bits of the key's
    /// highest-index word are nonzero.
    pub fn with_key(key: P::Key) -> Result<Self, EngineError> {
        Self::with_prf(P::with_key(key))
    }

    /// Create an engine around an existing block-function value.
    ///
    /// # Errors
    /// [EngineError::OutOfRange] if the reserved top bits of the key's
    /// highest-index word are nonzero.
    pub fn with_prf(prf: P) -> Result<Self, EngineError> {
        let () = Self::PARAMS_OK;
        Self::check_key(prf.key())?;
        Ok(Self {
            prf,
            base: P::Block::default(),
            seq: 0,
            buffer: P::Block::default(),
            index: Self::WORDS,
        })
    }

    /// Create an engine from a key tuple and a base counter.
    ///
    /// # Errors
    /// [EngineError::OutOfRange] if the key or the base counter has
    /// reserved bits set.
    pub fn with_key_and_counter(key: P::Key, base: P::Block) -> Result<Self, EngineError> {
        Self::with_prf_and_counter(P::with_key(key), base)
    }

    /// Create an engine from a block-function value and a base counter.
    ///
    /// # Errors
    /// [EngineError::OutOfRange] if the key or the base counter has
    /// reserved bits set.
    pub fn with_prf_and_counter(prf: P, base: P::Block) -> Result<Self, EngineError> {
        let mut engine = Self::with_prf(prf)?;
        engine.restart(base)?;
        Ok(engine)
    }

    /// Reset the engine as if freshly constructed from a scalar seed.
    ///
    /// # Errors
    /// [EngineError::OutOfRange] as for [CounterEngine::new]; the engine is
    /// unchanged on failure.
    pub fn seed(&mut self, seed: P::Word) -> Result<(), EngineError> {
        *self = Self::new(seed)?;
        Ok(())
    }

    /// Reset the engine as if freshly constructed from a key tuple.
    ///
    /// # Errors
    /// [EngineError::OutOfRange] as for [CounterEngine::with_key]; the
    /// engine is unchanged on failure.
    pub fn seed_key(&mut self, key: P::Key) -> Result<(), EngineError> {
        *self = Self::with_key(key)?;
        Ok(())
    }

    /// Reset the engine as if freshly constructed around `prf`.
    ///
    /// # Errors
    /// [EngineError::OutOfRange] as for [CounterEngine::with_prf]; the
    /// engine is unchanged on failure.
    pub fn seed_prf(&mut self, prf: P) -> Result<(), EngineError> {
        *self = Self::with_prf(prf)?;
        Ok(())
    }

    /// Replace the base counter and rewind the stream to its start.
    ///
    /// The key is untouched. The sequence counter returns to zero and the
    /// output buffer empties, so the next draw regenerates from the new
    /// counter.
    ///
    /// # Errors
    /// [EngineError::OutOfRange] if `base` has nonzero bits in the top
    /// `COUNTER_BITS` of the counter input; the engine is unchanged on
    /// failure.
    pub fn restart(&mut self, base: P::Block) -> Result<(), EngineError> {
        Self::check_base(&base)?;
        self.base = base;
        self.seq = 0;
        self.index = Self::WORDS;
        Ok(())
    }

    /// Draw the next word of the stream.
    ///
    /// # Errors
    /// [EngineError::Exhausted] once all `N * 2^COUNTER_BITS` words have
    /// been drawn. The engine stays exhausted until [CounterEngine::restart]
    /// or one of the seed operations.
    pub fn next(&mut self) -> Result<P::Word, EngineError> {
        if self.index == Self::WORDS {
            if self.seq == Self::SEQ_BOUND {
                return Err(EngineError::Exhausted);
            }
            self.buffer = self.prf.eval(self.input_for(self.seq));
            self.seq += 1;
            self.index = 0;
        }
        let word = self.buffer.as_ref()[self.index];
        self.index += 1;
        Ok(word)
    }

    /// Advance the stream position by `steps` draws in constant time.
    ///
    /// Never fails: a discard reaching or passing the end of the stream
    /// leaves the engine exhausted, and the failure surfaces on the next
    /// call to [CounterEngine::next].
    pub fn discard(&mut self, steps: u128) {
        let consumed =
            self.seq * Self::WORDS as u128 - (Self::WORDS - self.index) as u128;
        let target = consumed.saturating_add(steps);
        if target >= Self::POSITION_BOUND {
            self.seq = Self::SEQ_BOUND;
            self.index = Self::WORDS;
            return;
        }
        let block = target / Self::WORDS as u128;
        let within = (target % Self::WORDS as u128) as usize;
        if within == 0 {
            // block boundary; regenerate lazily on the next draw
            self.seq = block;
            self.index = Self::WORDS;
        } else {
            self.buffer = self.prf.eval(self.input_for(block));
            self.seq = block + 1;
            self.index = within;
        }
    }

    /// Whether the stream has been fully consumed.
    pub fn is_exhausted(&self) -> bool {
        self.index == Self::WORDS && self.seq == Self::SEQ_BOUND
    }

    /// The block function this engine drives.
    pub fn prf(&self) -> &P {
        &self.prf
    }

    /// The key of the underlying block function.
    pub fn key(&self) -> &P::Key {
        self.prf.key()
    }

    /// The caller-controlled portion of the counter input.
    pub fn base_counter(&self) -> &P::Block {
        &self.base
    }

    fn check_key(key: &P::Key) -> Result<(), EngineError> {
        let mask = P::Word::MAX << (P::Word::BITS - Self::KEY_RESERVED);
        if key.as_ref()[Self::KEY_WORDS - 1] & mask != P::Word::ZERO {
            return Err(EngineError::OutOfRange);
        }
        Ok(())
    }

    fn check_base(base: &P::Block) -> Result<(), EngineError> {
        for (j, word) in base.as_ref().iter().enumerate() {
            if *word & Self::counter_mask(j) != P::Word::ZERO {
                return Err(EngineError::OutOfRange);
            }
        }
        Ok(())
    }

    /// Bits of counter word `j` claimed by the sequence counter.
    fn counter_mask(j: usize) -> P::Word {
        let width = P::Word::BITS as usize;
        let start = (Self::DOMAIN_BITS - COUNTER_BITS) as usize;
        let word_lo = j * width;
        if word_lo + width <= start {
            return P::Word::ZERO;
        }
        let local = word_lo.max(start) - word_lo;
        P::Word::MAX << local as u32
    }

    /// The counter input for `block`: the base counter with the sequence
    /// counter packed into the reserved top bits.
    fn input_for(&self, block: u128) -> P::Block {
        let width = P::Word::BITS as usize;
        let start = (Self::DOMAIN_BITS - COUNTER_BITS) as usize;
        let mut input = self.base;
        for (j, word) in input.as_mut().iter_mut().enumerate() {
            let word_lo = j * width;
            if word_lo + width <= start {
                continue;
            }
            let lo = word_lo.max(start);
            let chunk = P::Word::truncate(block >> (lo - start) as u32);
            *word = *word | (chunk << (lo - word_lo) as u32);
        }
        input
    }
}

impl<P: Prf, const COUNTER_BITS: u32> PartialEq for CounterEngine<P, COUNTER_BITS> {
    /// Engines compare equal on key, base counter, sequence counter, and
    /// buffer index. The buffer itself is a function of those fields and is
    /// not compared.
    fn eq(&self, other: &Self) -> bool {
        self.prf == other.prf
            && self.base == other.base
            && self.seq == other.seq
            && self.index == other.index
    }
}

impl<P: Prf, const COUNTER_BITS: u32> Eq for CounterEngine<P, COUNTER_BITS> {}

impl<P: Prf, const COUNTER_BITS: u32> fmt::Display for CounterEngine<P, COUNTER_BITS> {
    /// Write the textual engine state: key words, base counter words,
    /// sequence counter, and buffer index as space-separated unsigned
    /// decimals. Buffer words are not part of the state.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for word in self.prf.key().as_ref() {
            write!(f, "{} ", word)?;
        }
        for word in self.base.as_ref() {
            write!(f, "{} ", word)?;
        }
        write!(f, "{} {}", self.seq, self.index)
    }
}

impl<P: Prf, const COUNTER_BITS: u32> FromStr for CounterEngine<P, COUNTER_BITS> {
    type Err = EngineError;

    /// Parse the textual state written by `Display`, skipping whitespace
    /// between fields. Restores an engine equal to the serialized one,
    /// regenerating the output buffer when the state is mid-block.
    ///
    /// # Errors
    /// [EngineError::Parse] for missing, trailing, non-numeric, or
    /// inconsistent fields; [EngineError::OutOfRange] if the restored key
    /// or base counter has reserved bits set.
    fn from_str(s: &str) -> Result<Self, EngineError> {
        let mut fields = s.split_whitespace();
        let mut key = P::Key::default();
        for word in key.as_mut() {
            *word = P::Word::from_decimal(fields.next().ok_or(EngineError::Parse)?)
                .ok_or(EngineError::Parse)?;
        }
        let mut base = P::Block::default();
        for word in base.as_mut() {
            *word = P::Word::from_decimal(fields.next().ok_or(EngineError::Parse)?)
                .ok_or(EngineError::Parse)?;
        }
        let seq: u128 = fields
            .next()
            .ok_or(EngineError::Parse)?
            .parse()
            .map_err(|_| EngineError::Parse)?;
        let index: usize = fields
            .next()
            .ok_or(EngineError::Parse)?
            .parse()
            .map_err(|_| EngineError::Parse)?;
        if fields.next().is_some() {
            return Err(EngineError::Parse);
        }
        if seq > Self::SEQ_BOUND || index > Self::WORDS || (index < Self::WORDS && seq == 0) {
            return Err(EngineError::Parse);
        }
        let mut engine = Self::with_key_and_counter(key, base)?;
        engine.seq = seq;
        engine.index = index;
        if index < Self::WORDS {
            engine.buffer = engine.prf.eval(engine.input_for(seq - 1));
        }
        Ok(engine)
    }
}

impl<P: Prf, const COUNTER_BITS: u32> RngCore for CounterEngine<P, COUNTER_BITS> {
    /// Return the next random `u32`.
    ///
    /// A 64-bit draw is truncated to its low half.
    ///
    /// # Panics
    /// Panics once the stream is exhausted. Use [CounterEngine::next] for
    /// the fallible form, or restart/reseed to begin a new stream.
    fn next_u32(&mut self) -> u32 {
        self.next()
            .expect("stream exhausted; restart or reseed the engine")
            .to_u64() as u32
    }

    /// Return the next random `u64`.
    ///
    /// 32-bit engines compose two draws, low word first.
    ///
    /// # Panics
    /// Panics once the stream is exhausted. Use [CounterEngine::next] for
    /// the fallible form, or restart/reseed to begin a new stream.
    fn next_u64(&mut self) -> u64 {
        if P::Word::BITS == 64 {
            self.next()
                .expect("stream exhausted; restart or reseed the engine")
                .to_u64()
        } else {
            let lo = self
                .next()
                .expect("stream exhausted; restart or reseed the engine")
                .to_u64();
            let hi = self
                .next()
                .expect("stream exhausted; restart or reseed the engine")
                .to_u64();
            (hi << 32) | lo
        }
    }

    /// Fill a destination buffer with random bytes.
    ///
    /// # Panics
    /// Panics if the stream exhausts while filling.
    fn fill_bytes(&mut self, dst: &mut [u8]) {
        rand_core::impls::fill_bytes_via_next(self, dst);
    }
}

impl<P: Prf, const COUNTER_BITS: u32> SeedableRng for CounterEngine<P, COUNTER_BITS> {
    type Seed = [u8; 32];

    /// Build an engine from seed bytes.
    ///
    /// Key words are decoded little-endian from the seed prefix and the
    /// reserved top bits of the key are cleared, so construction cannot
    /// fail. The base counter is zero.
    fn from_seed(seed: [u8; 32]) -> Self {
        let bytes = P::Word::BITS as usize / 8;
        let mut key = P::Key::default();
        for (i, word) in key.as_mut().iter_mut().enumerate() {
            *word = P::Word::from_le_slice(&seed[i * bytes..(i + 1) * bytes]);
        }
        let mask = P::Word::MAX << (P::Word::BITS - Self::KEY_RESERVED);
        let last = Self::KEY_WORDS - 1;
        key.as_mut()[last] = key.as_ref()[last] & !mask;
        Self::with_key(key).expect("reserved key bits were cleared")
    }
}
