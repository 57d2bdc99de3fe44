//! Philox block functions from the Random123 paper: mixing by wide
//! multiplication instead of add-rotate-xor rounds.
//!
//! John K. Salmon, Mark A. Moraes, Ron O. Dror, and David E. Shaw. 2011.
//! Parallel random numbers: as easy as 1, 2, 3. SC '11.
//! <https://doi.org/10.1145/2063384.2063405>

use crate::prf::Prf;
use crate::traits::Word;

macro_rules! philox2 {
    ($(#[$doc:meta])* $name:ident, $word:ty, $m0:expr, $c0:expr) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub struct $name<const R: usize = 10> {
            key: [$word; 1],
        }

        impl<const R: usize> $name<R> {
            pub fn new(key: [$word; 1]) -> Self {
                Self { key }
            }
        }

        impl<const R: usize> Prf for $name<R> {
            type Word = $word;
            type Block = [$word; 2];
            type Key = [$word; 1];

            fn with_key(key: [$word; 1]) -> Self {
                Self { key }
            }

            fn key(&self) -> &[$word; 1] {
                &self.key
            }

            fn eval(&self, input: [$word; 2]) -> [$word; 2] {
                let mut k0: $word = self.key[0];
                let [mut x0, mut x1] = input;
                for _ in 0..R {
                    let (hi, lo) = Word::widening_mul($m0, x0);
                    x0 = hi ^ x1 ^ k0;
                    x1 = lo;
                    // Weyl sequence on the key
                    k0 = k0.wrapping_add($c0);
                }
                [x0, x1]
            }
        }
    };
}

macro_rules! philox4 {
    ($(#[$doc:meta])* $name:ident, $word:ty, $m0:expr, $m1:expr, $c0:expr, $c1:expr) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub struct $name<const R: usize = 10> {
            key: [$word; 2],
        }

        impl<const R: usize> $name<R> {
            pub fn new(key: [$word; 2]) -> Self {
                Self { key }
            }
        }

        impl<const R: usize> Prf for $name<R> {
            type Word = $word;
            type Block = [$word; 4];
            type Key = [$word; 2];

            fn with_key(key: [$word; 2]) -> Self {
                Self { key }
            }

            fn key(&self) -> &[$word; 2] {
                &self.key
            }

            fn eval(&self, input: [$word; 4]) -> [$word; 4] {
                let [mut k0, mut k1] = self.key;
                let [mut x0, mut x1, mut x2, mut x3] = input;
                for _ in 0..R {
                    let (hi0, lo0) = Word::widening_mul($m0, x0);
                    let (hi1, lo1) = Word::widening_mul($m1, x2);
                    x0 = hi1 ^ x1 ^ k0;
                    x1 = lo1;
                    x2 = hi0 ^ x3 ^ k1;
                    x3 = lo0;
                    k0 = k0.wrapping_add($c0);
                    k1 = k1.wrapping_add($c1);
                }
                [x0, x1, x2, x3]
            }
        }
    };
}

philox2!(
    /// Philox-2x32: two 32-bit words, one-word key, 10 rounds by default.
    Philox2x32,
    u32,
    0xD256_D193,
    0x9E37_79B9
);
philox2!(
    /// Philox-2x64: two 64-bit words, one-word key, 10 rounds by default.
    Philox2x64,
    u64,
    0xD2B7_4407_B1CE_6E93,
    0x9E37_79B9_7F4A_7C15
);
philox4!(
    /// Philox-4x32: four 32-bit words, two-word key, 10 rounds by default.
    ///
    /// The variant of choice on GPUs and other 32-bit-multiply hardware.
    Philox4x32,
    u32,
    0xD251_1F53,
    0xCD9E_8D57,
    0x9E37_79B9,
    0xBB67_AE85
);
philox4!(
    /// Philox-4x64: four 64-bit words, two-word key, 10 rounds by default.
    Philox4x64,
    u64,
    0xD2E7_470E_E14C_6C93,
    0xCA5A_8263_9512_1157,
    0x9E37_79B9_7F4A_7C15,
    0xBB67_AE85_84CA_A73B
);
