//! Threefry add-rotate-xor block functions from the Random123 paper:
//!
//! John K. Salmon, Mark A. Moraes, Ron O. Dror, and David E. Shaw. 2011.
//! Parallel random numbers: as easy as 1, 2, 3. SC '11.
//! <https://doi.org/10.1145/2063384.2063405>

use crate::prf::Prf;

// Skein key-schedule parity constants.
const PARITY_32: u32 = 0x1BD1_1BDA;
const PARITY_64: u64 = 0x1BD1_1BDA_A9FC_1A22;

// Per-round rotation distances, cycled mod 8.
const ROT_2X32: [u32; 8] = [13, 15, 26, 6, 17, 29, 16, 24];
const ROT_2X64: [u32; 8] = [16, 42, 12, 31, 16, 32, 24, 21];
const ROT_4X32: [[u32; 2]; 8] = [
    [10, 26],
    [11, 21],
    [13, 27],
    [23, 5],
    [6, 20],
    [17, 11],
    [25, 10],
    [18, 20],
];
const ROT_4X64: [[u32; 2]; 8] = [
    [14, 16],
    [52, 57],
    [23, 40],
    [5, 37],
    [25, 33],
    [46, 12],
    [58, 22],
    [32, 32],
];

macro_rules! threefry2 {
    ($(#[$doc:meta])* $name:ident, $word:ty, $rot:ident, $parity:ident) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub struct $name<const R: usize = 20> {
            key: [$word; 2],
        }

        impl<const R: usize> $name<R> {
            pub fn new(key: [$word; 2]) -> Self {
                Self { key }
            }
        }

        impl<const R: usize> Prf for $name<R> {
            type Word = $word;
            type Block = [$word; 2];
            type Key = [$word; 2];

            fn with_key(key: [$word; 2]) -> Self {
                Self { key }
            }

            fn key(&self) -> &[$word; 2] {
                &self.key
            }

            fn eval(&self, input: [$word; 2]) -> [$word; 2] {
                let ks = [
                    self.key[0],
                    self.key[1],
                    $parity ^ self.key[0] ^ self.key[1],
                ];
                let mut x0 = input[0].wrapping_add(ks[0]);
                let mut x1 = input[1].wrapping_add(ks[1]);
                for r in 0..R {
                    x0 = x0.wrapping_add(x1);
                    x1 = x1.rotate_left($rot[r % 8]) ^ x0;
                    // subkey injection after every fourth round
                    if (r + 1) % 4 == 0 {
                        let s = (r + 1) / 4;
                        x0 = x0.wrapping_add(ks[s % 3]);
                        x1 = x1.wrapping_add(ks[(s + 1) % 3]).wrapping_add(s as $word);
                    }
                }
                [x0, x1]
            }
        }
    };
}

macro_rules! threefry4 {
    ($(#[$doc:meta])* $name:ident, $word:ty, $rot:ident, $parity:ident) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub struct $name<const R: usize = 20> {
            key: [$word; 4],
        }

        impl<const R: usize> $name<R> {
            pub fn new(key: [$word; 4]) -> Self {
                Self { key }
            }
        }

        impl<const R: usize> Prf for $name<R> {
            type Word = $word;
            type Block = [$word; 4];
            type Key = [$word; 4];

            fn with_key(key: [$word; 4]) -> Self {
                Self { key }
            }

            fn key(&self) -> &[$word; 4] {
                &self.key
            }

            fn eval(&self, input: [$word; 4]) -> [$word; 4] {
                let ks = [
                    self.key[0],
                    self.key[1],
                    self.key[2],
                    self.key[3],
                    $parity ^ self.key[0] ^ self.key[1] ^ self.key[2] ^ self.key[3],
                ];
                let mut x = input;
                for i in 0..4 {
                    x[i] = x[i].wrapping_add(ks[i]);
                }
                for r in 0..R {
                    let rot = $rot[r % 8];
                    // even rounds mix (x0,x1),(x2,x3); odd rounds (x0,x3),(x2,x1)
                    if r % 2 == 0 {
                        x[0] = x[0].wrapping_add(x[1]);
                        x[1] = x[1].rotate_left(rot[0]) ^ x[0];
                        x[2] = x[2].wrapping_add(x[3]);
                        x[3] = x[3].rotate_left(rot[1]) ^ x[2];
                    } else {
                        x[0] = x[0].wrapping_add(x[3]);
                        x[3] = x[3].rotate_left(rot[0]) ^ x[0];
                        x[2] = x[2].wrapping_add(x[1]);
                        x[1] = x[1].rotate_left(rot[1]) ^ x[2];
                    }
                    if (r + 1) % 4 == 0 {
                        let s = (r + 1) / 4;
                        for i in 0..4 {
                            x[i] = x[i].wrapping_add(ks[(s + i) % 5]);
                        }
                        x[3] = x[3].wrapping_add(s as $word);
                    }
                }
                x
            }
        }
    };
}

threefry2!(
    /// Threefry-2x32: two 32-bit words, two-word key, 20 rounds by default.
    Threefry2x32,
    u32,
    ROT_2X32,
    PARITY_32
);
threefry2!(
    /// Threefry-2x64: two 64-bit words, two-word key, 20 rounds by default.
    Threefry2x64,
    u64,
    ROT_2X64,
    PARITY_64
);
threefry4!(
    /// Threefry-4x32: four 32-bit words, four-word key, 20 rounds by default.
    Threefry4x32,
    u32,
    ROT_4X32,
    PARITY_32
);
threefry4!(
    /// Threefry-4x64: four 64-bit words, four-word key, 20 rounds by default.
    ///
    /// The fastest Random123 variant on conventional 64-bit CPUs.
    Threefry4x64,
    u64,
    ROT_4X64,
    PARITY_64
);
