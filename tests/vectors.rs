use cb_rng::{
    Philox2x32, Philox2x64, Philox4x32, Philox4x64, Prf, Threefry2x32, Threefry2x64, Threefry4x32,
    Threefry4x64,
};
use std::collections::HashSet;

// Counter and key material drawn from the leading hex digits of pi, as in
// the reference distribution's mixed-pattern vectors.
const PI_32: [u32; 8] = [
    0x243F6A88, 0x85A308D3, 0x13198A2E, 0x03707344, 0xA4093822, 0x299F31D0, 0x082EFA98, 0xEC4E6C89,
];
const PI_64: [u64; 8] = [
    0x243F6A8885A308D3,
    0x13198A2E03707344,
    0xA4093822299F31D0,
    0x082EFA98EC4E6C89,
    0x452821E638D01377,
    0xBE5466CF34E90C6C,
    0xBE5466CF34E90C6C,
    0xC0AC29B7C97C50DD,
];

#[test]
fn threefry2x32_reference_vectors() {
    let zeros = Threefry2x32::<20>::new([0; 2]);
    assert_eq!(zeros.eval([0; 2]), [0x6B200159, 0x99BA4EFE]);
    let ones = Threefry2x32::<20>::new([u32::MAX; 2]);
    assert_eq!(ones.eval([u32::MAX; 2]), [0x1CB996FC, 0xBB002BE7]);
    let pi = Threefry2x32::<20>::new([PI_32[2], PI_32[3]]);
    assert_eq!(pi.eval([PI_32[0], PI_32[1]]), [0xC4923A9C, 0x483DF7A0]);
}

#[test]
fn threefry4x32_reference_vectors() {
    let zeros = Threefry4x32::<20>::new([0; 4]);
    assert_eq!(
        zeros.eval([0; 4]),
        [0x9C6CA96A, 0xE17EAE66, 0xFC10ECD4, 0x5256A7D8]
    );
    let ones = Threefry4x32::<20>::new([u32::MAX; 4]);
    assert_eq!(
        ones.eval([u32::MAX; 4]),
        [0x2A881696, 0x57012287, 0xF6C7446E, 0xA16A6732]
    );
    let pi = Threefry4x32::<20>::new([PI_32[4], PI_32[5], PI_32[6], PI_32[7]]);
    assert_eq!(
        pi.eval([PI_32[0], PI_32[1], PI_32[2], PI_32[3]]),
        [0x59CD1DBB, 0xB8879579, 0x86B5D00C, 0xAC8B6D84]
    );
}

#[test]
fn threefry2x64_reference_vectors() {
    let zeros = Threefry2x64::<20>::new([0; 2]);
    assert_eq!(zeros.eval([0; 2]), [0xC2B6E3A8C2C69865, 0x6F81ED42F350084D]);
    let ones = Threefry2x64::<20>::new([u64::MAX; 2]);
    assert_eq!(
        ones.eval([u64::MAX; 2]),
        [0xE02CB7C4D95D277A, 0xD06633D0893B8B68]
    );
    let pi = Threefry2x64::<20>::new([PI_64[2], PI_64[3]]);
    assert_eq!(
        pi.eval([PI_64[0], PI_64[1]]),
        [0x263C7D30BB0F0AF1, 0x56BE8361D3311526]
    );
}

#[test]
fn threefry4x64_reference_vectors() {
    let zeros = Threefry4x64::<20>::new([0; 4]);
    assert_eq!(
        zeros.eval([0; 4]),
        [
            0x09218EBDE6C85537,
            0x55941F5266D86105,
            0x4BD25E16282434DC,
            0xEE29EC846BD2E40B
        ]
    );
    let ones = Threefry4x64::<20>::new([u64::MAX; 4]);
    assert_eq!(
        ones.eval([u64::MAX; 4]),
        [
            0x29C24097942BBA1B,
            0x0371BBFB0F6F4E11,
            0x3C231FFA33F83A1C,
            0xCD29113FDE32D168
        ]
    );
    let pi = Threefry4x64::<20>::new([PI_64[4], PI_64[5], PI_64[6], PI_64[7]]);
    assert_eq!(
        pi.eval([PI_64[0], PI_64[1], PI_64[2], PI_64[3]]),
        [
            0xA7E8FDE591651BD9,
            0xBAAFD0C30138319B,
            0x84A5C1A729E685B9,
            0x901D406CCEBC1BA4
        ]
    );
}

#[test]
fn threefry_round_count_overrides() {
    let r13 = Threefry4x64::<13>::new([0; 4]);
    assert_eq!(
        r13.eval([0; 4]),
        [
            0x4071FABEE1DC8E05,
            0x02ED3113695C9C62,
            0x397311B5B89F9D49,
            0xE21292C3258024BC
        ]
    );
    let r72 = Threefry4x64::<72>::new([0; 4]);
    assert_eq!(
        r72.eval([0; 4]),
        [
            0x94EEEA8B1F2ADA84,
            0xADF103313EAE6670,
            0x952419A1F4B16D53,
            0xD83F13E63C9F6B11
        ]
    );
    // zero rounds reduce to the initial key injection
    let r0 = Threefry2x32::<0>::new([5, 7]);
    assert_eq!(r0.eval([1, 2]), [6, 9]);
    assert_eq!(Threefry4x64::<0>::new([0; 4]).eval([0; 4]), [0; 4]);
}

#[test]
fn philox2x32_reference_vectors() {
    let zeros = Philox2x32::<10>::new([0]);
    assert_eq!(zeros.eval([0; 2]), [0xFF1DAE59, 0x6CD10DF2]);
    let ones = Philox2x32::<10>::new([u32::MAX]);
    assert_eq!(ones.eval([u32::MAX; 2]), [0x2C3F628B, 0xAB4FD7AD]);
    let pi = Philox2x32::<10>::new([PI_32[2]]);
    assert_eq!(pi.eval([PI_32[0], PI_32[1]]), [0xDD7CE038, 0xF62A4C12]);
}

#[test]
fn philox4x32_reference_vectors() {
    let zeros = Philox4x32::<10>::new([0; 2]);
    assert_eq!(
        zeros.eval([0; 4]),
        [0x6627E8D5, 0xE169C58D, 0xBC57AC4C, 0x9B00DBD8]
    );
    let ones = Philox4x32::<10>::new([u32::MAX; 2]);
    assert_eq!(
        ones.eval([u32::MAX; 4]),
        [0x408F276D, 0x41C83B0E, 0xA20BC7C6, 0x6D5451FD]
    );
    let pi = Philox4x32::<10>::new([PI_32[4], PI_32[5]]);
    assert_eq!(
        pi.eval([PI_32[0], PI_32[1], PI_32[2], PI_32[3]]),
        [0xD16CFE09, 0x94FDCCEB, 0x5001E420, 0x24126EA1]
    );
}

#[test]
fn philox2x64_reference_vectors() {
    let zeros = Philox2x64::<10>::new([0]);
    assert_eq!(zeros.eval([0; 2]), [0xCA00A0459843D731, 0x66C24222C9A845B5]);
    let ones = Philox2x64::<10>::new([u64::MAX]);
    assert_eq!(
        ones.eval([u64::MAX; 2]),
        [0x65B021D60CD8310F, 0x4D02F3222F86DF20]
    );
    let pi = Philox2x64::<10>::new([PI_64[2]]);
    assert_eq!(
        pi.eval([PI_64[0], PI_64[1]]),
        [0x0A5E742C2997341C, 0xB0F883D38000DE5D]
    );
}

#[test]
fn philox4x64_reference_vectors() {
    let zeros = Philox4x64::<10>::new([0; 2]);
    assert_eq!(
        zeros.eval([0; 4]),
        [
            0x16554D9ECA36314C,
            0xDB20FE9D672D0FDC,
            0xD7E772CEE186176B,
            0x7E68B68AEC7BA23B
        ]
    );
    let ones = Philox4x64::<10>::new([u64::MAX; 2]);
    assert_eq!(
        ones.eval([u64::MAX; 4]),
        [
            0x87B092C3013FE90B,
            0x438C3C67BE8D0224,
            0x9CC7D7C69CD777B6,
            0xA09CAEBF594F0BA0
        ]
    );
    let pi = Philox4x64::<10>::new([PI_64[4], PI_64[5]]);
    assert_eq!(
        pi.eval([PI_64[0], PI_64[1], PI_64[2], PI_64[3]]),
        [
            0xA528F45403E61D95,
            0x38C72DBD566E9788,
            0xA5A1610E72FD18B5,
            0x57BD43B5E52B7FE6
        ]
    );
}

#[test]
fn philox_round_count_override() {
    let r16 = Philox4x32::<16>::new([0; 2]);
    assert_eq!(
        r16.eval([0; 4]),
        [0x55D6E305, 0x9479D0DB, 0xA1764D17, 0xDB61583A]
    );
}

#[test]
fn evaluation_is_deterministic() {
    let prf = Threefry4x64::<20>::new([1, 2, 3, 4]);
    let input = [5, 6, 7, 8];
    assert_eq!(prf.eval(input), prf.eval(input));
    let again = Threefry4x64::<20>::new([1, 2, 3, 4]);
    assert_eq!(prf.eval(input), again.eval(input));

    let prf = Philox4x64::<10>::new([9, 10]);
    assert_eq!(prf.eval(input), prf.eval(input));
}

#[test]
fn philox2x64_sampled_injectivity() {
    let prf = Philox2x64::<10>::new([0x2545F4914F6CDD1D]);
    let mut seen = HashSet::with_capacity(1 << 20);
    for i in 0..(1u64 << 20) {
        assert!(seen.insert(prf.eval([i, 0])), "collision at counter {i}");
    }
}

#[test]
fn threefry2x64_sampled_injectivity() {
    let prf = Threefry2x64::<20>::new([0xDEADBEEFDEADBEEF, 0]);
    let mut seen = HashSet::with_capacity(1 << 20);
    for i in 0..(1u64 << 20) {
        assert!(seen.insert(prf.eval([i, 0])), "collision at counter {i}");
    }
}

#[test]
fn threefry4x64_key_bit_avalanche() {
    const SAMPLES: usize = 64;
    let base = Threefry4x64::<20>::new([0; 4]);
    let source = Philox4x64::<10>::new([0x9E3779B97F4A7C15, 0]);
    for bit in 0..256u32 {
        let mut key = [0u64; 4];
        key[(bit / 64) as usize] ^= 1 << (bit % 64);
        let flipped = Threefry4x64::<20>::new(key);
        let mut distance = 0u32;
        for i in 0..SAMPLES {
            let input = source.eval([i as u64, 0, 0, 0]);
            let a = base.eval(input);
            let b = flipped.eval(input);
            for j in 0..4 {
                distance += (a[j] ^ b[j]).count_ones();
            }
        }
        let mean = f64::from(distance) / SAMPLES as f64;
        // a single key bit should flip about half of the 256 output bits
        assert!(
            (0.45 * 256.0..=0.55 * 256.0).contains(&mean),
            "key bit {bit}: mean flipped bits {mean}"
        );
    }
}

#[test]
fn philox4x32_key_bit_avalanche() {
    const SAMPLES: usize = 64;
    let base = Philox4x32::<10>::new([0; 2]);
    let source = Threefry4x32::<20>::new([0x12345678, 0, 0, 0]);
    for bit in 0..64u32 {
        let mut key = [0u32; 2];
        key[(bit / 32) as usize] ^= 1 << (bit % 32);
        let flipped = Philox4x32::<10>::new(key);
        let mut distance = 0u32;
        for i in 0..SAMPLES {
            let input = source.eval([i as u32, 0, 0, 0]);
            let a = base.eval(input);
            let b = flipped.eval(input);
            for j in 0..4 {
                distance += (a[j] ^ b[j]).count_ones();
            }
        }
        let mean = f64::from(distance) / SAMPLES as f64;
        assert!(
            (0.45 * 128.0..=0.55 * 128.0).contains(&mean),
            "key bit {bit}: mean flipped bits {mean}"
        );
    }
}
