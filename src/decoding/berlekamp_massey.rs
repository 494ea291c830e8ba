//! The Berlekamp-Massey algorithm for finding error locations.
//!
//! The syndrome sequence of a corrupted word satisfies a linear recurrence
//! whose feedback polynomial is the error locator. Berlekamp-Massey
//! synthesizes the shortest such recurrence in one pass over the syndromes,
//! extending the register only when a discrepancy forces it. Erasures are
//! folded in by seeding the register with their known locator, so the loop
//! only has to discover the unknown error positions on top.

use super::{
    apply_magnitudes, check_input, erasure_locator, error_positions, forney, syndrome, verify,
    DecodeError, ReedSolomonError,
};
use crate::galois::GF;
use crate::poly::Polynomial;

#[cfg(test)]
use pretty_assertions::assert_eq;

/// Compute the errata locator polynomial from a syndrome polynomial.
///
/// The syndrome polynomial must carry one coefficient per parity symbol
/// (as produced by [`syndrome`](super::syndrome)); its length is the n of
/// the code. `erasures` seeds the register with the already known
/// positions. With `check` the locator is additionally required to split
/// into distinct roots over GF(256), which rejects some uncorrectable
/// words early.
///
/// Fails when the locator degree is inconsistent with the correction
/// capability, i.e. unless 2 * errors + erasures <= n.
pub fn errata_locator(
    syndromes: &Polynomial,
    erasures: &[usize],
    check: bool,
) -> Result<Polynomial, ReedSolomonError> {
    let n = syndromes.len();
    let rho = erasures.len();
    let s = syndromes.coeffs();

    let mut lambda = erasure_locator(erasures);
    let mut shadow = lambda.clone();
    let x = Polynomial::monomial(1);
    // Length of the synthesized register, erasure part included.
    let mut register_len = rho;

    for r in rho + 1..=n {
        // Discrepancy of the current register against the syndromes.
        let discrepancy: GF = lambda
            .coeffs()
            .iter()
            .take(r)
            .enumerate()
            .map(|(j, &c)| c * s[r - 1 - j])
            .sum();

        let shifted = &x * &shadow;
        if discrepancy == GF(0) || 2 * register_len > r + rho - 1 {
            lambda = &lambda + &(&shifted * discrepancy);
            shadow = shifted;
        } else {
            register_len = r - register_len + rho;
            // The new shadow register is built from the locator before the
            // update, so both right-hand sides are captured first.
            let scaled = &lambda * discrepancy.inv();
            lambda = &lambda + &(&shifted * discrepancy);
            shadow = scaled;
        }
    }

    let lambda = lambda.normalized();
    let errors = lambda.degree() as i32 - rho as i32;
    if lambda.is_zero() || 2 * errors + rho as i32 > n as i32 {
        return Err(ReedSolomonError::TooManyErrors);
    }
    if check && error_positions(&lambda).is_empty() {
        return Err(ReedSolomonError::NoRoots);
    }
    Ok(lambda)
}

/// Decode a received word with `n` parity symbols.
pub fn decode(received: &Polynomial, n: usize) -> Result<Polynomial, DecodeError> {
    decode_with_erasures(received, &[], n)
}

/// Decode a received word with `n` parity symbols and known erasures.
///
/// Corrects v errors and rho erasures whenever 2v + rho <= n. On success the
/// returned word has the same length as the input and a zero syndrome.
pub fn decode_with_erasures(
    received: &Polynomial,
    erasures: &[usize],
    n: usize,
) -> Result<Polynomial, DecodeError> {
    check_input(received, erasures)?;
    if erasures.len() > n {
        return Err(ReedSolomonError::TooManyErasures.into());
    }
    let syndromes = syndrome(received, n);
    if syndromes.is_zero() {
        return Ok(received.clone());
    }

    let locator = errata_locator(&syndromes, erasures, false)?;
    let positions = error_positions(&locator);
    if positions.is_empty() {
        return Err(ReedSolomonError::NoRoots.into());
    }

    let evaluator = (&syndromes * &locator).truncated(n);
    let magnitudes = forney(&locator, &evaluator, &positions)?;
    let corrected = apply_magnitudes(received.clone(), &positions, &magnitudes)?;
    verify(corrected, n).map_err(Into::into)
}

#[cfg(test)]
use crate::encode::encode;
#[cfg(test)]
use crate::tests::{corrupt, Lcg, SAMPLE_MESSAGE};

#[test]
fn locator_for_single_error() {
    // One error at position 0 of the zero codeword: all syndromes equal the
    // magnitude, and the locator is 1 + x.
    let syndromes = Polynomial::new(&[1, 1, 1, 1]);
    let locator = errata_locator(&syndromes, &[], false).unwrap();
    assert_eq!(locator, Polynomial::new(&[1, 1]));
}

#[test]
fn locator_for_pure_erasures() {
    // With every corrupted position erased the register never changes.
    let codeword = encode(SAMPLE_MESSAGE, 10).unwrap();
    let received = corrupt(&codeword, &[(3, 0x55), (8, 0x0F)]);
    let syndromes = syndrome(&received, 10);
    let locator = errata_locator(&syndromes, &[3, 8], false).unwrap();
    assert_eq!(locator, erasure_locator(&[3, 8]));
}

#[test]
fn locator_check_flag_requires_roots() {
    // This syndrome sequence synthesizes down to the constant locator 1,
    // which locates nothing even though the syndromes are non-zero.
    let syndromes = Polynomial::new(&[1, 0, 0, 0]);
    let unchecked = errata_locator(&syndromes, &[], false).unwrap();
    assert_eq!(unchecked, Polynomial::unit());
    assert_eq!(
        errata_locator(&syndromes, &[], true),
        Err(ReedSolomonError::NoRoots)
    );
}

#[test]
fn recovers_single_flipped_byte() {
    let codeword = encode(SAMPLE_MESSAGE, 10).unwrap();
    // Byte 3 of the emitted sequence is the coefficient below the top three.
    let position = codeword.len() - 1 - 3;
    let received = corrupt(&codeword, &[(position, 0x2A)]);
    let corrected = decode(&received, 10).unwrap();
    assert_eq!(corrected, codeword);
    assert!(!super::has_errors(&corrected, 10));
}

#[test]
fn recovers_five_errors_with_ten_parity_symbols() {
    let codeword = encode(SAMPLE_MESSAGE, 10).unwrap();
    let received = corrupt(
        &codeword,
        &[(0, 0x11), (4, 0x99), (7, 0x42), (11, 0xF0), (14, 0x07)],
    );
    assert_eq!(decode(&received, 10).unwrap(), codeword);
}

#[test]
fn six_errors_overwhelm_ten_parity_symbols() {
    let codeword = encode(SAMPLE_MESSAGE, 10).unwrap();
    let flips: Vec<(usize, u8)> = (0..6).map(|i| (i, 0x80 | (i as u8 + 1))).collect();
    let received = corrupt(&codeword, &flips);
    assert!(decode(&received, 10).is_err());
}

#[test]
fn clean_word_is_returned_unchanged() {
    let codeword = encode(SAMPLE_MESSAGE, 10).unwrap();
    assert_eq!(decode(&codeword, 10).unwrap(), codeword);
}

#[test]
fn errors_and_erasures_up_to_capacity() {
    // 2 erasures and 4 unknown errors saturate 2v + rho = 10.
    let codeword = encode(SAMPLE_MESSAGE, 10).unwrap();
    let received = corrupt(
        &codeword,
        &[(1, 0x21), (5, 0x37), (12, 0x90), (16, 0x6C), (2, 0x44), (9, 0x5D)],
    );
    let corrected = decode_with_erasures(&received, &[2, 9], 10).unwrap();
    assert_eq!(corrected, codeword);
    // Without the erasure hints the same word is beyond the capability.
    assert!(decode(&received, 10).is_err());
}

#[test]
fn erasure_list_larger_than_parity_fails() {
    let codeword = encode(SAMPLE_MESSAGE, 4).unwrap();
    let erasures: Vec<usize> = (0..5).collect();
    assert_eq!(
        decode_with_erasures(&codeword, &erasures, 4),
        Err(DecodeError::ReedSolomon(ReedSolomonError::TooManyErasures))
    );
}

#[test]
fn oversized_word_is_rejected() {
    let received = Polynomial::new(&[0xAB; 256]);
    assert_eq!(
        decode(&received, 10),
        Err(DecodeError::Input(super::InputError::WordTooLong))
    );
}

#[test]
fn random_correctable_errors() {
    let mut rng = Lcg::new(0x2486_F9D3);
    for round in 0..50 {
        let mut message = vec![0u8; 30];
        for byte in message.iter_mut() {
            *byte = rng.next_u8();
        }
        let codeword = encode(&message, 12).unwrap();

        let weight = 1 + rng.next_usize(6);
        let mut received = codeword.clone();
        let mut hit = vec![false; received.len()];
        let mut flipped = 0;
        while flipped < weight {
            let position = rng.next_usize(received.len());
            if hit[position] {
                continue;
            }
            hit[position] = true;
            received.coeffs_mut()[position] += GF(rng.nonzero_u8());
            flipped += 1;
        }

        let corrected = decode(&received, 12).unwrap();
        assert_eq!(corrected, codeword, "round {}", round);
    }
}

#[test]
fn random_errors_and_erasures() {
    let mut rng = Lcg::new(0x7B11_05C2);
    for round in 0..50 {
        let mut message = vec![0u8; 24];
        for byte in message.iter_mut() {
            *byte = rng.next_u8();
        }
        let codeword = encode(&message, 10).unwrap();

        // rho erasures and v errors with 2v + rho <= 10.
        let rho = rng.next_usize(5);
        let errors = (10 - rho) / 2;
        let mut received = codeword.clone();
        let mut hit = vec![false; received.len()];
        let mut erasures = Vec::with_capacity(rho);
        while erasures.len() < rho {
            let position = rng.next_usize(received.len());
            if hit[position] {
                continue;
            }
            hit[position] = true;
            received.coeffs_mut()[position] = GF(rng.next_u8());
            erasures.push(position);
        }
        let mut flipped = 0;
        while flipped < errors {
            let position = rng.next_usize(received.len());
            if hit[position] {
                continue;
            }
            hit[position] = true;
            received.coeffs_mut()[position] += GF(rng.nonzero_u8());
            flipped += 1;
        }

        let corrected = decode_with_erasures(&received, &erasures, 10).unwrap();
        assert_eq!(corrected, codeword, "round {}", round);
    }
}
