//! Sugiyama's Euclidean method for finding error locations.
//!
//! Running the extended Euclidean algorithm on x^n and the syndrome
//! polynomial produces Bezout coefficients u, v with
//! u * S + v * x^n = remainder. Stopping as soon as the remainder degree
//! drops below half the parity count makes u the error locator and the
//! remainder the error evaluator in one stroke, so no separate evaluator
//! computation is needed. Erasures enter by pre-multiplying the syndromes
//! with their known locator and widening the degree bound accordingly.

use super::{
    apply_magnitudes, check_input, erasure_locator, error_positions, forney, syndrome, verify,
    DecodeError, ReedSolomonError,
};
use crate::poly::Polynomial;

#[cfg(test)]
use crate::galois::GF;
#[cfg(test)]
use pretty_assertions::assert_eq;

/// Full extended Euclidean algorithm on polynomials.
///
/// Returns `(u, v, g)` with `u * a + v * b = g = gcd(a, b)`.
pub fn extended_euclidean(a: &Polynomial, b: &Polynomial) -> (Polynomial, Polynomial, Polynomial) {
    let mut r0 = a.clone();
    let mut r1 = b.clone();
    let mut u0 = Polynomial::unit();
    let mut u1 = Polynomial::zero();
    let mut v0 = Polynomial::zero();
    let mut v1 = Polynomial::unit();
    // Invariant: u_i * a + v_i * b = r_i. Division fails exactly when the
    // running remainder reaches zero, which ends the iteration.
    while let Some((q, r)) = r0.div_rem(&r1) {
        let u2 = &u0 + &(&q * &u1);
        let v2 = &v0 + &(&q * &v1);
        r0 = r1;
        r1 = r;
        u0 = u1;
        u1 = u2;
        v0 = v1;
        v1 = v2;
    }
    (u0, v0, r0.normalized())
}

/// The degree-bounded variant of the extended Euclidean algorithm.
///
/// Iterates exactly like [`extended_euclidean`] but stops as soon as the
/// running remainder has degree at most `upper_deg` (the bound may be -1,
/// forcing the full gcd). Returns `(u, v, r)` with `u * a + v * b = r`, all
/// trailing zeros stripped.
pub fn sugiyama(
    a: &Polynomial,
    b: &Polynomial,
    upper_deg: i32,
) -> (Polynomial, Polynomial, Polynomial) {
    let mut r0 = a.clone();
    let mut r1 = b.clone();
    let mut u0 = Polynomial::unit();
    let mut u1 = Polynomial::zero();
    let mut v0 = Polynomial::zero();
    let mut v1 = Polynomial::unit();
    while !r1.is_zero() && r1.degree() as i32 > upper_deg {
        let (q, r) = match r0.div_rem(&r1) {
            Some(division) => division,
            None => break,
        };
        let u2 = &u0 + &(&q * &u1);
        let v2 = &v0 + &(&q * &v1);
        r0 = r1;
        r1 = r;
        u0 = u1;
        u1 = u2;
        v0 = v1;
        v1 = v2;
    }
    (u1.normalized(), v1.normalized(), r1.normalized())
}

/// Decode a received word with `n` parity symbols.
pub fn decode(received: &Polynomial, n: usize) -> Result<Polynomial, DecodeError> {
    decode_with_erasures(received, &[], n)
}

/// Decode a received word with `n` parity symbols and known erasures.
///
/// Corrects v errors and rho erasures whenever 2v + rho <= n, and returns
/// the same result as the Berlekamp-Massey path on every such word.
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

    let known = erasure_locator(erasures);
    let bound = ((n + erasures.len()) / 2) as i32 - 1;
    let (locator, _, evaluator) = sugiyama(&(&syndromes * &known), &Polynomial::monomial(n), bound);

    // The full errata locator covers the discovered errors and the erasures;
    // the positions are listed in the matching order.
    let errata = &locator * &known;
    let mut positions = error_positions(&locator);
    positions.extend_from_slice(erasures);
    if positions.is_empty() || positions.len() != errata.degree() {
        return Err(ReedSolomonError::NoRoots.into());
    }

    let magnitudes = forney(&errata, &evaluator, &positions)?;
    let corrected = apply_magnitudes(received.clone(), &positions, &magnitudes)?;
    verify(corrected, n).map_err(Into::into)
}

#[cfg(test)]
use crate::encode::encode;
#[cfg(test)]
use crate::tests::{corrupt, Lcg, SAMPLE_MESSAGE};

#[test]
fn extended_euclidean_bezout_identity() {
    let a = Polynomial::new(&[12, 5, 1, 9]);
    let b = Polynomial::new(&[3, 1, 7]);
    let (u, v, g) = extended_euclidean(&a, &b);
    assert_eq!(&(&u * &a) + &(&v * &b), g);
    // The gcd divides both inputs.
    let (_, r) = a.div_rem(&g).unwrap();
    assert!(r.is_zero());
    let (_, r) = b.div_rem(&g).unwrap();
    assert!(r.is_zero());
}

#[test]
fn extended_euclidean_of_coprime_inputs() {
    // x and x + 1 are coprime, so the gcd is a non-zero constant.
    let (u, v, g) = extended_euclidean(&Polynomial::monomial(1), &Polynomial::new(&[1, 1]));
    assert_eq!(g.degree(), 0);
    assert!(!g.is_zero());
    assert_eq!(
        &(&u * &Polynomial::monomial(1)) + &(&v * &Polynomial::new(&[1, 1])),
        g
    );
}

#[test]
fn sugiyama_stops_at_the_degree_bound() {
    let a = Polynomial::new(&[12, 5, 1, 9, 77]);
    let b = Polynomial::monomial(6);
    let (u, v, r) = sugiyama(&a, &b, 2);
    assert!(r.degree() <= 2);
    assert_eq!(&(&u * &a) + &(&v * &b), r);
}

#[test]
fn sugiyama_single_error_locator() {
    // One error of magnitude 1 at position 0, n = 4: S = 1 + x + x^2 + x^3.
    let syndromes = Polynomial::new(&[1, 1, 1, 1]);
    let (locator, _, evaluator) = sugiyama(&syndromes, &Polynomial::monomial(4), 1);
    assert_eq!(locator, Polynomial::new(&[1, 1]));
    assert_eq!(evaluator, Polynomial::unit());
}

#[test]
fn recovers_single_flipped_byte() {
    let codeword = encode(SAMPLE_MESSAGE, 10).unwrap();
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
    let codeword = encode(SAMPLE_MESSAGE, 10).unwrap();
    let received = corrupt(
        &codeword,
        &[(1, 0x21), (5, 0x37), (12, 0x90), (16, 0x6C), (2, 0x44), (9, 0x5D)],
    );
    let corrected = decode_with_erasures(&received, &[2, 9], 10).unwrap();
    assert_eq!(corrected, codeword);
    assert!(decode(&received, 10).is_err());
}

#[test]
fn pure_erasures_through_the_euclidean_path() {
    let codeword = encode(SAMPLE_MESSAGE, 10).unwrap();
    let received = corrupt(&codeword, &[(3, 0x55), (8, 0x0F), (13, 0xC3)]);
    let corrected = decode_with_erasures(&received, &[3, 8, 13], 10).unwrap();
    assert_eq!(corrected, codeword);
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
fn agrees_with_berlekamp_massey() {
    use super::berlekamp_massey;

    let mut rng = Lcg::new(0x51C6_03EE);
    for round in 0..50 {
        let mut message = vec![0u8; 40];
        for byte in message.iter_mut() {
            *byte = rng.next_u8();
        }
        let codeword = encode(&message, 16).unwrap();

        let weight = 1 + rng.next_usize(8);
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

        let ours = decode(&received, 16).unwrap();
        let theirs = berlekamp_massey::decode(&received, 16).unwrap();
        assert_eq!(ours, codeword, "round {}", round);
        assert_eq!(ours, theirs, "round {}", round);
        assert!(!super::has_errors(&ours, 16));
    }
}
