//! Syndrome-based Reed-Solomon decoding.
//!
//! A received codeword is treated as a polynomial over GF(256) whose
//! low-order coefficients are the parity symbols. Decoding follows the
//! classic four steps:
//!
//! 1. Compute the syndromes.
//! 2. Compute the error locator polynomial.
//! 3. Compute the error locations.
//! 4. Compute the error values.
//!
//! Two independent algorithms are implemented for step 2:
//! [`berlekamp_massey`] synthesizes the locator as the shortest LFSR
//! generating the syndrome sequence, and [`euclidean`] obtains locator and
//! evaluator together from a degree-bounded run of the extended Euclidean
//! algorithm (Sugiyama's method). Both accept a list of erasures, positions
//! known in advance to be unreliable: with v unknown errors and rho erasures
//! a code with n parity symbols corrects anything satisfying 2v + rho <= n.
//!
//! This module holds the machinery shared by both: syndromes, erasure
//! locators, root finding, Forney's magnitude formula, and erasure-only
//! correction.

pub mod berlekamp_massey;
pub mod euclidean;

use crate::galois::GF;
use crate::poly::Polynomial;

#[cfg(test)]
use pretty_assertions::assert_eq;

/// Malformed input, outside the domain of the code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    /// The received word has more than 255 symbols and does not fit GF(256).
    WordTooLong,
    /// An erasure index lies outside the received word.
    ErasureOutOfRange,
    /// Division by the zero polynomial.
    DivisionByZero,
}

/// The received word could not be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReedSolomonError {
    /// More errors than the parity symbols can locate and correct.
    TooManyErrors,
    /// More erasures than parity symbols.
    TooManyErasures,
    /// The error locator polynomial does not split into distinct roots over
    /// GF(256), or its roots disagree with its degree.
    NoRoots,
    /// A computed error position lies outside the received word.
    ErrorsOutsideRange,
    /// The corrections are inconsistent (a repeated locator root, or a
    /// non-zero syndrome after applying them).
    Malfunction,
}

/// Any failure of a decoding entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    Input(InputError),
    ReedSolomon(ReedSolomonError),
}

impl From<InputError> for DecodeError {
    fn from(e: InputError) -> Self {
        DecodeError::Input(e)
    }
}

impl From<ReedSolomonError> for DecodeError {
    fn from(e: ReedSolomonError) -> Self {
        DecodeError::ReedSolomon(e)
    }
}

/// The syndrome polynomial of a received word for a code with `n` parity
/// symbols: coefficient i is the received polynomial evaluated at x^i, for
/// i in 0..n. It keeps exactly `n` coefficients, trailing zeros included.
pub fn syndrome(received: &Polynomial, n: usize) -> Polynomial {
    let coeffs = (0..n)
        .map(|i| received.eval(GF::primitive_power(i as i32)))
        .collect();
    Polynomial::from_coeffs(coeffs)
}

/// Whether the received word fails the syndrome check.
///
/// A zero syndrome proves the absence of errors only when the true number of
/// errors does not exceed `n`.
pub fn has_errors(received: &Polynomial, n: usize) -> bool {
    !syndrome(received, n).is_zero()
}

/// The locator polynomial for a set of known positions: the product of
/// (1 + x^i * x) over the given positions. Empty input yields the constant 1.
pub fn erasure_locator(positions: &[usize]) -> Polynomial {
    positions.iter().fold(Polynomial::unit(), |acc, &i| {
        let factor = Polynomial::from_coeffs(vec![GF(1), GF::primitive_power(i as i32)]);
        &acc * &factor
    })
}

/// Find the roots of a polynomial in GF(256) by exhaustive deflation.
///
/// Every candidate element is tested with one Horner pass; each root found
/// divides the polynomial down by its linear factor, so a repeated root is
/// never reported twice. The result has exactly `degree(p)` entries when the
/// polynomial splits into distinct roots over GF(256), and is empty
/// otherwise (repeated roots, or roots only in an extension field).
pub fn find_roots(p: &Polynomial) -> Vec<GF> {
    let mut remaining = p.degree();
    if remaining == 0 {
        return Vec::new();
    }
    let mut p = p.clone().normalized();
    let mut roots = Vec::with_capacity(remaining);
    for r in 0..=255u8 {
        let (quotient, rem) = p.deflate(GF(r));
        if rem == GF(0) {
            roots.push(GF(r));
            p = quotient;
            remaining -= 1;
            if remaining == 0 {
                roots.reverse();
                return roots;
            }
        }
    }
    Vec::new()
}

/// Translate the roots of an error locator polynomial into codeword
/// positions: root r marks position (-log r) mod 255.
///
/// Returns an empty list when the locator does not fully split over GF(256).
/// A locator with constant term zero (0 as a root) has no position either and
/// also yields the empty list.
pub fn error_positions(locator: &Polynomial) -> Vec<usize> {
    let roots = find_roots(locator);
    if roots.is_empty() || roots.contains(&GF(0)) {
        return Vec::new();
    }
    roots
        .iter()
        .map(|&r| (255 - r.log()) % 255)
        .collect()
}

/// Error magnitudes by Forney's formula.
///
/// For each position k the magnitude is
/// x^k * omega(x^-k) / lambda'(x^-k), with lambda the errata locator whose
/// roots cover all listed positions and omega the matching evaluator. The
/// magnitudes come back in the order of `positions`.
pub fn forney(
    locator: &Polynomial,
    evaluator: &Polynomial,
    positions: &[usize],
) -> Result<Vec<GF>, ReedSolomonError> {
    let derivative = locator.derivative();
    positions
        .iter()
        .map(|&k| {
            let x_inv = GF::primitive_power(-(k as i32));
            let denominator = derivative.eval(x_inv);
            if denominator == GF(0) {
                // A repeated root; the locator cannot be valid.
                return Err(ReedSolomonError::Malfunction);
            }
            let numerator = GF::primitive_power(k as i32) * evaluator.eval(x_inv);
            Ok(numerator / denominator)
        })
        .collect()
}

/// Correct a received word whose error positions are all known in advance.
///
/// This handles up to `n` erasures, twice as many as unknown errors, because
/// the decoder only has to solve for magnitudes.
pub fn fill_erasures(
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
    let locator = erasure_locator(erasures);
    let evaluator = (&syndromes * &locator).truncated(n);
    let magnitudes = forney(&locator, &evaluator, erasures)?;
    let corrected = apply_magnitudes(received.clone(), erasures, &magnitudes)?;
    verify(corrected, n).map_err(Into::into)
}

/// Reject words that do not fit the code before any field arithmetic runs.
pub(crate) fn check_input(received: &Polynomial, erasures: &[usize]) -> Result<(), InputError> {
    if received.len() > 255 {
        return Err(InputError::WordTooLong);
    }
    if erasures.iter().any(|&e| e >= received.len()) {
        return Err(InputError::ErasureOutOfRange);
    }
    Ok(())
}

/// XOR the magnitudes into the received word at the given positions.
pub(crate) fn apply_magnitudes(
    mut received: Polynomial,
    positions: &[usize],
    magnitudes: &[GF],
) -> Result<Polynomial, ReedSolomonError> {
    for (&position, &magnitude) in positions.iter().zip(magnitudes.iter()) {
        if position >= received.len() {
            return Err(ReedSolomonError::ErrorsOutsideRange);
        }
        received.coeffs_mut()[position] += magnitude;
    }
    Ok(received)
}

/// A corrected word must pass the syndrome check it was corrected against.
pub(crate) fn verify(corrected: Polynomial, n: usize) -> Result<Polynomial, ReedSolomonError> {
    if has_errors(&corrected, n) {
        return Err(ReedSolomonError::Malfunction);
    }
    Ok(corrected)
}

#[test]
fn syndrome_of_single_error() {
    // The all-zero word is a codeword; an error e at position j gives
    // syndromes e * x^(i*j).
    let received = Polynomial::new(&[0, 2, 0, 0, 0]);
    assert_eq!(syndrome(&received, 3), Polynomial::new(&[2, 4, 8]));
    assert!(has_errors(&received, 3));
}

#[test]
fn syndrome_keeps_length() {
    let received = Polynomial::new(&[1, 0, 0, 0]);
    // All syndromes of 1 + 0x + ... are 1; length stays n even so.
    let s = syndrome(&received, 4);
    assert_eq!(s.len(), 4);
    assert_eq!(s, Polynomial::new(&[1, 1, 1, 1]));
}

#[test]
fn zero_syndrome_for_zero_word() {
    let received = Polynomial::new(&[0; 20]);
    assert!(!has_errors(&received, 10));
}

#[test]
fn erasure_locator_values() {
    assert_eq!(erasure_locator(&[]), Polynomial::unit());
    // (1 + x) for position 0.
    assert_eq!(erasure_locator(&[0]), Polynomial::new(&[1, 1]));
    // (1 + x)(1 + 2x) = 1 + 3x + 2x^2.
    assert_eq!(erasure_locator(&[0, 1]), Polynomial::new(&[1, 3, 2]));
}

#[test]
fn find_roots_of_split_polynomial() {
    // (x + 1)(x + 2) = x^2 + 3x + 2.
    let p = Polynomial::new(&[2, 3, 1]);
    let mut roots = find_roots(&p);
    roots.sort_by_key(|r| r.0);
    assert_eq!(roots, vec![GF(1), GF(2)]);
}

#[test]
fn find_roots_rejects_repeated_roots() {
    // (x + 1)^2 = x^2 + 1 in characteristic 2.
    let p = Polynomial::new(&[1, 0, 1]);
    assert_eq!(find_roots(&p), vec![]);
}

#[test]
fn find_roots_of_constant() {
    assert_eq!(find_roots(&Polynomial::unit()), vec![]);
    assert_eq!(find_roots(&Polynomial::new(&[42])), vec![]);
}

#[test]
fn positions_from_locator() {
    // Locator for positions {0, 1}.
    let locator = erasure_locator(&[0, 1]);
    let mut positions = error_positions(&locator);
    positions.sort_unstable();
    assert_eq!(positions, vec![0, 1]);
}

#[test]
fn positions_of_non_splitting_locator() {
    let locator = Polynomial::new(&[1, 0, 1]);
    assert_eq!(error_positions(&locator), vec![]);
}

#[test]
fn forney_single_error() {
    // One error of magnitude 7 at position 1 against the zero codeword:
    // lambda = 1 + 2x, omega = S * lambda mod x^n = 7.
    let locator = Polynomial::new(&[1, 2]);
    let evaluator = Polynomial::new(&[7]);
    assert_eq!(forney(&locator, &evaluator, &[1]).unwrap(), vec![GF(7)]);
}

#[test]
fn forney_repeated_root_is_rejected() {
    // (1 + x)^2 has derivative zero everywhere.
    let locator = Polynomial::new(&[1, 0, 1]);
    let evaluator = Polynomial::new(&[5]);
    assert_eq!(
        forney(&locator, &evaluator, &[0]),
        Err(ReedSolomonError::Malfunction)
    );
}

#[test]
fn fill_erasures_roundtrip() {
    let codeword = crate::encode::encode(&[17, 250, 3, 64, 99], 6).unwrap();
    let mut received = codeword.clone();
    received.coeffs_mut()[2] = GF(0);
    received.coeffs_mut()[7] = GF(0);
    received.coeffs_mut()[9] = GF(0);
    let corrected = fill_erasures(&received, &[2, 7, 9], 6).unwrap();
    assert_eq!(corrected, codeword);
    assert!(!has_errors(&corrected, 6));
}

#[test]
fn fill_erasures_with_clean_word() {
    let codeword = crate::encode::encode(&[1, 2, 3], 4).unwrap();
    assert_eq!(fill_erasures(&codeword, &[0, 1], 4).unwrap(), codeword);
}

#[test]
fn fill_erasures_limits() {
    let codeword = crate::encode::encode(&[1, 2, 3], 4).unwrap();
    let err = fill_erasures(&codeword, &[0, 1, 2, 3, 4], 4);
    assert_eq!(
        err,
        Err(DecodeError::ReedSolomon(ReedSolomonError::TooManyErasures))
    );
    let err = fill_erasures(&codeword, &[7], 4);
    assert_eq!(err, Err(DecodeError::Input(InputError::ErasureOutOfRange)));
}

#[test]
fn oversized_word_is_rejected_early() {
    let received = Polynomial::new(&[1; 256]);
    assert_eq!(
        fill_erasures(&received, &[], 10),
        Err(DecodeError::Input(InputError::WordTooLong))
    );
}
