//! Systematic Reed-Solomon encoding for QR blocks.
//!
//! The encoder divides the shifted message polynomial by the generator
//! polynomial and appends the remainder, so the resulting codeword is
//! divisible by the generator and every syndrome vanishes. The parity
//! symbols end up in the low-order coefficients, which is the layout the
//! decoders in this crate consume.

use crate::decoding::InputError;
use crate::galois::GF;
use crate::poly::Polynomial;

#[cfg(test)]
use pretty_assertions::assert_eq;

/// The generator polynomial with roots x^0, x^1, ..., x^(parity_len - 1).
pub fn generator_polynomial(parity_len: usize) -> Polynomial {
    (0..parity_len).fold(Polynomial::unit(), |acc, i| {
        let factor = Polynomial::from_coeffs(vec![GF::primitive_power(i as i32), GF(1)]);
        &acc * &factor
    })
}

/// Encode a message into a codeword with `parity_len` parity symbols.
///
/// `data` is given in emission order: the first byte becomes the highest
/// coefficient of the codeword polynomial. The returned polynomial has
/// `data.len() + parity_len` coefficients, parity in positions
/// `0..parity_len`.
pub fn encode(data: &[u8], parity_len: usize) -> Result<Polynomial, InputError> {
    if data.len() + parity_len > 255 {
        return Err(InputError::WordTooLong);
    }
    let mut coeffs = vec![GF(0); parity_len];
    coeffs.extend(data.iter().rev().map(|&b| GF(b)));
    let shifted = Polynomial::from_coeffs(coeffs);
    let generator = generator_polynomial(parity_len);
    let (_, remainder) = shifted
        .div_rem(&generator)
        .ok_or(InputError::DivisionByZero)?;
    Ok(&shifted + &remainder)
}

#[test]
fn small_generator_polynomials() {
    assert_eq!(generator_polynomial(0), Polynomial::unit());
    // (x + 1)
    assert_eq!(generator_polynomial(1), Polynomial::new(&[1, 1]));
    // (x + 1)(x + 2) = x^2 + 3x + 2
    assert_eq!(generator_polynomial(2), Polynomial::new(&[2, 3, 1]));
    // (x + 1)(x + 2)(x + 4) = x^3 + 7x^2 + 14x + 8
    assert_eq!(generator_polynomial(3), Polynomial::new(&[8, 14, 7, 1]));
}

#[test]
fn generator_roots() {
    let g = generator_polynomial(10);
    for i in 0..10 {
        assert_eq!(g.eval(GF::primitive_power(i)), GF(0), "root {}", i);
    }
    assert_eq!(g.degree(), 10);
}

#[test]
fn codewords_have_zero_syndrome() {
    let codeword = encode(&[32, 65, 205, 69, 41, 220, 46, 128, 236], 10).unwrap();
    assert_eq!(codeword.len(), 19);
    assert!(!crate::decoding::has_errors(&codeword, 10));
    // The message occupies the high-order coefficients unchanged.
    assert_eq!(codeword.coeffs()[18], GF(32));
    assert_eq!(codeword.coeffs()[10], GF(236));
}

#[test]
fn zero_message_encodes_to_zero() {
    let codeword = encode(&[0, 0, 0], 4).unwrap();
    assert!(codeword.is_zero());
    assert_eq!(codeword.len(), 7);
}

#[test]
fn oversized_message_is_rejected() {
    assert_eq!(encode(&[1; 250], 10), Err(InputError::WordTooLong));
}

#[test]
fn no_parity_is_the_message_itself() {
    let codeword = encode(&[5, 6], 0).unwrap();
    assert_eq!(codeword, Polynomial::new(&[6, 5]));
}
