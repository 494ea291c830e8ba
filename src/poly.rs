//! Dense polynomials over GF(256).
//!
//! Coefficients are stored little-endian: `coeffs[i]` is the coefficient of
//! x^i. This matches the codeword convention of the decoder, where the parity
//! bytes sit in the low-order coefficients. The coefficient vector always has
//! at least one entry; the zero polynomial is `[0]`.
//!
//! Trailing zero coefficients are allowed (a syndrome polynomial keeps one
//! coefficient per parity symbol even when the top ones vanish), so equality
//! compares coefficients only up to the degree.

use crate::galois::GF;
use std::ops::{Add, Mul};

#[cfg(test)]
use pretty_assertions::assert_eq;

/// A polynomial over GF(256), little-endian coefficients.
#[derive(Debug, Clone)]
pub struct Polynomial {
    coeffs: Vec<GF>,
}

impl Polynomial {
    /// Build a polynomial from bytes, `bytes[i]` becoming the coefficient of
    /// x^i. An empty slice yields the zero polynomial.
    pub fn new(bytes: &[u8]) -> Self {
        if bytes.is_empty() {
            return Self::zero();
        }
        Polynomial {
            coeffs: bytes.iter().map(|&b| GF(b)).collect(),
        }
    }

    /// Build a polynomial from field elements. An empty vector yields the
    /// zero polynomial.
    pub fn from_coeffs(coeffs: Vec<GF>) -> Self {
        if coeffs.is_empty() {
            return Self::zero();
        }
        Polynomial { coeffs }
    }

    /// The zero polynomial.
    pub fn zero() -> Self {
        Polynomial { coeffs: vec![GF(0)] }
    }

    /// The constant polynomial 1.
    pub fn unit() -> Self {
        Polynomial { coeffs: vec![GF(1)] }
    }

    /// The monomial x^degree.
    pub fn monomial(degree: usize) -> Self {
        let mut coeffs = vec![GF(0); degree + 1];
        coeffs[degree] = GF(1);
        Polynomial { coeffs }
    }

    pub fn coeffs(&self) -> &[GF] {
        &self.coeffs
    }

    pub(crate) fn coeffs_mut(&mut self) -> &mut [GF] {
        &mut self.coeffs
    }

    /// The coefficients as bytes, in the stored order.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.coeffs.iter().map(|c| c.0).collect()
    }

    /// Number of stored coefficients, including trailing zeros. Always >= 1.
    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    /// Index of the highest non-zero coefficient, or 0 for the zero
    /// polynomial.
    pub fn degree(&self) -> usize {
        self.coeffs.iter().rposition(|&c| c != GF(0)).unwrap_or(0)
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.iter().all(|&c| c == GF(0))
    }

    /// Strip trailing zero coefficients down to the canonical form: either a
    /// single coefficient, or a non-zero last coefficient.
    pub fn normalized(mut self) -> Self {
        let len = self.degree() + 1;
        self.coeffs.truncate(len);
        self
    }

    /// The first `len` coefficients (at least one).
    pub fn truncated(&self, len: usize) -> Self {
        let len = len.clamp(1, self.coeffs.len());
        Polynomial {
            coeffs: self.coeffs[..len].to_vec(),
        }
    }

    /// Evaluate at `x` with Horner's scheme, starting from the leading
    /// coefficient.
    pub fn eval(&self, x: GF) -> GF {
        let mut acc = GF(0);
        for &c in self.coeffs.iter().rev() {
            acc = acc * x + c;
        }
        acc
    }

    /// The formal derivative in characteristic 2.
    ///
    /// Coefficients at even powers vanish (their integer factor is even);
    /// coefficients at odd powers shift down one index with no scaling.
    pub fn derivative(&self) -> Self {
        if self.coeffs.len() == 1 {
            return Self::zero();
        }
        let mut coeffs = vec![GF(0); self.coeffs.len() - 1];
        for (i, &c) in self.coeffs.iter().enumerate().skip(1).step_by(2) {
            coeffs[i - 1] = c;
        }
        Polynomial { coeffs }
    }

    /// Euclidean division: `self = quotient * divisor + remainder` with
    /// `degree(remainder) < degree(divisor)`. The remainder is returned in
    /// canonical (stripped) form.
    ///
    /// Returns `None` when dividing by the zero polynomial.
    pub fn div_rem(&self, divisor: &Polynomial) -> Option<(Polynomial, Polynomial)> {
        if divisor.is_zero() {
            return None;
        }
        let divisor_degree = divisor.degree();
        let degree = self.degree();
        if self.is_zero() || degree < divisor_degree {
            return Some((Self::zero(), self.clone().normalized()));
        }

        let lead_inv = divisor.coeffs[divisor_degree].inv();
        let mut remainder = self.coeffs.clone();
        let mut quotient = vec![GF(0); degree - divisor_degree + 1];
        // Eliminate the leading term of the running remainder step by step.
        for i in (divisor_degree..=degree).rev() {
            if remainder[i] == GF(0) {
                continue;
            }
            let factor = remainder[i] * lead_inv;
            quotient[i - divisor_degree] = factor;
            for (j, &d) in divisor.coeffs.iter().enumerate().take(divisor_degree + 1) {
                remainder[i - divisor_degree + j] += factor * d;
            }
        }
        remainder.truncate(divisor_degree.max(1));
        Some((
            Polynomial { coeffs: quotient },
            Polynomial { coeffs: remainder }.normalized(),
        ))
    }

    /// Divide by the monomial (x - r) in one Horner pass, returning the
    /// quotient and the constant remainder (which is `self.eval(r)`).
    pub fn deflate(&self, r: GF) -> (Polynomial, GF) {
        let d = self.coeffs.len() - 1;
        if d == 0 {
            return (Self::zero(), self.coeffs[0]);
        }
        let mut quotient = vec![GF(0); d];
        let mut acc = self.coeffs[d];
        for i in (0..d).rev() {
            quotient[i] = acc;
            acc = self.coeffs[i] + acc * r;
        }
        (Polynomial { coeffs: quotient }, acc)
    }
}

impl PartialEq for Polynomial {
    fn eq(&self, other: &Self) -> bool {
        self.coeffs[..=self.degree()] == other.coeffs[..=other.degree()]
    }
}

impl Eq for Polynomial {}

impl Add<&Polynomial> for &Polynomial {
    type Output = Polynomial;

    /// Coefficient-wise XOR, zero-padding the shorter operand.
    fn add(self, rhs: &Polynomial) -> Polynomial {
        let (long, short) = if self.coeffs.len() >= rhs.coeffs.len() {
            (self, rhs)
        } else {
            (rhs, self)
        };
        let mut coeffs = long.coeffs.clone();
        for (c, &s) in coeffs.iter_mut().zip(short.coeffs.iter()) {
            *c += s;
        }
        Polynomial { coeffs }
    }
}

impl Mul<&Polynomial> for &Polynomial {
    type Output = Polynomial;

    /// Schoolbook convolution.
    fn mul(self, rhs: &Polynomial) -> Polynomial {
        if self.is_zero() || rhs.is_zero() {
            return Polynomial::zero();
        }
        let mut coeffs = vec![GF(0); self.coeffs.len() + rhs.coeffs.len() - 1];
        for (i, &a) in self.coeffs.iter().enumerate() {
            if a == GF(0) {
                continue;
            }
            for (j, &b) in rhs.coeffs.iter().enumerate() {
                coeffs[i + j] += a * b;
            }
        }
        Polynomial { coeffs }
    }
}

impl Mul<GF> for &Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: GF) -> Polynomial {
        Polynomial {
            coeffs: self.coeffs.iter().map(|&c| c * rhs).collect(),
        }
    }
}

#[test]
fn zero_and_unit() {
    assert_eq!(Polynomial::zero().len(), 1);
    assert!(Polynomial::zero().is_zero());
    assert!(!Polynomial::unit().is_zero());
    assert_eq!(Polynomial::new(&[]), Polynomial::zero());
    assert_eq!(Polynomial::monomial(0), Polynomial::unit());
    assert_eq!(Polynomial::monomial(3).to_bytes(), vec![0, 0, 0, 1]);
}

#[test]
fn degree_ignores_trailing_zeros() {
    assert_eq!(Polynomial::new(&[5, 0, 3, 0, 0]).degree(), 2);
    assert_eq!(Polynomial::new(&[0, 0, 0]).degree(), 0);
    assert_eq!(Polynomial::new(&[7]).degree(), 0);
}

#[test]
fn equality_up_to_trailing_zeros() {
    assert_eq!(Polynomial::new(&[1, 2, 0, 0]), Polynomial::new(&[1, 2]));
    assert_eq!(Polynomial::new(&[0, 0]), Polynomial::zero());
    assert_ne!(Polynomial::new(&[1, 2]), Polynomial::new(&[1, 2, 3]));
}

#[test]
fn normalized_strips() {
    let p = Polynomial::new(&[1, 2, 0, 0]).normalized();
    assert_eq!(p.to_bytes(), vec![1, 2]);
    let z = Polynomial::new(&[0, 0, 0]).normalized();
    assert_eq!(z.to_bytes(), vec![0]);
}

#[test]
fn addition_is_xor() {
    let a = Polynomial::new(&[1, 2, 3]);
    let b = Polynomial::new(&[255, 2]);
    assert_eq!(&a + &b, Polynomial::new(&[254, 0, 3]));
    // Every polynomial is its own additive inverse.
    assert!((&a + &a).is_zero());
}

#[test]
fn multiplication() {
    // (x + 1)(x + 2) = x^2 + 3x + 2, no reduction kicks in.
    let a = Polynomial::new(&[1, 1]);
    let b = Polynomial::new(&[2, 1]);
    assert_eq!(&a * &b, Polynomial::new(&[2, 3, 1]));
    assert_eq!(&a * &Polynomial::zero(), Polynomial::zero());
    assert_eq!(&a * GF(2), Polynomial::new(&[2, 2]));
}

#[test]
fn division_roundtrip() {
    let a = Polynomial::new(&[12, 7, 254, 3, 99]);
    let b = Polynomial::new(&[1, 70, 2]);
    let (q, r) = a.div_rem(&b).unwrap();
    assert!(r.degree() < b.degree());
    assert_eq!(&(&q * &b) + &r, a);
}

#[test]
fn division_by_larger_degree() {
    let a = Polynomial::new(&[5, 1]);
    let b = Polynomial::new(&[1, 2, 3]);
    let (q, r) = a.div_rem(&b).unwrap();
    assert!(q.is_zero());
    assert_eq!(r, a);
}

#[test]
fn division_by_zero() {
    assert!(Polynomial::new(&[1, 2]).div_rem(&Polynomial::zero()).is_none());
}

#[test]
fn horner_evaluation() {
    // p(x) = 3 + x^2 at x = 2: 3 + 4 = 7.
    let p = Polynomial::new(&[3, 0, 1]);
    assert_eq!(p.eval(GF(2)), GF(7));
    assert_eq!(p.eval(GF(0)), GF(3));
    assert_eq!(Polynomial::zero().eval(GF(123)), GF(0));
}

#[test]
fn characteristic_two_derivative() {
    // (c0 + c1 x + c2 x^2 + c3 x^3)' = c1 + c3 x^2.
    let p = Polynomial::new(&[9, 7, 5, 3]);
    assert_eq!(p.derivative(), Polynomial::new(&[7, 0, 3]));
    assert_eq!(Polynomial::new(&[9]).derivative(), Polynomial::zero());
    assert_eq!(Polynomial::new(&[9, 7]).derivative(), Polynomial::new(&[7]));
}

#[test]
fn deflation() {
    // x^2 + 3x + 2 = (x + 1)(x + 2), so deflating by 1 leaves x + 2.
    let p = Polynomial::new(&[2, 3, 1]);
    let (q, rem) = p.deflate(GF(1));
    assert_eq!(rem, GF(0));
    assert_eq!(q, Polynomial::new(&[2, 1]));
    // A non-root leaves the evaluation as remainder.
    let (_, rem) = p.deflate(GF(3));
    assert_eq!(rem, p.eval(GF(3)));
}

#[test]
fn truncation() {
    let p = Polynomial::new(&[1, 2, 3, 4]);
    assert_eq!(p.truncated(2), Polynomial::new(&[1, 2]));
    assert_eq!(p.truncated(0).len(), 1);
    assert_eq!(p.truncated(10), p);
}
