//! Sobol' direction numbers.
//!
//! Dimension 0 is the Van der Corput sequence. Every further dimension is
//! defined by a primitive polynomial over GF(2) and its initial direction
//! numbers `m_1..m_s`. Polynomials are enumerated in the order of S. Joe and
//! F. Y. Kuo, "Constructing Sobol sequences with better two-dimensional
//! projections", SIAM J. Sci. Comput. 30(5), 2008: by degree, then by the
//! integer `a` formed from the inner coefficients. Degrees `1..=18` give the
//! same 21201 dimensions as their `new-joe-kuo-6.21201` table.
//!
//! The leading dimensions use the published initial numbers from that
//! table. Past them, each `m_i` is an odd number below `2^i` drawn from a
//! generator seeded with the dimension index. Any such choice keeps every
//! one-dimensional projection a `(0, m, 1)`-net; only the quality of
//! two-dimensional projections differs.

/// Number of binary digits carried by each direction number.
pub(crate) const BITS: usize = 32;

/// Highest polynomial degree enumerated.
const MAX_DEGREE: u32 = 18;

/// `(degree s, polynomial coefficients a, initial direction numbers m_1..m_s)`
/// for dimensions `1..`, from `new-joe-kuo-6.21201`.
const JOE_KUO: &[(u32, u32, &[u32])] = &[
    (1, 0, &[1]),
    (2, 1, &[1, 3]),
    (3, 1, &[1, 3, 1]),
    (3, 2, &[1, 1, 1]),
    (4, 1, &[1, 1, 3, 3]),
    (4, 4, &[1, 3, 5, 13]),
    (5, 2, &[1, 1, 5, 5, 17]),
    (5, 4, &[1, 1, 5, 5, 5]),
    (5, 7, &[1, 1, 7, 11, 19]),
    (5, 11, &[1, 1, 5, 1, 1]),
    (5, 13, &[1, 1, 1, 3, 11]),
    (5, 14, &[1, 3, 5, 5, 31]),
    (6, 1, &[1, 3, 3, 9, 7, 49]),
    (6, 13, &[1, 1, 1, 15, 21, 21]),
    (6, 16, &[1, 3, 1, 13, 27, 49]),
    (6, 19, &[1, 1, 1, 15, 7, 5]),
    (6, 22, &[1, 3, 1, 15, 13, 25]),
    (6, 25, &[1, 1, 5, 5, 19, 61]),
    (7, 1, &[1, 3, 7, 11, 23, 15, 103]),
    (7, 4, &[1, 3, 7, 13, 13, 15, 69]),
    (7, 7, &[1, 1, 3, 13, 7, 35, 63]),
    (7, 8, &[1, 3, 5, 9, 1, 25, 53]),
    (7, 14, &[1, 3, 1, 13, 9, 35, 107]),
    (7, 19, &[1, 3, 1, 5, 27, 61, 31]),
    (7, 21, &[1, 1, 5, 11, 19, 41, 61]),
    (7, 28, &[1, 3, 5, 3, 3, 13, 69]),
    (7, 31, &[1, 1, 7, 13, 1, 19, 1]),
    (7, 32, &[1, 3, 7, 5, 13, 19, 59]),
    (7, 37, &[1, 1, 3, 9, 25, 29, 41]),
    (7, 41, &[1, 3, 5, 13, 23, 1, 55]),
    (7, 42, &[1, 3, 7, 3, 13, 59, 17]),
    (7, 50, &[1, 3, 1, 3, 5, 53, 69]),
    (7, 55, &[1, 1, 5, 5, 23, 33, 13]),
    (7, 56, &[1, 1, 7, 7, 1, 61, 123]),
    (7, 59, &[1, 1, 7, 9, 13, 61, 49]),
    (7, 62, &[1, 3, 3, 5, 3, 55, 33]),
    (8, 14, &[1, 3, 1, 15, 31, 13, 49, 245]),
    (8, 21, &[1, 3, 5, 15, 31, 59, 63, 97]),
    (8, 22, &[1, 3, 1, 11, 11, 11, 77, 249]),
];

/// Largest number of dimensions with direction numbers available: the
/// Van der Corput dimension plus one per primitive polynomial of degree at
/// most 18.
pub const MAX_DIMENSION: usize = 21_201;

/// Iterates over the direction numbers of dimensions `0, 1, 2, ...` up to
/// [`MAX_DIMENSION`].
///
/// Each item holds `v_1..v_32`, left-aligned so that `v_i` carries its
/// leading digit at bit `32 - i`.
#[derive(Debug)]
pub(crate) struct DirectionNumbers {
    dim: usize,
    polynomials: PrimitivePolynomials,
}

impl DirectionNumbers {
    pub(crate) fn new() -> Self {
        Self {
            dim: 0,
            polynomials: PrimitivePolynomials::new(),
        }
    }
}

impl Iterator for DirectionNumbers {
    type Item = [u32; BITS];

    fn next(&mut self) -> Option<Self::Item> {
        let dim = self.dim;
        let v = if dim == 0 {
            van_der_corput()
        } else {
            let (degree, poly) = self.polynomials.next()?;
            match JOE_KUO.get(dim - 1) {
                Some(&(_, _, initial)) => recurrence(degree, poly, initial),
                None => recurrence(degree, poly, &drawn_initial_numbers(dim, degree)),
            }
        };
        self.dim += 1;
        Some(v)
    }
}

fn van_der_corput() -> [u32; BITS] {
    let mut v = [0u32; BITS];
    for (i, slot) in v.iter_mut().enumerate() {
        *slot = 1 << (BITS - 1 - i);
    }
    v
}

/// Odd `m_i < 2^i` for a dimension past the published table.
fn drawn_initial_numbers(dim: usize, degree: u32) -> Vec<u32> {
    let mut rng = fastrand::Rng::with_seed(dim as u64);
    (0..degree)
        .map(|i| (rng.u32(..) & ((1 << (i + 1)) - 1)) | 1)
        .collect()
}

/// Extends `m_1..m_s` to all `BITS` direction numbers with the Sobol'
/// recurrence for the polynomial `(degree, poly)`.
fn recurrence(degree: u32, poly: u32, initial: &[u32]) -> [u32; BITS] {
    let mut v = [0u32; BITS];
    let s = degree as usize;
    for (i, &m) in initial.iter().enumerate() {
        v[i] = m << (BITS - 1 - i);
    }
    for i in s..BITS {
        v[i] = v[i - s] ^ (v[i - s] >> s);
        for k in 1..s {
            if (poly >> (s - 1 - k)) & 1 == 1 {
                v[i] ^= v[i - k];
            }
        }
    }
    v
}

/// Primitive polynomials over GF(2) as `(degree, a)`, by degree and then by
/// `a`, where `x^s + a_1 x^(s-1) + ... + a_(s-1) x + 1` has
/// `a = a_1 a_2 ... a_(s-1)` in binary.
#[derive(Debug)]
struct PrimitivePolynomials {
    degree: u32,
    a: u32,
}

impl PrimitivePolynomials {
    fn new() -> Self {
        Self { degree: 1, a: 0 }
    }
}

impl Iterator for PrimitivePolynomials {
    type Item = (u32, u32);

    fn next(&mut self) -> Option<Self::Item> {
        while self.degree <= MAX_DEGREE {
            let (degree, a) = (self.degree, self.a);
            if a + 1 < 1 << (degree - 1) {
                self.a += 1;
            } else {
                self.degree += 1;
                self.a = 0;
            }
            if is_primitive(degree, a) {
                return Some((degree, a));
            }
        }
        None
    }
}

/// Whether `x` has multiplicative order `2^s - 1` modulo the polynomial.
fn is_primitive(degree: u32, a: u32) -> bool {
    let modulus = (1 << degree) | (a << 1) | 1;
    let order = (1u32 << degree) - 1;
    let x = reduce(0b10, modulus, degree);
    pow_mod(x, order, modulus, degree) == 1
        && prime_factors(order)
            .into_iter()
            .all(|q| pow_mod(x, order / q, modulus, degree) != 1)
}

fn reduce(value: u32, modulus: u32, degree: u32) -> u32 {
    if value & (1 << degree) == 0 {
        value
    } else {
        value ^ modulus
    }
}

fn mul_mod(mut lhs: u32, mut rhs: u32, modulus: u32, degree: u32) -> u32 {
    let mut product = 0;
    while rhs != 0 {
        if rhs & 1 == 1 {
            product ^= lhs;
        }
        rhs >>= 1;
        lhs = reduce(lhs << 1, modulus, degree);
    }
    product
}

fn pow_mod(mut base: u32, mut exponent: u32, modulus: u32, degree: u32) -> u32 {
    let mut result = 1;
    while exponent != 0 {
        if exponent & 1 == 1 {
            result = mul_mod(result, base, modulus, degree);
        }
        base = mul_mod(base, base, modulus, degree);
        exponent >>= 1;
    }
    result
}

fn prime_factors(mut n: u32) -> Vec<u32> {
    let mut factors = Vec::new();
    let mut p = 2;
    while p * p <= n {
        if n % p == 0 {
            factors.push(p);
            while n % p == 0 {
                n /= p;
            }
        }
        p += 1;
    }
    if n > 1 {
        factors.push(n);
    }
    factors
}
