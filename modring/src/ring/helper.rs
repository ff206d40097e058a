use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::Signed;

/// Non-negative greatest common divisor of `a` and `b`.
///
/// `gcd(0, 0)` is 0.
pub fn gcd(a: &BigInt, b: &BigInt) -> BigInt {
    a.gcd(b)
}

/// Extended Euclidean algorithm.
///
/// Returns `(g, x, y)` with `a*x + b*y = g` and `g >= 0`.
pub fn extended_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    let egcd = a.extended_gcd(b);
    if egcd.gcd.is_negative() {
        return (-egcd.gcd, -egcd.x, -egcd.y);
    }

    (egcd.gcd, egcd.x, egcd.y)
}
