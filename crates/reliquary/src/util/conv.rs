//! Conversion utilities.

use {
    alloy::primitives::U256,
    anyhow::{Result, ensure},
    bigdecimal::BigDecimal,
    num::{
        BigInt,
        BigRational,
        BigUint,
        Signed,
        bigint::Sign,
    },
};

/// Number of decimals used by the staked pool tokens and the reward token.
pub const TOKEN_DECIMALS: u8 = 18;

/// Formats a fixed point token amount with the given number of decimals as a
/// human readable decimal value.
pub fn wei_to_decimal(amount: U256, decimals: u8) -> BigDecimal {
    BigDecimal::new(u256_to_bigint(&amount), i64::from(decimals))
}

/// Scales a human readable decimal value up to a fixed point token amount.
/// Fails for negative values, for values with more fractional digits than
/// `decimals` and for values that do not fit a `U256`.
pub fn decimal_to_wei(d: &BigDecimal, decimals: u8) -> Result<U256> {
    ensure!(!d.is_negative(), "negative token amount {d}");

    let scaled = d.clone() * BigDecimal::new(BigInt::from(1), -i64::from(decimals));
    let truncated = scaled.with_scale(0);
    ensure!(
        truncated == scaled,
        "token amount {d} has more than {decimals} decimals"
    );

    let (int, _) = truncated.as_bigint_and_exponent();
    let bytes = int.to_bytes_be().1;
    U256::try_from_be_slice(&bytes)
        .ok_or_else(|| anyhow::anyhow!("token amount {d} overflows 256 bits"))
}

/// Converts a `BigDecimal` into an exact rational value. Returns `None` if the
/// decimal exponent does not fit a `u32`.
pub fn decimal_to_rational(d: &BigDecimal) -> Option<BigRational> {
    let (int, exp) = d.as_bigint_and_exponent();
    let factor = BigInt::from(10_u8).pow(exp.unsigned_abs().try_into().ok()?);
    Some(if exp >= 0 {
        BigRational::new(int, factor)
    } else {
        BigRational::from_integer(int * factor)
    })
}

pub fn u256_to_bigint(i: &U256) -> BigInt {
    BigInt::from_biguint(Sign::Plus, BigUint::from_bytes_be(&i.to_be_bytes::<32>()))
}

#[cfg(test)]
mod tests {
    use {super::*, std::str::FromStr};

    #[test]
    fn formats_fixed_point_amounts() {
        for (wei, decimal) in [
            (U256::ZERO, "0"),
            (U256::from(1_u64), "0.000000000000000001"),
            (U256::from(1_500_000_000_000_000_000_u128), "1.5"),
            (U256::from(42_000_000_000_000_000_000_u128), "42"),
        ] {
            assert_eq!(
                wei_to_decimal(wei, TOKEN_DECIMALS),
                BigDecimal::from_str(decimal).unwrap(),
            );
        }
        assert_eq!(
            wei_to_decimal(U256::from(1234_u64), 2),
            BigDecimal::from_str("12.34").unwrap(),
        );
    }

    #[test]
    fn scales_decimal_amounts() {
        assert_eq!(
            decimal_to_wei(&BigDecimal::from_str("1.5").unwrap(), TOKEN_DECIMALS).unwrap(),
            U256::from(1_500_000_000_000_000_000_u128),
        );
        assert_eq!(
            decimal_to_wei(&BigDecimal::from_str("0.000000000000000001").unwrap(), 18).unwrap(),
            U256::from(1_u64),
        );
        assert_eq!(
            decimal_to_wei(&BigDecimal::from_str("100").unwrap(), 0).unwrap(),
            U256::from(100_u64),
        );
    }

    #[test]
    fn rejects_unrepresentable_amounts() {
        assert!(decimal_to_wei(&BigDecimal::from_str("-1").unwrap(), 18).is_err());
        assert!(decimal_to_wei(&BigDecimal::from_str("0.0000000000000000001").unwrap(), 18).is_err());
        assert!(decimal_to_wei(&BigDecimal::from_str("1e80").unwrap(), 18).is_err());
    }

    #[test]
    fn decimal_to_rational_conversions() {
        for (value, numer, denom) in [
            ("4.2", 21, 5),
            ("100", 100, 1),
            ("1e3", 1000, 1),
            ("0.125", 1, 8),
            ("-0.5", -1, 2),
        ] {
            assert_eq!(
                decimal_to_rational(&BigDecimal::from_str(value).unwrap()),
                Some(BigRational::new(BigInt::from(numer), BigInt::from(denom))),
            );
        }
    }

    #[test]
    fn rational_conversion_rejects_huge_exponents() {
        let exp = i64::from(u32::MAX) + 1;
        assert_eq!(decimal_to_rational(&BigDecimal::new(BigInt::from(1), exp)), None);
        assert_eq!(decimal_to_rational(&BigDecimal::new(BigInt::from(1), -exp)), None);
    }
}
