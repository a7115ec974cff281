//! Maturity and level bookkeeping for Reliquary positions.
//!
//! A relic's maturity is the number of seconds elapsed since its entry
//! timestamp. Depositing into an existing relic moves the entry forward in
//! proportion to the deposit's share of the resulting balance:
//!
//! ```text
//! weight    = deposit / (deposit + balance)
//! new_entry = round(entry + maturity * weight)
//! ```
//!
//! The level of a relic is the highest tier whose required maturity has been
//! reached.

use {
    crate::util::conv::decimal_to_rational,
    bigdecimal::BigDecimal,
    num::{BigInt, BigRational, Signed, ToPrimitive, Zero},
    serde::Serialize,
    serde_with::{DisplayFromStr, serde_as},
    std::fmt::{self, Display, Formatter},
};

#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum InvalidInput {
    #[error("maturity level table is empty")]
    EmptyLevels,
    #[error("required maturity of level {0} is lower than the one of the previous level")]
    DecreasingLevels(usize),
    #[error("position and deposit have a combined balance of zero")]
    ZeroBalance,
    #[error("negative token amount")]
    NegativeAmount,
    #[error("timestamp out of range")]
    TimestampOverflow,
    #[error("entry timestamp {entry} is later than the reference time {now}")]
    EntryInFuture { entry: i64, now: i64 },
    #[error("token amount cannot be represented exactly")]
    UnrepresentableAmount,
}

/// Required maturity (in seconds) per level of a pool, indexed by level.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MaturityLevels(Vec<u64>);

impl MaturityLevels {
    pub fn try_new(required_maturity: Vec<u64>) -> Result<Self, InvalidInput> {
        if required_maturity.is_empty() {
            return Err(InvalidInput::EmptyLevels);
        }
        if let Some(i) = required_maturity.windows(2).position(|w| w[1] < w[0]) {
            return Err(InvalidInput::DecreasingLevels(i + 1));
        }
        Ok(Self(required_maturity))
    }

    /// Highest level whose required maturity is reached. Falls back to level
    /// 0 when none is.
    pub fn level_for(&self, maturity: i64) -> usize {
        self.0
            .iter()
            .rposition(|&required| i128::from(maturity) >= i128::from(required))
            .unwrap_or(0)
    }

    /// Progress of a relic sitting at `level` towards the next level. The same
    /// rule applies to the recorded level and to the predicted one: anything
    /// at or past the last level is maxed out.
    pub fn progress(&self, level: usize, maturity: i64) -> LevelProgress {
        match level.checked_add(1).and_then(|next| self.0.get(next)) {
            Some(&next_threshold) => LevelProgress::Progress {
                maturity,
                next_threshold,
            },
            None => LevelProgress::MaxLevelReached,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LevelProgress {
    MaxLevelReached,
    Progress { maturity: i64, next_threshold: u64 },
}

impl Display for LevelProgress {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaxLevelReached => f.write_str("max level reached"),
            Self::Progress {
                maturity,
                next_threshold,
            } => write!(f, "{maturity}/{next_threshold}"),
        }
    }
}

/// The part of a relic the maturity computation cares about.
#[derive(Clone, Debug, PartialEq)]
pub struct StakingPosition {
    pub amount: BigDecimal,
    /// Time weighted entry timestamp (seconds).
    pub entry: i64,
}

impl StakingPosition {
    /// Seconds since the entry. An entry later than `now` is rejected, a
    /// negative maturity would make deposits increase it.
    pub fn maturity(&self, now: i64) -> Result<i64, InvalidInput> {
        if self.entry > now {
            return Err(InvalidInput::EntryInFuture {
                entry: self.entry,
                now,
            });
        }
        now.checked_sub(self.entry)
            .ok_or(InvalidInput::TimestampOverflow)
    }
}

#[serde_as]
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositImpact {
    pub old_maturity: i64,
    pub new_maturity: i64,
    pub old_level: usize,
    pub new_level: usize,
    #[serde_as(as = "DisplayFromStr")]
    pub old_level_progress: LevelProgress,
    #[serde_as(as = "DisplayFromStr")]
    pub new_level_progress: LevelProgress,
}

/// Predicts how depositing `deposit` into `position` changes its maturity and
/// level. `current_level` is the level the relic is recorded at, which may lag
/// behind the level its maturity qualifies for.
pub fn deposit_impact(
    position: &StakingPosition,
    deposit: &BigDecimal,
    levels: &MaturityLevels,
    current_level: usize,
    now: i64,
) -> Result<DepositImpact, InvalidInput> {
    if position.amount.is_negative() || deposit.is_negative() {
        return Err(InvalidInput::NegativeAmount);
    }

    let deposit = decimal_to_rational(deposit).ok_or(InvalidInput::UnrepresentableAmount)?;
    let balance =
        decimal_to_rational(&position.amount).ok_or(InvalidInput::UnrepresentableAmount)?;
    let total = &deposit + balance;
    if total.is_zero() {
        return Err(InvalidInput::ZeroBalance);
    }
    let weight = deposit / total;

    let old_maturity = position.maturity(now)?;
    let entry_shift = round_half_up(BigRational::from_integer(old_maturity.into()) * weight)
        .to_i64()
        .ok_or(InvalidInput::TimestampOverflow)?;
    let new_entry = position
        .entry
        .checked_add(entry_shift)
        .ok_or(InvalidInput::TimestampOverflow)?;
    let new_maturity = now
        .checked_sub(new_entry)
        .ok_or(InvalidInput::TimestampOverflow)?;
    let new_level = levels.level_for(new_maturity);

    Ok(DepositImpact {
        old_maturity,
        new_maturity,
        old_level: current_level,
        new_level,
        old_level_progress: levels.progress(current_level, old_maturity),
        new_level_progress: levels.progress(new_level, new_maturity),
    })
}

/// Rounds to the nearest integer, halves towards positive infinity.
fn round_half_up(value: BigRational) -> BigInt {
    (value + BigRational::new(1.into(), 2.into()))
        .floor()
        .to_integer()
}

#[cfg(test)]
mod tests {
    use {super::*, std::str::FromStr};

    fn levels(required: &[u64]) -> MaturityLevels {
        MaturityLevels::try_new(required.to_vec()).unwrap()
    }

    fn position(amount: &str, entry: i64) -> StakingPosition {
        StakingPosition {
            amount: BigDecimal::from_str(amount).unwrap(),
            entry,
        }
    }

    fn amount(value: &str) -> BigDecimal {
        BigDecimal::from_str(value).unwrap()
    }

    #[test]
    fn equal_deposit_halves_maturity() {
        let impact = deposit_impact(
            &position("100", 1000),
            &amount("100"),
            &levels(&[0, 500, 1500]),
            1,
            2000,
        )
        .unwrap();

        assert_eq!(
            impact,
            DepositImpact {
                old_maturity: 1000,
                new_maturity: 500,
                old_level: 1,
                new_level: 1,
                old_level_progress: LevelProgress::Progress {
                    maturity: 1000,
                    next_threshold: 1500,
                },
                new_level_progress: LevelProgress::Progress {
                    maturity: 500,
                    next_threshold: 1500,
                },
            }
        );
        assert_eq!(impact.old_level_progress.to_string(), "1000/1500");
        assert_eq!(impact.new_level_progress.to_string(), "500/1500");
    }

    #[test]
    fn zero_deposit_has_no_impact() {
        let table = levels(&[0, 100, 1000, 5000]);
        for (entry, now) in [(0, 0), (10, 150), (1_000, 4_000), (7, 100_000)] {
            let impact =
                deposit_impact(&position("12.5", entry), &amount("0"), &table, 0, now).unwrap();
            assert_eq!(impact.new_maturity, impact.old_maturity);
            assert_eq!(impact.new_level, table.level_for(impact.old_maturity));
        }
    }

    #[test]
    fn deposits_never_increase_maturity() {
        let table = levels(&[0, 3_600, 86_400]);
        for deposit in ["0.000001", "1", "3.3", "99", "1000000"] {
            let impact = deposit_impact(
                &position("42", 1_600_000_000),
                &amount(deposit),
                &table,
                2,
                1_600_200_000,
            )
            .unwrap();
            assert!(impact.new_maturity <= impact.old_maturity, "deposit {deposit}");
            assert!(impact.new_level <= table.level_for(impact.old_maturity));
        }
    }

    #[test]
    fn deposit_into_empty_relic_resets_maturity() {
        let impact =
            deposit_impact(&position("0", 1000), &amount("5"), &levels(&[0, 10]), 0, 2000)
                .unwrap();
        assert_eq!(impact.new_maturity, 0);
        assert_eq!(impact.new_level, 0);
    }

    #[test]
    fn entry_shift_rounds_half_up() {
        // maturity 1 * weight 1/2 = 0.5 -> entry moves by one second
        let impact =
            deposit_impact(&position("1", 99), &amount("1"), &levels(&[0]), 0, 100).unwrap();
        assert_eq!(impact.new_maturity, 0);

        // maturity 3 * weight 1/3 = 1 -> exact
        let impact =
            deposit_impact(&position("2", 97), &amount("1"), &levels(&[0]), 0, 100).unwrap();
        assert_eq!(impact.new_maturity, 2);

        // maturity 10 * weight 1/4 = 2.5 -> 3
        let impact =
            deposit_impact(&position("3", 90), &amount("1"), &levels(&[0]), 0, 100).unwrap();
        assert_eq!(impact.new_maturity, 7);
    }

    #[test]
    fn reports_max_level() {
        let table = levels(&[0, 500, 1500]);
        let impact =
            deposit_impact(&position("1", 0), &amount("0"), &table, 2, 10_000).unwrap();
        assert_eq!(impact.new_level, 2);
        assert_eq!(impact.old_level_progress, LevelProgress::MaxLevelReached);
        assert_eq!(impact.new_level_progress, LevelProgress::MaxLevelReached);
        assert_eq!(impact.new_level_progress.to_string(), "max level reached");

        // Recorded levels past the table end are reported as maxed out too.
        let impact =
            deposit_impact(&position("1", 0), &amount("0"), &table, 7, 10_000).unwrap();
        assert_eq!(impact.old_level_progress, LevelProgress::MaxLevelReached);
    }

    #[test]
    fn level_lookup() {
        let table = levels(&[0, 500, 500, 1500]);
        assert_eq!(table.level_for(-10), 0);
        assert_eq!(table.level_for(0), 0);
        assert_eq!(table.level_for(499), 0);
        // Ties resolve to the later level.
        assert_eq!(table.level_for(500), 2);
        assert_eq!(table.level_for(1499), 2);
        assert_eq!(table.level_for(1500), 3);
        assert_eq!(table.level_for(i64::MAX), 3);

        assert_eq!(levels(&[100, 200]).level_for(50), 0);
    }

    #[test]
    fn lower_thresholds_never_lower_the_level() {
        let required = [0_u64, 300, 900, 2_700, 8_100];
        for maturity in [0_i64, 299, 300, 1_000, 5_000, 10_000] {
            let mut previous = 0;
            for divisor in [1, 2, 3, 10, 100] {
                let scaled = levels(&required.map(|r| r / divisor));
                let level = scaled.level_for(maturity);
                assert!(level >= previous, "maturity {maturity} divisor {divisor}");
                previous = level;
            }
        }
    }

    #[test]
    fn rejects_entry_after_reference_time() {
        assert_eq!(
            deposit_impact(&position("100", 2000), &amount("100"), &levels(&[0, 500]), 0, 1000),
            Err(InvalidInput::EntryInFuture {
                entry: 2000,
                now: 1000
            })
        );
        assert_eq!(position("1", 1000).maturity(1000), Ok(0));
    }

    #[test]
    fn rejects_amounts_with_huge_exponents() {
        let huge = BigDecimal::new(BigInt::from(1), i64::from(u32::MAX) + 1);
        assert_eq!(
            deposit_impact(&position("1", 0), &huge, &levels(&[0]), 0, 10),
            Err(InvalidInput::UnrepresentableAmount)
        );
        let position = StakingPosition {
            amount: BigDecimal::new(BigInt::from(1), -i64::from(u32::MAX) - 1),
            entry: 0,
        };
        assert_eq!(
            deposit_impact(&position, &amount("1"), &levels(&[0]), 0, 10),
            Err(InvalidInput::UnrepresentableAmount)
        );
    }

    #[test]
    fn rejects_invalid_input() {
        assert_eq!(
            MaturityLevels::try_new(vec![]),
            Err(InvalidInput::EmptyLevels)
        );
        assert_eq!(
            MaturityLevels::try_new(vec![0, 100, 50]),
            Err(InvalidInput::DecreasingLevels(2))
        );
        assert_eq!(
            deposit_impact(&position("0", 0), &amount("0"), &levels(&[0]), 0, 10),
            Err(InvalidInput::ZeroBalance)
        );
        assert_eq!(
            deposit_impact(&position("1", 0), &amount("-1"), &levels(&[0]), 0, 10),
            Err(InvalidInput::NegativeAmount)
        );
        assert_eq!(
            deposit_impact(&position("1", i64::MIN), &amount("1"), &levels(&[0]), 0, 10),
            Err(InvalidInput::TimestampOverflow)
        );
    }

    #[test]
    fn serializes_progress_as_text() {
        let impact = deposit_impact(
            &position("100", 1000),
            &amount("100"),
            &levels(&[0, 500]),
            0,
            2000,
        )
        .unwrap();
        assert_eq!(
            serde_json::to_value(&impact).unwrap(),
            serde_json::json!({
                "oldMaturity": 1000,
                "newMaturity": 500,
                "oldLevel": 0,
                "newLevel": 1,
                "oldLevelProgress": "1000/500",
                "newLevelProgress": "max level reached",
            })
        );
    }
}
