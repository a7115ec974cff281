pub mod maturity;
pub mod position;

pub use {
    maturity::{DepositImpact, InvalidInput, LevelProgress, MaturityLevels, StakingPosition},
    position::{FarmId, FarmPosition, PendingReward, RelicId, RelicReward},
};
