use {
    super::maturity::StakingPosition,
    alloy::primitives::{Address, U256},
    bigdecimal::BigDecimal,
    serde::Serialize,
    serde_with::{DisplayFromStr, SerializeDisplay, serde_as},
};

/// Token id of a relic, the NFT representing a Reliquary position.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    PartialEq,
    Hash,
    Ord,
    PartialOrd,
    derive_more::Display,
    derive_more::From,
    SerializeDisplay,
)]
pub struct RelicId(pub U256);

/// Reliquary pool id. The frontend calls these farms.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    PartialEq,
    Hash,
    Ord,
    PartialOrd,
    derive_more::Display,
    derive_more::From,
    SerializeDisplay,
)]
pub struct FarmId(pub U256);

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmPosition {
    pub farm_id: FarmId,
    pub relic_id: RelicId,
    /// Staked amount in token units (not wei).
    pub amount: BigDecimal,
    pub entry: i64,
    /// Level as last recorded on-chain.
    pub level: u64,
}

impl FarmPosition {
    pub fn as_staking_position(&self) -> StakingPosition {
        StakingPosition {
            amount: self.amount.clone(),
            entry: self.entry,
        }
    }
}

/// Pending reward of a relic as reported by the contract.
#[derive(Clone, Debug, PartialEq)]
pub struct RelicReward {
    pub relic_id: RelicId,
    pub farm_id: FarmId,
    pub amount: BigDecimal,
}

#[serde_as]
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingReward {
    pub farm_id: FarmId,
    pub relic_id: RelicId,
    #[serde_as(as = "DisplayFromStr")]
    pub token: Address,
    pub amount: BigDecimal,
}
