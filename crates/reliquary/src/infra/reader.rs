//! Read access to the Reliquary contract.

use {
    super::{contracts::IReliquary, observe},
    crate::{
        domain::{FarmId, FarmPosition, RelicId, RelicReward},
        util::conv::{TOKEN_DECIMALS, wei_to_decimal},
    },
    alloy::{
        primitives::{Address, U256},
        providers::DynProvider,
    },
    anyhow::{Context, Result, anyhow, ensure},
    bigdecimal::BigDecimal,
};

#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
#[async_trait::async_trait]
pub trait ReliquaryReading: Send + Sync {
    /// All relics owned by `owner`.
    async fn positions_of_owner(&self, owner: Address) -> Result<Vec<FarmPosition>>;

    async fn position_for_relic(&self, relic: RelicId) -> Result<FarmPosition>;

    /// The level the relic will be at after its next update.
    async fn level_on_update(&self, relic: RelicId) -> Result<u64>;

    /// Required maturity (seconds) of each level of the farm.
    async fn required_maturities(&self, farm: FarmId) -> Result<Vec<u64>>;

    async fn pending_reward(&self, relic: RelicId) -> Result<BigDecimal>;

    async fn pending_rewards_of_owner(&self, owner: Address) -> Result<Vec<RelicReward>>;
}

/// [`ReliquaryReading`] backed by JSON-RPC calls to a deployed contract.
pub struct Reliquary {
    contract: IReliquary::IReliquaryInstance<DynProvider>,
}

impl Reliquary {
    pub fn new(address: Address, provider: DynProvider) -> Self {
        Self {
            contract: IReliquary::new(address, provider),
        }
    }

    pub fn address(&self) -> Address {
        *self.contract.address()
    }
}

#[async_trait::async_trait]
impl ReliquaryReading for Reliquary {
    async fn positions_of_owner(&self, owner: Address) -> Result<Vec<FarmPosition>> {
        let result = self
            .contract
            .relicPositionsOfOwner(owner)
            .call()
            .await
            .context("relicPositionsOfOwner")?;
        ensure!(
            result.relicIds.len() == result.positionInfos.len(),
            "relicPositionsOfOwner returned {} relic ids for {} positions",
            result.relicIds.len(),
            result.positionInfos.len(),
        );
        let positions = result
            .relicIds
            .into_iter()
            .zip(result.positionInfos)
            .map(|(relic, info)| to_farm_position(RelicId(relic), info))
            .collect::<Result<Vec<_>>>()?;
        observe::fetched_positions(owner, &positions);
        Ok(positions)
    }

    async fn position_for_relic(&self, relic: RelicId) -> Result<FarmPosition> {
        let info = self
            .contract
            .getPositionForId(relic.0)
            .call()
            .await
            .with_context(|| format!("getPositionForId({relic})"))?;
        to_farm_position(relic, info)
    }

    async fn level_on_update(&self, relic: RelicId) -> Result<u64> {
        let level = self
            .contract
            .levelOnUpdate(relic.0)
            .call()
            .await
            .with_context(|| format!("levelOnUpdate({relic})"))?;
        to_u64(level, "level")
    }

    async fn required_maturities(&self, farm: FarmId) -> Result<Vec<u64>> {
        let info = self
            .contract
            .getLevelInfo(farm.0)
            .call()
            .await
            .with_context(|| format!("getLevelInfo({farm})"))?;
        let required = info
            .requiredMaturity
            .into_iter()
            .map(|maturity| to_u64(maturity, "required maturity"))
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(%farm, ?required, "fetched maturity levels");
        Ok(required)
    }

    async fn pending_reward(&self, relic: RelicId) -> Result<BigDecimal> {
        let pending = self
            .contract
            .pendingReward(relic.0)
            .call()
            .await
            .with_context(|| format!("pendingReward({relic})"))?;
        Ok(wei_to_decimal(pending, TOKEN_DECIMALS))
    }

    async fn pending_rewards_of_owner(&self, owner: Address) -> Result<Vec<RelicReward>> {
        let rewards = self
            .contract
            .pendingRewardsOfOwner(owner)
            .call()
            .await
            .context("pendingRewardsOfOwner")?;
        Ok(rewards
            .into_iter()
            .map(|reward| RelicReward {
                relic_id: RelicId(reward.relicId),
                farm_id: FarmId(reward.poolId),
                amount: wei_to_decimal(reward.pendingReward, TOKEN_DECIMALS),
            })
            .collect())
    }
}

fn to_farm_position(relic_id: RelicId, info: IReliquary::PositionInfo) -> Result<FarmPosition> {
    let entry = to_u64(info.entry, "entry")?;
    Ok(FarmPosition {
        farm_id: FarmId(info.poolId),
        relic_id,
        amount: wei_to_decimal(info.amount, TOKEN_DECIMALS),
        entry: i64::try_from(entry).context("entry timestamp out of range")?,
        level: to_u64(info.level, "level")?,
    })
}

fn to_u64(value: U256, what: &str) -> Result<u64> {
    u64::try_from(value).map_err(|_| anyhow!("{what} {value} does not fit into 64 bits"))
}
