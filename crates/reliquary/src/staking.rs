//! Staking queries on top of the Reliquary contract readers.

use {
    crate::{
        domain::{
            DepositImpact,
            FarmId,
            FarmPosition,
            MaturityLevels,
            PendingReward,
            RelicId,
            maturity,
        },
        infra::{Clock, ReliquaryReading, observe},
        util::conv::{TOKEN_DECIMALS, wei_to_decimal},
    },
    alloy::primitives::{Address, U256},
    anyhow::{Context, Result},
    bigdecimal::BigDecimal,
    futures::future,
    num::Zero,
    std::{collections::HashSet, sync::Arc},
};

pub struct ReliquaryService {
    reader: Arc<dyn ReliquaryReading>,
    clock: Arc<dyn Clock>,
    reward_token: Address,
}

impl ReliquaryService {
    pub fn new(
        reader: Arc<dyn ReliquaryReading>,
        clock: Arc<dyn Clock>,
        reward_token: Address,
    ) -> Self {
        Self {
            reader,
            clock,
            reward_token,
        }
    }

    /// Total amount `owner` has staked in `farm` across all of their relics.
    pub async fn staked_balance(&self, owner: Address, farm: FarmId) -> Result<BigDecimal> {
        let positions = self.reader.positions_of_owner(owner).await?;
        Ok(positions
            .iter()
            .filter(|position| position.farm_id == farm)
            .fold(BigDecimal::zero(), |total, position| total + &position.amount))
    }

    pub async fn all_pending_rewards(&self, owner: Address) -> Result<Vec<PendingReward>> {
        let rewards = self
            .reader
            .pending_rewards_of_owner(owner)
            .await?
            .into_iter()
            .map(|reward| PendingReward {
                farm_id: reward.farm_id,
                relic_id: reward.relic_id,
                token: self.reward_token,
                amount: reward.amount,
            })
            .collect::<Vec<_>>();
        observe::fetched_pending_rewards(owner, &rewards);
        Ok(rewards)
    }

    /// Pending rewards of the relics `owner` holds in any of `farms`. The
    /// per-relic reads are issued together and fail as a whole.
    pub async fn pending_rewards(
        &self,
        owner: Address,
        farms: &HashSet<FarmId>,
    ) -> Result<Vec<PendingReward>> {
        let positions = self
            .reader
            .positions_of_owner(owner)
            .await?
            .into_iter()
            .filter(|position| farms.contains(&position.farm_id))
            .collect::<Vec<_>>();

        let amounts = future::try_join_all(
            positions
                .iter()
                .map(|position| self.reader.pending_reward(position.relic_id)),
        )
        .await?;

        let rewards = positions
            .into_iter()
            .zip(amounts)
            .map(|(position, amount)| PendingReward {
                farm_id: position.farm_id,
                relic_id: position.relic_id,
                token: self.reward_token,
                amount,
            })
            .collect::<Vec<_>>();
        observe::fetched_pending_rewards(owner, &rewards);
        Ok(rewards)
    }

    pub async fn positions(&self, owner: Address) -> Result<Vec<FarmPosition>> {
        self.reader.positions_of_owner(owner).await
    }

    pub async fn position(&self, relic: RelicId) -> Result<FarmPosition> {
        self.reader.position_for_relic(relic).await
    }

    pub async fn level_on_update(&self, relic: RelicId) -> Result<u64> {
        self.reader.level_on_update(relic).await
    }

    /// Predicts the maturity and level of `relic` after depositing `amount`
    /// (in wei) into it.
    pub async fn deposit_impact(&self, relic: RelicId, amount: U256) -> Result<DepositImpact> {
        let position = self.reader.position_for_relic(relic).await?;
        let (current_level, required_maturity) = futures::try_join!(
            self.reader.level_on_update(relic),
            self.reader.required_maturities(position.farm_id),
        )?;
        observe::computing_deposit_impact(relic, &position, &required_maturity);

        let levels = MaturityLevels::try_new(required_maturity)
            .with_context(|| format!("maturity levels of farm {}", position.farm_id))?;
        // levels past the table are reported as maxed out
        let current_level = usize::try_from(current_level).unwrap_or(usize::MAX);
        let now = self.clock.now();

        let impact = maturity::deposit_impact(
            &position.as_staking_position(),
            &wei_to_decimal(amount, TOKEN_DECIMALS),
            &levels,
            current_level,
            now,
        )
        .with_context(|| format!("deposit impact of relic {relic}"))?;
        observe::computed_deposit_impact(relic, now, &impact);
        Ok(impact)
    }
}
