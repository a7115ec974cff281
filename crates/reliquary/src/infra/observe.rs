//! Logging setup and the structured events emitted while reading relics.

use {
    crate::domain::{DepositImpact, FarmPosition, PendingReward, RelicId},
    alloy::primitives::Address,
    tracing_subscriber::{EnvFilter, fmt},
};

/// Installs a stderr logger filtered by `filter` (`tracing_subscriber`
/// directive syntax, e.g. `warn,reliquary=debug`).
pub fn init(filter: &str) {
    let subscriber = fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::warn!("tracing was already initialized");
    }
}

pub fn fetched_positions(owner: Address, positions: &[FarmPosition]) {
    tracing::debug!(%owner, count = positions.len(), "fetched relic positions");
}

pub fn fetched_pending_rewards(owner: Address, rewards: &[PendingReward]) {
    tracing::debug!(%owner, count = rewards.len(), "fetched pending rewards");
}

pub fn computing_deposit_impact(relic: RelicId, position: &FarmPosition, levels: &[u64]) {
    tracing::debug!(
        %relic,
        farm = %position.farm_id,
        amount = %position.amount,
        entry = position.entry,
        ?levels,
        "computing deposit impact"
    );
}

pub fn computed_deposit_impact(relic: RelicId, now: i64, impact: &DepositImpact) {
    tracing::debug!(
        %relic,
        now,
        old_maturity = impact.old_maturity,
        new_maturity = impact.new_maturity,
        old_level = impact.old_level,
        new_level = impact.new_level,
        "computed deposit impact"
    );
}
