use {
    alloy::primitives::{Address, U256},
    bigdecimal::BigDecimal,
    std::path::PathBuf,
    url::Url,
};

/// Queries Reliquary staking positions.
#[derive(Debug, clap::Parser)]
#[command(version)]
pub struct Args {
    /// JSON-RPC endpoint of the node to read from.
    #[clap(long, env, default_value = "http://localhost:8545")]
    pub node_url: Url,

    /// Path to the TOML configuration file.
    #[clap(long, env)]
    pub config: PathBuf,

    /// Log filter, e.g. `warn,reliquary=trace`.
    #[clap(long, env, default_value = "warn,reliquary=debug")]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// All relics held by an account.
    Positions {
        #[clap(long)]
        owner: Address,
    },
    /// A single relic.
    Position {
        #[clap(long)]
        relic: U256,
    },
    /// Amount an account has staked in a farm.
    StakedBalance {
        #[clap(long)]
        owner: Address,
        #[clap(long)]
        farm: U256,
    },
    /// Pending rewards of an account, optionally limited to some farms.
    PendingRewards {
        #[clap(long)]
        owner: Address,
        #[clap(long = "farm")]
        farms: Vec<U256>,
    },
    /// How a deposit would change the maturity and level of a relic.
    DepositImpact {
        #[clap(long)]
        relic: U256,
        /// Amount to deposit in token units, e.g. `12.5`.
        #[clap(long)]
        amount: BigDecimal,
        /// Reference UNIX timestamp instead of the current time.
        #[clap(long)]
        now: Option<i64>,
    },
}
