pub mod domain;
pub mod infra;
pub mod staking;
pub mod util;

use {
    crate::{
        domain::{FarmId, RelicId},
        infra::{
            Clock,
            Config,
            FixedClock,
            Reliquary,
            SystemClock,
            cli::{Args, Command},
            observe,
        },
        staking::ReliquaryService,
        util::conv::{TOKEN_DECIMALS, decimal_to_wei},
    },
    alloy::providers::{Provider, ProviderBuilder},
    anyhow::{Context, Result, ensure},
    clap::Parser,
    serde_json::json,
    std::sync::Arc,
};

pub async fn start(args: impl IntoIterator<Item = String>) {
    let args = Args::parse_from(args);
    observe::init(&args.log);
    tracing::debug!("running reliquary with {args:#?}");

    if let Err(err) = run(args).await {
        tracing::error!(?err, "command failed");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let config = Config::load(&args.config).await?;

    let provider = ProviderBuilder::new()
        .connect_http(args.node_url.clone())
        .erased();
    let chain_id = provider
        .get_chain_id()
        .await
        .context("failed to fetch chain id")?;
    check_chain_id(&config, chain_id)
        .with_context(|| format!("unexpected node at {}", args.node_url))?;

    let clock: Arc<dyn Clock> = match args.command {
        Command::DepositImpact { now: Some(now), .. } => Arc::new(FixedClock(now)),
        _ => Arc::new(SystemClock),
    };
    let reliquary = Reliquary::new(config.reliquary, provider);
    tracing::debug!(chain_id, reliquary = %reliquary.address(), "connected to node");
    let service = ReliquaryService::new(Arc::new(reliquary), clock, config.reward_token);

    let output = execute(&service, args.command).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn check_chain_id(config: &Config, chain_id: u64) -> Result<()> {
    ensure!(
        chain_id == config.chain_id,
        "node serves chain {chain_id} but the config is for chain {}",
        config.chain_id,
    );
    Ok(())
}

/// Runs a subcommand and returns its JSON output.
async fn execute(service: &ReliquaryService, command: Command) -> Result<serde_json::Value> {
    Ok(match command {
        Command::Positions { owner } => serde_json::to_value(service.positions(owner).await?)?,
        Command::Position { relic } => {
            let relic = RelicId(relic);
            let (position, level_on_update) =
                futures::try_join!(service.position(relic), service.level_on_update(relic))?;
            json!({
                "position": position,
                "levelOnUpdate": level_on_update,
            })
        }
        Command::StakedBalance { owner, farm } => {
            let balance = service.staked_balance(owner, FarmId(farm)).await?;
            json!({ "balance": balance })
        }
        Command::PendingRewards { owner, farms } if farms.is_empty() => {
            serde_json::to_value(service.all_pending_rewards(owner).await?)?
        }
        Command::PendingRewards { owner, farms } => {
            let farms = farms.into_iter().map(FarmId).collect();
            serde_json::to_value(service.pending_rewards(owner, &farms).await?)?
        }
        Command::DepositImpact { relic, amount, .. } => {
            let amount = decimal_to_wei(&amount, TOKEN_DECIMALS)?;
            serde_json::to_value(service.deposit_impact(RelicId(relic), amount).await?)?
        }
    })
}
