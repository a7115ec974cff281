use {
    alloy::primitives::Address,
    anyhow::{Context, Result},
    serde::Deserialize,
    serde_with::{DisplayFromStr, serde_as},
    std::path::Path,
};

/// Deployment specific settings, loaded from a TOML file.
#[serde_as]
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Chain the node is expected to serve.
    pub chain_id: u64,
    /// Address of the Reliquary contract.
    #[serde_as(as = "DisplayFromStr")]
    pub reliquary: Address,
    /// Token the farms pay their rewards in.
    #[serde_as(as = "DisplayFromStr")]
    pub reward_token: Address,
}

impl Config {
    pub async fn load(path: &Path) -> Result<Self> {
        let data = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("I/O error while reading {}", path.display()))?;
        Self::parse(&data).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn parse(data: &str) -> Result<Self> {
        Ok(toml::de::from_str(data)?)
    }
}
