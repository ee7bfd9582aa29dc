/// Tag of the indexing service used to page through an account's history.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TransactionDataApi {
    Fastnear,
    Nearblocks,
    Pikespeakai,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Config {
    pub transaction_data_api: TransactionDataApi,
    pub pikespeak_api_key: Option<String>,
    pub rpc_endpoints: Vec<String>,
    pub fastnear_url: String,
    pub nearblocks_url: String,
    pub pikespeak_url: String,
    pub neardata_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            transaction_data_api: TransactionDataApi::Nearblocks,
            pikespeak_api_key: None,
            rpc_endpoints: vec![
                "https://free.rpc.fastnear.com".to_owned(),
                "https://near.lava.build".to_owned(),
                "https://rpc.mainnet.near.org".to_owned(),
                "https://1rpc.io/near".to_owned(),
                "https://archival-rpc.mainnet.near.org".to_owned(),
                "https://archival-rpc.mainnet.pagoda.co".to_owned(),
            ],
            fastnear_url: "https://api.fastnear.com".to_owned(),
            nearblocks_url: "https://api.nearblocks.io".to_owned(),
            pikespeak_url: "https://api.pikespeak.ai".to_owned(),
            neardata_url: "https://mainnet.neardata.xyz".to_owned(),
        }
    }
}

impl Config {
    /// Mainnet defaults, overridable from the environment:
    /// `TRANSACTION_DATA_API`, `PIKESPEAK_API_KEY`, `RPC_ENDPOINTS` (comma-separated).
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(api) = std::env::var("TRANSACTION_DATA_API") {
            match api.parse() {
                Ok(parsed) => config.transaction_data_api = parsed,
                Err(_) => tracing::warn!(
                    target: crate::LOGGER_MSG,
                    "Unknown TRANSACTION_DATA_API value {}, staying with {}",
                    api,
                    config.transaction_data_api
                ),
            }
        }
        if let Ok(api_key) = std::env::var("PIKESPEAK_API_KEY") {
            config.pikespeak_api_key = Some(api_key);
        }
        if let Ok(endpoints) = std::env::var("RPC_ENDPOINTS") {
            let endpoints: Vec<String> = endpoints
                .split(',')
                .map(|url| url.trim().to_owned())
                .filter(|url| !url.is_empty())
                .collect();
            if !endpoints.is_empty() {
                config.rpc_endpoints = endpoints;
            }
        }
        config
    }
}
