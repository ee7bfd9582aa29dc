use std::str::FromStr;

use near_account_history::config::Config;
use near_account_history::modules::balance::NeardataProvider;
use near_account_history::modules::history;
use near_account_history::modules::history::schemas::HistoryCursor;
use near_account_history::modules::history::sources::DataSource;
use near_account_history::progress::LogProgress;
use near_account_history::rpc_helpers::RpcClient;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let account = args
        .next()
        .expect("usage: near-account-history <account_id> [offset_timestamp_nanos]");
    let account_id =
        near_primitives::types::AccountId::from_str(&account).expect("failed to parse account_id");
    let offset_timestamp = match args.next() {
        Some(raw) => raw.parse().expect("failed to parse offset_timestamp_nanos"),
        None => std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("system clock is set before the Unix epoch")
            .as_nanos() as u64,
    };

    let config = Config::from_env();
    let http = reqwest::Client::new();
    let rpc_client = RpcClient::from_config(&config);
    let source = DataSource::from_config(&config, http.clone());
    let blocks = NeardataProvider::new(&config, http);

    let mut transactions = Vec::new();
    history::get_transactions_to_date(
        &source,
        &rpc_client,
        &blocks,
        &account_id,
        HistoryCursor::new(offset_timestamp),
        &mut transactions,
        &LogProgress,
    )
    .await
    .expect("failed to reconcile the account history");

    println!(
        "{}",
        serde_json::to_string_pretty(&transactions).expect("failed to serialize the result")
    );
}
