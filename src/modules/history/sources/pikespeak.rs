use std::time::Duration;

use near_primitives::types::AccountId;

use super::TransactionSource;
use crate::config::Config;
use crate::modules::history::schemas::{HistoryCursor, TransactionArgs, TransactionRecord};
use crate::retry::{self, RetryPolicy};
use crate::types;

const RETRY_POLICY: RetryPolicy = RetryPolicy::new(5, Duration::from_secs(30));
// Pikespeak rate-limits aggressively; pause after every successful call.
const COOLDOWN: Duration = Duration::from_millis(500);

/// Commercial analytics API, authenticated with an API key.
// todo nearblocks also throttles unauthenticated clients; consider giving it
// the same retry policy once its rate-limit headers are mapped
pub struct PikespeakSource {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    per_page: u32,
}

impl PikespeakSource {
    pub fn new(config: &Config, http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: config.pikespeak_url.clone(),
            api_key: config.pikespeak_api_key.clone(),
            per_page: crate::DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, serde::Deserialize)]
struct PikespeakTransaction {
    block_hash: String,
    transaction_timestamp: types::U64,
    id: String,
    signer: String,
    receiver: String,
    #[serde(default)]
    first_action_type: Option<String>,
}

impl From<PikespeakTransaction> for TransactionRecord {
    fn from(tx: PikespeakTransaction) -> Self {
        Self {
            block_hash: tx.block_hash,
            block_height: None,
            block_timestamp: tx.transaction_timestamp,
            hash: tx.id,
            signer_id: tx.signer,
            receiver_id: tx.receiver,
            action_kind: tx.first_action_type,
            args: TransactionArgs::default(),
            balance: None,
        }
    }
}

impl TransactionSource for PikespeakSource {
    async fn next_page(
        &self,
        account_id: &AccountId,
        cursor: &HistoryCursor,
    ) -> crate::Result<Vec<TransactionRecord>> {
        let url = format!("{}/account/transactions/{}", self.base_url, account_id);
        let offset = cursor.page.saturating_sub(1) * self.per_page;
        let fetched = retry::with_retries(RETRY_POLICY, || async {
            let mut request = self.http.get(&url).query(&[
                ("limit", self.per_page.to_string()),
                ("offset", offset.to_string()),
            ]);
            if let Some(api_key) = &self.api_key {
                request = request.header("x-api-key", api_key.as_str());
            }
            let transactions = request
                .send()
                .await?
                .error_for_status()?
                .json::<Vec<PikespeakTransaction>>()
                .await?;
            tokio::time::sleep(COOLDOWN).await;
            Ok(transactions)
        })
        .await;
        match fetched {
            Ok(transactions) => Ok(transactions
                .into_iter()
                .map(TransactionRecord::from)
                .collect()),
            Err(err) => {
                tracing::error!(
                    target: crate::LOGGER_MSG,
                    "Pikespeak gave up after {} attempts: {}. Treating the page as empty.",
                    RETRY_POLICY.max_attempts,
                    err
                );
                Ok(Vec::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_maps_service_fields_into_the_common_record() {
        let tx: PikespeakTransaction = serde_json::from_value(json!({
            "block_hash": "9y2tQdvkbNr9UzFnXmV8iqcoWyvzyDqMUXGDAR19jeRr",
            "transaction_timestamp": 1655571176644255779u64,
            "id": "4HTB8ZwXHkDbbcKhct4aWmZtWGCFjmSYq8NzVmRnmwCT",
            "signer": "alice.near",
            "receiver": "wrap.near",
            "first_action_type": "FUNCTION_CALL"
        }))
        .unwrap();
        let record = TransactionRecord::from(tx);
        assert_eq!(record.block_timestamp, types::U64(1655571176644255779));
        assert_eq!(record.hash, "4HTB8ZwXHkDbbcKhct4aWmZtWGCFjmSYq8NzVmRnmwCT");
        assert_eq!(record.signer_id, "alice.near");
        assert_eq!(record.action_kind.as_deref(), Some("FUNCTION_CALL"));
        // Pikespeak does not report heights; the balance-fill pass recovers
        // them from the block hash.
        assert_eq!(record.block_height, None);
        assert_eq!(record.args.method_name, None);
    }
}
