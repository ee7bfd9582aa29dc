use near_primitives::types::AccountId;

use crate::config::{Config, TransactionDataApi};
use crate::modules::history::schemas::{HistoryCursor, TransactionRecord};

mod fastnear;
mod nearblocks;
mod pikespeak;

pub use fastnear::FastNearSource;
pub use nearblocks::NearBlocksSource;
pub use pikespeak::PikespeakSource;

/// One page of an account's history from an external indexing service,
/// newest first. An empty page means the source is exhausted.
#[allow(async_fn_in_trait)]
pub trait TransactionSource {
    async fn next_page(
        &self,
        account_id: &AccountId,
        cursor: &HistoryCursor,
    ) -> crate::Result<Vec<TransactionRecord>>;
}

/// The closed set of supported history backends, selected once per
/// reconciliation call from the configured tag.
pub enum DataSource {
    FastNear(FastNearSource),
    NearBlocks(NearBlocksSource),
    Pikespeak(PikespeakSource),
}

impl DataSource {
    pub fn from_config(config: &Config, http: reqwest::Client) -> Self {
        match config.transaction_data_api {
            TransactionDataApi::Fastnear => Self::FastNear(FastNearSource::new(config, http)),
            TransactionDataApi::Nearblocks => Self::NearBlocks(NearBlocksSource::new(config, http)),
            TransactionDataApi::Pikespeakai => Self::Pikespeak(PikespeakSource::new(config, http)),
        }
    }
}

impl TransactionSource for DataSource {
    async fn next_page(
        &self,
        account_id: &AccountId,
        cursor: &HistoryCursor,
    ) -> crate::Result<Vec<TransactionRecord>> {
        match self {
            Self::FastNear(source) => source.next_page(account_id, cursor).await,
            Self::NearBlocks(source) => source.next_page(account_id, cursor).await,
            Self::Pikespeak(source) => source.next_page(account_id, cursor).await,
        }
    }
}
