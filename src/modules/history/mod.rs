pub mod engine;
pub mod schemas;
pub mod sources;

pub use engine::get_transactions_to_date;
