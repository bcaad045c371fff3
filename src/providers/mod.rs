pub mod exchange_rate;
pub mod newsdata;

pub use exchange_rate::ExchangeRateApiProvider;
pub use newsdata::NewsDataProvider;

pub(crate) const USER_AGENT: &str = concat!("expense-tracker/", env!("CARGO_PKG_VERSION"));
