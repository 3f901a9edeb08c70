//! FX (Foreign Exchange) module - historical rate tables and pivot conversion.

mod exchange_rate_table;
mod fx_errors;
mod fx_model;
mod fx_traits;


pub use exchange_rate_table::ExchangeRateTable;
pub use fx_errors::FxError;
pub use fx_model::ExchangeRate;
pub use fx_traits::FxConverterTrait;
