//! Technical indicator implementations.

pub mod bollinger;
pub mod cci;
pub mod cmf;
pub mod ema;
pub mod kama;
pub mod macd;
pub mod obv;
pub mod rsi;
pub mod sma;
pub mod stochastic;
pub mod vma;
pub mod wma;

pub use bollinger::{Band, BollingerBands};
pub use cci::Cci;
pub use cmf::ChaikinMoneyFlow;
pub use ema::Ema;
pub use kama::Kama;
pub use macd::Macd;
pub use obv::Obv;
pub use rsi::Rsi;
pub use sma::Sma;
pub use stochastic::Stochastic;
pub use vma::Vma;
pub use wma::Wma;
