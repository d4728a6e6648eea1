pub mod analysis;
pub mod fundamentals;
pub mod price;
pub mod stock;
pub mod table;

pub use analysis::*;
pub use fundamentals::*;
pub use price::*;
pub use stock::*;
pub use table::*;
