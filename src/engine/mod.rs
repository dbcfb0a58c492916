pub mod environmental;
pub mod error;
pub mod inverter;
pub mod pricing;
pub mod production;
pub mod proposal;
pub mod roi;
pub mod savings;
pub mod sizing;

pub use environmental::*;
pub use error::*;
pub use inverter::*;
pub use pricing::price_system;
pub use production::*;
pub use proposal::*;
pub use roi::*;
pub use savings::*;
pub use sizing::*;
