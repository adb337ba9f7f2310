pub mod caches;
pub mod error;
pub mod resolver;
pub mod types;

pub use caches::PickupCaches;
pub use error::PickupError;
pub use resolver::PickupResolver;
pub use types::{
    EnrichedAddress, EnrichedLocation, PickupInput, PickupRequest, PickupResult, StockStatus,
};
