pub mod eco;
pub mod opening;
pub mod registry;

pub use eco::EcoVolume;
pub use opening::{CardTemplate, Opening, OpeningContext, OpeningError, StoreOutcome};
pub use registry::KnownOpenings;
