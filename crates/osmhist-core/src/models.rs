pub mod bbox;
pub mod naming;
pub mod query;
pub mod raster;

pub use bbox::{BoundingBox, Extent};
pub use naming::{NamingRule, NamingRules};
pub use query::{FilterDefinition, QueryRequest, QuerySettings};
pub use raster::RasterCombination;
