//! Static OSM filter table.
//!
//! Expressions use the ohsome filter grammar. Vineyards are not restricted
//! by element type because they are sometimes mapped as a single node.

use crate::models::FilterDefinition;

/// Name reported for a request whose filter is not in the table
pub const UNKNOWN_FILTER: &str = "unknown_filter";

pub const FILTER_ROADS: &str = "type:way and (highway in (motorway, motorway_link, trunk, trunk_link, primary, primary_link, secondary, secondary_link, tertiary, tertiary_link))";

pub const FILTER_RAILWAYS: &str =
    "type:way and (railway in (rail, light_rail, narrow_gauge, tram, preserved))";

pub const FILTER_WATERWAYS: &str = "type:way and (waterway in (river, canal, flowline, tidal_channel) or water in (river, canal))";

pub const FILTER_WATERBODIES: &str = "natural=water or (water in (cenote, lagoon, lake, oxbow, rapids, river, stream, stream_pool, canal, harbour, pond, reservoir, wastewater, tidal, natural)) or (landuse=reservoir) or (waterway=riverbank)";

pub const FILTER_VINEYARDS: &str = "landuse=vineyard";

pub const DEFAULT_FILTERS: [FilterDefinition; 5] = [
    FilterDefinition { name: "filter_roads", expression: FILTER_ROADS },
    FilterDefinition { name: "filter_railways", expression: FILTER_RAILWAYS },
    FilterDefinition { name: "filter_waterways", expression: FILTER_WATERWAYS },
    FilterDefinition { name: "filter_waterbodies", expression: FILTER_WATERBODIES },
    FilterDefinition { name: "filter_vineyards", expression: FILTER_VINEYARDS },
];

/// Reverse lookup of a filter name by its expression
pub fn filter_name<'a>(expression: &str, filters: &'a [FilterDefinition]) -> Option<&'a str> {
    filters.iter().find(|f| f.expression == expression).map(|f| f.name)
}
