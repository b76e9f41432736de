pub mod io;
pub mod maps;
pub mod models;
pub mod parsing;
pub mod route;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use io::{ContentError, ContentStore};
pub use maps::{
    Coordinate, GeocodeError, Geocoder, MapLookupError, MapMode, MapResolution, MapState,
    NominatimGeocoder, resolve_map,
};
pub use models::*;
pub use parsing::{extract_directives, render_markdown};
pub use route::Route;
