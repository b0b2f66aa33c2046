//! Journey planning over a station network: quickest and fewest-stop routes,
//! and the minimum spanning backbone with the connections it can do without.

pub mod backbone;
pub mod bench;
pub mod error;
pub mod graph;
pub mod logging;
pub mod network;
pub mod normalize;
pub mod path;
pub mod records;
pub mod status;
pub mod traversal;

pub use error::{NetworkError, Result};
pub use network::{CoreBackbone, Journey, Link, StationIndex, StationNetwork};
