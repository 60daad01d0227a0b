//! Triangulation, subdivision and fracture of polygons.

pub mod clip;
pub mod delaunay;
pub mod ear_clipping;
pub mod fracture;
pub mod subdivision;
pub mod triangulation;

pub use clip::{ConvexClipper, PolygonClipper};
pub use delaunay::{delaunay_triangulation, DelaunayConfig, DelaunayConfigBuilder};
pub use fracture::{fracture, Fracture};
pub use subdivision::{SubdivisionConfig, SubdivisionConfigBuilder};
pub use triangulation::Triangulation;
