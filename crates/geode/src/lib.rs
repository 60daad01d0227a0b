pub mod algo;
pub mod collision;
pub mod errors;
pub mod math;
pub mod object;
pub mod query;
pub mod shape;
pub mod spawn;

pub mod prelude {
    pub use super::algo::{
        delaunay_triangulation, ConvexClipper, DelaunayConfig, DelaunayConfigBuilder, Fracture,
        PolygonClipper, SubdivisionConfig, SubdivisionConfigBuilder, Triangulation,
    };
    pub use super::collision::{
        matches_layer, Collider, CollisionBody, CollisionEvent, CollisionHandler, CollisionInfo,
        CollisionObject, Layer, LayerMask, SweepAndPrune,
    };
    pub use super::errors::{GeodeError, GeodeResult};
    pub use super::math::{point::Point, transform::Transform, vector::Vector, FloatNum};
    pub use super::object::{Behaviour, GameObject, Movable, ObjectId};
    pub use super::query::{
        faces_away_from_reference, faces_velocity_direction, ClosestPoint, CollisionPoint,
        CollisionPoints, CollisionSurface, Intersection,
    };
    pub use super::shape::{
        BoundingBox, BoundingCircle, CenterPoint, Circle, ClosestPointQuery, ContainsPoint,
        EdgeIterable, GeometryTransformer, Points, Polygon, Polyline, RandomPoint, Rect, Segment,
        Segments, Shape, ShapeKind, Triangle,
    };
    pub use super::spawn::{Context, ContextBuilder, GameTime, ScreenInfo, SpawnArea};
}
