use geode_macro_tools::{Builder, Fields};

use crate::collision::LayerMask;

/// Switches for the automatic work a spawn area does every tick.
#[derive(Clone, Debug, PartialEq, Fields, Builder)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[r]
#[w(set)]
pub struct Context {
    /// drop objects marked dead
    #[default = true]
    remove_dead_objects: bool,
    /// drop objects whose behaviour reports they left the bounds
    #[default = true]
    remove_objects_outside_bounds: bool,
    #[default = true]
    update_parallax: bool,
    /// used by `clear_area` requests that name no mask
    #[r(copy)]
    clear_area_default_mask: LayerMask,
}
