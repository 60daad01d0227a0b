//! The spawn area: owns game objects sorted into layers, drives their
//! updates and removes them when they die or leave the bounds.

mod context;
mod hooks;
mod time;

use std::collections::BTreeMap;

use log::{debug, trace, warn};

use crate::{
    collision::{CollisionBody, CollisionEvent, CollisionHandler, Layer, LayerMask},
    errors::GeodeResult,
    object::{GameObject, ObjectId, ObjectStore},
    shape::{ContainsPoint, Rect, Shape},
};

use self::hooks::CallbackHook;

pub use context::{Context, ContextBuilder};
pub use time::{GameTime, ScreenInfo};

/// Container of game objects.
///
/// Every stored object is listed in exactly one layer, the one it reports,
/// and its collidable, if any, is registered with the collision handler
/// until the object is removed.
pub struct SpawnArea<D = ()> {
    layers: BTreeMap<Layer, Vec<ObjectId>>,
    store: ObjectStore<D>,
    bounds: Rect,
    handler: Option<Box<dyn CollisionHandler>>,
    pending_clear_area: Option<(Rect, LayerMask)>,
    draw_to_game: Vec<ObjectId>,
    draw_to_ui: Vec<ObjectId>,
    context: Context,
    despawn_hook: CallbackHook<ObjectId>,
    collision_hook: CallbackHook<CollisionEvent>,
    frame_count: u64,
}

impl<D> SpawnArea<D> {
    pub fn new(bounds: Rect) -> Self {
        Self {
            layers: BTreeMap::new(),
            store: ObjectStore::new(),
            bounds,
            handler: None,
            pending_clear_area: None,
            draw_to_game: Vec::new(),
            draw_to_ui: Vec::new(),
            context: Context::default(),
            despawn_hook: CallbackHook::default(),
            collision_hook: CallbackHook::default(),
            frame_count: 0,
        }
    }

    pub fn with_handler(mut self, handler: impl CollisionHandler + 'static) -> Self {
        self.set_handler(handler);
        self
    }

    pub fn with_context(mut self, context: impl Into<Context>) -> Self {
        self.context = context.into();
        self
    }

    /// swap the collision handler, collidables already stored are registered with it
    pub fn set_handler(&mut self, handler: impl CollisionHandler + 'static) {
        let mut handler: Box<dyn CollisionHandler> = Box::new(handler);
        for object in self.store.iter().filter(|o| o.collidable().is_some()) {
            handler.register(object.id());
        }
        self.handler = Some(handler);
    }

    pub fn handler(&self) -> Option<&dyn CollisionHandler> {
        self.handler.as_deref()
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn object_count(&self) -> usize {
        self.store.len()
    }

    pub fn has_object(&self, id: ObjectId) -> bool {
        self.store.contains(id)
    }

    pub fn object(&self, id: ObjectId) -> Option<&GameObject<D>> {
        self.store.get(id)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut GameObject<D>> {
        self.store.get_mut(id)
    }

    pub fn objects(&self) -> impl Iterator<Item = &GameObject<D>> {
        self.store.iter()
    }

    pub fn layers(&self) -> impl Iterator<Item = Layer> + '_ {
        self.layers.keys().copied()
    }

    /// ids of `layer` in insertion order, empty for unknown layers
    pub fn objects_in_layer(&self, layer: Layer) -> &[ObjectId] {
        self.layers
            .get(&layer)
            .map(|ids| ids.as_slice())
            .unwrap_or_default()
    }

    /// objects flagged for the game surface after the last tick
    pub fn draw_to_game(&self) -> &[ObjectId] {
        &self.draw_to_game
    }

    pub fn draw_to_ui(&self) -> &[ObjectId] {
        &self.draw_to_ui
    }

    pub fn register_despawn_callback<F>(&mut self, callback: F) -> u32
    where
        F: FnMut(&ObjectId) + 'static,
    {
        self.despawn_hook.register_callback(callback)
    }

    pub fn unregister_despawn_callback(&mut self, callback_id: u32) -> bool {
        self.despawn_hook.unregister_callback(callback_id)
    }

    /// called for every collision event before the addressed object sees it
    pub fn register_collision_callback<F>(&mut self, callback: F) -> u32
    where
        F: FnMut(&CollisionEvent) + 'static,
    {
        self.collision_hook.register_callback(callback)
    }

    pub fn unregister_collision_callback(&mut self, callback_id: u32) -> bool {
        self.collision_hook.unregister_callback(callback_id)
    }

    pub fn callback_count(&self) -> usize {
        self.despawn_hook.len() + self.collision_hook.len()
    }

    pub fn add_object(&mut self, object: GameObject<D>) -> ObjectId {
        let id = object.id();
        let layer = object.layer();
        let collidable = object.collidable().is_some();

        if !self.store.insert(object) {
            warn!("object {} is already in the spawn area", id);
            return id;
        }
        self.layers.entry(layer).or_default().push(id);

        if collidable {
            if let Some(handler) = self.handler.as_mut() {
                handler.register(id);
            }
        }

        debug!("object {} spawned on layer {}", id, layer);
        id
    }

    /// Deregister from the collision handler, run the despawn hooks and drop
    /// the object. False when the object is not listed in its layer.
    pub fn remove_object(&mut self, id: ObjectId) -> bool {
        let Some(layer) = self.store.get(id).map(|o| o.layer()) else {
            return false;
        };
        let Some(ids) = self.layers.get_mut(&layer) else {
            return false;
        };
        let Some(index) = ids.iter().position(|&other| other == id) else {
            return false;
        };
        ids.remove(index);

        let Some(mut object) = self.store.remove(id) else {
            return false;
        };

        if object.collidable().is_some() {
            if let Some(handler) = self.handler.as_mut() {
                handler.deregister(id);
            }
        }

        object.despawn();
        self.despawn_hook.emit(&id);
        debug!("object {} despawned from layer {}", id, layer);
        true
    }

    /// remove every object matching `predicate`, returns how many went
    pub fn remove_objects(&mut self, mut predicate: impl FnMut(&GameObject<D>) -> bool) -> usize {
        let ids: Vec<ObjectId> = self
            .store
            .iter()
            .filter(|o| predicate(o))
            .map(|o| o.id())
            .collect();
        ids.into_iter().filter(|&id| self.remove_object(id)).count()
    }

    /// false when the layer does not exist
    pub fn clear_layer(&mut self, layer: Layer) -> bool {
        let Some(ids) = self.layers.get(&layer).cloned() else {
            return false;
        };
        for id in ids.into_iter().rev() {
            self.remove_object(id);
        }
        debug!("layer {} cleared", layer);
        true
    }

    /// remove every object, layers stay
    pub fn clear(&mut self) {
        let layers: Vec<Layer> = self.layers.keys().copied().collect();
        for layer in layers {
            self.clear_layer(layer);
        }
    }

    /// Move an object to another layer. False when it is not stored.
    pub fn move_to_layer(&mut self, id: ObjectId, layer: Layer) -> bool {
        let Some(object) = self.store.get_mut(id) else {
            return false;
        };
        let previous = object.layer();
        if previous == layer {
            return true;
        }
        object.set_layer(layer);

        if let Some(ids) = self.layers.get_mut(&previous) {
            ids.retain(|&other| other != id);
        }
        self.layers.entry(layer).or_default().push(id);
        true
    }

    /// Schedule removal of the objects overlapping `area` on the next tick.
    /// Without a mask the context's default mask applies, an empty mask
    /// matches every layer.
    pub fn clear_area(&mut self, area: Rect, mask: Option<LayerMask>) {
        let mask = mask.unwrap_or(self.context.clear_area_default_mask());
        self.pending_clear_area = Some((area, mask));
    }

    /// ids of objects with an active collider overlapping `shape` on layers `mask` matches
    pub fn objects_overlapping(&self, shape: &Shape, mask: LayerMask) -> Vec<ObjectId> {
        self.layers
            .iter()
            .filter(|(layer, _)| mask.matches_layer(**layer))
            .flat_map(|(_, ids)| ids.iter())
            .filter_map(|&id| self.store.get(id))
            .filter(|o| {
                o.collidable()
                    .as_ref()
                    .map_or(false, |c| c.overlap_shape(shape))
            })
            .map(|o| o.id())
            .collect()
    }

    fn overlaps_area(object: &GameObject<D>, area: &Rect) -> bool {
        match object.bounding_box() {
            Some(bbox) => bbox.overlap_rect(area),
            None => area.contains_point(&object.transform().position()),
        }
    }

    fn process_clear_area(&mut self) {
        let Some((area, mask)) = self.pending_clear_area.take() else {
            return;
        };
        if !area.overlap_rect(&self.bounds) {
            warn!("clear area {:?} lies outside the spawn area, ignored", area);
            return;
        }

        let doomed: Vec<ObjectId> = self
            .layers
            .iter()
            .filter(|(layer, _)| mask.matches_layer(**layer))
            .flat_map(|(_, ids)| ids.iter().copied())
            .filter(|&id| {
                self.store
                    .get(id)
                    .map_or(false, |o| Self::overlaps_area(o, &area))
            })
            .collect();

        debug!("clear area removes {} objects", doomed.len());
        for id in doomed {
            self.remove_object(id);
        }
    }

    /// Check collider ownership of every collidable, then let the handler
    /// find this tick's collisions and deliver the events.
    fn resolve_collisions(&mut self) -> GeodeResult<()> {
        for object in self.store.iter() {
            if let Some(collidable) = object.collidable() {
                collidable.check_consistency()?;
            }
        }

        let Some(handler) = self.handler.as_mut() else {
            return Ok(());
        };

        let events = {
            let bodies: Vec<CollisionBody<'_>> = self
                .store
                .iter()
                .filter_map(|object| {
                    object.collidable().as_ref().map(|collidable| {
                        CollisionBody::new(
                            collidable,
                            object.velocity(),
                            object.transform().position(),
                        )
                    })
                })
                .collect();
            handler.update(&bodies)?
        };

        for event in events.iter() {
            self.collision_hook.emit(event);
            if let Some(object) = self.store.get_mut(event.object()) {
                object.handle_collision_event(event);
            }
        }
        Ok(())
    }

    /// Advance one frame.
    ///
    /// Collisions are resolved first, an ownership violation found there
    /// aborts the tick. Then the pending clear area is applied and every
    /// layer is updated back to front, removing objects that died or left
    /// the bounds right after their own update.
    pub fn tick(&mut self, time: &GameTime, screen: &ScreenInfo) -> GeodeResult<()> {
        self.resolve_collisions()?;

        self.draw_to_game.clear();
        self.draw_to_ui.clear();

        self.process_clear_area();

        let layers: Vec<Layer> = self.layers.keys().copied().collect();
        for layer in layers {
            let game_start = self.draw_to_game.len();
            let ui_start = self.draw_to_ui.len();

            let len = self.objects_in_layer(layer).len();
            for index in (0..len).rev() {
                let Some(&id) = self.layers.get(&layer).and_then(|ids| ids.get(index)) else {
                    continue;
                };
                let Some(object) = self.store.get_mut(id) else {
                    continue;
                };

                if self.context.update_parallax() {
                    object.update_parallax(screen);
                }
                object.update(time, screen);

                let dead = self.context.remove_dead_objects() && object.is_dead();
                let left = self.context.remove_objects_outside_bounds()
                    && object.has_left_bounds(&self.bounds);
                if dead || left {
                    trace!("object {} removed, dead: {}, left bounds: {}", id, dead, left);
                    self.remove_object(id);
                    continue;
                }

                if object.draw_to_game() {
                    self.draw_to_game.push(id);
                }
                if object.draw_to_ui() {
                    self.draw_to_ui.push(id);
                }
            }

            self.draw_to_game[game_start..].reverse();
            self.draw_to_ui[ui_start..].reverse();
        }

        self.frame_count += 1;
        trace!(
            "frame {} done with {} objects",
            self.frame_count,
            self.store.len()
        );
        Ok(())
    }
}
