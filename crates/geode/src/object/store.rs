use std::collections::BTreeMap;

use super::{GameObject, ObjectId};

/// Index stable arena of game objects.
///
/// Slots of removed objects are reused, ids are not: a removed id never
/// resolves again.
pub struct ObjectStore<D> {
    slots: Vec<Option<GameObject<D>>>,
    index: BTreeMap<ObjectId, usize>,
    free: Vec<usize>,
}

impl<D> Default for ObjectStore<D> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            index: BTreeMap::new(),
            free: Vec::new(),
        }
    }
}

impl<D> ObjectStore<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Default::default()
        }
    }

    /// false when an object with the same id is already stored
    pub fn insert(&mut self, object: GameObject<D>) -> bool {
        let id = object.id();
        if self.index.contains_key(&id) {
            return false;
        }

        let slot = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(object);
                slot
            }
            None => {
                self.slots.push(Some(object));
                self.slots.len() - 1
            }
        };
        self.index.insert(id, slot);
        true
    }

    pub fn remove(&mut self, id: ObjectId) -> Option<GameObject<D>> {
        let slot = self.index.remove(&id)?;
        self.free.push(slot);
        self.slots[slot].take()
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn get(&self, id: ObjectId) -> Option<&GameObject<D>> {
        let slot = *self.index.get(&id)?;
        self.slots[slot].as_ref()
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut GameObject<D>> {
        let slot = *self.index.get(&id)?;
        self.slots[slot].as_mut()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// in slot order
    pub fn iter(&self) -> impl Iterator<Item = &GameObject<D>> {
        self.slots.iter().flatten()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut GameObject<D>> {
        self.slots.iter_mut().flatten()
    }

    /// in increasing id order
    pub fn ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.index.keys().copied()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.index.clear();
        self.free.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_are_reused_ids_are_not() {
        let mut store = ObjectStore::new();
        let a = GameObject::new(0, "a");
        let b = GameObject::new(0, "b");
        let (a_id, b_id) = (a.id(), b.id());

        assert!(store.insert(a));
        assert!(store.insert(b));
        assert_eq!(store.len(), 2);

        let removed = store.remove(a_id).unwrap();
        assert_eq!(*removed.data(), "a");
        assert!(store.remove(a_id).is_none());
        assert!(store.get(a_id).is_none());

        let c = GameObject::new(0, "c");
        let c_id = c.id();
        store.insert(c);
        assert_ne!(c_id, a_id);
        assert_eq!(store.slots.len(), 2);
        assert_eq!(*store.get(c_id).unwrap().data(), "c");
        assert_eq!(store.get_mut(b_id).map(|o| *o.data()), Some("b"));
        assert_eq!(store.ids().collect::<Vec<_>>(), vec![b_id, c_id]);
    }

    #[test]
    fn test_clear() {
        let mut store = ObjectStore::with_capacity(4);
        store.insert(GameObject::new(1, ()));
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.iter().count(), 0);
    }
}
