//! The per-parse resource cache: `(tag, position) -> Rc<Resource>`.

use crate::resources::ResourceBody;
use crate::OSType;
use std::collections::HashMap;
use std::rc::Rc;

/// A resolved chunk: its identity (`tag`, `position`, `size`) plus its
/// interpreted body.
#[derive(Debug)]
pub struct Resource {
    pub tag: OSType,
    pub position: u32,
    pub size: u32,
    pub body: ResourceBody,
}

/// Memoizes resolved resources for the lifetime of one archive parse.
///
/// Two lookups of the same `(tag, position)` key return clones of the same
/// `Rc`, so `Rc::ptr_eq` on two results proves they resolved to the same
/// underlying resource.
#[derive(Debug, Default)]
pub struct ResourceCache {
    entries: HashMap<(OSType, u32), Rc<Resource>>,
}

impl ResourceCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, tag: OSType, position: u32) -> Option<Rc<Resource>> {
        self.entries.get(&(tag, position)).cloned()
    }

    pub fn insert(&mut self, resource: Resource) -> Rc<Resource> {
        let key = (resource.tag, resource.position);
        let resource = Rc::new(resource);
        self.entries.insert(key, resource.clone());
        resource
    }
}
