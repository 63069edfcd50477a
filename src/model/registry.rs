//! Entity registry: descriptors looked up by URL path segment.

use crate::model::{EntityDescriptor, COMPUTER_SYSTEM, ROUTER};
use std::collections::HashMap;

#[derive(Clone, Debug)]
pub struct EntityRegistry {
    pub entities: Vec<&'static EntityDescriptor>,
    entity_by_path: HashMap<&'static str, &'static EntityDescriptor>,
}

impl EntityRegistry {
    pub fn new(entities: Vec<&'static EntityDescriptor>) -> Self {
        let entity_by_path = entities.iter().map(|e| (e.path_segment, *e)).collect();
        EntityRegistry { entities, entity_by_path }
    }

    pub fn entity_by_path(&self, path: &str) -> Option<&'static EntityDescriptor> {
        self.entity_by_path.get(path).copied()
    }
}

impl Default for EntityRegistry {
    /// Computer systems and routers.
    fn default() -> Self {
        EntityRegistry::new(vec![&COMPUTER_SYSTEM, &ROUTER])
    }
}
