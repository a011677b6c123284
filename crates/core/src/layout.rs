//! The layout document: the ordered sequence of component instances that
//! makes up one page. Order is display order and is never sorted by any
//! key. Stored as a canonical JSON array; a stored null or missing blob is
//! the empty document.

use crate::component::Component;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayoutDocument {
    components: Vec<Component>,
}

impl LayoutDocument {
    pub fn new(components: Vec<Component>) -> Self {
        LayoutDocument { components }
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Component> {
        self.components.iter()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.components.iter().position(|c| c.id == id)
    }

    /// Add a component at the end of the document.
    pub fn append(&mut self, component: Component) {
        self.components.push(component);
    }

    /// Insert directly after the component with `ref_id`; appends when the
    /// reference is absent. This is the duplication primitive: callers
    /// insert a value-equal copy with a fresh id after the original.
    pub fn insert_after(&mut self, ref_id: &str, component: Component) {
        match self.position(ref_id) {
            Some(pos) => self.components.insert(pos + 1, component),
            None => self.components.push(component),
        }
    }

    /// Move the component with `id` to `new_index`, clamped to the valid
    /// range. Preserves the multiset of ids; no-op when `id` is absent.
    pub fn move_to(&mut self, id: &str, new_index: usize) {
        let Some(pos) = self.position(id) else {
            return;
        };
        let component = self.components.remove(pos);
        let target = new_index.min(self.components.len());
        self.components.insert(target, component);
    }

    /// Remove by id; a no-op (not an error) when the id is absent.
    pub fn remove(&mut self, id: &str) {
        if let Some(pos) = self.position(id) {
            self.components.remove(pos);
        }
    }

    /// Full replacement of a component's property bag, not a merge.
    /// Callers that want a partial update merge before calling.
    pub fn replace_props(&mut self, id: &str, new_props: Value) {
        if let Some(pos) = self.position(id) {
            self.components[pos].props = new_props;
        }
    }

    /// Deserialize a stored layout blob. Absent, blank and JSON `null`
    /// blobs all mean "no components yet" and yield the empty document.
    pub fn from_stored(stored: Option<&str>) -> Result<Self> {
        let raw = match stored {
            Some(s) if !s.trim().is_empty() => s,
            _ => return Ok(LayoutDocument::default()),
        };
        let value: Value = serde_json::from_str(raw)?;
        if value.is_null() {
            return Ok(LayoutDocument::default());
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Serialize to the canonical ordered-array JSON form.
    pub fn to_stored(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.components)?)
    }
}

impl<'a> IntoIterator for &'a LayoutDocument {
    type Item = &'a Component;
    type IntoIter = std::slice::Iter<'a, Component>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.iter()
    }
}
