use std::rc::Rc;

use super::model::ScopeModel;

/// Read-only filtered view over store entries.
///
/// Holds the same model identities as the store it came from.
#[derive(Debug, Default, Clone)]
pub struct ScopeSubset {
    models: Vec<Rc<ScopeModel>>,
}

impl ScopeSubset {
    pub(super) fn new(models: Vec<Rc<ScopeModel>>) -> Self {
        Self { models }
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rc<ScopeModel>> {
        self.models.iter()
    }

    /// Scope values in store order
    pub fn values(&self) -> Vec<String> {
        self.models.iter().map(|model| model.value()).collect()
    }

    /// Whether this exact model (by identity) is part of the subset
    pub fn contains(&self, model: &Rc<ScopeModel>) -> bool {
        self.models.iter().any(|m| Rc::ptr_eq(m, model))
    }
}
