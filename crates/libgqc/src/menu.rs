use std::fmt;

use crate::{catalog::RefCatalog, checkout::CheckoutTarget, config::Config};

/// One entry of the ref selection menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    /// Primary text: the ref name, or the default labels.
    pub label: String,
    /// Owning repositories, comma-separated, when known.
    pub description: Option<String>,
    /// What choosing this entry checks out.
    pub target: CheckoutTarget,
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.target, &self.description) {
            (CheckoutTarget::Default, _) => write!(f, "{} (default)", self.label),
            (_, Some(description)) => write!(f, "{} - {description}", self.label),
            (_, None) => write!(f, "{}", self.label),
        }
    }
}

/// Build the selection menu for `catalog`: the default entry first, then
/// every ref name in catalog order, each annotated with its owners.
pub fn build_menu(catalog: &RefCatalog, config: &Config) -> Vec<MenuItem> {
    let mut items = Vec::with_capacity(catalog.ref_names().len() + 1);
    items.push(MenuItem {
        label: config.default_labels().join(", "),
        description: None,
        target: CheckoutTarget::Default,
    });

    for name in catalog.ref_names() {
        let owners = catalog.owner_names(name);
        items.push(MenuItem {
            label: name.clone(),
            description: (!owners.is_empty()).then(|| owners.join(", ")),
            target: CheckoutTarget::Ref(name.clone()),
        });
    }

    items
}
