//! Store slice registry.
//!
//! Slices own their entities and mutations; the registry only republishes each slice's
//! declared bindings (entities, actions, selectors) under one flat namespace and hands
//! out shared handles to the slices themselves. A binding name may be contributed by
//! exactly one slice: [`RegistryBuilder::build`] refuses to produce a registry when two
//! slices collide, and [`exports_are_unique`] lets a crate with a fixed slice list assert
//! the same thing at compile time.

use fxhash::FxHashMap;
use std::any::{Any, TypeId};
use std::borrow::Cow;
use std::fmt::{self, Debug};
use std::sync::Arc;
use tracing::{debug, info};

/// Errors raised while composing the registry.
#[dbm_derive::dbm_error]
pub enum RegistryError {
    /// Two slices (or one slice twice) declare the same binding name.
    #[error("Binding `{binding}` is exported by both `{first}` and `{second}`{}", format_context(.context))]
    Collision {
        binding: &'static str,
        first: &'static str,
        second: &'static str,
        context: Option<Cow<'static, str>>,
    },

    /// The same slice was registered more than once.
    #[error("Slice `{slice}` is registered more than once{}", format_context(.context))]
    DuplicateSlice { slice: &'static str, context: Option<Cow<'static, str>> },

    /// A slice declared an export that cannot be addressed.
    #[error("Invalid export in slice `{slice}`{}: {message}", format_context(.context))]
    InvalidExport {
        slice: &'static str,
        message: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },
}

/// What a binding refers to inside its slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportKind {
    /// A data type owned by the slice.
    Entity,
    /// An operation that mutates slice state.
    Action,
    /// A read-only query over slice state.
    Selector,
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Entity => "entity",
            Self::Action => "action",
            Self::Selector => "selector",
        })
    }
}

/// A public name contributed by a slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Export {
    pub name: &'static str,
    pub kind: ExportKind,
}

impl Export {
    #[must_use]
    pub const fn entity(name: &'static str) -> Self {
        Self { name, kind: ExportKind::Entity }
    }

    #[must_use]
    pub const fn action(name: &'static str) -> Self {
        Self { name, kind: ExportKind::Action }
    }

    #[must_use]
    pub const fn selector(name: &'static str) -> Self {
        Self { name, kind: ExportKind::Selector }
    }
}

/// Shared state of an independently-developed domain slice.
pub trait StoreSlice: Any + Debug + Send + Sync {
    /// Slice name, unique across the registry.
    fn name(&self) -> &'static str;

    /// Bindings the slice contributes to the registry namespace.
    fn exports(&self) -> &'static [Export];

    /// Helper to allow downcasting from the trait object.
    fn as_any(&self) -> &dyn Any;
}

/// A container for an initialized slice.
#[derive(Debug, Clone)]
pub struct InitializedSlice {
    pub id: TypeId,
    pub name: &'static str,
    pub state: Arc<dyn StoreSlice>,
}

impl InitializedSlice {
    /// Create a new initialized slice from a concrete state.
    pub fn new<T: StoreSlice>(state: T) -> Self {
        Self { id: TypeId::of::<T>(), name: state.name(), state: Arc::new(state) }
    }
}

/// A resolved binding: the export plus the slice that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Binding {
    pub name: &'static str,
    pub kind: ExportKind,
    pub slice: &'static str,
}

/// Collects slices in registration order before validation.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    slices: Vec<InitializedSlice>,
}

impl RegistryBuilder {
    #[must_use]
    pub fn register(mut self, slice: InitializedSlice) -> Self {
        self.slices.push(slice);
        self
    }

    /// Validates every declared export and builds the namespace.
    ///
    /// # Errors
    /// - [`RegistryError::DuplicateSlice`] if a slice type or slice name appears twice.
    /// - [`RegistryError::InvalidExport`] for an empty binding name.
    /// - [`RegistryError::Collision`] on the first binding name declared twice.
    pub fn build(self) -> Result<Registry> {
        let mut by_type = FxHashMap::default();
        let mut by_name = FxHashMap::default();
        let mut bindings: FxHashMap<&'static str, Binding> = FxHashMap::default();

        for (index, slice) in self.slices.iter().enumerate() {
            if by_type.insert(slice.id, index).is_some() || by_name.insert(slice.name, index).is_some()
            {
                return Err(RegistryError::DuplicateSlice { slice: slice.name, context: None });
            }

            for export in slice.state.exports() {
                if export.name.trim().is_empty() {
                    return Err(RegistryError::InvalidExport {
                        slice: slice.name,
                        message: format!("empty {} name", export.kind).into(),
                        context: None,
                    });
                }

                let binding = Binding { name: export.name, kind: export.kind, slice: slice.name };
                if let Some(existing) = bindings.insert(export.name, binding) {
                    return Err(RegistryError::Collision {
                        binding: export.name,
                        first: existing.slice,
                        second: slice.name,
                        context: None,
                    });
                }
            }

            debug!(slice = slice.name, exports = slice.state.exports().len(), "Slice registered");
        }

        info!(slices = self.slices.len(), bindings = bindings.len(), "Store registry built");

        Ok(Registry { slices: self.slices, by_type, by_name, bindings })
    }
}

/// The composed, immutable namespace over every registered slice.
pub struct Registry {
    slices: Vec<InitializedSlice>,
    by_type: FxHashMap<TypeId, usize>,
    by_name: FxHashMap<&'static str, usize>,
    bindings: FxHashMap<&'static str, Binding>,
}

impl Registry {
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Finds which slice owns `name`.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<Binding> {
        self.bindings.get(name).copied()
    }

    /// Typed access to a registered slice.
    #[must_use]
    pub fn slice<T: StoreSlice>(&self) -> Option<&T> {
        let index = *self.by_type.get(&TypeId::of::<T>())?;
        self.slices[index].state.as_any().downcast_ref::<T>()
    }

    #[must_use]
    pub fn slice_by_name(&self, name: &str) -> Option<&dyn StoreSlice> {
        let index = *self.by_name.get(name)?;
        Some(self.slices[index].state.as_ref())
    }

    /// Every binding name, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.bindings.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Every binding, sorted by name.
    #[must_use]
    pub fn bindings(&self) -> Vec<Binding> {
        let mut bindings: Vec<_> = self.bindings.values().copied().collect();
        bindings.sort_unstable_by_key(|b| b.name);
        bindings
    }

    /// Registered slices in registration order.
    pub fn slices(&self) -> impl Iterator<Item = &dyn StoreSlice> {
        self.slices.iter().map(|s| s.state.as_ref())
    }

    /// Number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }
}

impl Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("slices", &self.slices.iter().map(|s| s.name).collect::<Vec<_>>())
            .field("bindings", &self.bindings.len())
            .finish()
    }
}

/// Compile-time check that no binding name repeats across a fixed list of slices.
///
/// ```rust
/// use dbm_kernel::registry::{Export, exports_are_unique};
///
/// const A: &[Export] = &[Export::action("load")];
/// const B: &[Export] = &[Export::action("save")];
/// const _: () = assert!(exports_are_unique(&[A, B]));
/// ```
#[must_use]
pub const fn exports_are_unique(groups: &[&[Export]]) -> bool {
    let mut g = 0;
    while g < groups.len() {
        let mut i = 0;
        while i < groups[g].len() {
            let name = groups[g][i].name;

            // Compare against every later export, within this group and the following ones.
            let mut h = g;
            let mut j = i + 1;
            while h < groups.len() {
                while j < groups[h].len() {
                    if str_eq(name, groups[h][j].name) {
                        return false;
                    }
                    j += 1;
                }
                h += 1;
                j = 0;
            }
            i += 1;
        }
        g += 1;
    }
    true
}

const fn str_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn const_uniqueness_check() {
        const A: &[Export] = &[Export::entity("Instance"), Export::action("load")];
        const B: &[Export] = &[Export::selector("list")];
        const C: &[Export] = &[Export::action("load")];

        assert!(exports_are_unique(&[A, B]));
        assert!(!exports_are_unique(&[A, B, C]));
        assert!(!exports_are_unique(&[&[Export::action("x"), Export::selector("x")]]));
        assert!(exports_are_unique(&[]));
    }

    #[test]
    fn str_eq_compares_bytes() {
        assert!(str_eq("load", "load"));
        assert!(!str_eq("load", "loads"));
        assert!(!str_eq("load", "Load"));
    }

    #[test]
    fn export_kinds_display() {
        assert_eq!(ExportKind::Selector.to_string(), "selector");
        assert_eq!(format!("{:<8}|", ExportKind::Action), "action  |");
        assert_eq!(Export::action("run").kind, ExportKind::Action);
    }
}
