//! In-process field storage for coupled process kernels.
//!
//! A [`State`] holds named, multi-component [`CellField`]s over the cells of
//! one or more domain meshes. Process kernels address fields by a stable
//! [`Key`] built with [`key`], and may keep tagged working copies of a field
//! (for example, the `"subcycling"` copy of the total component
//! concentration) alongside the primary one.
//!
//! Fields are laid out with owned cells first and ghost cells after them, so
//! a loop over `0..mesh.num_owned_cells()` visits exactly the locally owned
//! portion of any field on that mesh.

mod error;
mod field;

use std::collections::HashMap;

pub use error::StateError;
pub use field::CellField;

/// Stable name of a field within a [`State`].
pub type Key = String;

/// Builds the key of `variable` on `domain`.
///
/// The default domain (empty or `"domain"`) is unprefixed; any other domain
/// prefixes the variable name with `"<domain>-"`.
///
/// ```
/// use twine_reactive_transport::support::state::key;
///
/// assert_eq!(key("domain", "molar_density_liquid"), "molar_density_liquid");
/// assert_eq!(key("surface", "molar_density_liquid"), "surface-molar_density_liquid");
/// ```
#[must_use]
pub fn key(domain: &str, variable: &str) -> Key {
    if domain.is_empty() || domain == "domain" {
        variable.to_owned()
    } else {
        format!("{domain}-{variable}")
    }
}

/// Identifies one snapshot (previous, intermediate, or next) of the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct SnapshotId(pub u32);

/// The snapshots a process kernel reads from and writes to during a step.
///
/// Kernels keep these identifiers, never references to the snapshots
/// themselves; the state for a step is passed to every call that needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateRoles {
    pub previous: SnapshotId,
    pub intermediate: SnapshotId,
    pub next: SnapshotId,
}

/// Cell counts of a domain mesh on the local partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mesh {
    owned_cells: usize,
    ghost_cells: usize,
}

impl Mesh {
    /// Creates a mesh with the given owned and ghost cell counts.
    #[must_use]
    pub fn new(owned_cells: usize, ghost_cells: usize) -> Self {
        Self {
            owned_cells,
            ghost_cells,
        }
    }

    /// Number of cells owned by the local partition.
    #[must_use]
    pub fn num_owned_cells(&self) -> usize {
        self.owned_cells
    }

    /// Number of owned plus ghost cells.
    #[must_use]
    pub fn num_cells(&self) -> usize {
        self.owned_cells + self.ghost_cells
    }
}

/// One snapshot of the simulation's field data.
#[derive(Debug, Clone, Default)]
pub struct State {
    id: SnapshotId,
    meshes: HashMap<String, Mesh>,
    fields: HashMap<Key, CellField>,
    copies: HashMap<(Key, String), CellField>,
}

impl State {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new(id: SnapshotId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Identifier of this snapshot.
    #[must_use]
    pub fn id(&self) -> SnapshotId {
        self.id
    }

    /// Registers the mesh of `domain`, replacing any previous one.
    pub fn insert_mesh(&mut self, domain: impl Into<String>, mesh: Mesh) {
        self.meshes.insert(domain.into(), mesh);
    }

    /// Returns the mesh of `domain`.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::MissingMesh`] if no mesh is registered for `domain`.
    pub fn mesh(&self, domain: &str) -> Result<&Mesh, StateError> {
        self.meshes
            .get(domain)
            .ok_or_else(|| StateError::MissingMesh {
                domain: domain.to_owned(),
            })
    }

    /// Inserts a primary field, replacing any previous field under `key`.
    pub fn insert_field(&mut self, key: impl Into<Key>, field: CellField) {
        self.fields.insert(key.into(), field);
    }

    /// Returns a primary field.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::MissingField`] if no field is stored under `key`.
    pub fn field(&self, key: &str) -> Result<&CellField, StateError> {
        self.fields.get(key).ok_or_else(|| StateError::MissingField {
            key: key.to_owned(),
        })
    }

    /// Returns a primary field for writing.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::MissingField`] if no field is stored under `key`.
    pub fn field_mut(&mut self, key: &str) -> Result<&mut CellField, StateError> {
        self.fields
            .get_mut(key)
            .ok_or_else(|| StateError::MissingField {
                key: key.to_owned(),
            })
    }

    /// Ensures a tagged copy of the primary field `key` exists.
    ///
    /// The copy is created from the primary field's current values the first
    /// time it is required and is left untouched afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::MissingField`] if the copy must be created and no
    /// primary field is stored under `key`.
    pub fn require_copy(&mut self, key: &str, tag: &str) -> Result<&mut CellField, StateError> {
        let slot = (key.to_owned(), tag.to_owned());
        if !self.copies.contains_key(&slot) {
            let primary = self.field(key)?.clone();
            self.copies.insert(slot.clone(), primary);
        }
        self.field_copy_mut(key, tag)
    }

    /// Returns the copy of `key` stored under `tag`.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::MissingCopy`] if no such copy exists.
    pub fn field_copy(&self, key: &str, tag: &str) -> Result<&CellField, StateError> {
        self.copies
            .get(&(key.to_owned(), tag.to_owned()))
            .ok_or_else(|| StateError::missing_copy(key, tag))
    }

    /// Returns the copy of `key` stored under `tag` for writing.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::MissingCopy`] if no such copy exists.
    pub fn field_copy_mut(&mut self, key: &str, tag: &str) -> Result<&mut CellField, StateError> {
        self.copies
            .get_mut(&(key.to_owned(), tag.to_owned()))
            .ok_or_else(|| StateError::missing_copy(key, tag))
    }

    /// Borrows a tagged copy for writing together with a primary field for reading.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::MissingCopy`] or [`StateError::MissingField`] if
    /// either is absent.
    pub fn copy_and_field_mut(
        &mut self,
        copy_key: &str,
        tag: &str,
        field_key: &str,
    ) -> Result<(&mut CellField, &CellField), StateError> {
        let field = self
            .fields
            .get(field_key)
            .ok_or_else(|| StateError::MissingField {
                key: field_key.to_owned(),
            })?;
        let copy = self
            .copies
            .get_mut(&(copy_key.to_owned(), tag.to_owned()))
            .ok_or_else(|| StateError::missing_copy(copy_key, tag))?;
        Ok((copy, field))
    }
}
