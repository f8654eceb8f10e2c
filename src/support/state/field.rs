/// A multi-component array over the cells of one mesh.
///
/// Every component has the same length (owned plus ghost cells). Component
/// storage is allocated once at construction; none of the methods here
/// reallocate it.
#[derive(Debug, Clone, PartialEq)]
pub struct CellField {
    components: Vec<Vec<f64>>,
}

impl CellField {
    /// Creates a zero-filled field with the given shape.
    #[must_use]
    pub fn zeros(num_components: usize, num_cells: usize) -> Self {
        Self {
            components: vec![vec![0.0; num_cells]; num_components],
        }
    }

    /// Creates a zero-filled field with the same shape as `other`.
    #[must_use]
    pub fn zeros_like(other: &Self) -> Self {
        Self::zeros(other.num_components(), other.num_cells())
    }

    /// Creates a field from per-component cell values.
    ///
    /// # Panics
    ///
    /// Panics if the components do not all have the same length.
    #[must_use]
    pub fn from_components(components: Vec<Vec<f64>>) -> Self {
        if let Some(first) = components.first() {
            assert!(
                components.iter().all(|c| c.len() == first.len()),
                "all components of a cell field must have the same length"
            );
        }
        Self { components }
    }

    /// Number of components.
    #[must_use]
    pub fn num_components(&self) -> usize {
        self.components.len()
    }

    /// Number of cells (owned plus ghost) per component.
    #[must_use]
    pub fn num_cells(&self) -> usize {
        self.components.first().map_or(0, Vec::len)
    }

    /// Returns `(num_components, num_cells)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.num_components(), self.num_cells())
    }

    /// Cell values of component `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn component(&self, index: usize) -> &[f64] {
        &self.components[index]
    }

    /// Mutable cell values of component `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn component_mut(&mut self, index: usize) -> &mut [f64] {
        &mut self.components[index]
    }
}
