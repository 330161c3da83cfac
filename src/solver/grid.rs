//! Radial finite-volume grid builder
//!
//! The numerical (method-of-lines) solvers discretize the aquifer into a
//! ring of annular cells around the well, with cell size growing
//! geometrically from the well radius out to a far-field boundary proxy.
//!
//! # Grid Layout
//!
//! ```text
//!  face0 = r_w   face1      face2                 faceN = rb
//!    |------------|-----------|----  . . .  --------|
//!    | cell 0     |  cell 1   |                     |  undisturbed
//!    | (wellbore) |  (annulus)|        . . .        |  reservoir, h = b
//! ```
//!
//! - N + 1 interface radii from the well radius to rb with a constant
//!   logarithmic scaling factor f = 10^(log10(rb / r) / N)
//! - node radii at interface midpoints, except the well cell whose node
//!   sits at exactly r (the wellbore is the first computational cell)
//! - annulus base areas, except the well cell which uses the full disk
//!   area pi * face0^2 (areal proxy for wellbore storage volume per unit
//!   head change)
//! - per-cell storage coefficients in two flavors, Sy-based (unconfined)
//!   and S-based (confined); the well cell gets 1.0 in both, representing
//!   wellbore storage rather than aquifer storage
//!
//! The far-field radius rb = 100 * b is a deliberate fixed-head proxy for
//! "no drawdown beyond this radius", not a true infinite-domain boundary;
//! once the cone of depression reaches it the numerical curves flatten
//! below the analytical ones.

use crate::error::{PumpTestError, PumpTestResult};
use crate::physics::{AquiferProperties, WellProperties};

/// Default number of aquifer cells (well cell excluded).
pub const DEFAULT_CELLS: usize = 70;

/// Default far-field boundary radius as a multiple of saturated thickness.
pub const DEFAULT_BOUNDARY_FACTOR: f64 = 100.0;

/// Radial finite-volume grid, rebuilt fresh for every evaluation
///
/// Rebuilding is cheap next to the time integration and keeps the grid
/// consistent with whatever aquifer and well values the caller currently
/// holds; nothing is cached between evaluations.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGrid {
    /// Interface radii, length N + 1, strictly increasing from r to rb
    faces: Vec<f64>,
    /// Node radii, length N + 1 (well cell prepended at exactly r)
    nodes: Vec<f64>,
    /// Cell base areas, length N + 1 (well cell is a filled disk)
    areas: Vec<f64>,
    /// Per-cell storage, Sy flavor (well cell = 1.0)
    storage_unconfined: Vec<f64>,
    /// Per-cell storage, S flavor (well cell = 1.0)
    storage_confined: Vec<f64>,
}

impl RadialGrid {
    /// Build a grid with [`DEFAULT_CELLS`] aquifer cells and the
    /// [`DEFAULT_BOUNDARY_FACTOR`] far-field proxy.
    pub fn build(aquifer: &AquiferProperties, well: &WellProperties) -> PumpTestResult<Self> {
        Self::build_with(aquifer, well, DEFAULT_CELLS, DEFAULT_BOUNDARY_FACTOR)
    }

    /// Build a grid with explicit cell count and boundary factor.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` for `cells == 0` or a non-positive factor
    /// - `DegenerateConfiguration` when the far-field radius does not lie
    ///   beyond the well radius (the log scaling factor would be <= 1)
    pub fn build_with(
        aquifer: &AquiferProperties,
        well: &WellProperties,
        cells: usize,
        boundary_factor: f64,
    ) -> PumpTestResult<Self> {
        if cells == 0 {
            return Err(PumpTestError::invalid("cells", 0.0, "at least 1"));
        }
        if !boundary_factor.is_finite() || boundary_factor <= 0.0 {
            return Err(PumpTestError::invalid(
                "boundary_factor",
                boundary_factor,
                "strictly positive",
            ));
        }

        let r = well.r();
        let rb = boundary_factor * aquifer.b();
        if rb <= r {
            return Err(PumpTestError::DegenerateConfiguration(format!(
                "far-field radius {} does not enclose the well radius {}; \
                 increase the boundary factor or the saturated thickness",
                rb, r
            )));
        }

        // Interface radii r * f^i with f = 10^(log10(rb/r)/N); the last
        // face is written as rb directly so the boundary lands exactly.
        let f = 10f64.powf((rb / r).log10() / cells as f64);
        let mut faces = Vec::with_capacity(cells + 1);
        faces.push(r);
        for i in 1..cells {
            faces.push(r * f.powi(i as i32));
        }
        faces.push(rb);

        // Node radii: well cell at exactly r, then interface midpoints.
        let mut nodes = Vec::with_capacity(cells + 1);
        nodes.push(r);
        for pair in faces.windows(2) {
            nodes.push(0.5 * (pair[0] + pair[1]));
        }

        // Base areas: filled disk for the wellbore, annuli for the rest.
        let mut areas = Vec::with_capacity(cells + 1);
        areas.push(std::f64::consts::PI * faces[0] * faces[0]);
        for pair in faces.windows(2) {
            areas.push(std::f64::consts::PI * (pair[1] * pair[1] - pair[0] * pair[0]));
        }

        // Storage coefficients; index 0 is the wellbore (coefficient 1.0:
        // a unit head change stores one unit volume per unit area).
        let mut storage_unconfined = vec![aquifer.sy(); cells + 1];
        let mut storage_confined = vec![aquifer.s(); cells + 1];
        storage_unconfined[0] = 1.0;
        storage_confined[0] = 1.0;

        Ok(Self {
            faces,
            nodes,
            areas,
            storage_unconfined,
            storage_confined,
        })
    }

    /// Number of cells including the wellbore cell (N + 1)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the grid holds no cells (never the case for a built grid)
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Interface radii (length N + 1)
    pub fn faces(&self) -> &[f64] {
        &self.faces
    }

    /// Node radii (length N + 1, well cell first)
    pub fn nodes(&self) -> &[f64] {
        &self.nodes
    }

    /// Cell base areas (length N + 1)
    pub fn areas(&self) -> &[f64] {
        &self.areas
    }

    /// Sy-flavor storage coefficients (length N + 1, well cell 1.0)
    pub fn storage_unconfined(&self) -> &[f64] {
        &self.storage_unconfined
    }

    /// S-flavor storage coefficients (length N + 1, well cell 1.0)
    pub fn storage_confined(&self) -> &[f64] {
        &self.storage_confined
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn reference() -> (AquiferProperties, WellProperties) {
        let aquifer = AquiferProperties::new(10.0, 1e-4, 0.2, 20.0, 0.0, 0.0, 0.0).unwrap();
        let well = WellProperties::new(0.5, -500.0, 0.01, 1000.0).unwrap();
        (aquifer, well)
    }

    #[test]
    fn test_grid_shape() {
        let (aquifer, well) = reference();
        let grid = RadialGrid::build(&aquifer, &well).unwrap();

        assert_eq!(grid.len(), DEFAULT_CELLS + 1);
        assert_eq!(grid.faces().len(), DEFAULT_CELLS + 1);
        assert_eq!(grid.nodes().len(), DEFAULT_CELLS + 1);
        assert_eq!(grid.areas().len(), DEFAULT_CELLS + 1);
        assert_eq!(grid.storage_unconfined().len(), DEFAULT_CELLS + 1);
        assert_eq!(grid.storage_confined().len(), DEFAULT_CELLS + 1);
    }

    #[test]
    fn test_grid_spans_well_to_far_field_exactly() {
        let (aquifer, well) = reference();
        let grid = RadialGrid::build(&aquifer, &well).unwrap();

        assert_eq!(grid.faces()[0], well.r());
        assert_eq!(*grid.faces().last().unwrap(), 100.0 * aquifer.b());
    }

    #[test]
    fn test_faces_strictly_increasing_with_constant_log_factor() {
        let (aquifer, well) = reference();
        let grid = RadialGrid::build(&aquifer, &well).unwrap();
        let faces = grid.faces();

        let f = faces[1] / faces[0];
        assert!(f > 1.0);
        for pair in faces.windows(2) {
            assert!(pair[1] > pair[0]);
            assert_relative_eq!(pair[1] / pair[0], f, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_well_cell_node_and_area() {
        let (aquifer, well) = reference();
        let grid = RadialGrid::build(&aquifer, &well).unwrap();

        // Node overridden to exactly r, not a midpoint.
        assert_eq!(grid.nodes()[0], well.r());

        // Filled disk, not an annulus.
        let disk = std::f64::consts::PI * well.r() * well.r();
        assert_relative_eq!(grid.areas()[0], disk);

        // Remaining nodes are interface midpoints.
        let faces = grid.faces();
        assert_relative_eq!(grid.nodes()[1], 0.5 * (faces[0] + faces[1]));
    }

    #[test]
    fn test_areas_positive_and_annular() {
        let (aquifer, well) = reference();
        let grid = RadialGrid::build(&aquifer, &well).unwrap();
        let faces = grid.faces();

        for (i, &area) in grid.areas().iter().enumerate() {
            assert!(area > 0.0, "area {} must be positive", i);
        }
        // Spot-check one annulus.
        let expected = std::f64::consts::PI * (faces[3] * faces[3] - faces[2] * faces[2]);
        assert_relative_eq!(grid.areas()[3], expected);
    }

    #[test]
    fn test_storage_flavors() {
        let (aquifer, well) = reference();
        let grid = RadialGrid::build(&aquifer, &well).unwrap();

        assert_eq!(grid.storage_unconfined()[0], 1.0);
        assert_eq!(grid.storage_confined()[0], 1.0);
        for i in 1..grid.len() {
            assert_eq!(grid.storage_unconfined()[i], aquifer.sy());
            assert_eq!(grid.storage_confined()[i], aquifer.s());
        }
    }

    #[test]
    fn test_degenerate_boundary_is_rejected() {
        let aquifer = AquiferProperties::new(10.0, 1e-4, 0.2, 0.001, 0.0, 0.0, 0.0).unwrap();
        // rb = 100 * 0.001 = 0.1 < r = 0.5: no valid log scaling factor.
        let well = WellProperties::new(0.5, -500.0, 0.01, 1000.0).unwrap();

        let result = RadialGrid::build(&aquifer, &well);
        assert!(matches!(
            result,
            Err(PumpTestError::DegenerateConfiguration(_))
        ));
    }

    #[test]
    fn test_zero_cells_rejected() {
        let (aquifer, well) = reference();
        assert!(RadialGrid::build_with(&aquifer, &well, 0, 100.0).is_err());
    }

    #[test]
    fn test_custom_boundary_factor() {
        let (aquifer, well) = reference();
        let grid = RadialGrid::build_with(&aquifer, &well, 40, 50.0).unwrap();

        assert_eq!(grid.len(), 41);
        assert_eq!(*grid.faces().last().unwrap(), 50.0 * aquifer.b());
    }
}
