use crate::UNIT_COST;

/// The exclusive role a cell plays on the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Occupancy {
    #[default]
    Empty,
    Obstacle,
    Start,
    Goal,
    Path,
    Explored,
}

impl Occupancy {
    /// Path and explored markers are left behind by a search and wiped by
    /// [clear_markers](crate::pathing_grid::PathingGrid::clear_markers).
    pub fn is_marker(self) -> bool {
        matches!(self, Occupancy::Path | Occupancy::Explored)
    }
    pub fn is_endpoint(self) -> bool {
        matches!(self, Occupancy::Start | Occupancy::Goal)
    }
}

/// Terrain coexists with occupancy and only affects movement cost.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Terrain {
    #[default]
    None,
    Grass,
    Mud,
    Water,
}

impl Terrain {
    /// Cost of entering a cell of this terrain, in units of [UNIT_COST].
    pub fn cost_units(self) -> u32 {
        match self {
            Terrain::None => UNIT_COST,
            Terrain::Grass => UNIT_COST * 3 / 2,
            Terrain::Mud => UNIT_COST * 5 / 2,
            Terrain::Water => UNIT_COST * 4,
        }
    }
    /// The same cost as a multiplier of a plain step.
    pub fn multiplier(self) -> f64 {
        crate::convert_cost_to_unit_cost_float(self.cost_units())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Cell {
    pub occupancy: Occupancy,
    pub terrain: Terrain,
}

impl Cell {
    pub fn symbol(&self) -> char {
        match self.occupancy {
            Occupancy::Start => 'S',
            Occupancy::Goal => 'G',
            Occupancy::Obstacle => '#',
            Occupancy::Path => '*',
            Occupancy::Explored => 'o',
            Occupancy::Empty => match self.terrain {
                Terrain::None => '.',
                Terrain::Grass => 'g',
                Terrain::Mud => 'm',
                Terrain::Water => 'w',
            },
        }
    }
}
