//! Session configuration: grid dimensions, the terrain cost table, whether zones are enabled and
//! the terrain colours handed through to whatever draws the grid.
use crate::error::ConfigError;
use crate::terrain_grid::Terrain;

/// Configured cost per [Terrain], indexed in [Terrain::ALL] order. Every cost is positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TerrainCosts([u32; 6]);

impl TerrainCosts {
    /// Costs in [Terrain::ALL] order. A zero cost is rejected naming its terrain.
    pub fn new(costs: [u32; 6]) -> Result<TerrainCosts, ConfigError> {
        for (terrain, cost) in Terrain::ALL.iter().zip(costs) {
            if cost == 0 {
                return Err(ConfigError::InvalidInput {
                    field: terrain.name(),
                    value: cost.to_string(),
                });
            }
        }
        Ok(TerrainCosts(costs))
    }

    /// Every terrain costs the same.
    pub fn uniform(cost: u32) -> Result<TerrainCosts, ConfigError> {
        TerrainCosts::new([cost; 6])
    }

    pub fn cost(&self, terrain: Terrain) -> u32 {
        self.0[terrain as usize]
    }
}

impl Default for TerrainCosts {
    fn default() -> TerrainCosts {
        TerrainCosts([1, 2, 3, 4, 8, 5])
    }
}

/// Display colours per [Terrain] as hex strings. Not interpreted by this crate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerrainColors(pub [String; 6]);

impl TerrainColors {
    pub fn color(&self, terrain: Terrain) -> &str {
        &self.0[terrain as usize]
    }
}

impl Default for TerrainColors {
    fn default() -> TerrainColors {
        TerrainColors(
            ["#808080", "#90EE90", "#006400", "#8B4513", "#FFC0CB", "#0000FF"]
                .map(String::from),
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    pub rows: usize,
    pub cols: usize,
    pub costs: TerrainCosts,
    pub zones_enabled: bool,
    pub colors: TerrainColors,
    /// Seed for the terrain draw. A fresh entropy seed is used when absent.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> SessionConfig {
        SessionConfig {
            rows: 15,
            cols: 15,
            costs: TerrainCosts::default(),
            zones_enabled: true,
            colors: TerrainColors::default(),
            seed: None,
        }
    }
}

/// The raw text of the bootstrap form, before validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionForm {
    pub rows: String,
    pub cols: String,
    /// Terrain costs in [Terrain::ALL] order.
    pub costs: [String; 6],
    /// `"Yes"` enables attraction and repulsion zones, anything else disables them.
    pub zones: String,
    pub colors: TerrainColors,
}

impl Default for SessionForm {
    fn default() -> SessionForm {
        SessionForm {
            rows: "15".to_owned(),
            cols: "15".to_owned(),
            costs: ["1", "2", "3", "4", "8", "5"].map(String::from),
            zones: "Yes".to_owned(),
            colors: TerrainColors::default(),
        }
    }
}

fn parse_positive(field: &'static str, value: &str) -> Result<u32, ConfigError> {
    match value.trim().parse::<u32>() {
        Ok(v) if v >= 1 => Ok(v),
        _ => Err(ConfigError::InvalidInput {
            field,
            value: value.to_owned(),
        }),
    }
}

impl SessionForm {
    /// Validates every field. Either all fields are usable or the first offending one is
    /// reported.
    pub fn submit(&self) -> Result<SessionConfig, ConfigError> {
        let rows = parse_positive("rows", &self.rows)?;
        let cols = parse_positive("columns", &self.cols)?;
        let mut costs = [0; 6];
        for (slot, (terrain, text)) in costs
            .iter_mut()
            .zip(Terrain::ALL.iter().zip(self.costs.iter()))
        {
            *slot = parse_positive(terrain.name(), text)?;
        }
        Ok(SessionConfig {
            rows: rows as usize,
            cols: cols as usize,
            costs: TerrainCosts::new(costs)?,
            zones_enabled: self.zones.trim() == "Yes",
            colors: self.colors.clone(),
            seed: None,
        })
    }
}
