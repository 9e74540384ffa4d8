//! Color number to RGB.

use crate::error::Result;
use crate::types::{Cmy, Rgb};

use super::color_table::ColorTable;

/// Resolves color numbers against a [`ColorTable`].
///
/// Black is folded out of the base color, each weighted spot color is folded
/// the same way and added on top with saturation, then CMY is inverted into
/// RGB.
#[derive(Debug, Clone, Copy)]
pub struct ColorResolver<'a> {
    table: &'a ColorTable,
}

impl<'a> ColorResolver<'a> {
    pub fn new(table: &'a ColorTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'a ColorTable {
        self.table
    }

    pub fn resolve(&self, number: i32) -> Result<Rgb> {
        Ok(self.resolve_cmy(number)?.to_rgb())
    }

    /// Blended CMY before inversion.
    pub fn resolve_cmy(&self, number: i32) -> Result<Cmy> {
        let entry = self.table.entry(number)?;
        let mut cmy = entry.kcmy.remove_black();
        for (spot, &weight) in self.table.spots().iter().zip(entry.spot_weights.iter()) {
            if weight == 0 {
                continue;
            }
            cmy = cmy.saturating_add(spot.scale(weight).remove_black());
        }
        Ok(cmy)
    }
}
