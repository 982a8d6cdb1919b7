//! Goods supply helpers shared by production and goods growth.

use crate::core::ConfigError;
use crate::game::GameState;
use crate::map::{CityColor, Coordinates};
use crate::state::slots::{GOODS, GOODS_BAG};

/// Draw one random good from the bag. `None` once the bag is empty.
pub fn draw_good(state: &mut GameState) -> Result<Option<CityColor>, ConfigError> {
    let len = state.get(GOODS_BAG)?.len();
    if len == 0 {
        return Ok(None);
    }
    let index = state.rng().pick_index(len);
    state.update(GOODS_BAG, |bag| Some(bag.remove(index)))
}

/// Put a good on a city.
pub fn place_good(state: &mut GameState, city: Coordinates, good: CityColor) -> Result<(), ConfigError> {
    state.update(GOODS, |goods| goods.entry_or_default(city).push(good))
}

/// Draw a good onto `city`. Returns the good placed, if the bag had one.
pub fn supply_city(state: &mut GameState, city: Coordinates) -> Result<Option<CityColor>, ConfigError> {
    let good = draw_good(state)?;
    if let Some(good) = good {
        place_good(state, city, good)?;
    }
    Ok(good)
}
