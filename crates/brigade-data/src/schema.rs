//! Serde data-file structs for kitchen content definitions.
//!
//! These structs define the on-disk format for items, recipes, orders, and
//! match tuning. They are deserialized from RON, JSON, or TOML data files
//! and then resolved into core types by the loader.

use brigade_core::fixed::{Fixed64, Seconds};
use brigade_core::kitchen::KitchenConfig;
use serde::Deserialize;

/// Convert data-file seconds (f64 at load time only) into sim seconds.
pub fn seconds(v: f64) -> Seconds {
    Fixed64::from_num(v)
}

// ===========================================================================
// Items
// ===========================================================================

/// An item type definition in a data file. Presence of `plate_allowed`
/// makes the type a plate.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemData {
    pub name: String,
    #[serde(default)]
    pub plate_allowed: Option<Vec<String>>,
}

// ===========================================================================
// Recipes
// ===========================================================================

/// A cutting recipe in a data file.
#[derive(Debug, Clone, Deserialize)]
pub struct CutRecipeData {
    pub input: String,
    pub output: String,
    pub chops: u32,
}

/// A timed stove recipe in a data file (cook or burn table).
#[derive(Debug, Clone, Deserialize)]
pub struct TimedRecipeData {
    pub input: String,
    pub output: String,
    pub seconds: f64,
}

/// The `recipes` file: three tables, each optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipesData {
    #[serde(default)]
    pub cut: Vec<CutRecipeData>,
    #[serde(default)]
    pub cook: Vec<TimedRecipeData>,
    #[serde(default)]
    pub burn: Vec<TimedRecipeData>,
}

// ===========================================================================
// Orders
// ===========================================================================

/// A named order in a data file.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderData {
    pub name: String,
    pub ingredients: Vec<String>,
}

// ===========================================================================
// Match tuning
// ===========================================================================

/// The optional `kitchen` file. Every field defaults to the reference
/// kitchen's tuning.
#[derive(Debug, Clone, Deserialize)]
pub struct KitchenData {
    #[serde(default = "default_countdown")]
    pub countdown_seconds: f64,
    #[serde(default = "default_match_seconds")]
    pub match_seconds: f64,
    #[serde(default = "default_period")]
    pub order_spawn_period: f64,
    #[serde(default = "default_cap")]
    pub max_waiting_orders: usize,
    #[serde(default = "default_period")]
    pub plate_spawn_period: f64,
    #[serde(default = "default_cap_u32")]
    pub max_stocked_plates: u32,
    #[serde(default)]
    pub rng_seed: u64,
}

fn default_countdown() -> f64 {
    3.0
}
fn default_match_seconds() -> f64 {
    100.0
}
fn default_period() -> f64 {
    4.0
}
fn default_cap() -> usize {
    4
}
fn default_cap_u32() -> u32 {
    4
}

impl KitchenData {
    /// Resolve into the core config, keeping defaults for everything the
    /// data file does not cover (actor tuning, command history).
    pub fn into_config(self) -> KitchenConfig {
        KitchenConfig {
            countdown_seconds: seconds(self.countdown_seconds),
            match_seconds: seconds(self.match_seconds),
            order_spawn_period: seconds(self.order_spawn_period),
            max_waiting_orders: self.max_waiting_orders,
            plate_spawn_period: seconds(self.plate_spawn_period),
            max_stocked_plates: self.max_stocked_plates,
            rng_seed: self.rng_seed,
            ..KitchenConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_data_ron_short_form() {
        let item: ItemData = ron::from_str(r#"(name: "tomato")"#).unwrap();
        assert_eq!(item.name, "tomato");
        assert!(item.plate_allowed.is_none());
    }

    #[test]
    fn item_data_ron_plate_form() {
        let item: ItemData =
            ron::from_str(r#"(name: "plate", plate_allowed: ["sliced_tomato"])"#).unwrap();
        assert_eq!(item.plate_allowed.unwrap(), vec!["sliced_tomato"]);
    }

    #[test]
    fn recipes_data_tables_default_empty() {
        let recipes: RecipesData = ron::from_str("()").unwrap();
        assert!(recipes.cut.is_empty());
        assert!(recipes.cook.is_empty());
        assert!(recipes.burn.is_empty());
    }

    #[test]
    fn recipes_data_json() {
        let recipes: RecipesData = serde_json::from_str(
            r#"{"cook": [{"input": "patty", "output": "seared_patty", "seconds": 5.0}]}"#,
        )
        .unwrap();
        assert_eq!(recipes.cook.len(), 1);
        assert_eq!(recipes.cook[0].seconds, 5.0);
    }

    #[test]
    fn order_data_json() {
        let order: OrderData =
            serde_json::from_str(r#"{"name": "burger", "ingredients": ["bread", "seared_patty"]}"#)
                .unwrap();
        assert_eq!(order.ingredients.len(), 2);
    }

    #[test]
    fn kitchen_data_defaults() {
        let data: KitchenData = ron::from_str("()").unwrap();
        let config = data.into_config();
        assert_eq!(config.countdown_seconds, seconds(3.0));
        assert_eq!(config.match_seconds, seconds(100.0));
        assert_eq!(config.max_waiting_orders, 4);
        assert_eq!(config.rng_seed, 0);
    }

    #[test]
    fn kitchen_data_toml_overrides() {
        let data: KitchenData =
            toml::from_str("match_seconds = 45.0\nmax_stocked_plates = 2\n").unwrap();
        let config = data.into_config();
        assert_eq!(config.match_seconds, seconds(45.0));
        assert_eq!(config.max_stocked_plates, 2);
        assert_eq!(config.countdown_seconds, seconds(3.0));
    }
}
