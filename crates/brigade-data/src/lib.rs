//! Data-file loading for the kitchen simulation.
//!
//! Reads the item/recipe/order catalogs (and optional match tuning) from a
//! data directory in RON, JSON, or TOML, resolves every name reference, and
//! produces the frozen [`brigade_core::registry::Registry`] plus a
//! [`brigade_core::kitchen::KitchenConfig`].
//!
//! Expected files (any one supported extension each):
//! - `items.{ron,json,toml}` -- required; item types, plates carry their
//!   allowed-ingredient name list.
//! - `recipes.{ron,json,toml}` -- optional; cut/cook/burn tables.
//! - `orders.{ron,json,toml}` -- optional; named orders.
//! - `kitchen.{ron,json,toml}` -- optional; match tuning overrides.

pub mod loader;
pub mod schema;

use brigade_core::id::ItemTypeId;
use brigade_core::kitchen::KitchenConfig;
use brigade_core::registry::{Registry, RegistryBuilder};
use loader::{DataLoadError, check_duplicate, find_data_file, require_data_file, resolve_name};
use schema::{ItemData, KitchenData, OrderData, RecipesData};
use std::collections::HashMap;
use std::path::Path;

/// Load and resolve everything a [`brigade_core::kitchen::Kitchen`] needs
/// from a data directory.
pub fn load_kitchen_data(dir: &Path) -> Result<(Registry, KitchenConfig), DataLoadError> {
    Ok((load_registry(dir)?, load_config(dir)?))
}

/// Load `items`, `recipes`, and `orders` into a frozen registry.
pub fn load_registry(dir: &Path) -> Result<Registry, DataLoadError> {
    let items_path = require_data_file(dir, "items")?;
    let items: Vec<ItemData> = loader::deserialize_list(&items_path, "items")?;

    // Pass 1: assign ids by position so plates can reference item names
    // declared later in the same file.
    let mut name_to_id: HashMap<String, ItemTypeId> = HashMap::new();
    for (index, item) in items.iter().enumerate() {
        check_duplicate(&name_to_id, &item.name, &items_path)?;
        name_to_id.insert(item.name.clone(), ItemTypeId(index as u32));
    }

    // Pass 2: register with resolved plate specs.
    let mut builder = RegistryBuilder::new();
    for item in &items {
        match &item.plate_allowed {
            Some(allowed) => {
                let resolved = allowed
                    .iter()
                    .map(|name| resolve_name(&name_to_id, name, &items_path, "item").copied())
                    .collect::<Result<Vec<_>, _>>()?;
                builder.register_plate(&item.name, resolved);
            }
            None => {
                builder.register_item(&item.name);
            }
        }
    }

    if let Some(recipes_path) = find_data_file(dir, "recipes")? {
        let recipes: RecipesData = loader::deserialize_file(&recipes_path)?;
        for r in &recipes.cut {
            let input = *resolve_name(&name_to_id, &r.input, &recipes_path, "item")?;
            let output = *resolve_name(&name_to_id, &r.output, &recipes_path, "item")?;
            builder.register_cut_recipe(input, output, r.chops);
        }
        for r in &recipes.cook {
            let input = *resolve_name(&name_to_id, &r.input, &recipes_path, "item")?;
            let output = *resolve_name(&name_to_id, &r.output, &recipes_path, "item")?;
            builder.register_cook_recipe(input, output, schema::seconds(r.seconds));
        }
        for r in &recipes.burn {
            let input = *resolve_name(&name_to_id, &r.input, &recipes_path, "item")?;
            let output = *resolve_name(&name_to_id, &r.output, &recipes_path, "item")?;
            builder.register_burn_recipe(input, output, schema::seconds(r.seconds));
        }
    }

    if let Some(orders_path) = find_data_file(dir, "orders")? {
        let orders: Vec<OrderData> = loader::deserialize_list(&orders_path, "orders")?;
        let mut seen: HashMap<String, ()> = HashMap::new();
        for order in &orders {
            check_duplicate(&seen, &order.name, &orders_path)?;
            seen.insert(order.name.clone(), ());
            let ingredients = order
                .ingredients
                .iter()
                .map(|name| resolve_name(&name_to_id, name, &orders_path, "item").copied())
                .collect::<Result<Vec<_>, _>>()?;
            builder.register_order(&order.name, ingredients);
        }
    }

    Ok(builder.build()?)
}

/// Load match tuning; every field falls back to the reference defaults when
/// the file (or the field) is absent.
pub fn load_config(dir: &Path) -> Result<KitchenConfig, DataLoadError> {
    match find_data_file(dir, "kitchen")? {
        Some(path) => {
            let data: KitchenData = loader::deserialize_file(&path)?;
            Ok(data.into_config())
        }
        None => Ok(KitchenConfig::default()),
    }
}
