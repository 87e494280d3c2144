//! The immutable catalog of item types, transformation recipes, and orders.
//!
//! Built once at startup through [`RegistryBuilder`] and frozen; the
//! simulation only ever reads it.

use crate::fixed::Seconds;
use crate::id::{ItemTypeId, OrderId};
use std::collections::HashMap;

/// Extra definition carried by plate item types: the fixed set of
/// ingredient types a plate of this kind accepts.
#[derive(Debug, Clone)]
pub struct PlateSpec {
    pub allowed: Vec<ItemTypeId>,
}

/// An item type definition.
#[derive(Debug, Clone)]
pub struct ItemTypeDef {
    pub name: String,
    /// Present iff items of this type are plates.
    pub plate: Option<PlateSpec>,
}

/// A cutting transformation: `chops_required` secondary interactions turn
/// one `input` item into one `output` item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CutRecipe {
    pub input: ItemTypeId,
    pub output: ItemTypeId,
    pub chops_required: u32,
}

/// A timed transformation on the stove. Used for both the cook table
/// (raw -> cooked) and the burn table (cooked -> burned).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookRecipe {
    pub input: ItemTypeId,
    pub output: ItemTypeId,
    pub seconds: Seconds,
}

/// A named order: the exact ingredient-type set a delivered plate must carry.
#[derive(Debug, Clone)]
pub struct OrderDef {
    pub name: String,
    pub ingredients: Vec<ItemTypeId>,
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid item reference: {0:?}")]
    InvalidItemRef(ItemTypeId),
    #[error("order '{0}' has no ingredients")]
    EmptyOrder(String),
    #[error("recipe for {0:?} has a zero threshold")]
    ZeroThreshold(ItemTypeId),
}

/// Builder for constructing an immutable [`Registry`].
/// Two-phase lifecycle: registration, then finalization with validation.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    items: Vec<ItemTypeDef>,
    item_name_to_id: HashMap<String, ItemTypeId>,
    cut_recipes: Vec<CutRecipe>,
    cook_recipes: Vec<CookRecipe>,
    burn_recipes: Vec<CookRecipe>,
    orders: Vec<OrderDef>,
    order_name_to_id: HashMap<String, OrderId>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plain (non-plate) item type. Returns its ID.
    pub fn register_item(&mut self, name: &str) -> ItemTypeId {
        self.push_item(name, None)
    }

    /// Register a plate item type with its allowed-ingredient set.
    pub fn register_plate(&mut self, name: &str, allowed: Vec<ItemTypeId>) -> ItemTypeId {
        self.push_item(name, Some(PlateSpec { allowed }))
    }

    fn push_item(&mut self, name: &str, plate: Option<PlateSpec>) -> ItemTypeId {
        let id = ItemTypeId(self.items.len() as u32);
        self.items.push(ItemTypeDef {
            name: name.to_string(),
            plate,
        });
        self.item_name_to_id.insert(name.to_string(), id);
        id
    }

    pub fn register_cut_recipe(&mut self, input: ItemTypeId, output: ItemTypeId, chops: u32) {
        self.cut_recipes.push(CutRecipe {
            input,
            output,
            chops_required: chops,
        });
    }

    pub fn register_cook_recipe(&mut self, input: ItemTypeId, output: ItemTypeId, seconds: Seconds) {
        self.cook_recipes.push(CookRecipe {
            input,
            output,
            seconds,
        });
    }

    pub fn register_burn_recipe(&mut self, input: ItemTypeId, output: ItemTypeId, seconds: Seconds) {
        self.burn_recipes.push(CookRecipe {
            input,
            output,
            seconds,
        });
    }

    /// Register a named order. Returns its ID.
    pub fn register_order(&mut self, name: &str, ingredients: Vec<ItemTypeId>) -> OrderId {
        let id = OrderId(self.orders.len() as u32);
        self.orders.push(OrderDef {
            name: name.to_string(),
            ingredients,
        });
        self.order_name_to_id.insert(name.to_string(), id);
        id
    }

    /// Lookup item type ID by name.
    pub fn item_id(&self, name: &str) -> Option<ItemTypeId> {
        self.item_name_to_id.get(name).copied()
    }

    /// Finalize and build the immutable registry.
    pub fn build(self) -> Result<Registry, RegistryError> {
        let item_count = self.items.len() as u32;
        let check = |id: ItemTypeId| {
            if id.0 >= item_count {
                Err(RegistryError::InvalidItemRef(id))
            } else {
                Ok(())
            }
        };

        for r in &self.cut_recipes {
            check(r.input)?;
            check(r.output)?;
            if r.chops_required == 0 {
                return Err(RegistryError::ZeroThreshold(r.input));
            }
        }
        for r in self.cook_recipes.iter().chain(self.burn_recipes.iter()) {
            check(r.input)?;
            check(r.output)?;
            if r.seconds <= Seconds::ZERO {
                return Err(RegistryError::ZeroThreshold(r.input));
            }
        }
        for item in &self.items {
            if let Some(plate) = &item.plate {
                for &t in &plate.allowed {
                    check(t)?;
                }
            }
        }
        for order in &self.orders {
            if order.ingredients.is_empty() {
                return Err(RegistryError::EmptyOrder(order.name.clone()));
            }
            for &t in &order.ingredients {
                check(t)?;
            }
        }

        Ok(Registry {
            items: self.items,
            item_name_to_id: self.item_name_to_id,
            cut_recipes: self.cut_recipes,
            cook_recipes: self.cook_recipes,
            burn_recipes: self.burn_recipes,
            orders: self.orders,
            order_name_to_id: self.order_name_to_id,
        })
    }
}

/// Immutable registry. Frozen after build(). Thread-safe to share.
#[derive(Debug)]
pub struct Registry {
    items: Vec<ItemTypeDef>,
    item_name_to_id: HashMap<String, ItemTypeId>,
    cut_recipes: Vec<CutRecipe>,
    cook_recipes: Vec<CookRecipe>,
    burn_recipes: Vec<CookRecipe>,
    orders: Vec<OrderDef>,
    order_name_to_id: HashMap<String, OrderId>,
}

impl Registry {
    pub fn get_item(&self, id: ItemTypeId) -> Option<&ItemTypeDef> {
        self.items.get(id.0 as usize)
    }

    pub fn item_id(&self, name: &str) -> Option<ItemTypeId> {
        self.item_name_to_id.get(name).copied()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Whether items of this type are plates.
    pub fn is_plate(&self, id: ItemTypeId) -> bool {
        self.plate_spec(id).is_some()
    }

    pub fn plate_spec(&self, id: ItemTypeId) -> Option<&PlateSpec> {
        self.items.get(id.0 as usize).and_then(|i| i.plate.as_ref())
    }

    /// The cut recipe accepting `input`, if any. Tables scan in registration
    /// order; with duplicate entries for one input the first wins.
    pub fn cut_recipe_for(&self, input: ItemTypeId) -> Option<&CutRecipe> {
        self.cut_recipes.iter().find(|r| r.input == input)
    }

    /// The cook recipe accepting `input`, if any. First match wins.
    pub fn cook_recipe_for(&self, input: ItemTypeId) -> Option<&CookRecipe> {
        self.cook_recipes.iter().find(|r| r.input == input)
    }

    /// The burn recipe accepting `input`, if any. First match wins. A cooked
    /// item type with no entry here never burns.
    pub fn burn_recipe_for(&self, input: ItemTypeId) -> Option<&CookRecipe> {
        self.burn_recipes.iter().find(|r| r.input == input)
    }

    pub fn order(&self, id: OrderId) -> Option<&OrderDef> {
        self.orders.get(id.0 as usize)
    }

    pub fn order_id(&self, name: &str) -> Option<OrderId> {
        self.order_name_to_id.get(name).copied()
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }
}
