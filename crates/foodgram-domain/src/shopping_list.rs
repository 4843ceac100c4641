//! Shopping-list aggregation and plain-text rendering.

use std::fmt;

/// File name offered to the client for the exported list.
pub const SHOPPING_LIST_FILENAME: &str = "shopping_cart.txt";

/// One ingredient line of a recipe in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientAmount {
    pub name: String,
    pub measurement_unit: String,
    pub amount: i64,
}

impl fmt::Display for IngredientAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} {}", self.name, self.amount, self.measurement_unit)
    }
}

/// Shopping list built from every ingredient line of the recipes in a cart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShoppingList {
    entries: Vec<IngredientAmount>,
}

impl ShoppingList {
    /// One entry per recipe line, in the order given. Repeated ingredients
    /// across recipes stay on separate lines.
    pub fn aggregate(lines: impl IntoIterator<Item = IngredientAmount>) -> Self {
        Self {
            entries: lines.into_iter().collect(),
        }
    }

    pub fn entries(&self) -> &[IngredientAmount] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One `"<name> - <amount> <unit>"` line per entry, newline-joined.
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
