//! Goods categories and the canonical classification function.
//!
//! The table is ordered: the first category whose pattern occurs in a goods
//! description wins. Classification and coefficient lookup both go through
//! [`CategoryTable::classify`] and [`CategoryTable::get`], so a row can never
//! be grouped under a category that has no coefficients.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::text::fold_case;

/// Position of a category in its table; also the canonical tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CategoryId(usize);

impl CategoryId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    /// Case-insensitive substring searched for in the goods description.
    pub match_pattern: String,
    /// Plastic packaging mass per unit, in kilograms.
    #[serde(default)]
    pub coefficient_plastic: f64,
    /// Paper packaging mass per unit, in kilograms.
    #[serde(default)]
    pub coefficient_paper: f64,
    /// Units shipped per cardboard box; zero means no cardboard.
    #[serde(default)]
    pub cardboard_units_per_box: f64,
}

impl Category {
    pub fn new(name: &str, match_pattern: &str, plastic: f64, paper: f64, units_per_box: f64) -> Self {
        Self {
            name: name.to_string(),
            match_pattern: match_pattern.to_string(),
            coefficient_plastic: plastic,
            coefficient_paper: paper,
            cardboard_units_per_box: units_per_box,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.match_pattern.trim().is_empty() {
            return Err(ModelError::EmptyPattern(self.name.clone()));
        }
        for (field, value) in [
            ("plastic", self.coefficient_plastic),
            ("paper", self.coefficient_paper),
            ("cardboard", self.cardboard_units_per_box),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ModelError::InvalidCoefficient {
                    category: self.name.clone(),
                    field,
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Immutable, ordered category table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Category>", into = "Vec<Category>")]
pub struct CategoryTable {
    categories: Vec<Category>,
}

impl CategoryTable {
    pub fn new(categories: Vec<Category>) -> Result<Self> {
        if categories.is_empty() {
            return Err(ModelError::EmptyCategoryTable);
        }
        let mut names = BTreeSet::new();
        for category in &categories {
            category.validate()?;
            if !names.insert(category.name.as_str()) {
                return Err(ModelError::DuplicateCategory(category.name.clone()));
            }
        }
        Ok(Self { categories })
    }

    /// Assigns the first category whose pattern occurs in `goods_type`.
    pub fn classify(&self, goods_type: &str) -> Option<CategoryId> {
        let haystack = fold_case(goods_type);
        self.categories
            .iter()
            .position(|category| haystack.contains(&fold_case(&category.match_pattern)))
            .map(CategoryId)
    }

    pub fn get(&self, id: CategoryId) -> &Category {
        &self.categories[id.0]
    }

    pub fn name(&self, id: CategoryId) -> &str {
        &self.categories[id.0].name
    }

    /// Categories with their ids, in table order.
    pub fn iter(&self) -> impl Iterator<Item = (CategoryId, &Category)> {
        self.categories
            .iter()
            .enumerate()
            .map(|(idx, category)| (CategoryId(idx), category))
    }

    pub fn ids(&self) -> impl Iterator<Item = CategoryId> + '_ {
        (0..self.categories.len()).map(CategoryId)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self {
            categories: vec![
                Category::new("Obleceni", "oble", 13e-6, 0.0, 40.0),
                Category::new("Boty", "boty", 0.0, 270e-6, 8.0),
                Category::new("Kosmetika", "kosme", 0.0, 0.0, 0.0),
                Category::new("Kabelky", "kabel", 139e-6, 0.0, 12.0),
            ],
        }
    }
}

impl TryFrom<Vec<Category>> for CategoryTable {
    type Error = ModelError;

    fn try_from(categories: Vec<Category>) -> Result<Self> {
        Self::new(categories)
    }
}

impl From<CategoryTable> for Vec<Category> {
    fn from(table: CategoryTable) -> Self {
        table.categories
    }
}
