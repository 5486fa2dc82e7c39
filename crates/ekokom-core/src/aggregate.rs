//! Aggregation engine: groups classified rows and computes packaging mass.
//!
//! Rows are grouped by (supplier, category, origin flag); each group sums its
//! quantities and derives plastic, paper and cardboard mass from the
//! category coefficients. Groups are then rolled up per origin class into
//! per-category totals (in category table order) and one grand total.
//!
//! Masses are reported in grams:
//!
//! - plastic = quantity × plastic coefficient × [`MASS_SCALE`]
//! - paper = quantity × paper coefficient × [`MASS_SCALE`]
//! - cardboard = quantity ÷ units per box × [`CARDBOARD_BOX_WEIGHT_KG`] × [`MASS_SCALE`],
//!   or zero when the category has zero units per box

use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use ekokom_model::{Category, CategoryId, CategoryTable, OriginClass, OriginPolicy};

use crate::classify::ClassifiedRow;
use crate::ops::group_by;

/// Weight of one cardboard box, in kilograms.
pub const CARDBOARD_BOX_WEIGHT_KG: f64 = 1235e-6;

/// Factor applied to coefficient products to express mass in grams.
pub const MASS_SCALE: f64 = 1e6;

/// Subtotal label for rows that matched no category.
pub const UNCLASSIFIED_LABEL: &str = "Nezařazeno";

/// What happens to rows whose goods type matched no category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnclassifiedPolicy {
    /// Left out of groups and totals; counted in the origin's
    /// `unclassified_quantity` and in the run diagnostics.
    #[default]
    Exclude,
    /// Added as an extra zero-mass subtotal row whose quantity enters the
    /// grand total.
    Bucket,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MaterialMass {
    pub plastic: f64,
    pub paper: f64,
    pub cardboard: f64,
}

impl MaterialMass {
    pub fn total(self) -> f64 {
        self.plastic + self.paper + self.cardboard
    }
}

impl Add for MaterialMass {
    type Output = MaterialMass;

    fn add(self, other: MaterialMass) -> MaterialMass {
        MaterialMass {
            plastic: self.plastic + other.plastic,
            paper: self.paper + other.paper,
            cardboard: self.cardboard + other.cardboard,
        }
    }
}

impl AddAssign for MaterialMass {
    fn add_assign(&mut self, other: MaterialMass) {
        *self = *self + other;
    }
}

/// Packaging mass for `quantity` units of `category`, in grams.
pub fn compute_mass(quantity: f64, category: &Category) -> MaterialMass {
    let cardboard = if category.cardboard_units_per_box == 0.0 {
        0.0
    } else {
        quantity / category.cardboard_units_per_box * CARDBOARD_BOX_WEIGHT_KG * MASS_SCALE
    };
    MaterialMass {
        plastic: quantity * category.coefficient_plastic * MASS_SCALE,
        paper: quantity * category.coefficient_paper * MASS_SCALE,
        cardboard,
    }
}

/// Parses a quantity cell.
///
/// Accepts surrounding whitespace and spaces as thousand separators. A lone
/// comma is a decimal comma; when both `,` and `.` occur, the last one is
/// the decimal mark and the other separates thousands (`1.234,5`). Returns
/// None for empty or non-numeric text.
pub fn parse_quantity(raw: &str) -> Option<f64> {
    let compact: String = raw
        .trim()
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .collect();
    if compact.is_empty() {
        return None;
    }
    // With both marks present the last one is the decimal mark.
    let candidate = match (compact.rfind(','), compact.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => compact.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => compact.replace(',', ""),
        (Some(_), None) => compact.replace(',', "."),
        _ => compact,
    };
    candidate.parse::<f64>().ok().filter(|value| value.is_finite())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedGroup {
    pub category: CategoryId,
    pub category_name: String,
    pub supplier: String,
    pub origin_flag: String,
    pub origin: OriginClass,
    pub total_quantity: f64,
    pub mass: MaterialMass,
}

/// One row of a per-category subtotal block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    /// None for the unclassified bucket.
    pub category: Option<CategoryId>,
    pub name: String,
    pub total_quantity: f64,
    pub mass: MaterialMass,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct GrandTotal {
    pub total_quantity: f64,
    pub mass: MaterialMass,
}

/// Aggregated result for one origin class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OriginTotals {
    pub origin: OriginClass,
    /// Ordered by supplier, then category table order, then origin flag.
    pub groups: Vec<AggregatedGroup>,
    /// One entry per category in table order, plus the unclassified bucket
    /// when that policy is active.
    pub category_totals: Vec<CategoryTotal>,
    pub grand_total: GrandTotal,
    pub unclassified_rows: usize,
    pub unclassified_quantity: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AggregationStats {
    pub unclassified_rows: usize,
    /// Quantity cells that were empty or not numeric; counted as zero.
    pub invalid_quantities: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregation {
    pub domestic: OriginTotals,
    pub foreign: OriginTotals,
    pub stats: AggregationStats,
}

impl Aggregation {
    pub fn origin(&self, origin: OriginClass) -> &OriginTotals {
        match origin {
            OriginClass::Domestic => &self.domestic,
            OriginClass::Foreign => &self.foreign,
        }
    }

    /// Domestic first, then foreign.
    pub fn views(&self) -> [&OriginTotals; 2] {
        [&self.domestic, &self.foreign]
    }
}

struct Measured<'a> {
    row: &'a ClassifiedRow,
    origin: OriginClass,
    quantity: f64,
}

pub fn aggregate(
    rows: &[ClassifiedRow],
    categories: &CategoryTable,
    origin_policy: &OriginPolicy,
    unclassified: UnclassifiedPolicy,
) -> Aggregation {
    let mut invalid_quantities = 0usize;
    let measured: Vec<Measured<'_>> = rows
        .iter()
        .map(|row| {
            let quantity = match parse_quantity(&row.joined.quantity) {
                Some(value) => value,
                None => {
                    invalid_quantities += 1;
                    debug!(
                        shipment = row.joined.shipment,
                        value = %row.joined.quantity,
                        "quantity is not numeric, counted as zero"
                    );
                    0.0
                }
            };
            Measured {
                row,
                origin: origin_policy.classify(&row.joined.origin_flag),
                quantity,
            }
        })
        .collect();
    if invalid_quantities > 0 {
        warn!(
            count = invalid_quantities,
            "non-numeric quantities were counted as zero"
        );
    }

    let domestic = aggregate_origin(&measured, OriginClass::Domestic, categories, unclassified);
    let foreign = aggregate_origin(&measured, OriginClass::Foreign, categories, unclassified);
    let stats = AggregationStats {
        unclassified_rows: domestic.unclassified_rows + foreign.unclassified_rows,
        invalid_quantities,
    };
    Aggregation {
        domestic,
        foreign,
        stats,
    }
}

fn aggregate_origin(
    measured: &[Measured<'_>],
    origin: OriginClass,
    categories: &CategoryTable,
    unclassified: UnclassifiedPolicy,
) -> OriginTotals {
    let in_scope = measured.iter().filter(|item| item.origin == origin);

    let mut unclassified_rows = 0usize;
    let mut unclassified_quantity = 0.0;
    let classified: Vec<(&Measured<'_>, CategoryId)> = in_scope
        .filter_map(|item| match item.row.category {
            Some(id) => Some((item, id)),
            None => {
                unclassified_rows += 1;
                unclassified_quantity += item.quantity;
                None
            }
        })
        .collect();

    let grouped = group_by(&classified, |(item, id)| {
        (
            item.row.joined.supplier.clone(),
            *id,
            item.row.joined.origin_flag.clone(),
        )
    });
    let groups: Vec<AggregatedGroup> = grouped
        .into_iter()
        .map(|((supplier, id, origin_flag), members)| {
            let total_quantity: f64 = members.iter().map(|(item, _)| item.quantity).sum();
            let category = categories.get(id);
            AggregatedGroup {
                category: id,
                category_name: category.name.clone(),
                supplier,
                origin_flag,
                origin,
                total_quantity,
                mass: compute_mass(total_quantity, category),
            }
        })
        .collect();

    let mut category_totals: Vec<CategoryTotal> = categories
        .iter()
        .map(|(id, category)| {
            let mut total = CategoryTotal {
                category: Some(id),
                name: category.name.clone(),
                total_quantity: 0.0,
                mass: MaterialMass::default(),
            };
            for group in groups.iter().filter(|group| group.category == id) {
                total.total_quantity += group.total_quantity;
                total.mass += group.mass;
            }
            total
        })
        .collect();
    if unclassified == UnclassifiedPolicy::Bucket {
        category_totals.push(CategoryTotal {
            category: None,
            name: UNCLASSIFIED_LABEL.to_string(),
            total_quantity: unclassified_quantity,
            mass: MaterialMass::default(),
        });
    }

    let grand_total = category_totals
        .iter()
        .fold(GrandTotal::default(), |mut acc, total| {
            acc.total_quantity += total.total_quantity;
            acc.mass += total.mass;
            acc
        });

    info!(
        origin = %origin,
        groups = groups.len(),
        quantity = grand_total.total_quantity,
        plastic_g = grand_total.mass.plastic,
        paper_g = grand_total.mass.paper,
        cardboard_g = grand_total.mass.cardboard,
        "aggregated origin view"
    );

    OriginTotals {
        origin,
        groups,
        category_totals,
        grand_total,
        unclassified_rows,
        unclassified_quantity,
    }
}
