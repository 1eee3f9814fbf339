use ppe_portal_core::NonEmptyString;
use serde::{Deserialize, Serialize};

/// Common PPE offered as a hint on the request form.
pub const COMMON_PPE_ITEMS: [&str; 10] = [
    "Safety Helmet",
    "Safety Shoes",
    "Reflective Vest",
    "Safety Goggles",
    "Gloves (Cotton / Nitrile / Cut-resistant)",
    "Hearing Protection (Ear Plug / Ear Muff)",
    "Respirator Mask",
    "Coverall",
    "Harness / Lanyard",
    "Other",
];

/// One editable item row exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemRowInput {
    /// Item name.
    pub name: String,
    /// Requested quantity text.
    pub qty: String,
}

impl ItemRowInput {
    /// Creates a row from raw text.
    #[must_use]
    pub fn new(name: impl Into<String>, qty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qty: qty.into(),
        }
    }
}

/// One validated line of a multi-item request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PpeItemLine {
    name: NonEmptyString,
    qty: u32,
}

impl PpeItemLine {
    /// Normalizes a typed row, returning `None` when either field is unusable.
    #[must_use]
    pub fn from_row(row: &ItemRowInput) -> Option<Self> {
        let name = NonEmptyString::new(row.name.trim()).ok()?;
        let qty = parse_positive_quantity(&row.qty)?;
        Some(Self { name, qty })
    }

    /// Returns the trimmed item name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the requested quantity.
    #[must_use]
    pub fn qty(&self) -> u32 {
        self.qty
    }
}

/// Drops rows missing a name or a positive quantity.
#[must_use]
pub fn normalize_item_rows(rows: &[ItemRowInput]) -> Vec<PpeItemLine> {
    rows.iter().filter_map(PpeItemLine::from_row).collect()
}

/// Parses a positive whole quantity. Integral decimals such as `"3.0"` are accepted.
#[must_use]
pub fn parse_positive_quantity(value: &str) -> Option<u32> {
    parse_whole_quantity(value).filter(|qty| *qty > 0)
}

/// Coerces an issued quantity, falling back to zero on unusable input.
#[must_use]
pub fn coerce_issued_quantity(value: &str) -> u32 {
    parse_whole_quantity(value).unwrap_or(0)
}

fn parse_whole_quantity(value: &str) -> Option<u32> {
    let value = value.trim();
    if let Ok(qty) = value.parse::<u32>() {
        return Some(qty);
    }

    let number = value.parse::<f64>().ok()?;
    let in_range = number.is_finite() && number.fract() == 0.0 && number >= 0.0;
    (in_range && number <= f64::from(u32::MAX)).then_some(number as u32)
}
