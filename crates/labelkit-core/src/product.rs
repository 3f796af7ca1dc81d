//! Product record consumed by the label designer.
//!
//! Only the fields a label can bind to are typed; everything else the
//! catalog sends is carried through untouched in `extra` so the record can
//! be handed back to the product-save call intact.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::barcode::BarcodeSymbology;

/// A catalog product as seen by the label designer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_price",
        skip_serializing_if = "Option::is_none"
    )]
    pub sales_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    /// Product photo as a URL or data URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[serde(default)]
    pub barcode_type: BarcodeSymbology,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Product {
    /// Creates a product with just a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Product name, if set and not blank.
    pub fn name(&self) -> Option<&str> {
        non_blank(&self.name)
    }

    pub fn batch_number(&self) -> Option<&str> {
        non_blank(&self.batch_number)
    }

    pub fn expiry_date(&self) -> Option<&str> {
        non_blank(&self.expiry_date)
    }

    pub fn image(&self) -> Option<&str> {
        non_blank(&self.image)
    }

    pub fn barcode(&self) -> Option<&str> {
        non_blank(&self.barcode)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Formats a sales price for display on a label, e.g. `$12.50`.
///
/// A missing or zero price renders as `$0.00`.
pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(value) if value.is_finite() => format!("${:.2}", value),
        _ => "$0.00".to_string(),
    }
}

/// Prices arrive either as numbers or as the raw text of a form field.
fn deserialize_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPrice {
        Number(f64),
        Text(String),
    }

    let raw = Option::<RawPrice>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawPrice::Number(value)) => Some(value),
        Some(RawPrice::Text(text)) => match text.trim().parse::<f64>() {
            Ok(value) => Some(value),
            Err(_) => {
                debug!("Ignoring unparsable sales price {:?}", text);
                None
            }
        },
        None => None,
    })
}
