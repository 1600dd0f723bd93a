//! Property result display payloads.
//!
//! Opaque cards surfaced alongside an assistant answer. No identity
//! semantics beyond display.

use serde::{Deserialize, Serialize};

/// Feature block of a property card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyFeatures {
    #[serde(default)]
    pub beds: Option<u32>,
    #[serde(default)]
    pub baths: Option<u32>,
    #[serde(default)]
    pub parking: Option<u32>,
    #[serde(default)]
    pub size_sqm: Option<u32>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// A single property result rendered as a card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyResult {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub features: Option<PropertyFeatures>,
    #[serde(default)]
    pub agent_id: Option<String>,
}

impl PropertyResult {
    /// One-line feature summary, e.g. `3 Bed • 2 Bath • 120 sqm`.
    pub fn summary_line(&self) -> String {
        let Some(features) = &self.features else {
            return String::new();
        };
        let mut parts = Vec::new();
        if let Some(beds) = features.beds {
            parts.push(format!("{} Bed", beds));
        }
        if let Some(baths) = features.baths {
            parts.push(format!("{} Bath", baths));
        }
        if let Some(size) = features.size_sqm {
            parts.push(format!("{} sqm", size));
        }
        parts.join(" • ")
    }

    /// Display price, `—` when the listing has none.
    pub fn price_label(&self) -> String {
        match self.price {
            Some(price) => format!("AUD {}", group_thousands(price.round() as i64)),
            None => "—".to_string(),
        }
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.abs().to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_line() {
        let result = PropertyResult {
            id: "p1".to_string(),
            title: "Beach villa".to_string(),
            features: Some(PropertyFeatures {
                beds: Some(3),
                baths: Some(2),
                size_sqm: Some(120),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(result.summary_line(), "3 Bed • 2 Bath • 120 sqm");
    }

    #[test]
    fn test_summary_line_partial_features() {
        let result = PropertyResult {
            id: "p2".to_string(),
            title: "Studio".to_string(),
            features: Some(PropertyFeatures {
                beds: Some(1),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(result.summary_line(), "1 Bed");
    }

    #[test]
    fn test_price_label() {
        let mut result = PropertyResult {
            price: Some(1_250_000.0),
            ..Default::default()
        };
        assert_eq!(result.price_label(), "AUD 1,250,000");
        result.price = None;
        assert_eq!(result.price_label(), "—");
    }

    #[test]
    fn test_deserializes_service_shape() {
        let json = r#"{
            "id": "42",
            "title": "City apartment",
            "price": 640000.0,
            "location": "Adelaide",
            "features": {"beds": 2, "baths": 1, "type": "apartment"}
        }"#;
        let result: PropertyResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.features.as_ref().unwrap().kind.as_deref(), Some("apartment"));
        assert!(result.agent_id.is_none());
    }
}
