//! Individual sale records and the service price table.

use serde::{Deserialize, Serialize};

use crate::types::Amount;

/// A single recorded sale as served by the data API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Haircut {
    pub id: String,
    pub client_name: String,
    pub service_name: String,
    /// Amount charged, tip excluded
    pub price: Amount,
    /// Day in any supported textual format
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Number of services in this sale; 0 on records from before the
    /// field existed
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub tip: Amount,
}

/// Base price configured for a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePrice {
    pub service_name: String,
    pub base_price: Amount,
}

impl Haircut {
    /// Number of services this sale stands for.
    ///
    /// Older records carry `count == 0`; for those the count is estimated
    /// as `price / base price`, rounded, using the service's configured
    /// price or `default_base_price` when the service is not in the table.
    #[must_use]
    pub fn effective_count(&self, prices: &[ServicePrice], default_base_price: i64) -> u64 {
        if self.count > 0 {
            return u64::from(self.count);
        }

        let base = base_price_for(prices, &self.service_name)
            .map_or(default_base_price, Amount::get);
        if base <= 0 || self.price.get() <= 0 {
            return 0;
        }

        // round half up in integer arithmetic
        let estimate = (self.price.get() * 2 + base) / (base * 2);
        u64::try_from(estimate).unwrap_or_default()
    }
}

/// Configured base price of a service, if any.
#[must_use]
pub fn base_price_for(prices: &[ServicePrice], service_name: &str) -> Option<Amount> {
    prices
        .iter()
        .find(|p| p.service_name == service_name)
        .map(|p| p.base_price)
        .filter(|price| !price.is_zero())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sale(service: &str, price: i64, count: u32) -> Haircut {
        Haircut {
            id: "1".to_string(),
            client_name: "Juan".to_string(),
            service_name: service.to_string(),
            price: Amount::new(price),
            date: "03/01/2026".to_string(),
            time: None,
            count,
            tip: Amount::default(),
        }
    }

    fn prices() -> Vec<ServicePrice> {
        vec![
            ServicePrice {
                service_name: "Corte".to_string(),
                base_price: Amount::new(5000),
            },
            ServicePrice {
                service_name: "Barba".to_string(),
                base_price: Amount::new(0),
            },
        ]
    }

    #[test]
    fn test_explicit_count_wins() {
        assert_eq!(sale("Corte", 100_000, 3).effective_count(&prices(), 8000), 3);
    }

    #[test]
    fn test_legacy_count_from_price_table() {
        assert_eq!(sale("Corte", 15000, 0).effective_count(&prices(), 8000), 3);
        // 12500 / 5000 = 2.5 rounds up
        assert_eq!(sale("Corte", 12500, 0).effective_count(&prices(), 8000), 3);
        assert_eq!(sale("Corte", 12400, 0).effective_count(&prices(), 8000), 2);
    }

    #[test]
    fn test_legacy_count_falls_back_to_default_price() {
        assert_eq!(sale("Tinte", 16000, 0).effective_count(&prices(), 8000), 2);
        // a zero base price in the table counts as missing
        assert_eq!(sale("Barba", 8000, 0).effective_count(&prices(), 8000), 1);
        assert_eq!(sale("Tinte", 0, 0).effective_count(&prices(), 8000), 0);
    }

    #[test]
    fn test_deserialize_api_record() {
        let json = r#"{
            "id": "abc",
            "clientName": "Maria",
            "serviceName": "Corte",
            "price": 60000,
            "date": "09/01/2026",
            "count": 8,
            "tip": 2000
        }"#;
        let sale: Haircut = serde_json::from_str(json).unwrap();
        assert_eq!(sale.client_name, "Maria");
        assert_eq!(sale.price, Amount::new(60000));
        assert_eq!(sale.tip, Amount::new(2000));
        assert_eq!(sale.time, None);

        let legacy: Haircut = serde_json::from_str(
            r#"{"id":"x","clientName":"A","serviceName":"Corte","price":8000,"date":"2025-05-01"}"#,
        )
        .unwrap();
        assert_eq!(legacy.count, 0);
        assert!(legacy.tip.is_zero());
    }
}
