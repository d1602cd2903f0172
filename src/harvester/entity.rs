// entity.rs - the subset of a wiki entity document we read
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntity {
    pub id: String,
    #[serde(default)]
    pub claims: HashMap<String, Vec<Claim>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    pub mainsnak: Snak,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snak {
    /// Absent for "no value" / "unknown value" snaks
    #[serde(default)]
    pub datavalue: Option<DataValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataValue {
    pub value: Value,
}

impl CatalogEntity {
    /// Raw claim values for a property, in claim order
    pub fn values<'a>(&'a self, property: &str) -> impl Iterator<Item = &'a Value> + 'a {
        self.claims
            .get(property)
            .into_iter()
            .flatten()
            .filter_map(|claim| claim.mainsnak.datavalue.as_ref())
            .map(|datavalue| &datavalue.value)
    }

    /// Ids of the items a property points to
    pub fn item_ids(&self, property: &str) -> Vec<String> {
        self.values(property)
            .filter_map(|value| value.get("id").and_then(Value::as_str))
            .map(str::to_string)
            .collect()
    }

    /// String values of a property
    pub fn strings<'a>(&'a self, property: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.values(property).filter_map(Value::as_str)
    }

    pub fn first_string(&self, property: &str) -> Option<&str> {
        self.strings(property).next()
    }
}
