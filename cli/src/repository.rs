//! Street and property repositories backed by JSON files, standing in for a real database.

use std::collections::BTreeMap;

use anyhow::{Context, Result};

use route_graph::{PropertyID, PropertyRepository, RawProperty, RawStreet, StreetRepository};

/// Re-reads the file on every call, so edits show up after the next graph rebuild.
pub struct JsonStreets {
    path: String,
}

impl JsonStreets {
    pub fn new(path: String) -> JsonStreets {
        JsonStreets { path }
    }
}

impl StreetRepository for JsonStreets {
    fn all_streets(&self) -> Result<Vec<RawStreet>> {
        let contents = fs_err::read_to_string(&self.path)?;
        parse_streets(&contents).with_context(|| format!("couldn't parse streets from {}", self.path))
    }
}

pub fn parse_streets(json: &str) -> Result<Vec<RawStreet>> {
    let streets: Vec<RawStreet> = serde_json::from_str(json)?;
    Ok(streets)
}

/// Loaded once up front.
#[derive(Default)]
pub struct JsonProperties {
    properties: BTreeMap<PropertyID, RawProperty>,
}

impl JsonProperties {
    pub fn load(path: &str) -> Result<JsonProperties> {
        let contents = fs_err::read_to_string(path)?;
        JsonProperties::parse(&contents)
            .with_context(|| format!("couldn't parse properties from {}", path))
    }

    pub fn parse(json: &str) -> Result<JsonProperties> {
        let list: Vec<RawProperty> = serde_json::from_str(json)?;
        let mut properties = BTreeMap::new();
        for property in list {
            if properties.contains_key(&property.id) {
                warn!("{} is listed more than once, keeping the first", property.id);
                continue;
            }
            properties.insert(property.id, property);
        }
        Ok(JsonProperties { properties })
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }
}

impl PropertyRepository for JsonProperties {
    fn get_property(&self, id: PropertyID) -> Result<Option<RawProperty>> {
        Ok(self.properties.get(&id).cloned())
    }
}
