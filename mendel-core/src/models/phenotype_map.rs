use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

///
/// Genotype -> phenotype mapping that remembers insertion order.
///
/// Editing surfaces show rows in the order the backend returned them, so the map
/// serializes and deserializes as a JSON object without reordering keys.
/// Inserting an existing key replaces its phenotype in place.
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhenotypeMap {
    entries: Vec<(String, String)>,
}

impl PhenotypeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, genotype: impl Into<String>, phenotype: impl Into<String>) {
        let genotype = genotype.into();
        let phenotype = phenotype.into();
        match self.entries.iter_mut().find(|(g, _)| *g == genotype) {
            Some(entry) => entry.1 = phenotype,
            None => self.entries.push((genotype, phenotype)),
        }
    }

    pub fn get(&self, genotype: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(g, _)| g == genotype)
            .map(|(_, p)| p.as_str())
    }

    pub fn contains_key(&self, genotype: &str) -> bool {
        self.get(genotype).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(g, _)| g.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(g, p)| (g.as_str(), p.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<G: Into<String>, P: Into<String>> FromIterator<(G, P)> for PhenotypeMap {
    fn from_iter<T: IntoIterator<Item = (G, P)>>(iter: T) -> Self {
        let mut map = PhenotypeMap::new();
        for (genotype, phenotype) in iter {
            map.insert(genotype, phenotype);
        }
        map
    }
}

impl IntoIterator for PhenotypeMap {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for PhenotypeMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (genotype, phenotype) in &self.entries {
            map.serialize_entry(genotype, phenotype)?;
        }
        map.end()
    }
}

struct PhenotypeMapVisitor;

impl<'de> Visitor<'de> for PhenotypeMapVisitor {
    type Value = PhenotypeMap;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of genotype strings to phenotype strings")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = PhenotypeMap::new();
        while let Some((genotype, phenotype)) = access.next_entry::<String, String>()? {
            map.insert(genotype, phenotype);
        }
        Ok(map)
    }
}

impl<'de> Deserialize<'de> for PhenotypeMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(PhenotypeMapVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn test_keeps_insertion_order_through_json() {
        let json = r#"{"bb": "Blue", "BB": "Brown", "Bb": "Brown"}"#;
        let map: PhenotypeMap = serde_json::from_str(json).unwrap();

        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["bb", "BB", "Bb"]);
        assert_eq!(
            serde_json::to_string(&map).unwrap(),
            r#"{"bb":"Blue","BB":"Brown","Bb":"Brown"}"#
        );
    }

    #[rstest]
    fn test_insert_replaces_in_place() {
        let mut map: PhenotypeMap = [("AA", "x"), ("Aa", "y")].into_iter().collect();
        map.insert("AA", "z");

        assert_eq!(map.len(), 2);
        assert_eq!(map.iter().next(), Some(("AA", "z")));
    }
}
