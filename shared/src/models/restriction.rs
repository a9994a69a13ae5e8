//! Restriction Model

use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Dietary restriction entity (e.g. "Vegetarian", "Gluten Free")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Restriction {
    pub id: i64,
    pub title: String,
}

impl Restriction {
    /// Abbreviation built from the first letter of every word.
    ///
    /// `"Gluten Free"` becomes `"GF"`. Repeated spaces do not produce
    /// empty words.
    pub fn initials(&self) -> String {
        self.title
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .collect()
    }
}

/// Error returned when a restriction id list cannot be read
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid restriction id: {0:?}")]
pub struct InvalidRestrictionId(pub String);

/// The set of restriction ids attached to a dish
///
/// Always kept sorted and free of duplicates, so two lists naming the same
/// restrictions compare equal. Serialized as a JSON array of integers.
/// Deserializes from an array (of integers or numeric strings), from the
/// legacy comma separated string form (`"1,,3"`, empty entries skipped),
/// or from `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RestrictionIds(Vec<i64>);

impl RestrictionIds {
    pub fn new(ids: impl IntoIterator<Item = i64>) -> Self {
        let mut ids: Vec<i64> = ids.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();
        Self(ids)
    }

    /// Parse the comma separated wire form. Blank entries are skipped.
    pub fn parse_csv(raw: &str) -> Result<Self, InvalidRestrictionId> {
        raw.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<i64>()
                    .map_err(|_| InvalidRestrictionId(part.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    /// Comma joined form, as produced by SQLite's `group_concat`
    pub fn to_csv(&self) -> String {
        self.0
            .iter()
            .map(i64::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, id: i64) -> bool {
        self.0.binary_search(&id).is_ok()
    }
}

impl FromIterator<i64> for RestrictionIds {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl From<Vec<i64>> for RestrictionIds {
    fn from(ids: Vec<i64>) -> Self {
        Self::new(ids)
    }
}

impl Serialize for RestrictionIds {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

/// One element of the array form: `3` or `"3"`
#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Num(i64),
    Text(String),
}

struct RestrictionIdsVisitor;

impl<'de> Visitor<'de> for RestrictionIdsVisitor {
    type Value = RestrictionIds;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an array of restriction ids or a comma separated string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        RestrictionIds::parse_csv(v).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(RestrictionIds::new([v]))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        i64::try_from(v)
            .map(|id| RestrictionIds::new([id]))
            .map_err(|_| E::custom(InvalidRestrictionId(v.to_string())))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(RestrictionIds::default())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(RestrictionIds::default())
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
        d.deserialize_any(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut ids = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<IdRepr>()? {
            match item {
                IdRepr::Num(id) => ids.push(id),
                IdRepr::Text(text) => {
                    let text = text.trim();
                    if text.is_empty() {
                        continue;
                    }
                    let id = text
                        .parse::<i64>()
                        .map_err(|_| de::Error::custom(InvalidRestrictionId(text.to_string())))?;
                    ids.push(id);
                }
            }
        }
        Ok(RestrictionIds::new(ids))
    }
}

impl<'de> Deserialize<'de> for RestrictionIds {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RestrictionIdsVisitor)
    }
}
