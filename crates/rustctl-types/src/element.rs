//! Compact encoding of an element chain.
//!
//! Each element is stored as a flat array whose first entry is the element's
//! short name and whose remaining entries are its characteristic values:
//!
//! ```text
//! [["1", 1.0, 2.0], ["I", 1.0], ["PID", 2.0, 0.5, 0.1]]
//! ```

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One element of a chain: its short name and characteristic values
#[derive(Debug, Clone, PartialEq)]
pub struct ElementRecord {
    pub short_name: String,
    pub values: Vec<f64>,
}

impl ElementRecord {
    pub fn new(short_name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            short_name: short_name.into(),
            values,
        }
    }
}

impl Serialize for ElementRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        #[derive(Serialize)]
        #[serde(untagged)]
        enum Entry<'a> {
            Name(&'a str),
            Value(f64),
        }

        let mut seq = serializer.serialize_seq(Some(self.values.len() + 1))?;
        seq.serialize_element(&Entry::Name(&self.short_name))?;
        for value in &self.values {
            seq.serialize_element(&Entry::Value(*value))?;
        }
        seq.end()
    }
}

struct ElementRecordVisitor;

impl<'de> Visitor<'de> for ElementRecordVisitor {
    type Value = ElementRecord;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an array starting with a short name followed by numbers")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let short_name: String = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;

        let mut values = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(value) = seq.next_element::<f64>()? {
            values.push(value);
        }

        Ok(ElementRecord { short_name, values })
    }
}

impl<'de> Deserialize<'de> for ElementRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(ElementRecordVisitor)
    }
}

/// An ordered element chain in compact form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementSetup(pub Vec<ElementRecord>);

impl ElementSetup {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn records(&self) -> &[ElementRecord] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
