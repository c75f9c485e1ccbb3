//! JSON encoding of `f64` cells that keeps NaN and infinities.
//!
//! `serde_json` writes non-finite floats as `null` and refuses to read
//! them back. Finite cells are written as numbers, the others as the
//! strings `"NaN"`, `"inf"` and `"-inf"`.

use std::fmt;

use serde::de::{self, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const NAN: &str = "NaN";
const INF: &str = "inf";
const NEG_INF: &str = "-inf";

struct Cell(f64);

impl Serialize for Cell {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let value = self.0;
        if value.is_finite() {
            serializer.serialize_f64(value)
        } else if value.is_nan() {
            serializer.serialize_str(NAN)
        } else if value > 0.0 {
            serializer.serialize_str(INF)
        } else {
            serializer.serialize_str(NEG_INF)
        }
    }
}

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(CellVisitor).map(Cell)
    }
}

struct CellVisitor;

impl Visitor<'_> for CellVisitor {
    type Value = f64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or one of \"NaN\", \"inf\", \"-inf\"")
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<f64, E> {
        Ok(value)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<f64, E> {
        Ok(value as f64)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<f64, E> {
        Ok(value as f64)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<f64, E> {
        match value {
            NAN => Ok(f64::NAN),
            INF => Ok(f64::INFINITY),
            NEG_INF => Ok(f64::NEG_INFINITY),
            other => Err(E::invalid_value(Unexpected::Str(other), &self)),
        }
    }
}

/// `#[serde(with = "cells::series")]` for a `Vec<f64>`.
pub(crate) mod series {
    use super::{Cell, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(values: &[f64], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(values.iter().map(|&value| Cell(value)))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let cells = Vec::<Cell>::deserialize(deserializer)?;
        Ok(cells.into_iter().map(|cell| cell.0).collect())
    }
}

/// `#[serde(with = "cells::rows")]` for a `Vec<Vec<f64>>`.
pub(crate) mod rows {
    use super::{Cell, Deserialize, Deserializer, Serialize, Serializer};

    struct Row<'a>(&'a [f64]);

    impl Serialize for Row<'_> {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            super::series::serialize(self.0, serializer)
        }
    }

    pub fn serialize<S>(rows: &[Vec<f64>], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(rows.iter().map(|row| Row(row)))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Vec<f64>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rows = Vec::<Vec<Cell>>::deserialize(deserializer)?;
        Ok(rows
            .into_iter()
            .map(|row| row.into_iter().map(|cell| cell.0).collect())
            .collect())
    }
}
