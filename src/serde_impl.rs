use std::{fmt, marker::PhantomData};

use serde::{
    de::{self, SeqAccess, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::{matrix::Matrix, vector::Vector};

/// Caps the up-front allocation driven by an untrusted length prefix.
const MAX_PREALLOC: usize = 4096;

impl<T: Serialize> Serialize for Vector<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Vector<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(VectorVisitor(PhantomData))
    }
}

struct VectorVisitor<T>(PhantomData<T>);
impl<'de, T: Deserialize<'de>> Visitor<'de> for VectorVisitor<T> {
    type Value = Vector<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a sequence")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let capacity = seq.size_hint().unwrap_or(0).min(MAX_PREALLOC);
        let mut vec = Vector::with_capacity(capacity);
        while let Some(value) = seq.next_element()? {
            vec.push_back(value);
        }
        Ok(vec)
    }
}

#[derive(Serialize)]
#[serde(rename = "Matrix")]
struct MatrixRef<'a> {
    rows: usize,
    cols: usize,
    data: &'a Vector<Vector<i32>>,
}

#[derive(Deserialize)]
#[serde(rename = "Matrix")]
struct MatrixRepr {
    rows: usize,
    cols: usize,
    data: Vector<Vector<i32>>,
}

impl Serialize for Matrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        MatrixRef {
            rows: self.rows,
            cols: self.cols,
            data: &self.data,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Matrix {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let MatrixRepr { rows, cols, data } = MatrixRepr::deserialize(deserializer)?;
        check_shape(rows, cols, &data)?;
        Ok(Matrix { rows, cols, data })
    }
}

fn check_shape<E: de::Error>(
    rows: usize,
    cols: usize,
    data: &Vector<Vector<i32>>,
) -> Result<(), E> {
    if data.len() != rows {
        return Err(E::custom(format!("expected {rows} rows, found {}", data.len())));
    }
    if let Some(row) = data.iter().find(|row| row.len() != cols) {
        return Err(E::custom(format!(
            "expected {cols} columns, found a row of {}",
            row.len()
        )));
    }
    Ok(())
}
