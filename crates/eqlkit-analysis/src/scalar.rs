//! Scalar types a query parameter can be bound to

use serde::{Deserialize, Serialize, Serializer};

/// The closed set of scalar types the parameter editor knows how to encode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownScalarType {
    Uuid,
    Str,
    Bytes,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    Decimal,
    Bool,
    Datetime,
    Duration,
    Json,
    Bigint,
    LocalDatetime,
    LocalDate,
    LocalTime,
    RelativeDuration,
    DateDuration,
    Memory,
    PgVector,
}

impl KnownScalarType {
    pub const ALL: [KnownScalarType; 21] = [
        KnownScalarType::Uuid,
        KnownScalarType::Str,
        KnownScalarType::Bytes,
        KnownScalarType::Int16,
        KnownScalarType::Int32,
        KnownScalarType::Int64,
        KnownScalarType::Float32,
        KnownScalarType::Float64,
        KnownScalarType::Decimal,
        KnownScalarType::Bool,
        KnownScalarType::Datetime,
        KnownScalarType::Duration,
        KnownScalarType::Json,
        KnownScalarType::Bigint,
        KnownScalarType::LocalDatetime,
        KnownScalarType::LocalDate,
        KnownScalarType::LocalTime,
        KnownScalarType::RelativeDuration,
        KnownScalarType::DateDuration,
        KnownScalarType::Memory,
        KnownScalarType::PgVector,
    ];

    /// Fully qualified type name
    pub fn name(&self) -> &'static str {
        match self {
            KnownScalarType::Uuid => "std::uuid",
            KnownScalarType::Str => "std::str",
            KnownScalarType::Bytes => "std::bytes",
            KnownScalarType::Int16 => "std::int16",
            KnownScalarType::Int32 => "std::int32",
            KnownScalarType::Int64 => "std::int64",
            KnownScalarType::Float32 => "std::float32",
            KnownScalarType::Float64 => "std::float64",
            KnownScalarType::Decimal => "std::decimal",
            KnownScalarType::Bool => "std::bool",
            KnownScalarType::Datetime => "std::datetime",
            KnownScalarType::Duration => "std::duration",
            KnownScalarType::Json => "std::json",
            KnownScalarType::Bigint => "std::bigint",
            KnownScalarType::LocalDatetime => "cal::local_datetime",
            KnownScalarType::LocalDate => "cal::local_date",
            KnownScalarType::LocalTime => "cal::local_time",
            KnownScalarType::RelativeDuration => "cal::relative_duration",
            KnownScalarType::DateDuration => "cal::date_duration",
            KnownScalarType::Memory => "cfg::memory",
            KnownScalarType::PgVector => "ext::pgvector::vector",
        }
    }

    /// Exact match on the fully qualified name
    pub fn from_name(name: &str) -> Option<KnownScalarType> {
        Self::ALL.into_iter().find(|known| known.name() == name)
    }

    /// Match `name` as written in a cast, where the `std::` module may be
    /// left out
    pub fn lookup(name: &str) -> Option<KnownScalarType> {
        Self::from_name(name).or_else(|| Self::from_name(&format!("std::{name}")))
    }
}

impl Serialize for KnownScalarType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl std::fmt::Display for KnownScalarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A scalar type from the database schema, as reported by introspection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaScalar {
    pub name: String,
    /// Base types in declaration order; only the first one is followed
    #[serde(default)]
    pub extends: Vec<String>,
}

impl SchemaScalar {
    pub fn new(name: impl Into<String>, extends: &[&str]) -> Self {
        Self {
            name: name.into(),
            extends: extends.iter().map(|base| base.to_string()).collect(),
        }
    }
}
