//! Free-form metadata attached to a series.

use std::collections::BTreeMap;

/// Descriptive metadata for a series (name, unit, location, ...).
///
/// The pipeline never interprets these fields; it copies them from the input
/// series onto the output series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesMeta {
    name: Option<String>,
    unit: Option<String>,
    location: Option<String>,
    extra: BTreeMap<String, String>,
}

impl SeriesMeta {
    /// Creates empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the series name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the measurement unit.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Sets the station or grid-cell location label.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Adds an arbitrary key/value attribute.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Series name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Measurement unit.
    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    /// Location label.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Extra attributes in key order.
    pub fn attrs(&self) -> &BTreeMap<String, String> {
        &self.extra
    }
}
