use std::collections::BTreeSet;

use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
/// Local contract violations on an entity record. These never involve I/O.
pub enum FieldError {
    #[error("field `{field}` is read-only")]
    ReadOnly { field: String },

    #[error("field `{field}` is not available until the entity is loaded")]
    NotLoaded { field: String },

    #[error("field `{field}` is not a {expected}")]
    UnexpectedType {
        field: String,
        expected: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq)]
/// Field record of a server-side entity with dirty tracking.
///
/// Invariants:
/// - fields listed as read-only are never written through [`EntityData::set`],
/// - a key is in the dirty set only if it was written locally since the last load/save,
/// - custom variables written through [`EntityData::set_var`] are tracked by name, so a
///   save carries only those variables and not the whole `vars` object,
/// - a record that is not loaded only answers for the fields it was constructed with.
pub struct EntityData {
    fields: Map<String, Value>,
    dirty: BTreeSet<String>,
    dirty_vars: BTreeSet<String>,
    loaded: bool,
    read_only: &'static [&'static str],
}

impl EntityData {
    pub const VARS: &'static str = "vars";

    pub fn new(fields: Map<String, Value>, loaded: bool, read_only: &'static [&'static str]) -> Self {
        Self {
            fields,
            dirty: BTreeSet::new(),
            dirty_vars: BTreeSet::new(),
            loaded,
            read_only,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_read_only(&self, field: &str) -> bool {
        self.read_only.contains(&field)
    }

    /// Look up a field.
    ///
    /// Returns `Ok(None)` for a field the loaded record does not carry and
    /// [`FieldError::NotLoaded`] when a handle-only record is asked for a field it does not have.
    pub fn get(&self, field: &str) -> Result<Option<&Value>, FieldError> {
        match self.fields.get(field) {
            Some(Value::Null) => Ok(None),
            Some(value) => Ok(Some(value)),
            None if self.loaded => Ok(None),
            None => Err(FieldError::NotLoaded {
                field: field.to_owned(),
            }),
        }
    }

    pub fn get_str(&self, field: &str) -> Result<Option<&str>, FieldError> {
        match self.get(field)? {
            None => Ok(None),
            Some(Value::String(value)) => Ok(Some(value)),
            Some(_) => Err(unexpected(field, "string")),
        }
    }

    pub fn get_i64(&self, field: &str) -> Result<Option<i64>, FieldError> {
        match self.get(field)? {
            None => Ok(None),
            Some(value) => value.as_i64().map(Some).ok_or_else(|| unexpected(field, "integer")),
        }
    }

    pub fn get_f64(&self, field: &str) -> Result<Option<f64>, FieldError> {
        match self.get(field)? {
            None => Ok(None),
            Some(value) => value.as_f64().map(Some).ok_or_else(|| unexpected(field, "number")),
        }
    }

    pub fn get_bool(&self, field: &str) -> Result<Option<bool>, FieldError> {
        match self.get(field)? {
            None => Ok(None),
            Some(value) => value.as_bool().map(Some).ok_or_else(|| unexpected(field, "boolean")),
        }
    }

    pub fn get_object(&self, field: &str) -> Result<Option<&Map<String, Value>>, FieldError> {
        match self.get(field)? {
            None => Ok(None),
            Some(value) => value.as_object().map(Some).ok_or_else(|| unexpected(field, "object")),
        }
    }

    /// String array field, e.g. `label_ids`.
    pub fn get_str_list(&self, field: &str) -> Result<Vec<&str>, FieldError> {
        match self.get(field)? {
            None => Ok(Vec::new()),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| item.as_str().ok_or_else(|| unexpected(field, "string array")))
                .collect(),
            Some(_) => Err(unexpected(field, "string array")),
        }
    }

    /// Write a field locally and mark it dirty.
    pub fn set(&mut self, field: &str, value: Value) -> Result<(), FieldError> {
        if self.is_read_only(field) {
            return Err(FieldError::ReadOnly {
                field: field.to_owned(),
            });
        }
        self.fields.insert(field.to_owned(), value);
        self.dirty.insert(field.to_owned());
        Ok(())
    }

    /// Write one custom variable and mark it dirty. `Value::Null` deletes it server-side.
    pub fn set_var(&mut self, name: &str, value: Value) -> Result<(), FieldError> {
        if self.is_read_only(Self::VARS) {
            return Err(FieldError::ReadOnly {
                field: Self::VARS.to_owned(),
            });
        }
        self.vars_mut().insert(name.to_owned(), value);
        self.dirty_vars.insert(name.to_owned());
        Ok(())
    }

    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty() || !self.dirty_vars.is_empty()
    }

    pub fn dirty_keys(&self) -> impl Iterator<Item = &str> {
        let vars = (!self.dirty_vars.is_empty() && !self.dirty.contains(Self::VARS))
            .then_some(Self::VARS);
        self.dirty.iter().map(String::as_str).chain(vars)
    }

    /// Snapshot of the dirty fields with their current values.
    ///
    /// Unless `vars` was replaced as a whole, it only carries the variables written
    /// through [`EntityData::set_var`].
    pub fn dirty_fields(&self) -> Map<String, Value> {
        let mut body: Map<String, Value> = self
            .dirty
            .iter()
            .filter_map(|key| self.fields.get(key).map(|value| (key.clone(), value.clone())))
            .collect();
        if !self.dirty_vars.is_empty() && !self.dirty.contains(Self::VARS) {
            body.insert(Self::VARS.to_owned(), Value::Object(self.dirty_var_values()));
        }
        body
    }

    /// Mark the record as saved. Variables deleted with `Value::Null` are dropped locally.
    pub fn clear_dirty(&mut self) {
        let vars_written = !self.dirty_vars.is_empty() || self.dirty.contains(Self::VARS);
        self.dirty.clear();
        self.dirty_vars.clear();
        if vars_written {
            if let Some(Value::Object(vars)) = self.fields.get_mut(Self::VARS) {
                vars.retain(|_, value| !value.is_null());
            }
        }
    }

    /// Replace the record with a freshly fetched one.
    ///
    /// Locally dirty values win. Dirty variables are merged into the fetched `vars`.
    pub fn replace_loaded(&mut self, mut fields: Map<String, Value>) {
        for key in &self.dirty {
            if let Some(value) = self.fields.get(key) {
                fields.insert(key.clone(), value.clone());
            }
        }
        let local_vars = self.dirty_var_values();
        self.fields = fields;
        self.loaded = true;
        if !local_vars.is_empty() && !self.dirty.contains(Self::VARS) {
            self.vars_mut().extend(local_vars);
        }
    }

    fn vars_mut(&mut self) -> &mut Map<String, Value> {
        let vars = self
            .fields
            .entry(Self::VARS)
            .or_insert_with(|| Value::Object(Map::new()));
        if !vars.is_object() {
            *vars = Value::Object(Map::new());
        }
        match vars {
            Value::Object(map) => map,
            _ => unreachable!("vars was just made an object"),
        }
    }

    fn dirty_var_values(&self) -> Map<String, Value> {
        let Some(Value::Object(vars)) = self.fields.get(Self::VARS) else {
            return Map::new();
        };
        self.dirty_vars
            .iter()
            .filter_map(|name| vars.get(name).map(|value| (name.clone(), value.clone())))
            .collect()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

fn unexpected(field: &str, expected: &'static str) -> FieldError {
    FieldError::UnexpectedType {
        field: field.to_owned(),
        expected,
    }
}
