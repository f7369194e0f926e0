//! Model descriptors and their presence views.
//!
//! A [`ModelDescriptor`] aggregates one table's fields in column order and
//! derives four [`PresenceView`]s that tell consumers which fields belong in
//! a row read, a primary-key lookup, an insert and an update.

use serde::Serialize;

use crate::field::FieldDescriptor;

/// Whether a field must be supplied in a given view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    Required,
    Optional,
}

/// One field's entry in a presence view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceEntry {
    pub field_name: String,
    pub presence: Presence,
}

/// Projection of a model's fields for one operation.
///
/// Fields absent from the view are omitted for that operation entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PresenceView {
    entries: Vec<PresenceEntry>,
}

impl PresenceView {
    fn from_fields<F>(fields: &[FieldDescriptor], mut classify: F) -> Self
    where
        F: FnMut(&FieldDescriptor) -> Option<Presence>,
    {
        let entries = fields
            .iter()
            .filter_map(|f| {
                classify(f).map(|presence| PresenceEntry {
                    field_name: f.field_name.clone(),
                    presence,
                })
            })
            .collect();
        Self { entries }
    }

    /// Presence of `field_name`, or `None` if the view omits it.
    pub fn presence(&self, field_name: &str) -> Option<Presence> {
        self.entries
            .iter()
            .find(|e| e.field_name == field_name)
            .map(|e| e.presence)
    }

    pub fn contains(&self, field_name: &str) -> bool {
        self.presence(field_name).is_some()
    }

    /// Field names with [`Presence::Required`].
    pub fn required(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|e| e.presence == Presence::Required)
            .map(|e| e.field_name.as_str())
    }

    pub fn entries(&self) -> &[PresenceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolved per-table descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDescriptor {
    /// Type name for the row model (e.g. `BlogPost`).
    pub model_name: String,
    /// Per-table accessor name (e.g. `blogPost`).
    pub accessor_name: String,
    pub table_name: String,
    fields: Vec<FieldDescriptor>,
    base: PresenceView,
    primary_key: PresenceView,
    create: PresenceView,
    update: PresenceView,
}

impl ModelDescriptor {
    /// Aggregate `fields` (in column order) and compute the presence views.
    pub fn new(
        model_name: impl Into<String>,
        accessor_name: impl Into<String>,
        table_name: impl Into<String>,
        fields: Vec<FieldDescriptor>,
    ) -> Self {
        let base = PresenceView::from_fields(&fields, |f| {
            Some(if f.is_invisible {
                Presence::Optional
            } else {
                Presence::Required
            })
        });
        let primary_key = PresenceView::from_fields(&fields, |f| {
            f.is_primary_key.then_some(Presence::Required)
        });
        let create = PresenceView::from_fields(&fields, |f| {
            if f.is_generated_always {
                None
            } else if f.is_optional_on_create() {
                Some(Presence::Optional)
            } else {
                Some(Presence::Required)
            }
        });
        let update = PresenceView::from_fields(&fields, |f| {
            (!f.is_primary_key && !f.is_generated_always).then_some(Presence::Optional)
        });

        Self {
            model_name: model_name.into(),
            accessor_name: accessor_name.into(),
            table_name: table_name.into(),
            fields,
            base,
            primary_key,
            create,
            update,
        }
    }

    /// All fields in column order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Look up a field by its identifier-cased name.
    pub fn field(&self, field_name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.field_name == field_name)
    }

    /// Look up a field by its database column name.
    pub fn field_by_column(&self, column_name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.column_name == column_name)
    }

    /// Primary-key fields in column order.
    pub fn primary_key_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.is_primary_key)
    }

    pub fn has_primary_key(&self) -> bool {
        self.fields.iter().any(|f| f.is_primary_key)
    }

    /// The primary key field if the key is a single auto-increment column.
    pub fn auto_increment_key(&self) -> Option<&FieldDescriptor> {
        let mut keys = self.primary_key_fields();
        match (keys.next(), keys.next()) {
            (Some(only), None) if only.is_auto_increment => Some(only),
            _ => None,
        }
    }

    /// Row-read view: every field; invisible ones optional.
    pub fn base_view(&self) -> &PresenceView {
        &self.base
    }

    pub fn primary_key_view(&self) -> &PresenceView {
        &self.primary_key
    }

    /// Insert view: generated columns omitted, defaulted ones optional.
    pub fn create_view(&self) -> &PresenceView {
        &self.create
    }

    /// Update view: primary-key and generated columns omitted.
    pub fn update_view(&self) -> &PresenceView {
        &self.update
    }
}

/// The resolved descriptors of one schema snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ModelSet {
    models: Vec<ModelDescriptor>,
}

impl ModelSet {
    pub fn new(models: Vec<ModelDescriptor>) -> Self {
        Self { models }
    }

    /// Find a model by model name, accessor name or table name.
    pub fn get(&self, name: &str) -> Option<&ModelDescriptor> {
        self.models
            .iter()
            .find(|m| m.model_name == name || m.accessor_name == name || m.table_name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModelDescriptor> {
        self.models.iter()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
