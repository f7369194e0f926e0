//! Table → model descriptor aggregation.

use std::collections::HashSet;

use sqlshape_core::{ModelDescriptor, ModelSet, Result, SchemaError};

use crate::column::TableSnapshot;
use crate::config::TypeConfig;
use crate::naming;
use crate::resolve::TypeResolver;

/// Builds model descriptors from table snapshots.
#[derive(Debug, Clone)]
pub struct ModelDescriptorBuilder {
    config: TypeConfig,
}

impl ModelDescriptorBuilder {
    pub fn new(config: TypeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TypeConfig {
        &self.config
    }

    /// Resolve every column of `table` in declared order.
    pub fn build(&self, table: &TableSnapshot) -> Result<ModelDescriptor> {
        let resolver = TypeResolver::new(&self.config);
        let mut seen = HashSet::new();
        let mut fields = Vec::with_capacity(table.columns.len());
        for column in &table.columns {
            let field = resolver.resolve(column)?;
            if !seen.insert(field.field_name.clone()) {
                return Err(SchemaError::for_table(
                    &table.name,
                    format!(
                        "Columns map to the same field name '{}'",
                        field.field_name
                    ),
                )
                .into());
            }
            fields.push(field);
        }

        let model = ModelDescriptor::new(
            naming::model_name(&table.name),
            naming::accessor_name(&table.name),
            table.name.clone(),
            fields,
        );
        tracing::debug!(
            table = %table.name,
            model = %model.model_name,
            fields = model.fields().len(),
            primary_key = model.primary_key_view().len(),
            "Built model descriptor"
        );
        Ok(model)
    }

    /// Build every table. Any failure aborts the whole set.
    pub fn build_all(&self, tables: &[TableSnapshot]) -> Result<ModelSet> {
        let mut names = HashSet::new();
        let mut models = Vec::with_capacity(tables.len());
        for table in tables {
            let model = self.build(table)?;
            if !names.insert(model.model_name.clone()) {
                return Err(SchemaError::for_table(
                    &table.name,
                    format!("Tables map to the same model name '{}'", model.model_name),
                )
                .into());
            }
            models.push(model);
        }
        tracing::info!(models = models.len(), "Resolved schema snapshot");
        Ok(ModelSet::new(models))
    }
}

/// Build one model descriptor with `config`.
pub fn build(table: &TableSnapshot, config: &TypeConfig) -> Result<ModelDescriptor> {
    ModelDescriptorBuilder::new(config.clone()).build(table)
}

/// Build a model set with `config`.
pub fn build_all(tables: &[TableSnapshot], config: &TypeConfig) -> Result<ModelSet> {
    ModelDescriptorBuilder::new(config.clone()).build_all(tables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{ColumnMetadata, KeyKind};
    use sqlshape_core::{CastKind, Error, Presence};

    fn posts() -> TableSnapshot {
        TableSnapshot::new(
            "blog_posts",
            vec![
                ColumnMetadata::new("id", "int unsigned")
                    .primary_key()
                    .extra("auto_increment"),
                ColumnMetadata::new("title", "varchar(200)"),
                ColumnMetadata::new("status", "enum('draft','live')").with_default("draft"),
                ColumnMetadata::new("created_at", "datetime")
                    .with_default("CURRENT_TIMESTAMP")
                    .extra("DEFAULT_GENERATED"),
                ColumnMetadata::new("slug", "varchar(200)")
                    .key(KeyKind::Unique)
                    .extra("VIRTUAL GENERATED"),
                ColumnMetadata::new("notes", "text")
                    .nullable()
                    .with_null_default()
                    .extra("INVISIBLE"),
            ],
        )
    }

    #[test]
    fn test_build_names_and_order() {
        let model = build(&posts(), &TypeConfig::default()).unwrap();
        assert_eq!(model.model_name, "BlogPosts");
        assert_eq!(model.accessor_name, "blogPosts");
        assert_eq!(model.table_name, "blog_posts");
        let names: Vec<_> = model.fields().iter().map(|f| f.field_name.as_str()).collect();
        assert_eq!(names, vec!["id", "title", "status", "createdAt", "slug", "notes"]);
        assert_eq!(model.field("createdAt").unwrap().cast_kind, CastKind::Date);
    }

    #[test]
    fn test_presence_views() {
        let model = build(&posts(), &TypeConfig::default()).unwrap();

        assert_eq!(model.base_view().presence("notes"), Some(Presence::Optional));
        assert_eq!(model.base_view().presence("slug"), Some(Presence::Required));

        let pk: Vec<_> = model.primary_key_view().required().collect();
        assert_eq!(pk, vec!["id"]);

        let create = model.create_view();
        assert_eq!(create.presence("id"), Some(Presence::Optional));
        assert_eq!(create.presence("title"), Some(Presence::Required));
        assert_eq!(create.presence("status"), Some(Presence::Optional));
        assert_eq!(create.presence("createdAt"), Some(Presence::Optional));
        assert_eq!(create.presence("notes"), Some(Presence::Optional));
        assert!(!create.contains("slug"));

        let update = model.update_view();
        assert!(!update.contains("id"));
        assert!(!update.contains("slug"));
        assert!(update.entries().iter().all(|e| e.presence == Presence::Optional));
        assert_eq!(update.len(), 4);
    }

    #[test]
    fn test_duplicate_field_names_rejected() {
        let table = TableSnapshot::new(
            "t",
            vec![
                ColumnMetadata::new("user_id", "int"),
                ColumnMetadata::new("userId", "int"),
            ],
        );
        let err = build(&table, &TypeConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Schema(ref e) if e.table.as_deref() == Some("t")));
    }

    #[test]
    fn test_build_all_lookup() {
        let users = TableSnapshot::new(
            "users",
            vec![ColumnMetadata::new("id", "int").primary_key()],
        );
        let set = build_all(&[posts(), users], &TypeConfig::default()).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get("blog_posts").unwrap().model_name, "BlogPosts");
        assert_eq!(set.get("Users").unwrap().table_name, "users");
        assert!(set.get("comments").is_none());
    }

    #[test]
    fn test_build_is_deterministic() {
        let config = TypeConfig::default();
        assert_eq!(build(&posts(), &config).unwrap(), build(&posts(), &config).unwrap());
    }
}
