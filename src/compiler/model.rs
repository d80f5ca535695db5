//! Model compilation

use tracing::debug;

use super::{CompileError, Compiler};
use crate::design::{Annotation, TypeDefinition};
use crate::models::Model;

impl Compiler {
    /// Compile one annotated aggregate into a model
    ///
    /// Members are compiled in lexicographic name order, so the primary-key
    /// list is stable across runs. Any field error aborts the whole model.
    pub fn compile_model(
        &self,
        name: &str,
        definition: &TypeDefinition,
    ) -> Result<Model, CompileError> {
        let members = definition
            .members()
            .ok_or_else(|| CompileError::UnsupportedAggregateShape {
                model: name.to_string(),
                found: definition.body.shape_name(),
            })?;

        let mut model = Model::new(self.naming.entity_name(name));
        self.parse_options(&mut model, name, definition)?;

        let mut member_names: Vec<&String> = members.keys().collect();
        member_names.sort();

        for member_name in member_names {
            let mut field = self.compile_field(member_name, &members[member_name])?;
            // The aggregate's required list wins over the member's own flags, timestamps included.
            if definition.is_required(member_name) {
                field.nullable = false;
            }
            if field.primary_key {
                model.primary_keys.push(field.clone());
            }
            if let Some(relationship) = &field.relationship {
                model.relationship_names.insert(relationship);
            }
            model.fields.insert(member_name.clone(), field);
        }

        debug!(
            aggregate = name,
            model = %model.name,
            fields = model.fields.len(),
            primary_keys = model.primary_keys.len(),
            "Compiled model"
        );
        Ok(model)
    }

    /// Read table-level options from the aggregate's own annotations
    fn parse_options(
        &self,
        model: &mut Model,
        name: &str,
        definition: &TypeDefinition,
    ) -> Result<(), CompileError> {
        let annotations = &definition.annotations;

        if let Some(value) = self.keys.get(annotations, Annotation::Cached) {
            model.cached = true;
            model.cache_duration = value.parse::<i64>().map_err(|source| {
                CompileError::InvalidCacheDuration {
                    model: name.to_string(),
                    value: value.to_string(),
                    source,
                }
            })?;
        }
        if let Some(value) = self.keys.get(annotations, Annotation::SqlTag) {
            model.sql_tag = Some(value.to_string());
        }
        model.dynamic_table_name = self.keys.has(annotations, Annotation::DynamicTableName);
        model.role_based = self.keys.has(annotations, Annotation::RoleBased);
        model.exclude_media = self.keys.has(annotations, Annotation::NoMedia);
        if let Some(value) = self.keys.get(annotations, Annotation::TableName) {
            model.table_name = Some(value.to_string());
        }
        if let Some(value) = self.keys.get(annotations, Annotation::Alias) {
            model.alias = Some(value.to_string());
        }
        if !definition.description.is_empty() {
            model.description = Some(definition.description.clone());
        }
        Ok(())
    }
}
