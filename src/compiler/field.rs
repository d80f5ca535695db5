//! Field compilation

use tracing::{debug, warn};

use super::{Compiler, FieldCompileError};
use crate::design::{Annotation, Member};
use crate::models::{Datatype, Field, Relationship, RelationshipKind};

fn relationship_annotation(kind: RelationshipKind) -> Annotation {
    match kind {
        RelationshipKind::BelongsTo => Annotation::BelongsTo,
        RelationshipKind::HasOne => Annotation::HasOne,
        RelationshipKind::HasMany => Annotation::HasMany,
        RelationshipKind::ManyToMany => Annotation::ManyToMany,
    }
}

impl Compiler {
    /// Compile one annotated member into a field
    ///
    /// Only type translation can fail; every annotation step is a presence
    /// check.
    pub fn compile_field(&self, name: &str, member: &Member) -> Result<Field, FieldCompileError> {
        let datatype: Datatype = member.type_tag.parse().map_err(|source| FieldCompileError {
            member: name.to_string(),
            type_tag: member.type_tag.clone(),
            source,
        })?;

        let mut field = Field::new(self.naming.field_name(name), datatype);
        field.nullable = !member.required;

        self.parse_primary_key(&mut field, member);
        self.parse_raw_type(&mut field, member);
        self.parse_timestamps(&mut field, member, name);
        self.parse_alias(&mut field, member);
        self.parse_relationship(&mut field, member, name);
        if !member.description.is_empty() {
            field.description = Some(member.description.clone());
        }

        debug!(
            member = name,
            field = %field.name,
            datatype = %field.datatype,
            primary_key = field.primary_key,
            "Compiled field"
        );
        Ok(field)
    }

    fn parse_primary_key(&self, field: &mut Field, member: &Member) {
        if let Some(value) = self.keys.get(&member.annotations, Annotation::PrimaryKey)
            && value.contains(self.config.primary_key_marker.as_str())
        {
            field.primary_key = true;
        }
        if field.name.eq_ignore_ascii_case("id") {
            field.primary_key = true;
        }
    }

    fn parse_raw_type(&self, field: &mut Field, member: &Member) {
        if let Some(value) = self.keys.get(&member.annotations, Annotation::SqlTag) {
            field.raw_type = Some(value.to_string());
        }
    }

    // Applied in created, updated, deleted order; a deleted timestamp is always nullable.
    fn parse_timestamps(&self, field: &mut Field, member: &Member, name: &str) {
        let checks = [
            (Annotation::TimestampCreated, false),
            (Annotation::TimestampUpdated, false),
            (Annotation::TimestampDeleted, true),
        ];
        let mut declared = Vec::new();
        for (annotation, nullable) in checks {
            if self.keys.has(&member.annotations, annotation) {
                field.timestamp = true;
                field.datatype = Datatype::DateTime;
                field.nullable = nullable;
                declared.push(annotation.suffix());
            }
        }
        if declared.len() > 1 {
            warn!(
                member = name,
                declared = ?declared,
                nullable = field.nullable,
                "Member declares several timestamp kinds, keeping the last"
            );
        }
    }

    fn parse_alias(&self, field: &mut Field, member: &Member) {
        if let Some(column) = self.keys.get(&member.annotations, Annotation::Alias) {
            field.aliased = true;
            field.column_name = column.to_string();
        }
    }

    // Later kinds override earlier ones.
    fn parse_relationship(&self, field: &mut Field, member: &Member, name: &str) {
        let mut declared = 0;
        for kind in RelationshipKind::ALL {
            if let Some(target) = self
                .keys
                .get(&member.annotations, relationship_annotation(kind))
            {
                field.relationship = Some(Relationship::new(kind, target));
                declared += 1;
            }
        }
        if declared > 1
            && let Some(relationship) = &field.relationship
        {
            warn!(
                member = name,
                declared,
                kept = %relationship,
                "Member declares several relationships, keeping the last"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::CompilerConfig;
    use crate::design::AnnotationKeys;
    use crate::models::TypeError;

    fn key(annotation: Annotation) -> String {
        AnnotationKeys::default().key(annotation)
    }

    fn compile(name: &str, member: Member) -> Field {
        Compiler::new().compile_field(name, &member).unwrap()
    }

    #[test]
    fn test_plain_field() {
        let field = compile("email", Member::new("string").with_description("Login"));

        assert_eq!(field.name, "Email");
        assert_eq!(field.column_name, "Email");
        assert_eq!(field.datatype, Datatype::String);
        assert!(field.nullable);
        assert!(!field.primary_key);
        assert!(!field.timestamp);
        assert!(!field.aliased);
        assert_eq!(field.raw_type, None);
        assert_eq!(field.relationship, None);
        assert_eq!(field.description.as_deref(), Some("Login"));
    }

    #[test]
    fn test_required_member_not_nullable() {
        let field = compile("email", Member::new("string").required());
        assert!(!field.nullable);
    }

    #[test]
    fn test_implicit_primary_key() {
        for name in ["id", "Id", "ID"] {
            let field = compile(name, Member::new("integer"));
            assert_eq!(field.name, "ID");
            assert!(field.primary_key, "{} should be a primary key", name);
        }
        assert!(!compile("userId", Member::new("integer")).primary_key);
    }

    #[test]
    fn test_explicit_primary_key_marker() {
        let member = Member::new("uuid").annotate(&key(Annotation::PrimaryKey), "not null;primary_key");
        assert!(compile("code", member).primary_key);

        let member = Member::new("uuid").annotate(&key(Annotation::PrimaryKey), "unique");
        assert!(!compile("code", member).primary_key);
    }

    #[test]
    fn test_custom_primary_key_marker() {
        let compiler = Compiler::with_config(CompilerConfig::builder().primary_key_marker("pk").build());
        let member = Member::new("string").annotate(&key(Annotation::PrimaryKey), "pk");
        assert!(compiler.compile_field("code", &member).unwrap().primary_key);
    }

    #[test]
    fn test_raw_type_copied_verbatim() {
        let member = Member::new("string").annotate(&key(Annotation::SqlTag), "type:varchar(255)");
        assert_eq!(compile("slug", member).raw_type.as_deref(), Some("type:varchar(255)"));
    }

    #[test]
    fn test_created_and_updated_timestamps() {
        for annotation in [Annotation::TimestampCreated, Annotation::TimestampUpdated] {
            let field = compile("stamp", Member::new("string").annotate(&key(annotation), ""));
            assert!(field.timestamp);
            assert_eq!(field.datatype, Datatype::DateTime);
            assert!(!field.nullable);
        }
    }

    #[test]
    fn test_deleted_timestamp_nullable_even_when_required() {
        let member = Member::new("datetime")
            .required()
            .annotate(&key(Annotation::TimestampDeleted), "");
        let field = compile("deletedAt", member);
        assert!(field.timestamp);
        assert!(field.nullable);
    }

    #[test]
    fn test_deleted_overrides_created() {
        let member = Member::new("datetime")
            .annotate(&key(Annotation::TimestampCreated), "")
            .annotate(&key(Annotation::TimestampDeleted), "");
        assert!(compile("stamp", member).nullable);
    }

    #[test]
    fn test_created_and_updated_together() {
        let member = Member::new("string")
            .annotate(&key(Annotation::TimestampCreated), "")
            .annotate(&key(Annotation::TimestampUpdated), "");
        let field = compile("touchedAt", member);
        assert!(field.timestamp);
        assert_eq!(field.datatype, Datatype::DateTime);
        assert!(!field.nullable);
    }

    #[test]
    fn test_alias() {
        let member = Member::new("string").annotate(&key(Annotation::Alias), "first_name");
        let field = compile("firstName", member);
        assert!(field.aliased);
        assert_eq!(field.name, "FirstName");
        assert_eq!(field.column_name, "first_name");
    }

    #[test]
    fn test_belongs_to() {
        let member = Member::new("integer").annotate(&key(Annotation::BelongsTo), "User");
        let field = compile("authorId", member);
        assert_eq!(field.name, "AuthorID");
        assert_eq!(field.relationship, Some(Relationship::BelongsTo("User".to_string())));
    }

    #[test]
    fn test_relationship_precedence() {
        let member = Member::new("integer")
            .annotate(&key(Annotation::BelongsTo), "User")
            .annotate(&key(Annotation::HasMany), "Comment")
            .annotate(&key(Annotation::HasOne), "Profile");
        assert_eq!(
            compile("link", member).relationship,
            Some(Relationship::HasMany("Comment".to_string()))
        );

        let member = Member::new("integer")
            .annotate(&key(Annotation::ManyToMany), "Tag")
            .annotate(&key(Annotation::BelongsTo), "User");
        assert_eq!(
            compile("link", member).relationship,
            Some(Relationship::ManyToMany("Tag".to_string()))
        );
    }

    #[test]
    fn test_unprefixed_annotations_ignored() {
        let member = Member::new("string").annotate("alias", "other");
        assert!(!compile("name", member).aliased);
    }

    #[test]
    fn test_invalid_type() {
        let err = Compiler::new()
            .compile_field("weight", &Member::new("decimal"))
            .unwrap_err();
        assert_eq!(err.member, "weight");
        assert_eq!(err.type_tag, "decimal");
        assert_eq!(err.source, TypeError::Unknown("decimal".to_string()));
    }

    #[test]
    fn test_deeply_nested_type_is_an_error() {
        let tag = format!("{}integer{}", "array<".repeat(3000), ">".repeat(3000));
        let err = Compiler::new()
            .compile_field("matrix", &Member::new(&tag))
            .unwrap_err();
        assert_eq!(err.member, "matrix");
        assert!(matches!(err.source, TypeError::Malformed(_)));
    }
}
