//! Compiler integration tests

use relational_model::compiler::{CompileError, Compiler, CompilerConfig, compile_model};
use relational_model::design::{Annotation, AnnotationKeys, Design, Member, TypeDefinition};
use relational_model::models::{Datatype, Relationship};

fn blog() -> Design {
    Design::from_yaml_str(include_str!("fixtures/blog.yaml")).unwrap()
}

mod design_compile_tests {
    use super::*;

    #[test]
    fn test_compile_blog_design() {
        let result = Compiler::new().compile_design(&blog());

        let names: Vec<&str> = result.models.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Post", "Tag", "User"]);

        let failed: Vec<&str> = result.errors.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(failed, vec!["Labels", "Session"]);
        assert!(matches!(
            result.errors[0].error,
            CompileError::UnsupportedAggregateShape { found: "array", .. }
        ));
        assert!(matches!(
            result.errors[1].error,
            CompileError::InvalidCacheDuration { .. }
        ));
    }

    #[test]
    fn test_user_model() {
        let result = Compiler::new().compile_design(&blog());
        let user = result.model("User").unwrap();

        assert_eq!(user.table_name.as_deref(), Some("users"));
        assert!(user.cached);
        assert_eq!(user.cache_duration, 600);
        assert!(user.role_based);
        assert!(!user.exclude_media);
        assert_eq!(user.description.as_deref(), Some("Registered account"));

        assert_eq!(user.primary_key_columns(), vec!["ID"]);
        assert!(!user.fields["email"].nullable);
        assert_eq!(user.fields["homepageUrl"].name, "HomepageURL");

        let created = &user.fields["createdAt"];
        assert!(created.timestamp && !created.nullable);
        let deleted = &user.fields["deletedAt"];
        assert!(deleted.timestamp && deleted.nullable);

        assert_eq!(
            user.fields["posts"].relationship,
            Some(Relationship::HasMany("Post".to_string()))
        );
        assert!(user.relationship_names.has_many.contains("Post"));
    }

    #[test]
    fn test_user_field_order() {
        let result = Compiler::new().compile_design(&blog());
        let user = result.model("User").unwrap();

        let order: Vec<&str> = user.ordered_fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            order,
            vec!["ID", "Email", "HomepageURL", "Posts", "CreatedAt", "DeletedAt", "UpdatedAt"]
        );
    }

    #[test]
    fn test_post_model() {
        let result = Compiler::new().compile_design(&blog());
        let post = result.model("Post").unwrap();

        assert!(post.exclude_media);

        let title = &post.fields["title"];
        assert!(title.aliased);
        assert_eq!(title.column_name, "headline");
        assert!(!title.nullable);

        let body = &post.fields["body"];
        assert!(!body.aliased);
        assert_eq!(body.column_name, body.name);
        assert_eq!(body.raw_type.as_deref(), Some("type:text"));

        assert_eq!(post.fields["authorId"].name, "AuthorID");
        assert!(post.relationship_names.belongs_to.contains("User"));
        assert!(post.relationship_names.many_to_many.contains("Tag"));
        assert_eq!(
            post.fields["tagIds"].datatype,
            Datatype::Array(Box::new(Datatype::Integer))
        );
    }

    #[test]
    fn test_explicit_primary_key_without_id() {
        let result = Compiler::new().compile_design(&blog());
        let tag = result.model("Tag").unwrap();

        assert_eq!(tag.primary_keys.len(), 1);
        assert_eq!(tag.primary_keys[0].name, "Slug");
        assert_eq!(tag.primary_key_predicate().as_deref(), Some("Slug = ?"));
    }

    #[test]
    fn test_recompile_is_identical() {
        let design = blog();
        let first = Compiler::new().compile_design(&design);
        let second = Compiler::new().compile_design(&design);

        assert_eq!(first.models, second.models);
        assert_eq!(first.errors, second.errors);
    }
}

mod naming_tests {
    use super::*;

    #[test]
    fn test_id_suffix_always_uppercase() {
        for member in ["userId", "user_id", "UserId", "userID", "USER_ID", "owner-id"] {
            let definition = TypeDefinition::object([(member, Member::new("integer"))]);
            let model = compile_model("Thing", &definition).unwrap();
            let name = &model.fields[member].name;
            assert!(name.ends_with("ID"), "{} compiled to {}", member, name);
            assert!(!name.ends_with("Id"), "{} compiled to {}", member, name);
        }
    }

    #[test]
    fn test_canonical_id_is_primary_key() {
        for member in ["id", "Id", "ID"] {
            let definition = TypeDefinition::object([
                (member, Member::new("integer")),
                ("name", Member::new("string")),
            ]);
            let model = compile_model("Thing", &definition).unwrap();
            assert!(!model.primary_keys.is_empty(), "{} should be a key", member);
        }
    }
}

mod config_tests {
    use super::*;

    #[test]
    fn test_custom_annotation_prefix() {
        let config = CompilerConfig::builder().annotation_prefix("gorma#").build();
        let compiler = Compiler::with_config(config);
        let keys = AnnotationKeys::new("gorma#");

        let definition = TypeDefinition::object([(
            "ownerId",
            Member::new("integer").annotate(&keys.key(Annotation::BelongsTo), "User"),
        )])
        .annotate(&keys.key(Annotation::TableName), "things");

        let model = compiler.compile_model("Thing", &definition).unwrap();
        assert_eq!(model.table_name.as_deref(), Some("things"));
        assert!(model.relationship_names.belongs_to.contains("User"));

        // Default-prefixed keys are not recognized under a custom prefix
        let default_keys = AnnotationKeys::default();
        let definition = TypeDefinition::object([("id", Member::new("integer"))])
            .annotate(&default_keys.key(Annotation::TableName), "ignored");
        let model = compiler.compile_model("Thing", &definition).unwrap();
        assert_eq!(model.table_name, None);
    }

    #[test]
    fn test_keep_model_suffix() {
        let config = CompilerConfig::builder().strip_model_suffix(false).build();
        let definition = TypeDefinition::object([("id", Member::new("integer"))]);

        let model = Compiler::with_config(config)
            .compile_model("AuditModel", &definition)
            .unwrap();
        assert_eq!(model.name, "AuditModel");
    }
}
