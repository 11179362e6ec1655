//! Integration tests for include path resolution.
//!
//! The fixture mirrors a small blogging application: users write posts and
//! comments, and both users and phones carry a polymorphic `image` that is
//! either a profile picture or a gallery.

use jolt::prelude::*;
use jolt::query::ErrorCode;
use jolt::schema::DEFAULT_MAX_DEPTH;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn registry() -> SchemaRegistry {
    SchemaRegistry::builder()
        .register(
            Schema::new("users", "App\\Models\\User")
                .field(Attribute::new("email"))
                .field(Attribute::new("name"))
                .field(Relation::has_many("comments").can_count())
                .field(Relation::has_many("posts").can_count())
                .field(Relation::belongs_to("country"))
                .field(Relation::has_one("phone"))
                .field(Relation::morph_to("image", ["profiles", "galleries"]))
                .field(Relation::belongs_to_many("roles").can_count()),
        )
        .register(
            Schema::new("posts", "App\\Models\\Post")
                .field(Attribute::new("title"))
                .field(Relation::belongs_to("author").inverse_type("users").relation_name("user"))
                .field(Relation::has_many("comments").can_count())
                .field(Relation::belongs_to_many("tags")),
        )
        .register(
            Schema::new("comments", "App\\Models\\Comment")
                .field(Attribute::new("content"))
                .field(Relation::belongs_to("author").inverse_type("users").relation_name("user"))
                .field(Relation::belongs_to("post"))
                .field(Relation::belongs_to_many("tags")),
        )
        .register(Schema::new("countries", "App\\Models\\Country").field(Relation::has_many("users")))
        .register(
            Schema::new("phones", "App\\Models\\Phone")
                .field(Relation::belongs_to("owner").inverse_type("users").relation_name("user"))
                .field(Relation::morph_to("image", ["profiles", "galleries"])),
        )
        .register(Schema::new("roles", "App\\Models\\Role"))
        .register(Schema::new("tags", "App\\Models\\Tag"))
        .register(
            Schema::new("profiles", "App\\Models\\Profile")
                .field(Attribute::new("description"))
                .field(Relation::has_one("avatar").inverse_type("tags")),
        )
        .register(
            Schema::new("galleries", "App\\Models\\Gallery")
                .field(Relation::has_many("photos").inverse_type("tags")),
        )
        .build()
        .expect("fixture registry is valid")
}

fn resolve(resource_type: &str, include: &str) -> QueryResult<EagerLoadSpec> {
    let registry = registry();
    let paths: IncludePaths = include.parse()?;
    EagerLoader::for_type(&registry, resource_type)?.to_relations(&paths)
}

fn resolve_permissive(resource_type: &str, include: &str) -> QueryResult<EagerLoadSpec> {
    let registry = registry();
    let paths: IncludePaths = include.parse()?;
    EagerLoader::for_type(&registry, resource_type)?
        .skip_missing_fields()
        .to_relations(&paths)
}

fn as_json(spec: &EagerLoadSpec) -> Value {
    serde_json::to_value(spec).expect("spec serializes")
}

#[test]
fn test_single_relation_yields_one_terminal_entry() {
    for relation in ["comments", "posts", "country", "phone", "roles"] {
        let spec = resolve("users", relation).unwrap();

        assert_eq!(spec.len(), 1, "{relation}");
        let (key, nested) = spec.iter().next().unwrap();
        assert_eq!(key, &LoadKey::Relation(relation.into()));
        assert!(nested.is_terminal());
    }
}

#[test]
fn test_mapper_relation_name_is_the_key() {
    let spec = resolve("posts", "author").unwrap();
    assert_eq!(as_json(&spec), json!({ "user": {} }));
}

#[test]
fn test_shared_prefix_becomes_one_group() {
    let spec = resolve("users", "comments,comments.author").unwrap();

    assert_eq!(spec.len(), 1);
    let comments = spec.get("comments").unwrap();
    assert_eq!(comments.len(), 1);
    assert!(comments.get("user").unwrap().is_terminal());
}

#[test]
fn test_sibling_includes_nest_under_their_parent() {
    let spec = resolve("users", "comments.author,comments.tags").unwrap();

    assert_eq!(as_json(&spec), json!({ "comments": { "user": {}, "tags": {} } }));
}

#[test]
fn test_deep_paths() {
    let spec = resolve("users", "posts.comments.author.country,posts.tags").unwrap();

    assert_eq!(
        as_json(&spec),
        json!({
            "posts": {
                "comments": { "user": { "country": {} } },
                "tags": {}
            }
        })
    );
    assert_eq!(
        spec.to_paths(),
        vec![
            "posts",
            "posts.comments",
            "posts.comments.user",
            "posts.comments.user.country",
            "posts.tags",
        ]
    );
}

#[test]
fn test_resolution_is_idempotent() {
    let registry = registry();
    let paths: IncludePaths = "comments.author,image.avatar,posts.tags,country.users"
        .parse()
        .unwrap();
    let loader = EagerLoader::for_type(&registry, "users").unwrap();

    let first = loader.to_relations(&paths).unwrap();
    let second = loader.to_relations(&paths).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.to_string(), second.to_string());
}

#[test]
fn test_bogus_path_strict_vs_permissive() {
    let err = resolve("users", "bogus").unwrap_err();
    assert_eq!(err.code, ErrorCode::UnresolvableRelation);

    let spec = resolve_permissive("users", "bogus").unwrap();
    assert!(spec.is_empty());
}

#[test]
fn test_invalid_nested_path_does_not_abort_siblings() {
    let spec = resolve_permissive("users", "comments.bogus,posts.tags,email").unwrap();

    assert_eq!(as_json(&spec), json!({ "comments": {}, "posts": { "tags": {} } }));
}

#[test]
fn test_polymorphic_fan_out_with_partial_sub_includes() {
    let spec = resolve("users", "image.avatar").unwrap();

    assert_eq!(
        as_json(&spec),
        json!({
            "App\\Models\\Profile": { "avatar": {} },
            "App\\Models\\Gallery": {}
        })
    );
}

#[test]
fn test_polymorphic_relation_without_suffix() {
    let spec = resolve("phones", "image").unwrap();

    let models: Vec<(&str, bool)> = spec
        .models()
        .map(|(model, nested)| (model.as_str(), nested.is_terminal()))
        .collect();
    assert_eq!(
        models,
        vec![("App\\Models\\Profile", true), ("App\\Models\\Gallery", true)]
    );
    assert_eq!(spec.relations().count(), 0);
}

#[test]
fn test_polymorphic_next_to_ordinary_relations() {
    let spec = resolve("phones", "owner.comments,image.photos").unwrap();

    assert_eq!(
        as_json(&spec),
        json!({
            "user": { "comments": {} },
            "App\\Models\\Profile": {},
            "App\\Models\\Gallery": { "photos": {} }
        })
    );
}

#[test]
fn test_polymorphic_below_ordinary_relation() {
    let spec = resolve("posts", "author.image.avatar").unwrap();

    assert_eq!(
        as_json(&spec),
        json!({
            "user": {
                "App\\Models\\Profile": { "avatar": {} },
                "App\\Models\\Gallery": {}
            }
        })
    );
}

#[test]
fn test_morph_groups_expose_their_name() {
    let registry = registry();
    let paths: IncludePaths = "owner,image.avatar".parse().unwrap();
    let loader = EagerLoader::for_type(&registry, "phones").unwrap();

    let morphs = loader.morphs(&paths);
    assert_eq!(morphs.len(), 1);
    assert_eq!(morphs[0].name(), "image");

    let all = morphs[0].all().unwrap();
    assert_eq!(all.len(), 2);
}

#[test]
fn test_unknown_resource_type() {
    let err = resolve("videos", "comments").unwrap_err();
    assert!(err.is_unknown_resource_type());
}

#[test]
fn test_malformed_include_parameter() {
    let err = resolve("users", "comments..author").unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidIncludePath);
}

#[test]
fn test_relationship_counts() {
    let registry = registry();
    let loader = EagerLoader::for_type(&registry, "users").unwrap();

    assert_eq!(loader.to_counts(["roles", "comments"]).unwrap(), vec!["roles", "comments"]);
    assert_eq!(
        loader.to_counts(["country"]).unwrap_err().code,
        ErrorCode::RelationNotCountable
    );
    assert_eq!(
        loader
            .skip_missing_fields()
            .to_counts(["country", "bogus", "posts"])
            .unwrap(),
        vec!["posts"]
    );
}

#[test]
fn test_registry_is_shareable_across_threads() {
    let registry = std::sync::Arc::new(registry());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let registry = std::sync::Arc::clone(&registry);
            std::thread::spawn(move || {
                let paths: IncludePaths = "comments.author,image".parse().unwrap();
                EagerLoader::for_type(&registry, "users")
                    .unwrap()
                    .to_relations(&paths)
                    .unwrap()
            })
        })
        .collect();

    let specs: Vec<EagerLoadSpec> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(specs.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn test_include_depth_limit() {
    let registry = registry();
    let loader = EagerLoader::for_type(&registry, "users").unwrap();

    // users -> comments -> user -> comments ... alternates through a cycle.
    let segments = |n: usize| -> IncludePaths {
        ["comments", "author"]
            .iter()
            .cycle()
            .take(n)
            .copied()
            .collect::<Vec<_>>()
            .join(".")
            .parse()
            .unwrap()
    };

    let spec = loader.to_relations(&segments(DEFAULT_MAX_DEPTH)).unwrap();
    assert_eq!(spec.to_paths().len(), DEFAULT_MAX_DEPTH);

    for loader in [loader, loader.skip_missing_fields()] {
        let err = loader.to_relations(&segments(DEFAULT_MAX_DEPTH + 1)).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidIncludePath);

        let err = loader.to_relations(&segments(2_000)).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidIncludePath);
    }
}
