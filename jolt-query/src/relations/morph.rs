//! Eager loading through polymorphic relations.

use indexmap::IndexMap;
use smol_str::SmolStr;
use tracing::trace;

use jolt_schema::{DEFAULT_MAX_DEPTH, ModelId, Relation, SchemaRegistry};

use crate::error::QueryResult;

use super::include::IncludePaths;
use super::loader::EagerLoader;
use super::spec::EagerLoadSpec;

/// Fans include paths out across every inverse type of a polymorphic
/// relation.
///
/// A path below a polymorphic relation may only make sense for some of its
/// concrete types, so each type is resolved with missing fields skipped.
/// Every inverse type gets an entry, even when none of the paths applied to
/// it: the relation itself still has to be loaded for that type.
#[derive(Debug, Clone)]
pub struct EagerLoadMorphs<'a> {
    registry: &'a SchemaRegistry,
    relation: &'a Relation,
    paths: IncludePaths,
    max_depth: usize,
}

impl<'a> EagerLoadMorphs<'a> {
    /// Create a resolver for a relation and the paths below it.
    pub fn new(registry: &'a SchemaRegistry, relation: &'a Relation, paths: IncludePaths) -> Self {
        Self {
            registry,
            relation,
            paths,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Limit the depth of the paths below the relation.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The JSON:API relation name.
    pub fn name(&self) -> &str {
        self.relation.name()
    }

    /// The name the mapper knows the relation by.
    pub fn mapper_relation_name(&self) -> SmolStr {
        self.relation.mapper_relation_name()
    }

    /// The relation being resolved.
    pub fn relation(&self) -> &'a Relation {
        self.relation
    }

    /// The paths below the relation.
    pub fn paths(&self) -> &IncludePaths {
        &self.paths
    }

    /// Resolve the paths for every inverse type, keyed by model, in the
    /// relation's declaration order.
    pub fn all(&self) -> QueryResult<IndexMap<ModelId, EagerLoadSpec>> {
        let mut morphs = IndexMap::new();

        for ty in self.relation.inverse_types() {
            let schema = self.registry.schema_for(ty)?;
            let spec = EagerLoader::new(self.registry, schema)
                .skip_missing_fields()
                .with_max_depth(self.max_depth)
                .to_relations(&self.paths)?;

            trace!(
                relation = %self.relation.name(),
                model = %schema.model(),
                nested = spec.len(),
                "Resolved polymorphic inverse type"
            );

            morphs.entry(schema.model().clone()).or_insert_with(EagerLoadSpec::new).merge(spec);
        }

        Ok(morphs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jolt_schema::{Schema, SchemaError};
    use pretty_assertions::assert_eq;

    fn registry() -> SchemaRegistry {
        SchemaRegistry::builder()
            .register(
                Schema::new("phones", "App\\Models\\Phone")
                    .field(Relation::morph_to("image", ["profiles", "galleries"]).relation_name("picture")),
            )
            .register(
                Schema::new("profiles", "App\\Models\\Profile")
                    .field(Relation::belongs_to("owner").inverse_type("users"))
                    .field(Relation::has_many("tags")),
            )
            .register(Schema::new("galleries", "App\\Models\\Gallery").field(Relation::has_many("tags")))
            .register(Schema::new("users", "App\\Models\\User"))
            .register(Schema::new("tags", "App\\Models\\Tag"))
            .build()
            .unwrap()
    }

    fn morphs<'a>(registry: &'a SchemaRegistry, paths: &str) -> EagerLoadMorphs<'a> {
        let relation = registry
            .schema_for("phones")
            .unwrap()
            .relation_named("image")
            .unwrap();
        EagerLoadMorphs::new(registry, relation, paths.parse().unwrap())
    }

    #[test]
    fn test_names() {
        let registry = registry();
        let morphs = morphs(&registry, "");

        assert_eq!(morphs.name(), "image");
        assert_eq!(morphs.mapper_relation_name(), "picture");
        assert!(morphs.relation().is_polymorphic());
    }

    #[test]
    fn test_every_inverse_type_present() {
        let registry = registry();
        let all = morphs(&registry, "").all().unwrap();

        let models: Vec<&str> = all.keys().map(ModelId::as_str).collect();
        assert_eq!(models, vec!["App\\Models\\Profile", "App\\Models\\Gallery"]);
        assert!(all.values().all(EagerLoadSpec::is_terminal));
    }

    #[test]
    fn test_sub_includes_are_optional_per_type() {
        let registry = registry();
        let all = morphs(&registry, "owner,tags").all().unwrap();

        let profile = &all[&ModelId::new("App\\Models\\Profile")];
        assert_eq!(profile.to_paths(), vec!["owner", "tags"]);

        let gallery = &all[&ModelId::new("App\\Models\\Gallery")];
        assert_eq!(gallery.to_paths(), vec!["tags"]);
    }

    #[test]
    fn test_unknown_segments_never_fail() {
        let registry = registry();
        let all = morphs(&registry, "bogus.deeper").all().unwrap();

        assert_eq!(all.len(), 2);
        assert!(all.values().all(EagerLoadSpec::is_terminal));
    }

    #[test]
    fn test_unregistered_inverse_type_is_an_error() {
        let registry = registry();
        let relation = Relation::morph_to("attachable", ["profiles", "videos"]);
        let morphs = EagerLoadMorphs::new(&registry, &relation, IncludePaths::new());

        let err = morphs.all().unwrap_err();
        assert!(err.is_unknown_resource_type());
        assert!(err.source.as_ref().unwrap().downcast_ref::<SchemaError>().is_some());
    }

    #[test]
    fn test_max_depth_below_relation() {
        let registry = registry();

        let all = morphs(&registry, "owner").with_max_depth(1).all().unwrap();
        assert_eq!(all.len(), 2);

        let err = morphs(&registry, "tags.owner").with_max_depth(1).all().unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::InvalidIncludePath);
    }
}
