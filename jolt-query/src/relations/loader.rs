//! The eager loader: include paths to eager-load specifications.

use smol_str::SmolStr;
use tracing::{debug, trace};

use jolt_schema::{DEFAULT_MAX_DEPTH, LoaderConfig, RelationTarget, Schema, SchemaRegistry};

use crate::error::{QueryError, QueryResult};

use super::include::IncludePaths;
use super::morph::EagerLoadMorphs;
use super::spec::{EagerLoadSpec, LoadKey};

/// Resolves include paths against a schema.
///
/// By default the loader is strict: an include path segment that does not
/// name a loadable relation is an error. Include paths usually come straight
/// from a request, so most callers switch to
/// [`skip_missing_fields`](Self::skip_missing_fields), which drops such
/// segments instead.
///
/// Paths longer than [`max_depth`](Self::max_depth) segments are rejected in
/// either mode, before any relation is looked up.
///
/// ```rust
/// use jolt_query::{EagerLoader, IncludePaths};
/// use jolt_schema::{Relation, Schema, SchemaRegistry};
///
/// let registry = SchemaRegistry::builder()
///     .register(Schema::new("users", "App\\Models\\User").field(Relation::has_many("comments")))
///     .register(Schema::new("comments", "App\\Models\\Comment").field(Relation::belongs_to("author").inverse_type("users")))
///     .build()
///     .unwrap();
/// let users = registry.schema_for("users").unwrap();
///
/// let paths: IncludePaths = "comments.author,bogus".parse().unwrap();
/// let spec = EagerLoader::new(&registry, users)
///     .skip_missing_fields()
///     .to_relations(&paths)
///     .unwrap();
///
/// assert_eq!(spec.to_paths(), vec!["comments", "comments.author"]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct EagerLoader<'a> {
    registry: &'a SchemaRegistry,
    schema: &'a Schema,
    skip_missing_fields: bool,
    max_depth: usize,
}

impl<'a> EagerLoader<'a> {
    /// Create a strict loader for a schema.
    pub fn new(registry: &'a SchemaRegistry, schema: &'a Schema) -> Self {
        Self {
            registry,
            schema,
            skip_missing_fields: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Create a loader for a resource type.
    pub fn for_type(registry: &'a SchemaRegistry, resource_type: &str) -> QueryResult<Self> {
        Ok(Self::new(registry, registry.schema_for(resource_type)?))
    }

    /// Silently drop segments that do not name a loadable relation.
    pub fn skip_missing_fields(mut self) -> Self {
        self.skip_missing_fields = true;
        self
    }

    /// Limit the number of segments an include path may have.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Apply loader configuration.
    pub fn with_config(mut self, config: &LoaderConfig) -> Self {
        self.skip_missing_fields = config.skip_missing_fields;
        self.max_depth = config.max_depth;
        self
    }

    /// The longest include path accepted, in segments.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Whether unresolvable segments are dropped.
    pub fn is_skipping_missing_fields(&self) -> bool {
        self.skip_missing_fields
    }

    /// The schema paths are resolved against.
    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    /// Resolve include paths into an eager-load specification.
    ///
    /// Paths are grouped by their first segment. A monomorphic relation
    /// contributes one entry keyed by its mapper name, holding its resolved
    /// suffixes. A polymorphic relation contributes one entry per inverse
    /// model at this level (see [`EagerLoadMorphs`]).
    pub fn to_relations(&self, paths: &IncludePaths) -> QueryResult<EagerLoadSpec> {
        debug!(
            resource_type = %self.schema.resource_type(),
            paths = %paths,
            skip_missing_fields = self.skip_missing_fields,
            "Resolving include paths"
        );

        if let Some(path) = paths.iter().find(|p| p.len() > self.max_depth) {
            return Err(QueryError::invalid_include_path(
                path.to_string(),
                format!("path is deeper than {} segments", self.max_depth),
            )
            .with_resource_type(self.schema.resource_type()));
        }

        let mut spec = EagerLoadSpec::new();

        for (name, suffixes) in paths.group_by_first() {
            let Some(relation) = self.schema.loadable_relation(&name) else {
                if self.skip_missing_fields {
                    debug!(
                        resource_type = %self.schema.resource_type(),
                        field = %name,
                        "Skipping include path that is not a loadable relation"
                    );
                    continue;
                }
                return Err(QueryError::unresolvable_relation(
                    self.schema.resource_type(),
                    name.as_str(),
                ));
            };

            trace!(field = %name, nested = suffixes.len(), "Resolving relation");

            match &relation.target {
                RelationTarget::Monomorphic(inverse) => {
                    let inverse = self.registry.schema_for(inverse)?;
                    let nested = self.nested(inverse).to_relations(&suffixes)?;
                    spec.insert(LoadKey::Relation(relation.mapper_relation_name()), nested);
                }
                RelationTarget::Polymorphic(_) => {
                    let morphs = EagerLoadMorphs::new(self.registry, relation, suffixes)
                        .with_max_depth(self.max_depth.saturating_sub(1));
                    for (model, nested) in morphs.all()? {
                        spec.insert(LoadKey::Model(model), nested);
                    }
                }
            }
        }

        Ok(spec)
    }

    /// The polymorphic relations named by the first segments of `paths`,
    /// each carrying its suffix paths.
    ///
    /// Segments that are not polymorphic relations are ignored here; they
    /// are reported by [`to_relations`](Self::to_relations).
    pub fn morphs(&self, paths: &IncludePaths) -> Vec<EagerLoadMorphs<'a>> {
        paths
            .group_by_first()
            .into_iter()
            .filter_map(|(name, suffixes)| {
                let relation = self.schema.loadable_relation(&name)?;
                relation
                    .is_polymorphic()
                    .then(|| {
                        EagerLoadMorphs::new(self.registry, relation, suffixes)
                            .with_max_depth(self.max_depth.saturating_sub(1))
                    })
            })
            .collect()
    }

    /// Resolve requested relationship counts into mapper relation names.
    ///
    /// The result keeps request order without duplicates. Names that are not
    /// relations, or whose relation does not allow counting, are dropped when
    /// skipping missing fields and rejected otherwise.
    pub fn to_counts<I, S>(&self, names: I) -> QueryResult<Vec<SmolStr>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut counts: Vec<SmolStr> = Vec::new();

        for name in names {
            let name = name.as_ref();

            let relation = match self.schema.relation_named(name) {
                Some(relation) if relation.is_countable() => relation,
                Some(_) if self.skip_missing_fields => continue,
                Some(_) => {
                    return Err(QueryError::relation_not_countable(
                        self.schema.resource_type(),
                        name,
                    ));
                }
                None if self.skip_missing_fields => continue,
                None => {
                    return Err(QueryError::unresolvable_relation(
                        self.schema.resource_type(),
                        name,
                    ));
                }
            };

            let mapper_name = relation.mapper_relation_name();
            if !counts.contains(&mapper_name) {
                counts.push(mapper_name);
            }
        }

        Ok(counts)
    }

    fn nested(&self, schema: &'a Schema) -> Self {
        Self {
            registry: self.registry,
            schema,
            skip_missing_fields: self.skip_missing_fields,
            max_depth: self.max_depth.saturating_sub(1),
        }
    }
}
