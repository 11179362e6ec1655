//! The mapper side of eager loading.

use smol_str::SmolStr;

use crate::error::QueryResult;

use super::include::IncludePaths;
use super::loader::EagerLoader;
use super::spec::EagerLoadSpec;

/// Something that can apply eager-load instructions, typically a mapper
/// query builder.
pub trait EagerLoadSink {
    /// Eager load the relations described by `spec`.
    fn eager_load(&mut self, spec: EagerLoadSpec);

    /// Load counts for the given mapper relation names.
    fn eager_load_count(&mut self, relations: Vec<SmolStr>);
}

impl<T: EagerLoadSink + ?Sized> EagerLoadSink for &mut T {
    fn eager_load(&mut self, spec: EagerLoadSpec) {
        (**self).eager_load(spec);
    }

    fn eager_load_count(&mut self, relations: Vec<SmolStr>) {
        (**self).eager_load_count(relations);
    }
}

/// Resolve `paths` and hand the result to `sink`.
///
/// Nothing is sent when no relation survives resolution. Returns whether an
/// instruction was issued.
pub fn load_includes<S>(sink: &mut S, loader: &EagerLoader<'_>, paths: &IncludePaths) -> QueryResult<bool>
where
    S: EagerLoadSink + ?Sized,
{
    let spec = loader.to_relations(paths)?;
    if spec.is_empty() {
        return Ok(false);
    }
    sink.eager_load(spec);
    Ok(true)
}

/// Resolve relationship counts and hand them to `sink`.
///
/// Returns whether an instruction was issued.
pub fn load_counts<S, I, N>(sink: &mut S, loader: &EagerLoader<'_>, names: I) -> QueryResult<bool>
where
    S: EagerLoadSink + ?Sized,
    I: IntoIterator<Item = N>,
    N: AsRef<str>,
{
    let counts = loader.to_counts(names)?;
    if counts.is_empty() {
        return Ok(false);
    }
    sink.eager_load_count(counts);
    Ok(true)
}
