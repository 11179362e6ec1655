//! Integration tests for `jolt.toml` driven registries.

use jolt::prelude::*;
use jolt::schema::{LogFormat, SchemaError};
use pretty_assertions::assert_eq;
use serde_json::json;

const SHOP: &str = r#"
    [loader]
    skip_missing_fields = false
    max_depth = 3

    [debug]
    log_level = "debug"
    log_format = "compact"

    [[schemas]]
    type = "orders"
    model = "App\\Models\\Order"

    [[schemas.fields]]
    kind = "attribute"
    name = "total"
    column = "total_cents"

    [[schemas.fields]]
    kind = "belongs_to"
    name = "customer"
    inverse = "users"
    relation = "user"

    [[schemas.fields]]
    kind = "has_many"
    name = "line-items"
    can_count = true

    [[schemas.fields]]
    kind = "morph_to"
    name = "payable"
    types = ["cards", "vouchers"]

    [[schemas.fields]]
    kind = "has_many"
    name = "audits"
    eager_load = false

    [[schemas]]
    type = "users"
    model = "App\\Models\\User"

    [[schemas]]
    type = "line-items"
    model = "App\\Models\\LineItem"

    [[schemas.fields]]
    kind = "belongs_to"
    name = "product"

    [[schemas]]
    type = "products"
    model = "App\\Models\\Product"

    [[schemas]]
    type = "cards"
    model = "App\\Models\\Card"

    [[schemas.fields]]
    kind = "belongs_to"
    name = "issuer"
    inverse = "users"

    [[schemas]]
    type = "vouchers"
    model = "App\\Models\\Voucher"

    [[schemas]]
    type = "audits"
    model = "App\\Models\\Audit"
"#;

#[test]
fn test_registry_from_config() {
    let config = JoltConfig::from_str(SHOP).unwrap();
    let registry = config.registry().unwrap();

    assert_eq!(
        registry.types().collect::<Vec<_>>(),
        vec!["orders", "users", "line-items", "products", "cards", "vouchers", "audits"]
    );
    assert_eq!(config.debug.log_format, LogFormat::Compact);

    let orders = registry.schema_for_model(&ModelId::new("App\\Models\\Order")).unwrap();
    assert_eq!(orders.resource_type(), "orders");
    assert_eq!(orders.attribute_named("total").unwrap().column(), "total_cents");
}

#[test]
fn test_config_driven_resolution() {
    let config = JoltConfig::from_str(SHOP).unwrap();
    let registry = config.registry().unwrap();
    let loader = EagerLoader::for_type(&registry, "orders")
        .unwrap()
        .with_config(&config.loader);
    assert!(!loader.is_skipping_missing_fields());

    let paths: IncludePaths = "customer,line-items.product,payable.issuer".parse().unwrap();
    let spec = loader.to_relations(&paths).unwrap();

    assert_eq!(
        serde_json::to_value(&spec).unwrap(),
        json!({
            "user": {},
            "lineItems": { "product": {} },
            "App\\Models\\Card": { "issuer": {} },
            "App\\Models\\Voucher": {}
        })
    );
    assert_eq!(loader.to_counts(["line-items"]).unwrap(), vec!["lineItems"]);
}

#[test]
fn test_relation_excluded_from_eager_loading() {
    let config = JoltConfig::from_str(SHOP).unwrap();
    let registry = config.registry().unwrap();
    let paths: IncludePaths = "audits".parse().unwrap();

    let loader = EagerLoader::for_type(&registry, "orders").unwrap();
    assert!(loader.to_relations(&paths).unwrap_err().is_unresolvable_relation());
    assert!(loader.skip_missing_fields().to_relations(&paths).unwrap().is_empty());
}

#[test]
fn test_unregistered_inverse_type_fails_validation() {
    let toml = r#"
        [[schemas]]
        type = "posts"
        model = "App\\Models\\Post"

        [[schemas.fields]]
        kind = "has_many"
        name = "comments"
    "#;

    let err = JoltConfig::from_str(toml).unwrap().registry().unwrap_err();
    assert!(matches!(err, SchemaError::InvalidRelation { .. }), "{err:?}");
}

#[test]
fn test_env_var_expansion() {
    // SAFETY: the variable is unique to this test.
    unsafe {
        std::env::set_var("JOLT_TEST_ORDER_MODEL", "Shop::Order");
    }

    let toml = r#"
        [[schemas]]
        type = "orders"
        model = "${JOLT_TEST_ORDER_MODEL}"
    "#;
    let registry = JoltConfig::from_str(toml).unwrap().registry().unwrap();

    assert_eq!(registry.schema_for("orders").unwrap().model().as_str(), "Shop::Order");
}

#[test]
fn test_unknown_keys_rejected() {
    let err = JoltConfig::from_str("[loader]\nstrict = true").unwrap_err();
    assert!(matches!(err, SchemaError::TomlError { .. }));
}

#[test]
fn test_missing_file() {
    let err = JoltConfig::from_file("does/not/exist/jolt.toml").unwrap_err();
    assert!(matches!(err, SchemaError::IoError { .. }));
}

#[test]
fn test_configured_max_depth() {
    let config = JoltConfig::from_str(SHOP).unwrap();
    let registry = config.registry().unwrap();
    let loader = EagerLoader::for_type(&registry, "orders")
        .unwrap()
        .with_config(&config.loader);
    assert_eq!(loader.max_depth(), 3);

    let at_limit: IncludePaths = "payable.issuer.orders".parse().unwrap();
    assert!(loader.skip_missing_fields().to_relations(&at_limit).is_ok());

    let past_limit: IncludePaths = "line-items.product.orders.customer".parse().unwrap();
    let err = loader.to_relations(&past_limit).unwrap_err();
    assert_eq!(err.code, jolt::query::ErrorCode::InvalidIncludePath);
}
