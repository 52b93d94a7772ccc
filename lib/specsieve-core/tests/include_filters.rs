#![allow(missing_docs)]

use rstest::rstest;
use tracing::info;

mod common;
pub use self::common::*;

#[rstest]
fn should_include_http_methods() -> anyhow::Result<()> {
    let document = filter_petstore(r#"{ "filters": { "http": { "include": ["delete", "put"] } } }"#)?;

    assert_eq!(
        path_names(&document),
        ["/pet", "/pet/{petId}", "/store/order/{orderId}", "/user/{username}"]
    );
    assert_eq!(methods(&document, "/pet"), ["put"]);
    assert_eq!(methods(&document, "/pet/{petId}"), ["delete"]);
    assert_eq!(methods(&document, "/store/order/{orderId}"), ["delete"]);
    assert_eq!(methods(&document, "/user/{username}"), ["put", "delete"]);
    Ok(())
}

#[rstest]
fn should_include_paths() -> anyhow::Result<()> {
    let document = filter_petstore(r#"{ "filters": { "paths": { "include": ["/^/pet/"] } } }"#)?;

    assert_eq!(path_names(&document), PET_PATHS);
    assert_eq!(tag_names(&document), ["pet"]);
    Ok(())
}

#[rstest]
fn should_include_tags() -> anyhow::Result<()> {
    let document = filter_petstore(
        r#"{ "filters": { "tags": { "include": ["/^pet$/i", "/store/i"] } } }"#,
    )?;

    let expected = PET_PATHS.iter().chain(&STORE_PATHS).copied().collect::<Vec<_>>();
    assert_eq!(path_names(&document), expected);
    assert_eq!(tag_names(&document), ["pet", "store"]);
    Ok(())
}

#[rstest]
fn should_include_summaries() -> anyhow::Result<()> {
    let document = filter_petstore(
        r#"{
            "filters": {
                "summary": {
                    "include": ["/Add a new pet to the store/i", "/^Returns pet inventories by status$/"]
                }
            }
        }"#,
    )?;

    assert_eq!(path_names(&document), ["/pet", "/store/inventory"]);
    assert_eq!(methods(&document, "/pet"), ["post"]);
    assert_eq!(methods(&document, "/store/inventory"), ["get"]);
    assert_eq!(tag_names(&document), ["pet", "store"]);
    Ok(())
}

#[rstest]
fn should_include_descriptions() -> anyhow::Result<()> {
    let document = filter_petstore(
        r#"{ "filters": { "description": { "include": ["/Other values will generated exceptions/"] } } }"#,
    )?;

    assert_eq!(path_names(&document), ["/store/order/{orderId}"]);
    assert_eq!(methods(&document, "/store/order/{orderId}"), ["get"]);
    assert_eq!(tag_names(&document), ["store"]);
    Ok(())
}

#[rstest]
#[case::lowercase(r#"["get"]"#)]
#[case::uppercase(r#"["GET"]"#)]
#[case::mixed(r#"["Get", "head"]"#)]
fn should_compare_http_methods_case_insensitively(#[case] include: &str) -> anyhow::Result<()> {
    let config = format!(r#"{{ "filters": {{ "http": {{ "include": {include} }} }} }}"#);

    let document = filter_petstore(&config)?;

    info!(paths = ?path_names(&document), "GET only");
    assert!(document.operations().all(|(_, method, _)| method == "get"));
    assert_eq!(document.operation_count(), 8);
    Ok(())
}

#[rstest]
fn should_keep_non_operation_keys_and_strip_definitions() -> anyhow::Result<()> {
    let document = filter_petstore(r#"{ "filters": { "paths": { "include": ["/inventory$/"] } } }"#)?;

    let keys = document.other.keys().map(String::as_str).collect::<Vec<_>>();
    assert_eq!(
        keys,
        [
            "swagger",
            "info",
            "host",
            "basePath",
            "schemes",
            "securityDefinitions",
            "externalDocs"
        ]
    );

    let operation = &document.paths["/store/inventory"].operations["get"];
    assert_eq!(
        operation.other.get("operationId"),
        Some(&serde_json::json!("getInventory"))
    );
    Ok(())
}
