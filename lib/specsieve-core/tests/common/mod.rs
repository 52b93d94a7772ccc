use std::path::PathBuf;

use rstest::fixture;
use specsieve_core::{Document, FilterOptions, SieveError, run};
use tracing::info;

pub fn init_tracing() {
    // should be run once, fail otherwise, we skip that error
    let _ = tracing_subscriber::fmt()
        .pretty()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();

    info!("Tracing initialized");
}

/// Location of the Swagger 2.0 Petstore document used by the tests.
pub fn petstore_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/petstore.json")
}

/// The Petstore document, validated and without filters applied.
#[fixture]
pub fn petstore() -> Document {
    init_tracing();
    match run(petstore_path(), &FilterOptions::default()) {
        Ok(document) => document,
        Err(error) => panic!("fail to load the petstore fixture: {error}"),
    }
}

/// Runs the Petstore file through the pipeline with the given JSON configuration.
pub fn filter_petstore(config: &str) -> Result<Document, SieveError> {
    init_tracing();
    let options = FilterOptions::from_json_str(config)?;
    run(petstore_path(), &options)
}

pub fn path_names(document: &Document) -> Vec<&str> {
    document.paths.keys().map(String::as_str).collect()
}

pub fn methods<'a>(document: &'a Document, path: &str) -> Vec<&'a str> {
    document
        .paths
        .get(path)
        .map(|item| item.operations.keys().map(String::as_str).collect())
        .unwrap_or_default()
}

pub fn tag_names(document: &Document) -> Vec<&str> {
    document.declared_tag_names().collect()
}

pub const PET_PATHS: [&str; 5] = [
    "/pet",
    "/pet/findByStatus",
    "/pet/findByTags",
    "/pet/{petId}",
    "/pet/{petId}/uploadImage",
];

pub const STORE_PATHS: [&str; 3] = ["/store/inventory", "/store/order", "/store/order/{orderId}"];
