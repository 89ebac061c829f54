pub const CATALOG_LABEL_KEY: &str = "catalog";
pub const NAME_FIELD_KEY: &str = "metadata.name";

/// Label selector matching the PackageManifests published by the given catalog.
pub fn catalog_selector(catalog: &str) -> String {
    format!("{CATALOG_LABEL_KEY}={catalog}")
}

/// Field selector matching objects with the given name.
pub fn name_selector(name: &str) -> String {
    format!("{NAME_FIELD_KEY}={name}")
}
