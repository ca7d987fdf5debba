use product_config::Config;
use std::path::PathBuf;

fn default_output_path() -> PathBuf {
    PathBuf::from("docs/assets/openapi/openapi.json")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(default_output_path);

    // Same configuration as the server, so the exported document advertises
    // the same identity provider.
    let config = Config::load()?;
    let documents = product_server::build_documents(&config)?;

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    std::fs::write(&output_path, documents.json())?;

    eprintln!(
        "Wrote OpenAPI spec to {}",
        output_path.canonicalize().unwrap_or(output_path).display()
    );

    Ok(())
}
