use anyhow::Result;

// Print the OpenAPI document for the HTTP API
fn main() -> Result<()> {
    println!("{}", credo::api::openapi().to_pretty_json()?);

    Ok(())
}
