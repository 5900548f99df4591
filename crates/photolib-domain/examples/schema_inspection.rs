//! Prints the JSON schemas backing the `get_photo_meta_schema` tool (§6):
//! the metadata fields a caller can filter/edit on, plus the full `Image`
//! envelope a search or stat call returns.

use photolib_domain::entities::{Image, ImageMetadata};
use schemars::schema_for;

fn main() {
    println!("=== ImageMetadata (get_photo_meta_schema tool response) ===");
    let metadata_schema = schema_for!(ImageMetadata);
    match serde_json::to_string_pretty(&metadata_schema) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("failed to render schema: {err}"),
    }

    println!("=== Image (search hit / stat envelope) ===");
    let image_schema = schema_for!(Image);
    match serde_json::to_string_pretty(&image_schema) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("failed to render schema: {err}"),
    }
}
