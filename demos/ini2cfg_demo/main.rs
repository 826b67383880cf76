//! # ini2cfg demo
//!
//! Parses a small build manifest from memory and walks the result.
//!
//! ```sh
//! cargo run --example ini2cfg_demo
//! RUST_LOG=debug cargo run --example ini2cfg_demo
//! ```

use ini2cfg::{OutputFormat, ParseError, parse_str, render};

const MANIFEST: &str = "\
; toolchain manifest
tp=linux,gba
ver=0.4.1

[zlib.src]
url=https://zlib.net/zlib-1.3.tar.gz
mirror=https://a.example/zlib.tar.gz
mirror=https://b.example/zlib.tar.gz

[hinterlib.proj]
srcs=zlib
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let doc = parse_str(MANIFEST)?;

    println!("targets: {}", doc.get(None, "tp").unwrap_or("<none>"));
    for section in doc.sections() {
        println!("[{}] {} pair(s)", section.name(), section.pairs().len());
    }
    println!("mirrors: {:?}", doc.get_all(Some("zlib.src"), "mirror"));

    println!("\n-- flat --\n{}", render(&doc, OutputFormat::Flat)?);
    println!("\n-- json --\n{}", render(&doc, OutputFormat::Json)?);

    match parse_str("[broken\n") {
        Err(e @ ParseError::Syntax { .. }) => println!("\nrejected as expected: {e}"),
        other => println!("\nunexpected: {other:?}"),
    }
    Ok(())
}
