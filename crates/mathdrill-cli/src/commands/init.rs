//! The `mathdrill init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("mathdrill.toml").exists() {
        println!("mathdrill.toml already exists, skipping.");
    } else {
        std::fs::write("mathdrill.toml", SAMPLE_CONFIG)?;
        println!("Created mathdrill.toml");
    }

    println!("\nNext steps:");
    println!("  1. Optionally switch [source] to \"openai\" and set OPENAI_API_KEY");
    println!("  2. Run: mathdrill quiz --grade 5 --topic fractions");
    println!("  3. Run: mathdrill serve");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# mathdrill configuration

host = "127.0.0.1"
port = 5000
# seed = 42

[source]
type = "templates"

# [source]
# type = "openai"
# api_key = "${OPENAI_API_KEY}"
# model = "gpt-4o-mini"
# timeout_secs = 30
"#;
