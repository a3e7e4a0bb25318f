//! The `readiness init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    if Path::new("readiness.toml").exists() {
        println!("readiness.toml already exists, skipping.");
    } else {
        std::fs::write("readiness.toml", SAMPLE_CONFIG)?;
        println!("Created readiness.toml");
    }

    std::fs::create_dir_all("content")?;
    let pack_path = Path::new("content/assessment.toml");
    if pack_path.exists() {
        println!("content/assessment.toml already exists, skipping.");
    } else {
        std::fs::write(pack_path, SAMPLE_PACK)?;
        println!("Created content/assessment.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit content/assessment.toml with your own questions and results");
    println!("  2. Run: readiness validate --pack content/assessment.toml");
    println!("  3. Run: readiness take");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# readiness configuration

default_store = "local"
output_dir = "./readiness-results"

[stores.local]
type = "pack"
path = "content/assessment.toml"

# A headless CMS serving the quizquestions and quizresults collections.
# [stores.cms]
# type = "cms"
# base_url = "https://cms.example.com/api"
# api_key = "${READINESS_CMS_KEY}"
"#;

const SAMPLE_PACK: &str = include_str!("../../../../content/assessment.toml");
