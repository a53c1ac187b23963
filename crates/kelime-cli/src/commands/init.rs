//! The `kelime init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("kelime.toml").exists() {
        println!("kelime.toml already exists, skipping.");
    } else {
        std::fs::write("kelime.toml", SAMPLE_CONFIG)?;
        println!("Created kelime.toml");
    }

    if std::path::Path::new("words.json").exists() {
        println!("words.json already exists, skipping.");
    } else {
        std::fs::write("words.json", SAMPLE_CATALOG)?;
        println!("Created words.json");
    }

    println!("\nNext steps:");
    println!("  1. Run: kelime validate");
    println!("  2. Run: kelime study");
    println!("  3. For remote progress, set user_id and [remote] in kelime.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# kelime configuration

catalog = "words.json"
group_size = 4

# Guest sessions keep progress in a local file.
guest = true

# For remote-backed progress, set a user id and the [remote] section.
# user_id = "your-user-id"
#
# [remote]
# base_url = "https://example.com/api"
# api_token = "${KELIME_API_TOKEN}"

[local]
data_dir = "./kelime-data"
"#;

const SAMPLE_CATALOG: &str = r#"{
  "words": [
    { "english": "house", "turkish": "ev", "type": "n.", "level": "A1" },
    { "english": "water", "turkish": "su", "type": "n.", "level": "A1" },
    { "english": "run", "turkish": "koşmak", "type": "v.", "level": "A1" },
    { "english": "eat", "turkish": "yemek", "type": "v.", "level": "A1" },
    { "english": "beautiful", "turkish": "güzel", "type": "adj.", "level": "A2" },
    { "english": "quickly", "turkish": "hızlıca", "type": "adv.", "level": "A2" },
    { "english": "between", "turkish": "arasında", "type": "prep.", "level": "A2" },
    { "english": "although", "turkish": "rağmen", "type": "conj.", "level": "B1" },
    { "english": "improve", "turkish": "geliştirmek", "type": "v.", "level": "B1" },
    { "english": "knowledge", "turkish": "bilgi", "type": "n.", "level": "B1" },
    { "english": "nevertheless", "turkish": "yine de", "type": "adv.", "level": "B2" },
    { "english": "wow", "turkish": "vay", "type": "interj.", "level": "A1" }
  ]
}
"#;
