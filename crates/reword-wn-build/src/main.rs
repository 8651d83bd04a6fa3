mod parser;

use std::io::BufReader;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

#[derive(Parser)]
#[command(
    name = "reword-wn-build",
    about = "Parse a WordNet LMF XML dump into the JSON database used by reword-server"
)]
struct Cli {
    /// Path to the WN-LMF XML file (e.g., english-wordnet-2024.xml)
    #[arg(long)]
    input: PathBuf,

    /// Output path for the JSON database
    #[arg(long, default_value = "wordnet.json")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    println!("=== Reword WordNet Database Builder ===\n");
    println!("Input:  {:?}", cli.input);
    println!("Output: {:?}", cli.output);
    println!();

    let file = std::fs::File::open(&cli.input)
        .with_context(|| format!("failed to open input XML file {:?}", cli.input))?;
    let reader = BufReader::new(file);

    println!("Parsing LMF dump...");
    let db = parser::parse_lmf_dump(reader);

    println!("\nAssembled {} synsets", db.synsets.len());

    let indexed_lemmas = db.index.len();
    let total_examples: usize = db.synsets.values().map(|s| s.examples.len()).sum();
    let with_relations = db
        .synsets
        .values()
        .filter(|s| !s.hypernyms.is_empty() || !s.hyponyms.is_empty())
        .count();

    println!("  Indexed lemmas:       {}", indexed_lemmas);
    println!("  Total examples:       {}", total_examples);
    println!(
        "  Synsets w/ relations: {} ({:.1}%)",
        with_relations,
        100.0 * with_relations as f64 / db.synsets.len().max(1) as f64
    );

    println!("\n--- Sample lemmas ---");
    for word in &["dog", "cat", "water", "run", "big", "happy", "quickly"] {
        if let Some(ids) = db.index.get(*word) {
            println!("  {} — {} sense(s)", word, ids.len());
        }
    }

    println!("\nWriting JSON to {:?}...", cli.output);
    let json = serde_json::to_string(&db).context("JSON serialization failed")?;
    std::fs::write(&cli.output, &json)
        .with_context(|| format!("failed to write output file {:?}", cli.output))?;

    let size_mb = json.len() as f64 / (1024.0 * 1024.0);
    println!("Done. Output size: {:.1} MB", size_mb);
    Ok(())
}
