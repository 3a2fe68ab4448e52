//! The `prism status` command: embedder and corpus health at a glance.

use clap::Args;
use console::Style;
use prism_core::embedding::TextEmbedder;
use prism_core::{Config, CorpusLoader, EmbeddingStore, LabelCatalog, RemoteEmbedder};

/// Arguments for the `status` command.
#[derive(Args, Debug)]
pub struct StatusArgs {}

/// Execute the status command.
pub async fn execute(_args: StatusArgs, config: &Config) -> anyhow::Result<()> {
    let green = Style::new().green();
    let red = Style::new().red();
    let dim = Style::new().dim();

    // Embedder reachability
    let embedder = RemoteEmbedder::new(&config.embedder.endpoint, config.embedder.timeout_ms);
    let spinner = super::new_spinner("Checking embedder...");
    let available = embedder.is_available().await;
    spinner.finish_and_clear();

    let mark = if available {
        green.apply_to("✓ reachable")
    } else {
        red.apply_to("✗ unreachable")
    };
    println!("Embedder:  {} {}", config.embedder.endpoint, mark);

    // Corpus
    let root = config.dataset_dir();
    let loader = CorpusLoader::new(&root, config.corpus.metadata_file.clone());
    let catalog = LabelCatalog::build(loader.load()?);
    println!(
        "Corpus:    {} images, {} labels {}",
        catalog.image_count(),
        catalog.label_count(),
        dim.apply_to(format!("({})", root.display()))
    );

    // Embedding store
    let matrix_path = root.join(&config.corpus.embeddings_file);
    let manifest_path = root.join(&config.corpus.manifest_file);
    if matrix_path.is_file() && manifest_path.is_file() {
        let store = EmbeddingStore::load(&matrix_path, &manifest_path)?;
        println!("Store:     {} embeddings, dim {}", store.len(), store.dim());
    } else {
        println!("Store:     {}", red.apply_to("not found"));
    }

    println!("Ratings:   {}", config.ratings_file().display());
    Ok(())
}
