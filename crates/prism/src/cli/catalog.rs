//! The `prism catalog` command for corpus statistics.

use clap::Args;
use prism_core::{CorpusLoader, Config, LabelCatalog};

/// Arguments for the `catalog` command.
#[derive(Args, Debug)]
pub struct CatalogArgs {
    /// Number of largest labels to list
    #[arg(long, default_value = "10")]
    pub limit: usize,
}

/// Execute the catalog command.
pub async fn execute(args: CatalogArgs, config: &Config) -> anyhow::Result<()> {
    let root = config.dataset_dir();
    let loader = CorpusLoader::new(&root, config.corpus.metadata_file.clone());
    let catalog = LabelCatalog::build(loader.load()?);

    if catalog.is_empty() {
        println!("Catalog is empty (dataset dir: {})", root.display());
        return Ok(());
    }

    println!("Dataset:  {}", root.display());
    println!("Images:   {}", catalog.image_count());
    println!("Labels:   {}", catalog.label_count());
    println!();

    let mut counts: Vec<(&str, usize)> = catalog.label_counts().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    println!("Largest labels:");
    for (label, count) in counts.into_iter().take(args.limit) {
        println!("  {:<28} {}", label, count);
    }

    Ok(())
}
