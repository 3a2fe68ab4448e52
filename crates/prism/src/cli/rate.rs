//! The `prism rate` command: append a batch of ratings to the rating log.

use std::path::PathBuf;

use clap::Args;
use prism_core::{Config, RatingLog, RatingRecord};

/// Arguments for the `rate` command.
#[derive(Args, Debug)]
pub struct RateArgs {
    /// JSON file holding an array of rating records
    #[arg(required = true)]
    pub ratings: PathBuf,
}

/// Execute the rate command.
pub async fn execute(args: RateArgs, config: &Config) -> anyhow::Result<()> {
    let data = std::fs::read_to_string(&args.ratings).map_err(|e| {
        anyhow::anyhow!("Failed to read ratings file {}: {e}", args.ratings.display())
    })?;
    let records: Vec<RatingRecord> = serde_json::from_str(&data)?;

    let log = RatingLog::new(config.ratings_file());
    let total = log.append(&records)?;

    println!(
        "Appended {} rating(s) to {} ({} total)",
        records.len(),
        log.path().display(),
        total
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn config_with_log(dir: &Path) -> Config {
        let mut config = Config::default();
        config.feedback.ratings_file =
            dir.join("ratings.json").to_string_lossy().into_owned();
        config
    }

    #[tokio::test]
    async fn test_execute_appends_file_batch() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_log(dir.path());

        let input = dir.path().join("batch.json");
        std::fs::write(
            &input,
            r#"[{"image": "n01440764_0.JPEG", "user_rating": 8, "timestamp": 1700000000000},
               {"user_rating": 4, "timestamp": 1700000000001}]"#,
        )
        .unwrap();

        execute(RateArgs { ratings: input }, &config).await.unwrap();

        let stored: Vec<RatingRecord> = serde_json::from_str(
            &std::fs::read_to_string(config.ratings_file()).unwrap(),
        )
        .unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].user_rating, 8);
        assert_eq!(stored[0].image.as_deref(), Some("n01440764_0.JPEG"));
    }

    #[tokio::test]
    async fn test_execute_rejects_out_of_range_rating() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_log(dir.path());

        let input = dir.path().join("batch.json");
        std::fs::write(
            &input,
            r#"[{"user_rating": 11, "timestamp": 1700000000000}]"#,
        )
        .unwrap();

        let err = execute(RateArgs { ratings: input }, &config).await.unwrap_err();
        assert!(err.to_string().contains("out of range"));
        assert!(!config.ratings_file().exists());
    }

    #[tokio::test]
    async fn test_execute_missing_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_log(dir.path());

        let err = execute(
            RateArgs {
                ratings: dir.path().join("nope.json"),
            },
            &config,
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("Failed to read ratings file"));
    }
}
