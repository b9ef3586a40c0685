//! Parquet file handling for post data

use anyhow::Result;
use polars::prelude::*;
use crate::data::{AccountId, Post};

/// Load posts from a Parquet file with `author` and `text` columns
///
/// The author column may hold integers or strings; both are read through
/// their string form so the usual identity rule applies. Rows with a null
/// author are skipped, a null text is treated as empty.
pub fn load_posts(path: &str) -> Result<Vec<Post>> {
    log::info!("Reading parquet file: {}", path);

    if !std::path::Path::new(path).exists() {
        return Err(anyhow::anyhow!("File not found: {}", path));
    }

    let df = LazyFrame::scan_parquet(path, Default::default())?
        .select([col("author"), col("text")])
        .collect()?;

    log::info!("File schema: {:?}", df.schema());

    let author_col = df.column("author")?.cast(&DataType::String)?;
    let authors = author_col.str()?;
    let texts = df.column("text")?.str()?;

    let row_count = df.height();
    let mut posts = Vec::with_capacity(row_count);
    let mut skipped = 0usize;

    for i in 0..row_count {
        let Some(author) = authors.get(i) else {
            skipped += 1;
            continue;
        };

        posts.push(Post {
            author: AccountId::parse(author),
            text: texts.get(i).unwrap_or_default().to_string(),
        });
    }

    if skipped > 0 {
        log::warn!("Skipped {} rows without an author", skipped);
    }
    log::info!("Loaded {} posts", posts.len());

    Ok(posts)
}
