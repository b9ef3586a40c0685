//! JSON and JSON Lines post loaders

use anyhow::{Context, Result};
use crate::data::Post;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Load a JSON array of `{"author": ..., "text": ...}` objects
pub fn load_posts_array(path: &str) -> Result<Vec<Post>> {
    log::info!("Reading JSON file: {}", path);

    if !Path::new(path).exists() {
        return Err(anyhow::anyhow!("File not found: {}", path));
    }

    let reader = BufReader::new(File::open(path)?);
    let posts: Vec<Post> = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse posts from {}", path))?;

    log::info!("Loaded {} posts", posts.len());
    Ok(posts)
}

/// Load one post object per line; blank lines are ignored
pub fn load_posts_lines(path: &str) -> Result<Vec<Post>> {
    log::info!("Reading JSON Lines file: {}", path);

    if !Path::new(path).exists() {
        return Err(anyhow::anyhow!("File not found: {}", path));
    }

    let reader = BufReader::new(File::open(path)?);
    let mut posts = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let post: Post = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: invalid post record", path, line_no + 1))?;
        posts.push(post);
    }

    log::info!("Loaded {} posts", posts.len());
    Ok(posts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::AccountId;
    use std::io::Write;

    #[test]
    fn loads_json_lines_skipping_blanks() {
        let mut file = tempfile::Builder::new().suffix(".jsonl").tempfile().unwrap();
        writeln!(file, r#"{{"author": 1, "text": "hi @bob"}}"#).unwrap();
        writeln!(file).unwrap();
        writeln!(file, r#"{{"author": "carol", "text": "solo"}}"#).unwrap();

        let posts = load_posts_lines(file.path().to_str().unwrap()).unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].author, AccountId::Numeric(1));
        assert_eq!(posts[1].text, "solo");
    }

    #[test]
    fn reports_bad_line_number() {
        let mut file = tempfile::Builder::new().suffix(".jsonl").tempfile().unwrap();
        writeln!(file, r#"{{"author": 1, "text": "ok"}}"#).unwrap();
        writeln!(file, "not json").unwrap();

        let err = load_posts_lines(file.path().to_str().unwrap()).unwrap_err();
        assert!(format!("{:#}", err).contains(":2:"));
    }

    #[test]
    fn loads_json_array() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"[{{"author": "a", "text": "@b"}}]"#).unwrap();

        let posts = load_posts_array(file.path().to_str().unwrap()).unwrap();
        assert_eq!(posts, vec![Post::new("a", "@b")]);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_posts_array("/nonexistent/posts.json").is_err());
    }
}
