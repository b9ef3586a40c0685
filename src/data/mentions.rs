//! Mention extraction from post text

use crate::data::{AccountId, Post};

/// Extract the author and the ordered list of accounts a post mentions
pub fn extract_mentions(post: &Post) -> (AccountId, Vec<AccountId>) {
    (post.author.clone(), mentioned_accounts(&post.text))
}

/// Find every `@`-prefixed reference in `text`, in order of appearance
///
/// Repeated mentions are kept; the graph builder collapses them.
pub fn mentioned_accounts(text: &str) -> Vec<AccountId> {
    text.split_whitespace()
        .filter_map(mention_handle)
        .map(AccountId::parse)
        .collect()
}

/// Handle named by a single whitespace-free token, if it is a mention
fn mention_handle(token: &str) -> Option<&str> {
    let rest = token.strip_prefix('@')?;

    // Only the part before any further '@' counts
    let rest = rest.split('@').next().unwrap_or_default();

    let end = rest
        .char_indices()
        .find(|&(_, c)| !(c.is_alphanumeric() || c == '_'))
        .map_or(rest.len(), |(idx, _)| idx);

    let handle = &rest[..end];
    if handle.is_empty() {
        None
    } else {
        Some(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handles(text: &str) -> Vec<String> {
        mentioned_accounts(text)
            .into_iter()
            .map(|id| id.to_string())
            .collect()
    }

    #[test]
    fn finds_mentions_in_order() {
        assert_eq!(handles("hey @bob and @Carol"), vec!["bob", "Carol"]);
    }

    #[test]
    fn strips_trailing_punctuation() {
        assert_eq!(
            handles("thanks @bob, @carol: and @dave! (@erin)"),
            vec!["bob", "carol", "dave"]
        );
        assert_eq!(handles("@frank's point"), vec!["frank"]);
    }

    #[test]
    fn only_tokens_starting_with_at_count() {
        assert_eq!(handles("mail me at bob@example.com"), Vec::<String>::new());
    }

    #[test]
    fn cuts_at_second_at_sign() {
        assert_eq!(handles("@alice@mastodon.social"), vec!["alice"]);
    }

    #[test]
    fn skips_malformed_tokens() {
        assert_eq!(handles("@ @@ @!! @@bob"), Vec::<String>::new());
    }

    #[test]
    fn keeps_repeated_mentions() {
        assert_eq!(handles("@bob @bob"), vec!["bob", "bob"]);
    }

    #[test]
    fn numeric_mentions_become_numeric_ids() {
        assert_eq!(mentioned_accounts("cc @1234"), vec![AccountId::Numeric(1234)]);
    }

    #[test]
    fn zero_padded_mentions_stay_distinct() {
        assert_eq!(
            mentioned_accounts("@007 @7"),
            vec![AccountId::Handle("007".to_string()), AccountId::Numeric(7)]
        );
    }

    #[test]
    fn returns_author_with_mentions() {
        let post = Post::new("alice", "hello @bob");
        let (author, mentions) = extract_mentions(&post);
        assert_eq!(author, AccountId::from("alice"));
        assert_eq!(mentions, vec![AccountId::from("bob")]);
    }
}
