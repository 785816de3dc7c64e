//! Web search tool — returns mock search results.
//!
//! Results are canned per topic with a generic fallback, so the agent loop
//! can be exercised without network access.

struct SearchResult {
    title: String,
    url: String,
    snippet: String,
}

/// Run a mock search for `query` and render the results as a chat reply.
pub fn search(query: &str) -> String {
    let results = mock_results(query, 3);

    let mut out = format!("Found information about '{query}': This is a simulated search result. 🔍");
    for (i, r) in results.iter().enumerate() {
        out.push_str(&format!("\n{}. {} ({})\n   {}", i + 1, r.title, r.url, r.snippet));
    }
    out
}

fn mock_results(query: &str, count: usize) -> Vec<SearchResult> {
    let q = query.to_lowercase();

    let topics: [(&str, &[(&str, &str, &str)]); 2] = [
        ("rust", &[
            (
                "The Rust Programming Language",
                "https://doc.rust-lang.org/book/",
                "Rust is a systems programming language focused on safety, speed, and concurrency.",
            ),
            (
                "Rust by Example",
                "https://doc.rust-lang.org/rust-by-example/",
                "A collection of runnable examples that illustrate Rust concepts and standard library usage.",
            ),
        ]),
        ("ollama", &[
            (
                "Ollama",
                "https://ollama.com/",
                "Get up and running with large language models locally.",
            ),
            (
                "Ollama API reference",
                "https://github.com/ollama/ollama/blob/main/docs/api.md",
                "REST endpoints for generating completions, chatting, and managing local models.",
            ),
        ]),
    ];

    for (keyword, entries) in topics {
        if q.contains(keyword) {
            return entries
                .iter()
                .take(count)
                .map(|(title, url, snippet)| SearchResult {
                    title: title.to_string(),
                    url: url.to_string(),
                    snippet: snippet.to_string(),
                })
                .collect();
        }
    }

    (0..count)
        .map(|i| SearchResult {
            title: format!("Result {} for: {}", i + 1, query),
            url: format!("https://example.com/search?q={}&p={}", urlencoding::encode(query), i + 1),
            snippet: format!("A mock search result for the query '{query}'."),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_mentions_query() {
        let out = search("best pizza in Naples");
        assert!(out.starts_with("Found information about 'best pizza in Naples'"));
        assert!(out.contains("https://example.com/search?q=best%20pizza%20in%20Naples&p=1"));
        assert_eq!(out.lines().filter(|l| l.contains("Result ")).count(), 3);
    }

    #[test]
    fn query_is_percent_encoded_in_urls() {
        let out = search("fish & chips? #uk");
        assert!(out.contains("https://example.com/search?q=fish%20%26%20chips%3F%20%23uk&p=2"));
        assert!(out.starts_with("Found information about 'fish & chips? #uk'"));
    }

    #[test]
    fn topic_results_are_used() {
        let out = search("learn Rust");
        assert!(out.contains("The Rust Programming Language"));
        assert!(!out.contains("example.com"));
    }

    #[test]
    fn search_is_deterministic() {
        assert_eq!(search("ollama models"), search("ollama models"));
    }
}
