use super::client::NewsArticle;

/// How many organizations the "top sources" list shows.
pub const TOP_SOURCES: usize = 3;

/// Counts articles per source, most frequent first. Ties keep the order in
/// which the sources first appeared.
pub fn top_sources(articles: &[NewsArticle], limit: usize) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for article in articles {
        match counts
            .iter_mut()
            .find(|(name, _)| *name == article.source_name)
        {
            Some((_, count)) => *count += 1,
            None => counts.push((article.source_name.clone(), 1)),
        }
    }

    // Stable sort, so equal counts stay in first-seen order.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(limit);
    counts
}

pub fn render_articles(articles: &[NewsArticle]) -> String {
    if articles.is_empty() {
        return "No articles found for the given topic.".to_string();
    }

    let mut out = String::from("#### Top News Organizations\n");
    for (org, count) in top_sources(articles, TOP_SOURCES) {
        out.push_str(&format!("- **{}**: {} articles\n", org, count));
    }

    out.push_str("\n#### Articles\n");
    for article in articles {
        out.push_str(&format!(
            "**{}**\n*{} - {}*\n{}\n[Read more]({})\n---\n",
            article.title,
            article.source_name,
            article.published_at,
            article.description,
            article.url
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(source: &str) -> NewsArticle {
        NewsArticle {
            title: format!("{} headline", source),
            source_name: source.to_string(),
            published_at: "2024-03-07T09:00:00Z".to_string(),
            description: "Something happened.".to_string(),
            url: format!("https://{}.example/story", source.to_lowercase()),
        }
    }

    #[test]
    fn ranks_sources_by_count_then_first_appearance() {
        let articles: Vec<_> = ["A", "A", "B", "C", "A"].into_iter().map(article).collect();

        assert_eq!(
            top_sources(&articles, TOP_SOURCES),
            vec![
                ("A".to_string(), 3),
                ("B".to_string(), 1),
                ("C".to_string(), 1)
            ]
        );
    }

    #[test]
    fn ranking_is_capped() {
        let articles: Vec<_> = ["D", "C", "B", "A", "A"].into_iter().map(article).collect();

        assert_eq!(
            top_sources(&articles, TOP_SOURCES),
            vec![
                ("A".to_string(), 2),
                ("D".to_string(), 1),
                ("C".to_string(), 1)
            ]
        );
    }

    #[test]
    fn renders_sources_and_articles() {
        let articles = vec![article("Wired"), article("Wired")];
        let rendered = render_articles(&articles);

        assert!(rendered.contains("- **Wired**: 2 articles\n"));
        assert!(rendered.contains("**Wired headline**\n*Wired - 2024-03-07T09:00:00Z*\n"));
        assert!(rendered.contains("[Read more](https://wired.example/story)"));
        assert_eq!(rendered.matches("---").count(), 2);
    }

    #[test]
    fn renders_empty_result_as_notice() {
        assert_eq!(render_articles(&[]), "No articles found for the given topic.");
    }
}
