use super::storage::{Category, PromptData};

/// Gallery browse filter: category tab plus free-text search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalleryFilter {
    /// `None` is the "All" tab.
    pub category: Option<Category>,
    pub query: String,
}

impl GalleryFilter {
    pub fn new(category: Option<Category>, query: impl Into<String>) -> Self {
        Self {
            category,
            query: query.into(),
        }
    }

    /// Category must match, and the query (case-insensitive) must appear in
    /// the title or the prompt body. An empty query matches everything.
    pub fn matches(&self, pd: &PromptData) -> bool {
        if let Some(category) = self.category {
            if pd.category != category {
                return false;
            }
        }
        if self.query.is_empty() {
            return true;
        }
        let q = self.query.to_lowercase();
        pd.title.to_lowercase().contains(&q) || pd.prompt.to_lowercase().contains(&q)
    }

    pub fn apply<'a>(&self, records: &'a [PromptData]) -> Vec<&'a PromptData> {
        records.iter().filter(|pd| self.matches(pd)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, prompt: &str, category: Category) -> PromptData {
        PromptData {
            id: title.to_lowercase(),
            title: title.to_string(),
            prompt: prompt.to_string(),
            image_url: String::new(),
            category,
            created_at: 0,
        }
    }

    #[test]
    fn empty_filter_matches_all() {
        let records = vec![
            record("A", "x", Category::NanoBanana),
            record("B", "y", Category::Seedream),
        ];
        assert_eq!(GalleryFilter::default().apply(&records).len(), 2);
    }

    #[test]
    fn query_searches_title_and_prompt_case_insensitively() {
        let records = vec![
            record("Neon City", "a cyberpunk skyline", Category::Midjourney),
            record("Forest", "misty NEON mushrooms", Category::NanoBanana),
            record("Desert", "dunes at dusk", Category::NanoBanana),
        ];
        let hits = GalleryFilter::new(None, "neon").apply(&records);
        let titles: Vec<&str> = hits.iter().map(|pd| pd.title.as_str()).collect();
        assert_eq!(titles, vec!["Neon City", "Forest"]);
    }

    #[test]
    fn category_and_query_combine() {
        let records = vec![
            record("Neon City", "skyline", Category::Midjourney),
            record("Neon Forest", "trees", Category::NanoBanana),
        ];
        let hits = GalleryFilter::new(Some(Category::NanoBanana), "neon").apply(&records);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Neon Forest");
    }
}
