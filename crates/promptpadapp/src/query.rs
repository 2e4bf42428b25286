//! # Query Engine
//!
//! A pure filter-and-sort pipeline over the prompt collection. The function
//! never mutates its input and has no side effects, so callers may invoke it
//! on every render.
//!
//! Stages run in a fixed order, each narrowing the previous stage's output:
//!
//! 1. Text filter: case-insensitive substring match against title OR content
//! 2. Folder filter: exact folder id match
//! 3. Tag filter: OR semantics, any one matching tag qualifies
//! 4. Sort: by the selected key and direction
//!
//! A stage is skipped entirely when its triggering filter field is empty or
//! absent. The sort is stable, so prompts with equal keys keep their
//! relative order deterministically.

use std::cmp::Ordering;

use crate::model::{Prompt, SearchFilters, SortBy, SortOrder};

/// Apply `filters` to `prompts`, returning the matching subset in sorted
/// order.
pub fn filter_and_sort(prompts: &[Prompt], filters: &SearchFilters) -> Vec<Prompt> {
    let query = filters.query.to_lowercase();

    let mut matched: Vec<Prompt> = prompts
        .iter()
        .filter(|p| {
            if !filters.query.is_empty() {
                let in_title = p.title.to_lowercase().contains(&query);
                let in_content = p.content.to_lowercase().contains(&query);
                if !in_title && !in_content {
                    return false;
                }
            }

            if let Some(folder) = &filters.selected_folder {
                if p.folder_id.as_ref() != Some(folder) {
                    return false;
                }
            }

            if !filters.selected_tags.is_empty()
                && !p.tags.iter().any(|t| filters.selected_tags.contains(t))
            {
                return false;
            }

            true
        })
        .cloned()
        .collect();

    matched.sort_by(|a, b| {
        let ord = compare_by_key(a, b, filters.sort_by);
        match filters.sort_order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });

    matched
}

fn compare_by_key(a: &Prompt, b: &Prompt, key: SortBy) -> Ordering {
    match key {
        SortBy::CreatedAt => a.created_at.cmp(&b.created_at),
        SortBy::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        SortBy::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        SortBy::ContentLength => a.content_length.cmp(&b.content_length),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewPrompt;

    fn prompt(title: &str, content: &str, folder: Option<&str>, tags: &[&str]) -> Prompt {
        Prompt::new(NewPrompt {
            title: title.to_string(),
            content: content.to_string(),
            folder_id: folder.map(String::from),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        })
    }

    fn titles(prompts: &[Prompt]) -> Vec<&str> {
        prompts.iter().map(|p| p.title.as_str()).collect()
    }

    #[test]
    fn test_empty_filters_return_everything() {
        let prompts = vec![
            prompt("A", "one", None, &[]),
            prompt("B", "two", Some("f1"), &["t1"]),
        ];
        let mut filters = SearchFilters::default();
        filters.sort_by = SortBy::Title;
        filters.sort_order = SortOrder::Asc;

        let out = filter_and_sort(&prompts, &filters);
        assert_eq!(titles(&out), vec!["A", "B"]);
    }

    #[test]
    fn test_text_filter_matches_title_or_content() {
        let prompts = vec![
            prompt("Needle here", "nothing", None, &[]),
            prompt("Plain", "a needle in content", None, &[]),
            prompt("Plain two", "nothing", None, &[]),
        ];
        let filters = SearchFilters {
            query: "NEEDLE".to_string(),
            ..Default::default()
        };

        let out = filter_and_sort(&prompts, &filters);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_folder_filter_is_exact() {
        let prompts = vec![
            prompt("In", "x", Some("f1"), &[]),
            prompt("Other", "x", Some("f2"), &[]),
            prompt("Uncategorized", "x", None, &[]),
        ];
        let filters = SearchFilters {
            selected_folder: Some("f1".to_string()),
            ..Default::default()
        };

        let out = filter_and_sort(&prompts, &filters);
        assert_eq!(titles(&out), vec!["In"]);
    }

    #[test]
    fn test_tag_filter_or_semantics() {
        let prompts = vec![
            prompt("Both", "x", None, &["t1", "t2"]),
            prompt("One", "x", None, &["t2"]),
            prompt("None", "x", None, &[]),
        ];
        let mut filters = SearchFilters {
            selected_tags: vec!["t1".to_string(), "t2".to_string()],
            ..Default::default()
        };
        filters.sort_by = SortBy::Title;
        filters.sort_order = SortOrder::Asc;

        let out = filter_and_sort(&prompts, &filters);
        assert_eq!(titles(&out), vec!["Both", "One"]);
    }

    #[test]
    fn test_filter_composition() {
        let prompts = vec![
            prompt("Alpha", "foo", Some("f1"), &["t1"]),
            prompt("Beta", "bar", Some("f1"), &[]),
            prompt("Gamma x", "baz", Some("f2"), &["t1"]),
        ];
        // Stages intersect: "Gamma x" matches the query but sits in f2, and
        // the f1 prompts contain no "x", so nothing survives both stages.
        let filters = SearchFilters {
            query: "x".to_string(),
            selected_folder: Some("f1".to_string()),
            ..Default::default()
        };
        assert!(filter_and_sort(&prompts, &filters).is_empty());

        // A query that does hit inside f1 narrows to exactly that prompt.
        let filters = SearchFilters {
            query: "foo".to_string(),
            selected_folder: Some("f1".to_string()),
            selected_tags: vec!["t1".to_string()],
            ..Default::default()
        };
        assert_eq!(titles(&filter_and_sort(&prompts, &filters)), vec!["Alpha"]);
    }

    #[test]
    fn test_sort_by_title_case_insensitive() {
        let prompts = vec![
            prompt("banana", "x", None, &[]),
            prompt("Apple", "x", None, &[]),
            prompt("cherry", "x", None, &[]),
        ];
        let filters = SearchFilters {
            sort_by: SortBy::Title,
            sort_order: SortOrder::Asc,
            ..Default::default()
        };

        let out = filter_and_sort(&prompts, &filters);
        assert_eq!(titles(&out), vec!["Apple", "banana", "cherry"]);
    }

    #[test]
    fn test_sort_determinism_by_updated_at() {
        let older = prompt("b", "x", None, &[]);
        std::thread::sleep(std::time::Duration::from_millis(10));
        let newer = prompt("a", "x", None, &[]);
        let prompts = vec![older, newer];

        let asc_title = SearchFilters {
            sort_by: SortBy::Title,
            sort_order: SortOrder::Asc,
            ..Default::default()
        };
        assert_eq!(titles(&filter_and_sort(&prompts, &asc_title)), vec!["a", "b"]);

        let desc_updated = SearchFilters {
            sort_by: SortBy::UpdatedAt,
            sort_order: SortOrder::Desc,
            ..Default::default()
        };
        assert_eq!(
            titles(&filter_and_sort(&prompts, &desc_updated)),
            vec!["a", "b"]
        );
    }

    #[test]
    fn test_sort_by_content_length_numeric() {
        let prompts = vec![
            prompt("long", "aaaaaaaaaa", None, &[]),
            prompt("short", "aa", None, &[]),
        ];
        let filters = SearchFilters {
            sort_by: SortBy::ContentLength,
            sort_order: SortOrder::Asc,
            ..Default::default()
        };

        let out = filter_and_sort(&prompts, &filters);
        assert_eq!(titles(&out), vec!["short", "long"]);
    }

    #[test]
    fn test_input_not_mutated() {
        let prompts = vec![
            prompt("b", "x", None, &[]),
            prompt("a", "x", None, &[]),
        ];
        let filters = SearchFilters {
            sort_by: SortBy::Title,
            sort_order: SortOrder::Asc,
            ..Default::default()
        };

        let _ = filter_and_sort(&prompts, &filters);
        assert_eq!(titles(&prompts), vec!["b", "a"]);
    }
}
