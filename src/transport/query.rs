use crate::domain::{PageSize, QueryOptions};

/// Encode filters and sort options as query pairs using bracket notation.
///
/// `vars[email][exists]=true`, `name[prefix]=foo`, `sort=name`, `sort_dir=desc`.
pub fn encode_query_options(options: &QueryOptions) -> Vec<(String, String)> {
    let mut params = Vec::<(String, String)>::new();

    for filter in options.filters() {
        let mut segments = filter.path().iter();
        let mut key = segments.next().cloned().unwrap_or_default();
        for segment in segments {
            key.push('[');
            key.push_str(segment);
            key.push(']');
        }
        if let Some(modifier) = filter.modifier() {
            key.push('[');
            key.push_str(modifier.as_str());
            key.push(']');
        }
        params.push((key, filter.value().to_owned()));
    }

    if let Some(sort) = options.sort_field() {
        params.push(("sort".to_owned(), sort.to_owned()));
    }
    if let Some(dir) = options.sort_direction() {
        params.push(("sort_dir".to_owned(), dir.as_str().to_owned()));
    }

    params
}

pub fn encode_page(page_size: PageSize, offset: u64) -> Vec<(String, String)> {
    vec![
        (PageSize::FIELD.to_owned(), page_size.value().to_string()),
        ("offset".to_owned(), offset.to_string()),
    ]
}

pub fn encode_count() -> Vec<(String, String)> {
    vec![("count".to_owned(), "1".to_owned())]
}
