use url::form_urlencoded;

/// Detail link for a record: `{page}?id={id}`, with the id query-encoded.
pub fn post_url(page: &str, id: &str) -> String {
    let query: String = form_urlencoded::Serializer::new(String::new())
        .append_pair("id", id)
        .finish();
    format!("{page}?{query}")
}
