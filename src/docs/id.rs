use uuid::Uuid;

/// Generate a document id: `doc_<millis>_<random suffix>`.
///
/// The millisecond prefix keeps ids roughly time-sortable for humans;
/// uniqueness comes from the UUID-derived suffix, so two ids minted in
/// the same millisecond still differ.
pub fn generate_id(now_ms: i64) -> String {
    let uuid = Uuid::new_v4().simple().to_string();
    format!("doc_{}_{}", now_ms, &uuid[..12])
}

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_id_format() {
        let id = generate_id(1724400000000);
        assert!(id.starts_with("doc_1724400000000_"));
        let suffix = id.rsplit('_').next().unwrap();
        assert_eq!(suffix.len(), 12);
    }

    #[test]
    fn test_ids_distinct_within_same_millisecond() {
        let now = now_millis();
        let ids: HashSet<String> = (0..1000).map(|_| generate_id(now)).collect();
        assert_eq!(ids.len(), 1000);
    }
}
