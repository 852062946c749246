//! Mapping of user ids and object keys onto local file names.
//!
//! Persisted logs live in a two-level layout, `<root>/<userId>/<file>`.
//! Both components must stay single path segments, so `%` and the path
//! separators are percent-escaped and the relative components `.` and `..`
//! are rewritten. The escaping is reversible, so distinct names never share
//! a file.

/// Directory name used for records without a user id.
pub const NULL_USER: &str = "null";

/// Directory name for a user id.
pub fn user_dir_name(user_id: &str) -> String {
    if user_id.is_empty() {
        return NULL_USER.to_string();
    }
    path_segment(user_id)
}

/// File name under which a matched object is persisted.
pub fn object_file_name(key: &str) -> String {
    format!("{}.json", path_segment(key))
}

fn path_segment(name: &str) -> String {
    match name {
        "." => return "%2E".to_string(),
        ".." => return "%2E%2E".to_string(),
        _ => {}
    }

    let mut segment = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '%' => segment.push_str("%25"),
            '/' => segment.push_str("%2F"),
            '\\' => segment.push_str("%5C"),
            _ => segment.push(c),
        }
    }
    segment
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_user_dir_name() {
        assert_eq!(user_dir_name("u1"), "u1");
        assert_eq!(user_dir_name(""), "null");
        assert_eq!(user_dir_name("null"), "null");
        assert_eq!(user_dir_name("../etc"), "..%2Fetc");
        assert_eq!(user_dir_name(".."), "%2E%2E");
        assert_eq!(user_dir_name("."), "%2E");
    }

    #[test]
    fn test_object_file_name() {
        assert_eq!(object_file_name("event-1"), "event-1.json");
        assert_eq!(object_file_name("2021/01/event-1"), "2021%2F01%2Fevent-1.json");
        assert_eq!(object_file_name("a\\b"), "a%5Cb.json");
        assert_eq!(object_file_name("a_b"), "a_b.json");
    }

    #[test]
    fn test_distinct_keys_get_distinct_files() {
        let keys = ["a/b", "a\\b", "a_b", "a%2Fb", "a%5Cb", "a%b", "..", "%2E%2E"];
        let names: HashSet<_> = keys.iter().map(|k| object_file_name(k)).collect();
        assert_eq!(names.len(), keys.len());

        let users: HashSet<_> = keys.iter().map(|k| user_dir_name(k)).collect();
        assert_eq!(users.len(), keys.len());
    }

    #[test]
    fn test_segments_never_contain_separators() {
        for name in ["a/b", "/", "\\\\", "x/../y"] {
            let segment = user_dir_name(name);
            assert!(!segment.contains('/') && !segment.contains('\\'), "{segment}");
        }
    }
}
