/// Normalizes a raw compiler/language label from the submissions table
///
/// Checks run in order and the first hit wins:
/// 1. contains `c++` -> `C++`
/// 2. contains `c` -> `C`
/// 3. contains `python` -> the first `p` is upper-cased, everything else kept
/// 4. otherwise the label is returned unchanged
///
/// Matching is case-sensitive.
pub fn normalize_language(raw: &str) -> String {
    if raw.contains("c++") {
        return "C++".to_string();
    }
    if raw.contains('c') {
        return "C".to_string();
    }
    if raw.contains("python") {
        return raw.replacen('p', "P", 1);
    }
    raw.to_string()
}
