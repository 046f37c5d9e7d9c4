//! Shared utility functions for code generation.

use std::collections::HashMap;

/// Characters that cannot appear in a Go package clause.
const PACKAGE_NAME_STRIP: [char; 3] = ['.', '_', '-'];

/// Keys of a name-keyed map in ascending byte-wise order.
///
/// Hash map iteration order differs between runs; anything that feeds
/// generated output must go through this first.
pub fn sorted_keys<V>(map: &HashMap<String, V>) -> Vec<&str> {
    let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
    keys.sort_unstable();
    keys
}

/// Strip `.`, `_` and `-` from a candidate package name (e.g., "my.pkg_name-1" -> "mypkgname1")
pub fn clean_package_name(pkg: &str) -> String {
    pkg.chars()
        .filter(|c| !PACKAGE_NAME_STRIP.contains(c))
        .collect()
}
