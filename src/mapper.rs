/// Column Name Mapping Module
///
/// This module translates column identifiers reported by a result set
/// (lower-case words separated by underscores) into the capitalized-word
/// identifiers used by record field registries.

/// Converts an underscore-separated column name to its capitalized-word form.
///
/// # Arguments
///
/// * `column` - Column identifier as reported by the result set
///
/// # Returns
///
/// The capitalized-concatenation form of the identifier, e.g. `"user_id"`
/// becomes `"UserId"` and `"name"` becomes `"Name"` (first letter
/// capitalized, rest unchanged). Empty segments produced by consecutive,
/// leading, or trailing underscores contribute nothing.
pub fn underscore_to_pascal(column: &str) -> String {
    let mut mapped = String::with_capacity(column.len());
    for segment in column.split('_') {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            mapped.extend(first.to_uppercase());
            mapped.push_str(chars.as_str());
        }
    }
    mapped
}
