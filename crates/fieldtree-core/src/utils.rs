/// Turn a schema key into a display label.
///
/// Words are split on `_`, `-`, `.` and on lowercase→uppercase boundaries;
/// only the first word is capitalized.
///
/// # Examples
/// ```
/// use fieldtree_core::utils::humanize;
/// assert_eq!(humanize("created_at"), "Created at");
/// assert_eq!(humanize("firstName"), "First name");
/// assert_eq!(humanize("URL"), "Url");
/// ```
pub fn humanize(s: &str) -> String {
    let snake = to_snake_case(s);
    let mut result = String::with_capacity(snake.len());
    let mut pending_space = false;
    for c in snake.chars() {
        if matches!(c, '_' | '-' | '.') {
            pending_space = !result.is_empty();
            continue;
        }
        if pending_space {
            result.push(' ');
            pending_space = false;
        }
        if result.is_empty() {
            result.push(c.to_ascii_uppercase());
        } else {
            result.push(c.to_ascii_lowercase());
        }
    }
    result
}

/// Convert PascalCase or camelCase to snake_case.
///
/// Runs of uppercase letters are kept together.
///
/// # Examples
/// ```
/// use fieldtree_core::utils::to_snake_case;
/// assert_eq!(to_snake_case("FooBar"), "foo_bar");
/// assert_eq!(to_snake_case("fooBar"), "foo_bar");
/// assert_eq!(to_snake_case("userID"), "user_id");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    let mut prev_lower = false;
    for c in s.chars() {
        if c.is_ascii_uppercase() {
            if prev_lower && !result.ends_with('_') {
                result.push('_');
            }
            result.push(c.to_ascii_lowercase());
            prev_lower = false;
        } else {
            prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
            result.push(c);
        }
    }
    result
}
