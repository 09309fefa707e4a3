use super::boundary::find_boundary;

/// Inserts a space between a parameter's type and its name
///
/// The fragment is trimmed first. It is returned unchanged when empty, when
/// it already contains a space, or when no boundary rule applies. This is a
/// heuristic and will get unusual identifier shapes wrong.
///
/// # Example
///
/// ```
/// use doxygen_harvest::signature::format_parameter;
///
/// assert_eq!(format_parameter("kmySound::WaveSound*obj"), "kmySound::WaveSound* obj");
/// assert_eq!(format_parameter("Vector3position"), "Vector3 position");
/// assert_eq!(format_parameter("int value"), "int value");
/// ```
pub fn format_parameter(param: &str) -> String {
    let param = param.trim();
    if param.is_empty() || param.contains(' ') {
        return param.to_string();
    }

    let chars: Vec<char> = param.chars().collect();
    match find_boundary(&chars) {
        Some((_, index)) => {
            let (head, tail) = chars.split_at(index);
            format!(
                "{} {}",
                head.iter().collect::<String>(),
                tail.iter().collect::<String>()
            )
        }
        None => param.to_string(),
    }
}

/// Splits a parameter list on commas outside of `<...>` groups
///
/// Each parameter is trimmed. A trailing empty remainder is dropped.
pub fn split_parameters(params: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth: i32 = 0;

    for c in params.chars() {
        match c {
            '<' => {
                depth += 1;
                current.push(c);
            }
            '>' => {
                depth -= 1;
                current.push(c);
            }
            ',' if depth == 0 => {
                parts.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }

    if !current.is_empty() {
        parts.push(current.trim().to_string());
    }

    parts
}

/// Repairs type/name spacing in every parameter of a declaration
///
/// The declaration is split at its first top-level parenthesized group into
/// name, parameter list and trailing qualifiers (`const` and the like). The
/// name and qualifiers are kept verbatim. Declarations without a parameter
/// group, or with an empty one, are returned unchanged.
///
/// # Example
///
/// ```
/// use doxygen_harvest::signature::format_signature;
///
/// assert_eq!(
///     format_signature("initializeSETypeCount(cli::array<int>^seCounts)"),
///     "initializeSETypeCount(cli::array<int>^ seCounts)"
/// );
/// assert_eq!(format_signature("getValue() const"), "getValue() const");
/// ```
pub fn format_signature(signature: &str) -> String {
    let Some((open, close)) = first_paren_group(signature) else {
        return signature.to_string();
    };

    let name = &signature[..open];
    let params = &signature[open + 1..close];
    let suffix = &signature[close + 1..];

    if name.is_empty() || params.trim().is_empty() {
        return signature.to_string();
    }

    let formatted: Vec<String> = split_parameters(params)
        .iter()
        .map(|param| format_parameter(param))
        .collect();

    format!("{}({}){}", name, formatted.join(", "), suffix)
}

/// Byte offsets of the first `(` and its matching `)`
fn first_paren_group(text: &str) -> Option<(usize, usize)> {
    let open = text.find('(')?;
    let mut depth = 0usize;

    for (offset, c) in text[open..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some((open, open + offset));
                }
            }
            _ => {}
        }
    }

    None
}
