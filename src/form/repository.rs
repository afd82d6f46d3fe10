//! Repository name handling.

/// Error shown when the repository field cannot be read as `owner/name`.
pub const REPOSITORY_FORMAT: &str =
    "Provide the repository as the format 'organization/repository'.";

/// Turn user input into an `owner/name` repository id.
///
/// Accepts `owner/name` as well as GitHub URLs such as
/// `https://github.com/owner/name.git`.
pub fn normalize_repository(input: &str) -> Result<String, &'static str> {
    let mut repo = input.trim();

    for prefix in ["https://", "http://"] {
        if let Some(rest) = repo.strip_prefix(prefix) {
            repo = rest;
        }
    }
    if let Some(rest) = repo.strip_prefix("www.") {
        repo = rest;
    }
    if let Some(rest) = repo.strip_prefix("github.com/") {
        repo = rest;
    }
    repo = repo.trim_end_matches('/');
    if let Some(rest) = repo.strip_suffix(".git") {
        repo = rest;
    }

    match repo.split_once('/') {
        Some((owner, name))
            if is_path_segment(owner)
                && is_path_segment(name)
                && !name.contains('/')
                && !repo.contains(char::is_whitespace) =>
        {
            Ok(repo.to_string())
        }
        _ => Err(REPOSITORY_FORMAT),
    }
}

fn is_path_segment(part: &str) -> bool {
    !matches!(part, "" | "." | "..")
}
