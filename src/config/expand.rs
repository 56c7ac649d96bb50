//! Home and environment variable expansion for configured paths

use std::path::PathBuf;

/// Expand `~`, `$VAR`, `${VAR}` and `%VAR%` in a configured path.
///
/// Unknown variables are left untouched so the resulting path still points
/// somewhere recognisable in error messages.
pub fn expand_path(raw: &str) -> PathBuf {
    expand_with(raw, |name| std::env::var(name).ok(), dirs::home_dir())
}

pub(crate) fn expand_with<F>(raw: &str, lookup: F, home: Option<PathBuf>) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    // `~` is resolved on the raw text; a variable whose value starts with `~`
    // stays literal.
    let with_home = match home {
        Some(home) if raw == "~" => home.to_string_lossy().into_owned(),
        Some(home) => match raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\")) {
            Some(rest) => home.join(rest).to_string_lossy().into_owned(),
            None => raw.to_string(),
        },
        None => raw.to_string(),
    };

    PathBuf::from(expand_vars(&with_home, &lookup))
}

fn expand_vars<F>(raw: &str, lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(pos) = rest.find(['$', '%']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        let (name, consumed) = if let Some(after) = tail.strip_prefix("${") {
            match after.find('}') {
                Some(end) => (&after[..end], end + 3),
                None => ("", 0),
            }
        } else if let Some(after) = tail.strip_prefix('$') {
            let end = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            (&after[..end], end + 1)
        } else {
            let after = &tail[1..];
            match after.find('%') {
                Some(end) => (&after[..end], end + 2),
                None => ("", 0),
            }
        };

        match (!name.is_empty()).then(|| lookup(name)).flatten() {
            Some(value) => {
                out.push_str(&value);
                rest = &tail[consumed..];
            }
            None => {
                // Not a variable we can expand: keep the sigil literally.
                out.push_str(&tail[..1]);
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn lookup(name: &str) -> Option<String> {
        match name {
            "APPDATA" => Some("C:/Users/me/AppData/Roaming".to_string()),
            "XDG_CONFIG_HOME" => Some("/home/me/.config".to_string()),
            _ => None,
        }
    }

    fn expand(raw: &str) -> PathBuf {
        expand_with(raw, lookup, Some(PathBuf::from("/home/me")))
    }

    #[test]
    fn test_tilde() {
        assert_eq!(expand("~"), Path::new("/home/me"));
        assert_eq!(
            expand("~/.config/OrcaSlicer"),
            Path::new("/home/me").join(".config/OrcaSlicer")
        );
    }

    #[test]
    fn test_tilde_only_at_start() {
        assert_eq!(expand("/data/~/x"), Path::new("/data/~/x"));
    }

    #[test]
    fn test_dollar_variables() {
        assert_eq!(
            expand("$XDG_CONFIG_HOME/OrcaSlicer"),
            Path::new("/home/me/.config/OrcaSlicer")
        );
        assert_eq!(
            expand("${XDG_CONFIG_HOME}/OrcaSlicer"),
            Path::new("/home/me/.config/OrcaSlicer")
        );
    }

    #[test]
    fn test_percent_variables() {
        assert_eq!(
            expand("%APPDATA%/OrcaSlicer"),
            Path::new("C:/Users/me/AppData/Roaming/OrcaSlicer")
        );
    }

    #[test]
    fn test_unknown_variables_are_kept() {
        assert_eq!(expand("$NOPE/x"), Path::new("$NOPE/x"));
        assert_eq!(expand("%NOPE%/x"), Path::new("%NOPE%/x"));
        assert_eq!(expand("100%"), Path::new("100%"));
    }

    #[test]
    fn test_home_is_expanded_before_variables() {
        let lookup = |name: &str| (name == "TILDE").then(|| "~/x".to_string());
        let home = Some(PathBuf::from("/home/me"));

        assert_eq!(expand_with("$TILDE", lookup, home.clone()), Path::new("~/x"));
        assert_eq!(
            expand_with("~/$TILDE", lookup, home),
            Path::new("/home/me/~/x")
        );
    }

    #[test]
    fn test_plain_path_is_unchanged() {
        assert_eq!(expand("./profiles"), Path::new("./profiles"));
    }
}
