use plutostate_pack::Value;

use crate::config::RenderConfig;
use crate::ToolsError;

const FRONTMATTER_PATH: [&str; 2] = ["metadata", "frontmatter"];
const AUTHOR_AVATAR_SUFFIX: &str = ".png?size=48";

/// Props for the og-image header layout, taken from notebook frontmatter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderProps {
    pub author: Option<String>,
    pub author_image: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl HeaderProps {
    /// Reads `metadata.frontmatter` from an unpacked state file.
    ///
    /// Author precedence: `author_name`, else every `author[].name` joined by
    /// `", "`. Image precedence: `author_image`, else the last author's
    /// `image`, else the first author's `url` with a sized `.png` suffix.
    /// The title falls back to the notebook's file name when it is missing or
    /// nil. Numeric and boolean titles and author names are stringified.
    pub fn from_statefile(state: &Value, notebook_path: &str) -> Result<Self, ToolsError> {
        let frontmatter = state
            .get_path(&FRONTMATTER_PATH)
            .filter(|value| value.as_map().is_some())
            .ok_or_else(|| ToolsError::missing_field(FRONTMATTER_PATH.join(".")))?;
        let authors = frontmatter.get("author").and_then(Value::as_array);

        let author = match frontmatter.get("author_name") {
            Some(name) => display_scalar(name),
            None => authors.map(joined_author_names),
        };

        let author_image = match frontmatter.get("author_image") {
            Some(image) => owned_str(image),
            None => authors
                .and_then(|authors| authors.last())
                .and_then(|last| last.get("image"))
                .and_then(owned_str),
        };
        let author_image = author_image.filter(|image| !image.is_empty()).or_else(|| {
            authors
                .and_then(|authors| authors.first())
                .and_then(|first| first.get("url"))
                .and_then(Value::as_str)
                .map(|url| format!("{url}{AUTHOR_AVATAR_SUFFIX}"))
        });

        let title = match frontmatter.get("title").and_then(display_scalar) {
            Some(title) => title,
            None => notebook_path.rsplit('/').next().unwrap_or_default().to_string(),
        };

        Ok(Self {
            author,
            author_image,
            title,
            description: frontmatter.get("description").and_then(owned_str),
            image_url: frontmatter.get("image").and_then(owned_str),
        })
    }

    /// Author avatar, or the configured default when the notebook names none.
    pub fn avatar_url<'a>(&'a self, render: &'a RenderConfig) -> &'a str {
        self.author_image.as_deref().unwrap_or(&render.default_author_image)
    }
}

fn owned_str(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

// Text of a scalar as it would print in the notebook frontend.
fn display_scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Boolean(flag) => Some(flag.to_string()),
        Value::Integer(number) => Some(number.to_string()),
        Value::UInteger(number) => Some(number.to_string()),
        Value::Float(number) if number.is_infinite() => {
            Some(if *number > 0.0 { "Infinity" } else { "-Infinity" }.to_string())
        }
        Value::Float(number) => Some(number.to_string()),
        _ => None,
    }
}

fn joined_author_names(authors: &[Value]) -> String {
    authors
        .iter()
        .map(|author| author.get("name").and_then(display_scalar).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::display_scalar;
    use plutostate_pack::Value;

    #[test]
    fn scalars_print_like_the_frontend() {
        assert_eq!(display_scalar(&Value::from(2024)).as_deref(), Some("2024"));
        assert_eq!(display_scalar(&Value::Float(2024.0)).as_deref(), Some("2024"));
        assert_eq!(display_scalar(&Value::Float(1.5)).as_deref(), Some("1.5"));
        assert_eq!(display_scalar(&Value::Float(f64::NEG_INFINITY)).as_deref(), Some("-Infinity"));
        assert_eq!(display_scalar(&Value::from(false)).as_deref(), Some("false"));
        assert_eq!(display_scalar(&Value::Nil), None);
        assert_eq!(display_scalar(&Value::Array(Vec::new())), None);
    }
}
