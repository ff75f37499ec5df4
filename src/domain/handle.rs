use unicode_segmentation::UnicodeSegmentation;

/// A Codeforces handle that passed basic validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Handle(String);

impl Handle {
    pub fn parse(s: String) -> Result<Self, String> {
        let allowed_punctuation = ['_', '-', '.'];
        let s = s.trim().to_owned();

        if s.is_empty() {
            Err("Handle has no non-whitespace characters.".to_owned())
        } else if s.graphemes(true).count() > 24 {
            Err(format!("Handle {} is too long.", s))
        } else if s
            .chars()
            .any(|c| !c.is_ascii_alphanumeric() && !allowed_punctuation.contains(&c))
        {
            Err(format!("Handle {} contains forbidden characters.", s))
        } else {
            Ok(Self(s))
        }
    }
}

impl AsRef<str> for Handle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Handle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
