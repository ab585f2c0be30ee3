use std::fmt;

/// Opaque locator for an image: a sample path, an upload handle (`blob:...`),
/// or a server-relative path. Never validated.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ImageRef(pub String);

impl ImageRef {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImageRef {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ImageRef {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Decimal digits captured from an image reference, kept verbatim (`007` stays `007`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImageId(String);

impl ImageId {
    /// Returns `None` unless `digits` is non-empty and all ASCII digits.
    pub fn parse(digits: &str) -> Option<Self> {
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(digits.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Two image references handed from the selection view to the result view.
///
/// Wire form is a flat JSON object: `{"personImage": ..., "clothImage": ...}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TryOnRequest {
    #[serde(default)]
    pub person_image: Option<ImageRef>,
    #[serde(default)]
    pub cloth_image: Option<ImageRef>,
}

impl TryOnRequest {
    pub fn new(person: impl Into<ImageRef>, cloth: impl Into<ImageRef>) -> Self {
        Self {
            person_image: Some(person.into()),
            cloth_image: Some(cloth.into()),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.person_image.is_some() && self.cloth_image.is_some()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolvedResult {
    /// Path of a pre-rendered composite, e.g. `/results/p1c3.png`.
    Composite { path: String },
    /// Render the two originals next to each other.
    SideBySide { person: ImageRef, cloth: ImageRef },
}

impl ResolvedResult {
    pub fn composite_path(&self) -> Option<&str> {
        match self {
            Self::Composite { path } => Some(path),
            Self::SideBySide { .. } => None,
        }
    }
}
