use std::sync::LazyLock;

use regex::Regex;

use crate::model::{ImageId, ImageRef, ResolvedResult};

// ASCII digits only; `\d` would also match other Unicode decimal digits.
static PERSON_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"person([0-9]+)").expect("static regex"));
static CLOTH_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"cloth([0-9]+)").expect("static regex"));

fn first_capture(re: &Regex, haystack: &str) -> Option<ImageId> {
    let caps = re.captures(haystack)?;
    ImageId::parse(caps.get(1)?.as_str())
}

/// First `person<digits>` in the reference.
pub fn extract_person_id(image: &ImageRef) -> Option<ImageId> {
    first_capture(&PERSON_ID, image.as_str())
}

/// First `cloth<digits>` in the reference.
pub fn extract_cloth_id(image: &ImageRef) -> Option<ImageId> {
    first_capture(&CLOTH_ID, image.as_str())
}

pub fn composite_path(person: &ImageId, cloth: &ImageId) -> String {
    format!("/results/p{person}c{cloth}.png")
}

/// Decides how a try-on result is shown.
///
/// `None` when either input is absent. Otherwise a composite path if both
/// references carry an id, else the two originals side by side. Never fails.
pub fn resolve(person: Option<&ImageRef>, cloth: Option<&ImageRef>) -> Option<ResolvedResult> {
    let (person, cloth) = (person?, cloth?);

    match (extract_person_id(person), extract_cloth_id(cloth)) {
        (Some(p), Some(c)) => Some(ResolvedResult::Composite {
            path: composite_path(&p, &c),
        }),
        _ => {
            tracing::debug!(%person, %cloth, "no composite id, falling back to side-by-side");
            Some(ResolvedResult::SideBySide {
                person: person.clone(),
                cloth: cloth.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person_id(s: &str) -> Option<String> {
        let id = extract_person_id(&ImageRef::from(s))?;
        Some(id.to_string())
    }

    fn cloth_id(s: &str) -> Option<String> {
        let id = extract_cloth_id(&ImageRef::from(s))?;
        Some(id.to_string())
    }

    #[test]
    fn extraction_takes_first_match() {
        assert_eq!(person_id("/person12/person3.png").as_deref(), Some("12"));
        assert_eq!(cloth_id("cloth9-cloth4").as_deref(), Some("9"));
    }

    #[test]
    fn extraction_needs_a_digit_right_after_the_keyword() {
        assert_eq!(person_id("/samples/person.png"), None);
        assert_eq!(person_id("/samples/person_1.png"), None);
        assert_eq!(person_id("/samples/Person1.png"), None);
        // a later well-formed occurrence still counts
        assert_eq!(person_id("personx/person5").as_deref(), Some("5"));
    }

    #[test]
    fn extraction_ignores_non_ascii_digits() {
        assert_eq!(cloth_id("cloth\u{0663}.jpg"), None);
    }

    #[test]
    fn zero_padding_is_preserved() {
        let p = ImageRef::from("person007.png");
        let c = ImageRef::from("cloth01.jpg");
        let out = resolve(Some(&p), Some(&c)).unwrap();
        assert_eq!(out.composite_path(), Some("/results/p007c01.png"));
    }
}
