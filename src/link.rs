use url::Url;

use crate::{
    model::{ImageId, ImageRef, TryOnRequest},
    resolve::{extract_cloth_id, extract_person_id},
};

pub fn sample_person(id: &ImageId) -> ImageRef {
    ImageRef::new(format!("/samples/person{id}.jpg"))
}

pub fn sample_cloth(id: &ImageId) -> ImageRef {
    ImageRef::new(format!("/samples/cloth{id}.jpg"))
}

/// Builds `{base_url}?p={personId}&c={clothId}`.
///
/// `None` when either reference carries no id (uploaded photos aren't shareable).
///
/// `base_url` is used verbatim and must be a bare origin or path: no query
/// string and no fragment, otherwise the result is not a valid share link.
/// [`Config::validate`](crate::Config::validate) enforces this for configured
/// origins; other callers must check it themselves.
pub fn encode_link(base_url: &str, person: &ImageRef, cloth: &ImageRef) -> Option<String> {
    let p = extract_person_id(person)?;
    let c = extract_cloth_id(cloth)?;
    Some(format!("{base_url}?p={p}&c={c}"))
}

/// Reconstructs sample-catalog references from a share link's `p`/`c` params.
///
/// Only round-trips for sample references: everything decodes to
/// `/samples/person{p}.jpg` and `/samples/cloth{c}.jpg` whatever was shared.
pub fn decode_link(link: &str) -> Option<TryOnRequest> {
    let url = Url::parse(link).ok()?;
    decode_pairs(url.query_pairs())
}

/// Same as [`decode_link`] but for a bare query string (with or without the `?`).
pub fn decode_query(query: &str) -> Option<TryOnRequest> {
    let query = query.strip_prefix('?').unwrap_or(query);
    decode_pairs(url::form_urlencoded::parse(query.as_bytes()))
}

fn decode_pairs<'a>(
    pairs: impl Iterator<Item = (std::borrow::Cow<'a, str>, std::borrow::Cow<'a, str>)>,
) -> Option<TryOnRequest> {
    let mut p = None;
    let mut c = None;
    for (k, v) in pairs {
        match k.as_ref() {
            "p" if p.is_none() => p = Some(v.into_owned()),
            "c" if c.is_none() => c = Some(v.into_owned()),
            _ => {}
        }
    }

    let p = ImageId::parse(&p?)?;
    let c = ImageId::parse(&c?)?;
    Some(TryOnRequest {
        person_image: Some(sample_person(&p)),
        cloth_image: Some(sample_cloth(&c)),
    })
}
