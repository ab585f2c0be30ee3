use virtual_mirror::{ImageRef, ResolvedResult, resolve};

fn r(s: &str) -> ImageRef {
    ImageRef::from(s)
}

#[test]
fn absent_input_resolves_to_nothing() {
    let p = r("/samples/person1.png");
    let c = r("/samples/cloth3.jpg");
    assert_eq!(resolve(None, Some(&c)), None);
    assert_eq!(resolve(Some(&p), None), None);
    assert_eq!(resolve(None, None), None);
}

#[test]
fn sample_pair_resolves_to_composite() {
    let out = resolve(
        Some(&r("/samples/person1.png")),
        Some(&r("/samples/cloth3.jpg")),
    );
    assert_eq!(
        out,
        Some(ResolvedResult::Composite {
            path: "/results/p1c3.png".to_string()
        })
    );
}

#[test]
fn product_images_resolve_like_samples() {
    let out = resolve(
        Some(&r("/samples/person2.png")),
        Some(&r("/products/cloth2.jpg")),
    )
    .unwrap();
    assert_eq!(out.composite_path(), Some("/results/p2c2.png"));
}

#[test]
fn upload_falls_back_to_side_by_side_with_originals() {
    let out = resolve(Some(&r("blob:abc123")), Some(&r("/samples/cloth2.jpg")));
    assert_eq!(
        out,
        Some(ResolvedResult::SideBySide {
            person: r("blob:abc123"),
            cloth: r("/samples/cloth2.jpg"),
        })
    );

    let out = resolve(Some(&r("/samples/person1.png")), Some(&r("jacket.jpg"))).unwrap();
    assert!(matches!(out, ResolvedResult::SideBySide { .. }));
}

#[test]
fn keywords_are_not_interchangeable() {
    // the cloth reference must carry `cloth`, not `person`
    let out = resolve(
        Some(&r("/samples/person1.png")),
        Some(&r("/samples/person2.png")),
    )
    .unwrap();
    assert!(out.composite_path().is_none());
}

#[test]
fn resolving_is_repeatable() {
    let cases = [
        ("/samples/person1.png", "/samples/cloth3.jpg"),
        ("blob:abc123", "/samples/cloth2.jpg"),
        ("", ""),
    ];
    for (p, c) in cases {
        let (p, c) = (r(p), r(c));
        assert_eq!(resolve(Some(&p), Some(&c)), resolve(Some(&p), Some(&c)));
    }
}
