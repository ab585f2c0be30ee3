use crate::model::ImageRef;

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Product {
    pub id: u32,
    pub name: &'static str,
    pub price: &'static str,
    pub image: &'static str,
}

impl Product {
    pub fn image_ref(&self) -> ImageRef {
        ImageRef::from(self.image)
    }
}

pub const PRODUCTS: &[Product] = &[
    Product {
        id: 1,
        name: "Classic White T-Shirt",
        price: "$29.99",
        image: "/products/cloth1.jpg",
    },
    Product {
        id: 2,
        name: "Denim Jacket",
        price: "$89.99",
        image: "/products/cloth2.jpg",
    },
    Product {
        id: 3,
        name: "Black Hoodie",
        price: "$59.99",
        image: "/products/cloth3.jpg",
    },
];

pub const SAMPLE_PERSONS: &[&str] = &[
    "/samples/person1.png",
    "/samples/person2.png",
    "/samples/person3.png",
];

pub const SAMPLE_CLOTHES: &[&str] = &[
    "/samples/cloth1.jpg",
    "/samples/cloth2.jpg",
    "/samples/cloth3.jpg",
];

pub fn product(id: u32) -> Option<&'static Product> {
    PRODUCTS.iter().find(|p| p.id == id)
}

/// 1-based, matching the numbering in the asset names.
pub fn sample_person(n: usize) -> Option<ImageRef> {
    SAMPLE_PERSONS
        .get(n.checked_sub(1)?)
        .map(|s| ImageRef::from(*s))
}

pub fn sample_cloth(n: usize) -> Option<ImageRef> {
    SAMPLE_CLOTHES
        .get(n.checked_sub(1)?)
        .map(|s| ImageRef::from(*s))
}
