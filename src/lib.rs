#![forbid(unsafe_code)]

pub mod backend;
pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod link;
pub mod model;
pub mod relay;
pub mod resolve;
pub mod share;
pub mod views;

pub use backend::{SimulatedBackend, TryOnBackend};
pub use catalog::{PRODUCTS, Product, SAMPLE_CLOTHES, SAMPLE_PERSONS};
pub use config::Config;
pub use error::{TryOnError, TryOnResult};
pub use export::{export_png, render_result};
pub use link::{decode_link, decode_query, encode_link};
pub use model::{ImageId, ImageRef, ResolvedResult, TryOnRequest};
pub use relay::{FsStore, KeyValueStore, MemoryStore, RELAY_KEY, SessionRelay};
pub use resolve::{extract_cloth_id, extract_person_id, resolve};
pub use share::{Clipboard, CopyOutcome, MemoryClipboard, Notification, copy_share_link};
pub use views::{ResultEntry, ResultPage, ResultView, Route, TryOnSelection, VirtualMirror};
