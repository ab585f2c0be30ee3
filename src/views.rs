//! Navigation decisions made by the storefront pages around the core.
//!
//! Pages are modelled as small state holders whose transitions return the
//! next [`Route`]; rendering is left to whoever drives them.

use crate::{
    backend::TryOnBackend,
    catalog::Product,
    error::TryOnResult,
    link::{decode_query, encode_link},
    model::{ImageRef, ResolvedResult, TryOnRequest},
    relay::{KeyValueStore, SessionRelay},
    resolve::resolve,
    share::{Clipboard, CopyOutcome, copy_share_link},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Shop,
    Result,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Self::Shop => "/shop",
            Self::Result => "/result",
        }
    }
}

/// The try-on dialog opened from a product card.
#[derive(Clone, Debug, Default)]
pub struct TryOnSelection {
    pub person: Option<ImageRef>,
    pub product: Option<Product>,
    processing: bool,
}

impl TryOnSelection {
    pub fn for_product(product: Product) -> Self {
        Self {
            product: Some(product),
            ..Self::default()
        }
    }

    pub fn choose_person(&mut self, person: impl Into<ImageRef>) {
        self.person = Some(person.into());
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    pub fn can_submit(&self) -> bool {
        self.person.is_some() && self.product.is_some() && !self.processing
    }

    pub fn request(&self) -> TryOnRequest {
        TryOnRequest {
            person_image: self.person.clone(),
            cloth_image: self.product.as_ref().map(Product::image_ref),
        }
    }

    /// Locks the dialog for processing. `None` when it is incomplete or a
    /// run is already in flight.
    pub fn begin(&mut self) -> Option<TryOnRequest> {
        if !self.can_submit() {
            return None;
        }
        self.processing = true;
        Some(self.request())
    }

    /// Completes [`begin`](Self::begin): runs the backend and, when it has
    /// something to show, hands the pair to the result page.
    pub fn finish<S: KeyValueStore>(
        &mut self,
        request: &TryOnRequest,
        backend: &mut dyn TryOnBackend,
        relay: &mut SessionRelay<S>,
    ) -> TryOnResult<Option<Route>> {
        let resolved = backend.process(request);
        self.processing = false;

        let Some(resolved) = resolved else {
            tracing::warn!("backend had nothing to show, staying on the dialog");
            return Ok(None);
        };
        relay.store(request)?;

        tracing::info!(?resolved, route = Route::Result.path(), "try-on submitted");
        Ok(Some(Route::Result))
    }

    /// `begin` and `finish` in one go. Nothing is stored unless the dialog is
    /// complete.
    pub fn submit<S: KeyValueStore>(
        &mut self,
        backend: &mut dyn TryOnBackend,
        relay: &mut SessionRelay<S>,
    ) -> TryOnResult<Option<Route>> {
        let Some(request) = self.begin() else {
            return Ok(None);
        };
        self.finish(&request, backend, relay)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultView {
    pub request: TryOnRequest,
    pub resolved: Option<ResolvedResult>,
}

impl ResultView {
    pub fn new(request: TryOnRequest) -> Self {
        let resolved = resolve(request.person_image.as_ref(), request.cloth_image.as_ref());
        Self { request, resolved }
    }

    /// `None` for pairs with no sample ids.
    pub fn share_link(&self, base_url: &str) -> Option<String> {
        encode_link(
            base_url,
            self.request.person_image.as_ref()?,
            self.request.cloth_image.as_ref()?,
        )
    }

    pub fn copy_link(&self, clipboard: &mut dyn Clipboard, base_url: &str) -> CopyOutcome {
        let person = self.request.person_image.as_ref();
        let cloth = self.request.cloth_image.as_ref();
        let (Some(p), Some(c)) = (person, cloth) else {
            return CopyOutcome::failed();
        };
        copy_share_link(clipboard, base_url, p, c)
    }

    pub fn try_another(&self) -> Route {
        Route::Shop
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResultEntry {
    Show(ResultView),
    Redirect(Route),
}

pub struct ResultPage;

impl ResultPage {
    /// Consumes the relay slot. Without a pending request the page sends the
    /// user back to the shop.
    pub fn enter<S: KeyValueStore>(relay: &mut SessionRelay<S>) -> TryOnResult<ResultEntry> {
        Ok(match relay.take_and_clear()? {
            Some(request) => ResultEntry::Show(ResultView::new(request)),
            None => {
                tracing::debug!("no pending try-on, redirecting to shop");
                ResultEntry::Redirect(Route::Shop)
            }
        })
    }
}

/// The standalone mirror page: pick a person and a cloth, or arrive via a
/// share link and land straight on the result.
#[derive(Clone, Debug, Default)]
pub struct VirtualMirror {
    pub person: Option<ImageRef>,
    pub cloth: Option<ImageRef>,
    result: Option<ResultView>,
    loading: bool,
}

impl VirtualMirror {
    /// `query` is the page's search string, e.g. `?p=1&c=2`.
    pub fn open(query: &str) -> Self {
        match decode_query(query) {
            Some(request) => Self {
                person: request.person_image.clone(),
                cloth: request.cloth_image.clone(),
                result: Some(ResultView::new(request)),
                loading: false,
            },
            None => Self::default(),
        }
    }

    pub fn showing_result(&self) -> Option<&ResultView> {
        self.result.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn choose_person(&mut self, person: impl Into<ImageRef>) {
        self.person = Some(person.into());
    }

    pub fn choose_cloth(&mut self, cloth: impl Into<ImageRef>) {
        self.cloth = Some(cloth.into());
    }

    /// Does nothing unless both images are chosen.
    pub fn process(&mut self, backend: &mut dyn TryOnBackend) -> Option<&ResultView> {
        let (person, cloth) = (self.person.clone()?, self.cloth.clone()?);
        let request = TryOnRequest {
            person_image: Some(person),
            cloth_image: Some(cloth),
        };

        self.loading = true;
        let resolved = backend.process(&request);
        self.loading = false;

        self.result = Some(ResultView { request, resolved });
        self.result.as_ref()
    }

    /// Back to selection; chosen images are kept.
    pub fn back(&mut self) {
        self.result = None;
    }
}
