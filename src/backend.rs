use std::time::Duration;

use crate::{
    model::{ResolvedResult, TryOnRequest},
    resolve::resolve,
};

/// Boundary to whatever turns a try-on request into something to show.
///
/// `None` means the request was incomplete and nothing should be rendered.
pub trait TryOnBackend {
    fn process(&mut self, request: &TryOnRequest) -> Option<ResolvedResult>;
}

/// Waits a fixed delay, then answers from the pre-rendered result naming scheme.
#[derive(Clone, Debug)]
pub struct SimulatedBackend {
    pub delay: Duration,
}

impl SimulatedBackend {
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(2000);

    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// No delay; for tests and scripted runs.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }
}

impl Default for SimulatedBackend {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

impl TryOnBackend for SimulatedBackend {
    #[tracing::instrument(skip(self))]
    fn process(&mut self, request: &TryOnRequest) -> Option<ResolvedResult> {
        if !self.delay.is_zero() {
            tracing::debug!(
                delay_ms = self.delay.as_millis() as u64,
                "simulating processing"
            );
            std::thread::sleep(self.delay);
        }
        resolve(request.person_image.as_ref(), request.cloth_image.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulated_backend_matches_resolver() {
        let req = TryOnRequest::new("/samples/person2.png", "/products/cloth1.jpg");
        let out = SimulatedBackend::instant().process(&req).unwrap();
        assert_eq!(out.composite_path(), Some("/results/p2c1.png"));
        assert!(
            SimulatedBackend::instant()
                .process(&TryOnRequest::default())
                .is_none()
        );
    }
}
