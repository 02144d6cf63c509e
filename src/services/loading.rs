use std::sync::Arc;

use crate::view::{Indicator, View};

/// Scoped visibility of a loading indicator
///
/// Shows the indicator on creation and hides it on drop, so every exit path
/// of a request (success, empty result, error, early return) releases it.
/// Overlapping requests share the indicator: whichever settles last decides
/// its final state.
pub struct LoadingGuard {
    view: Arc<dyn View>,
    indicator: Indicator,
}

impl LoadingGuard {
    pub fn show(view: Arc<dyn View>, indicator: Indicator) -> Self {
        view.set_indicator(indicator, true);
        Self { view, indicator }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.view.set_indicator(self.indicator, false);
    }
}
