//! The process-wide "current default" slot.

use crate::core::configurator::ResolvedConfig;
use arc_swap::ArcSwap;
use std::sync::Arc;

/// Holds the baseline resolved view captured at context creation and the
/// replaceable "current default" view.
///
/// Promotion is a single atomic pointer swap: readers racing a promotion
/// observe either the pre- or post-promotion view in full, never a partially
/// updated one. Restoring always returns to exactly the captured baseline,
/// regardless of how many promotions happened in between.
#[derive(Debug)]
pub(crate) struct DefaultConfigState {
    baseline: Arc<ResolvedConfig>,
    current: ArcSwap<ResolvedConfig>,
}

impl DefaultConfigState {
    pub(crate) fn new(baseline: Arc<ResolvedConfig>) -> Self {
        Self {
            current: ArcSwap::new(Arc::clone(&baseline)),
            baseline,
        }
    }

    pub(crate) fn current(&self) -> Arc<ResolvedConfig> {
        self.current.load_full()
    }

    pub(crate) fn baseline(&self) -> &Arc<ResolvedConfig> {
        &self.baseline
    }

    pub(crate) fn promote(&self, resolved: Arc<ResolvedConfig>) {
        self.current.store(resolved);
    }

    pub(crate) fn restore(&self) {
        self.current.store(Arc::clone(&self.baseline));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::merge::MergedView;

    fn resolved(files: &[&str]) -> Arc<ResolvedConfig> {
        Arc::new(ResolvedConfig {
            file_names: files.iter().map(|f| f.to_string()).collect(),
            view: MergedView::merge(Vec::new()),
            host_alias: "test-host".to_string(),
            web_host: false,
        })
    }

    #[test]
    fn starts_at_the_baseline() {
        let baseline = resolved(&[]);
        let state = DefaultConfigState::new(Arc::clone(&baseline));

        assert!(Arc::ptr_eq(&state.current(), &baseline));
    }

    #[test]
    fn promote_replaces_and_repromote_wins() {
        let state = DefaultConfigState::new(resolved(&[]));
        let first = resolved(&["a"]);
        let second = resolved(&["b"]);

        state.promote(Arc::clone(&first));
        assert!(Arc::ptr_eq(&state.current(), &first));

        state.promote(Arc::clone(&second));
        assert!(Arc::ptr_eq(&state.current(), &second));
    }

    #[test]
    fn restore_returns_to_the_captured_baseline_not_an_intermediate() {
        let baseline = resolved(&[]);
        let state = DefaultConfigState::new(Arc::clone(&baseline));

        state.promote(resolved(&["a"]));
        state.promote(resolved(&["b"]));
        state.restore();

        assert!(Arc::ptr_eq(&state.current(), &baseline));
    }

    #[test]
    fn concurrent_promotions_leave_exactly_one_winner() {
        let state = Arc::new(DefaultConfigState::new(resolved(&[])));
        let first = resolved(&["first"]);
        let second = resolved(&["second"]);

        let handles = [Arc::clone(&first), Arc::clone(&second)].map(|candidate| {
            let state = Arc::clone(&state);
            std::thread::spawn(move || state.promote(candidate))
        });
        for handle in handles {
            handle.join().unwrap();
        }

        let winner = state.current();
        assert!(Arc::ptr_eq(&winner, &first) || Arc::ptr_eq(&winner, &second));
    }
}
