//! Which landing page section is "in view".
//!
//! Geometry comes in as [`SectionRegion`]s measured from the DOM; the
//! [`VisibilityObserver`] turns successive measurements into a stream of
//! [`VisibilityEvent`]s and the [`SectionTracker`] folds that stream into the
//! active section. Neither touches the browser, so tests feed them synthetic
//! regions and events directly.

/// Fraction of the viewport height where the activation line sits.
pub const MIDPOINT_RATIO: f64 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SectionId {
    Home,
    Overview,
    Amenities,
    FloorPlans,
    Gallery,
    Location,
    Pricing,
    Contact,
}

impl SectionId {
    pub const ALL: [SectionId; 8] = [
        SectionId::Home,
        SectionId::Overview,
        SectionId::Amenities,
        SectionId::FloorPlans,
        SectionId::Gallery,
        SectionId::Location,
        SectionId::Pricing,
        SectionId::Contact,
    ];

    /// DOM id of the `<section>` element.
    pub fn anchor(self) -> &'static str {
        match self {
            SectionId::Home => "home",
            SectionId::Overview => "overview",
            SectionId::Amenities => "amenities",
            SectionId::FloorPlans => "floor-plans",
            SectionId::Gallery => "gallery",
            SectionId::Location => "location",
            SectionId::Pricing => "pricing",
            SectionId::Contact => "contact",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SectionId::Home => "Home",
            SectionId::Overview => "Overview",
            SectionId::Amenities => "Amenities",
            SectionId::FloorPlans => "Floor Plans",
            SectionId::Gallery => "Gallery",
            SectionId::Location => "Location",
            SectionId::Pricing => "Pricing",
            SectionId::Contact => "Contact",
        }
    }

    pub fn from_anchor(anchor: &str) -> Option<Self> {
        SectionId::ALL.into_iter().find(|id| id.anchor() == anchor)
    }
}

/// A section's vertical extent relative to the top of the viewport, as
/// reported by `getBoundingClientRect`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionRegion {
    pub id: SectionId,
    pub top: f64,
    pub bottom: f64,
}

impl SectionRegion {
    /// Half-open so two touching sections never both hold the line.
    pub fn holds_midpoint(&self, viewport_height: f64) -> bool {
        let line = viewport_height * MIDPOINT_RATIO;
        self.top <= line && line < self.bottom
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisibilityEvent {
    Entered(SectionId),
    Exited(SectionId),
}

/// Diffs successive geometry samples into entered/exited events.
#[derive(Clone, Debug, Default)]
pub struct VisibilityObserver {
    in_band: Vec<SectionId>,
}

impl VisibilityObserver {
    pub fn observe(&mut self, regions: &[SectionRegion], viewport_height: f64) -> Vec<VisibilityEvent> {
        let now: Vec<SectionId> = regions
            .iter()
            .filter(|r| r.holds_midpoint(viewport_height))
            .map(|r| r.id)
            .collect();

        let mut events: Vec<VisibilityEvent> = self
            .in_band
            .iter()
            .filter(|id| !now.contains(id))
            .map(|id| VisibilityEvent::Exited(*id))
            .collect();
        events.extend(
            now.iter()
                .filter(|id| !self.in_band.contains(id))
                .map(|id| VisibilityEvent::Entered(*id)),
        );

        self.in_band = now;
        events
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SectionTracker {
    active: Option<SectionId>,
}

impl SectionTracker {
    pub fn active(&self) -> Option<SectionId> {
        self.active
    }

    pub fn is_active(&self, id: SectionId) -> bool {
        self.active == Some(id)
    }

    /// Returns whether the active section changed. Exits never clear it.
    pub fn apply(&mut self, event: VisibilityEvent) -> bool {
        match event {
            VisibilityEvent::Entered(id) if self.active != Some(id) => {
                self.active = Some(id);
                true
            }
            VisibilityEvent::Entered(_) | VisibilityEvent::Exited(_) => false,
        }
    }

    /// Click-to-scroll sets the section before the observer catches up.
    pub fn activate(&mut self, id: SectionId) -> bool {
        self.apply(VisibilityEvent::Entered(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const VIEWPORT: f64 = 800.0;
    const SECTION_HEIGHT: f64 = 600.0;

    /// Contiguous stacked sections as seen at `scroll_y`.
    fn layout(scroll_y: f64) -> Vec<SectionRegion> {
        SectionId::ALL
            .iter()
            .enumerate()
            .map(|(i, id)| {
                let top = i as f64 * SECTION_HEIGHT - scroll_y;
                SectionRegion { id: *id, top, bottom: top + SECTION_HEIGHT }
            })
            .collect()
    }

    fn sample(observer: &mut VisibilityObserver, tracker: &mut SectionTracker, scroll_y: f64) {
        for event in observer.observe(&layout(scroll_y), VIEWPORT) {
            tracker.apply(event);
        }
    }

    #[test]
    fn anchors_round_trip() {
        for id in SectionId::ALL {
            assert_eq!(SectionId::from_anchor(id.anchor()), Some(id));
        }
        assert_eq!(SectionId::from_anchor("nope"), None);
    }

    #[test]
    fn touching_sections_never_share_the_line() {
        let regions = layout(200.0);
        let holding = regions.iter().filter(|r| r.holds_midpoint(VIEWPORT)).count();
        assert_eq!(holding, 1);
    }

    #[test]
    fn emits_exit_then_enter_on_crossing() {
        let mut observer = VisibilityObserver::default();
        assert_eq!(
            observer.observe(&layout(0.0), VIEWPORT),
            vec![VisibilityEvent::Entered(SectionId::Home)]
        );
        assert!(observer.observe(&layout(100.0), VIEWPORT).is_empty());
        assert_eq!(
            observer.observe(&layout(300.0), VIEWPORT),
            vec![
                VisibilityEvent::Exited(SectionId::Home),
                VisibilityEvent::Entered(SectionId::Overview),
            ]
        );
    }

    #[test]
    fn last_active_wins_after_exit() {
        let mut tracker = SectionTracker::default();
        assert!(tracker.apply(VisibilityEvent::Entered(SectionId::Gallery)));
        assert!(!tracker.apply(VisibilityEvent::Exited(SectionId::Gallery)));
        assert_eq!(tracker.active(), Some(SectionId::Gallery));
    }

    #[test]
    fn scrolled_past_the_end_keeps_last_section() {
        let mut observer = VisibilityObserver::default();
        let mut tracker = SectionTracker::default();
        sample(&mut observer, &mut tracker, 0.0);
        sample(&mut observer, &mut tracker, 100_000.0);
        assert_eq!(tracker.active(), Some(SectionId::Home));
    }

    #[test]
    fn click_is_optimistic_and_observer_confirms() {
        let mut observer = VisibilityObserver::default();
        let mut tracker = SectionTracker::default();
        sample(&mut observer, &mut tracker, 0.0);
        assert!(tracker.activate(SectionId::Pricing));
        assert!(tracker.is_active(SectionId::Pricing));
        // scroll still in flight: observer only reports what crossed the line
        sample(&mut observer, &mut tracker, 3000.0);
        assert_eq!(tracker.active(), Some(SectionId::Location));
        sample(&mut observer, &mut tracker, 6.0 * SECTION_HEIGHT - 100.0);
        assert_eq!(tracker.active(), Some(SectionId::Pricing));
    }

    #[test]
    fn repeated_enter_is_not_a_change() {
        let mut tracker = SectionTracker::default();
        assert!(tracker.activate(SectionId::Contact));
        assert!(!tracker.activate(SectionId::Contact));
    }

    proptest! {
        #[test]
        fn rapid_scrolling_settles_on_final_section(samples in prop::collection::vec(0.0f64..4300.0, 1..40)) {
            let mut observer = VisibilityObserver::default();
            let mut tracker = SectionTracker::default();
            for y in &samples {
                sample(&mut observer, &mut tracker, *y);
            }
            let last = *samples.last().unwrap_or(&0.0);
            let expected = layout(last).into_iter().find(|r| r.holds_midpoint(VIEWPORT)).map(|r| r.id);
            prop_assert_eq!(tracker.active(), expected);
        }

        #[test]
        fn active_never_reverts_to_none(samples in prop::collection::vec(-2000.0f64..9000.0, 1..40)) {
            let mut observer = VisibilityObserver::default();
            let mut tracker = SectionTracker::default();
            let mut seen = false;
            for y in samples {
                sample(&mut observer, &mut tracker, y);
                if tracker.active().is_some() {
                    seen = true;
                }
                if seen {
                    prop_assert!(tracker.active().is_some());
                }
            }
        }
    }
}
