//! TerritoryOverlay lifecycle and frame pipeline

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::bbox::BoundingBox;
use crate::config::OverlayConfig;
use crate::diagram::{DelaunayEngine, DiagramEngine};
use crate::error::Result;
use crate::host::{GameHost, MapObject, Viewport};
use crate::ownership::Alliance;
use crate::render::{render_diagram, Canvas, RenderStats};
use crate::site::{project_sites, AccountId, Owner};

#[cfg(feature = "spatial-index")]
use crate::spatial::TerritoryIndex;
#[cfg(feature = "spatial-index")]
use glam::DVec2;

/// Why a frame drew nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The overlay is not active
    Inactive,
    /// The user switched highlighting off
    HighlightOff,
    /// The sites don't span a finite box with positive area
    DegenerateBounds,
    /// Fewer sites than the configured minimum
    TooFewSites { count: usize, min: usize },
}

/// Outcome of [`TerritoryOverlay::draw_frame`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameReport {
    /// Nothing was drawn and the diagram engine was not called
    Skipped(SkipReason),
    /// The diagram was computed and rendered
    Drawn(RenderStats),
}

impl FrameReport {
    #[inline]
    pub fn is_drawn(&self) -> bool {
        matches!(self, FrameReport::Drawn(_))
    }

    /// Render counters, if the frame was drawn
    pub fn stats(&self) -> Option<&RenderStats> {
        match self {
            FrameReport::Drawn(stats) => Some(stats),
            FrameReport::Skipped(_) => None,
        }
    }
}

/// What the settings panel shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelModel {
    /// State of the "Highlight empires" checkbox
    pub highlight: bool,
    /// Current allies, sorted
    pub allies: Vec<AccountId>,
}

/// Tells an external loop when to call [`TerritoryOverlay::refresh`]
///
/// The overlay owns no timer; whoever drives it checks `due` on its own
/// schedule and calls `reset` on teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTimer {
    period: Duration,
    last: Option<Instant>,
}

impl RefreshTimer {
    pub fn new(period: Duration) -> Self {
        Self { period, last: None }
    }

    #[inline]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Whether a refresh is due at `now`; marks the tick when it is
    ///
    /// The first call is always due.
    pub fn due(&mut self, now: Instant) -> bool {
        let is_due = match self.last {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.period,
        };
        if is_due {
            self.last = Some(now);
        }
        is_due
    }

    /// Forget the last tick
    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Territory overlay for one viewing session
///
/// Holds the latest snapshot of map objects and the session's alliance.
/// Snapshots are replaced whole on refresh, and every frame rebuilds sites,
/// bounding box and diagram from scratch.
///
/// # Type Parameters
///
/// * `E` - Diagram engine (defaults to [`DelaunayEngine`])
///
/// # Example
///
/// ```
/// use empire_voronoi::*;
///
/// let owners = [AccountId::new("A"), AccountId::new("B")];
/// let host = ScatteredHost::new(AccountId::new("A"), &owners, 60, 500.0, 0, 1);
///
/// let mut overlay = TerritoryOverlay::from_host(OverlayConfig::default(), &host);
/// overlay.activate();
/// overlay.refresh(&host);
///
/// let mut canvas = RecordingCanvas::new();
/// let report = overlay.draw_frame(&IdentityViewport, &mut canvas).unwrap();
/// assert!(report.is_drawn());
///
/// overlay.deactivate();
/// ```
pub struct TerritoryOverlay<E = DelaunayEngine> {
    config: OverlayConfig,
    engine: E,
    alliance: Alliance,
    highlight: bool,
    active: bool,
    objects: Vec<MapObject>,

    #[cfg(feature = "spatial-index")]
    index: Option<TerritoryIndex>,
}

impl TerritoryOverlay<DelaunayEngine> {
    pub fn new(config: OverlayConfig, viewer: AccountId) -> Self {
        Self::with_engine(config, viewer, DelaunayEngine)
    }

    /// Create an overlay for the host's viewer
    pub fn from_host<H: GameHost + ?Sized>(config: OverlayConfig, host: &H) -> Self {
        Self::new(config, host.viewer_identity())
    }
}

impl<E: DiagramEngine> TerritoryOverlay<E> {
    /// Create an overlay using a custom diagram engine
    pub fn with_engine(config: OverlayConfig, viewer: AccountId, engine: E) -> Self {
        Self {
            config,
            engine,
            alliance: Alliance::new(viewer),
            highlight: true,
            active: false,
            objects: Vec::new(),
            #[cfg(feature = "spatial-index")]
            index: None,
        }
    }

    /// Activate the overlay and describe the settings panel
    ///
    /// Calling it again (e.g. after editing allies) only refreshes the model.
    pub fn activate(&mut self) -> PanelModel {
        if !self.active {
            debug!("territory overlay activated");
        }
        self.active = true;
        self.panel()
    }

    /// Deactivate and drop the snapshot
    ///
    /// Safe to call repeatedly. Refreshes and draws are no-ops until the next
    /// [`activate`](Self::activate).
    pub fn deactivate(&mut self) {
        if self.active {
            debug!("territory overlay deactivated");
        }
        self.active = false;
        self.objects = Vec::new();
        #[cfg(feature = "spatial-index")]
        {
            self.index = None;
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Current settings panel model
    pub fn panel(&self) -> PanelModel {
        PanelModel {
            highlight: self.highlight,
            allies: self.alliance.allies().cloned().collect(),
        }
    }

    /// Toggle the whole overlay on or off without deactivating it
    pub fn set_highlight(&mut self, highlight: bool) {
        self.highlight = highlight;
    }

    #[inline]
    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    #[inline]
    pub fn alliance(&self) -> &Alliance {
        &self.alliance
    }

    /// Mutable alliance, for ally edits from the settings panel
    #[inline]
    pub fn alliance_mut(&mut self) -> &mut Alliance {
        &mut self.alliance
    }

    /// Objects of the latest snapshot
    #[inline]
    pub fn objects(&self) -> &[MapObject] {
        &self.objects
    }

    /// A timer matching the configured poll period
    pub fn refresh_timer(&self) -> RefreshTimer {
        RefreshTimer::new(self.config.poll_period)
    }

    /// Replace the object snapshot with the host's current objects
    ///
    /// A failing host counts as an empty map for this tick. Inactive overlays
    /// ignore the call.
    pub fn refresh<H: GameHost + ?Sized>(&mut self, host: &H) {
        if !self.active {
            return;
        }

        let objects = match host.all_map_objects() {
            Ok(objects) => objects,
            Err(e) => {
                warn!("failed to fetch map objects: {e}");
                Vec::new()
            }
        };
        self.objects = self.config.filter.apply(objects);
        self.alliance.record_players(host.players());

        #[cfg(feature = "spatial-index")]
        {
            let positions: Vec<DVec2> = self.objects.iter().map(|o| o.coords).collect();
            self.index = TerritoryIndex::new(&positions);
        }

        debug!(objects = self.objects.len(), "refreshed map snapshot");
    }

    /// Render the latest snapshot
    ///
    /// # Errors
    ///
    /// Diagram engine failures are returned as-is; the caller should skip the
    /// frame and keep its render loop going.
    pub fn draw_frame<V, C>(&self, viewport: &V, canvas: &mut C) -> Result<FrameReport>
    where
        V: Viewport + ?Sized,
        C: Canvas + ?Sized,
    {
        if !self.active {
            return Ok(FrameReport::Skipped(SkipReason::Inactive));
        }
        if !self.highlight {
            return Ok(FrameReport::Skipped(SkipReason::HighlightOff));
        }

        let sites = project_sites(&self.objects, viewport);
        let bbox = BoundingBox::from_sites(&sites);
        if !bbox.is_renderable() {
            debug!(sites = sites.len(), "skipping frame, degenerate bounding box");
            return Ok(FrameReport::Skipped(SkipReason::DegenerateBounds));
        }
        if sites.len() < self.config.min_sites {
            debug!(sites = sites.len(), "skipping frame, too few sites");
            return Ok(FrameReport::Skipped(SkipReason::TooFewSites {
                count: sites.len(),
                min: self.config.min_sites,
            }));
        }

        let diagram = self.engine.compute(&sites, &bbox).map_err(|e| {
            warn!("diagram computation failed: {e}");
            e
        })?;

        let stats = render_diagram(
            canvas,
            &diagram,
            &sites,
            &self.alliance,
            &self.config.palette,
            &self.config.render_options(),
        );
        Ok(FrameReport::Drawn(stats))
    }

    /// Owner of the territory containing a world position
    ///
    /// `None` when there is no snapshot.
    #[cfg(feature = "spatial-index")]
    pub fn owner_at(&self, world: DVec2) -> Option<&Owner> {
        let index = self.index.as_ref()?;
        self.objects.get(index.find_nearest(world)).map(|o| &o.owner)
    }

    /// Number of snapshot objects per owner, sorted by descending count
    ///
    /// Ties are ordered by account, unowned first.
    pub fn territory_counts(&self) -> Vec<(Owner, usize)> {
        let mut by_owner: HashMap<&Owner, usize> = HashMap::new();
        for object in &self.objects {
            *by_owner.entry(&object.owner).or_insert(0) += 1;
        }

        let mut counts: Vec<(Owner, usize)> = by_owner
            .into_iter()
            .map(|(owner, count)| (owner.clone(), count))
            .collect();
        counts.sort_by(|a, b| {
            b.1.cmp(&a.1)
                .then_with(|| a.0.account_id().cmp(&b.0.account_id()))
        });
        counts
    }
}
