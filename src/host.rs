//! Host collaborators: game data, viewport, and object selection
//!
//! The overlay never reaches for global game state. Everything it needs from
//! the game is injected through [`GameHost`] and [`Viewport`].

use std::collections::BTreeSet;

use glam::DVec2;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{OverlayError, Result};
use crate::site::{AccountId, Owner};

/// Kind of space object on the game map
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectKind {
    Planet,
    AsteroidField,
    Foundry,
    SpacetimeRip,
    Quasar,
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 5] = [
        ObjectKind::Planet,
        ObjectKind::AsteroidField,
        ObjectKind::Foundry,
        ObjectKind::SpacetimeRip,
        ObjectKind::Quasar,
    ];
}

/// A map object as reported by the host
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct MapObject {
    /// Controlling account or `Unowned`
    pub owner: Owner,
    /// Position in world coordinates
    pub coords: DVec2,
    /// Object level (0 = smallest)
    pub level: u8,
    pub kind: ObjectKind,
}

impl MapObject {
    pub fn new(owner: Owner, coords: DVec2, level: u8, kind: ObjectKind) -> Self {
        Self {
            owner,
            coords,
            level,
            kind,
        }
    }
}

/// Game-state queries the overlay depends on
pub trait GameHost {
    /// Every map object currently known to the client
    ///
    /// # Errors
    ///
    /// Returns `HostUnavailable` while the game data isn't loaded. Callers
    /// treat this as an empty map for the current tick.
    fn all_map_objects(&self) -> Result<Vec<MapObject>>;

    /// Accounts of every player the client has seen
    fn players(&self) -> Vec<AccountId>;

    /// The account of the local viewer
    fn viewer_identity(&self) -> AccountId;
}

/// World-to-screen coordinate transform
pub trait Viewport {
    /// Map a finite world position to canvas coordinates
    fn world_to_screen(&self, world: DVec2) -> DVec2;
}

impl<F> Viewport for F
where
    F: Fn(DVec2) -> DVec2,
{
    fn world_to_screen(&self, world: DVec2) -> DVec2 {
        self(world)
    }
}

/// Viewport where world and screen coordinates coincide
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityViewport;

impl Viewport for IdentityViewport {
    #[inline]
    fn world_to_screen(&self, world: DVec2) -> DVec2 {
        world
    }
}

/// Camera-style viewport: world point at `center` lands at the middle of the canvas
///
/// World y grows upwards while canvas y grows downwards, so the y axis is flipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraViewport {
    /// World position shown at the canvas center
    pub center: DVec2,
    /// Canvas pixels per world unit
    pub scale: f64,
    /// Canvas size in pixels
    pub canvas_size: DVec2,
}

impl Viewport for CameraViewport {
    fn world_to_screen(&self, world: DVec2) -> DVec2 {
        let offset = (world - self.center) * self.scale;
        DVec2::new(
            self.canvas_size.x * 0.5 + offset.x,
            self.canvas_size.y * 0.5 - offset.y,
        )
    }
}

/// Selects which map objects become tessellation sites
///
/// With no constraints set every object passes.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectFilter {
    /// Allowed object kinds (`None` = all kinds)
    pub kinds: Option<BTreeSet<ObjectKind>>,
    /// Minimum object level, inclusive
    pub level_from: Option<u8>,
    /// Maximum object level, inclusive
    pub level_to: Option<u8>,
}

impl ObjectFilter {
    /// Filter that only keeps planets
    pub fn planets_only() -> Self {
        Self {
            kinds: Some([ObjectKind::Planet].into_iter().collect()),
            ..Default::default()
        }
    }

    /// Check that the level range is not inverted
    pub fn validate(&self) -> Result<()> {
        if let (Some(from), Some(to)) = (self.level_from, self.level_to) {
            if from > to {
                return Err(OverlayError::InvalidConfig(format!(
                    "level range is inverted ({} > {})",
                    from, to
                )));
            }
        }
        Ok(())
    }

    pub fn matches(&self, object: &MapObject) -> bool {
        if let Some(kinds) = &self.kinds {
            if !kinds.contains(&object.kind) {
                return false;
            }
        }
        if self.level_from.is_some_and(|from| object.level < from) {
            return false;
        }
        if self.level_to.is_some_and(|to| object.level > to) {
            return false;
        }
        true
    }

    /// Keep only the matching objects
    pub fn apply(&self, objects: Vec<MapObject>) -> Vec<MapObject> {
        objects.into_iter().filter(|o| self.matches(o)).collect()
    }
}

/// Host serving a fixed object list
///
/// Useful when the game data is already at hand, and for tests. Setting
/// [`StaticHost::offline`] makes the object query fail.
#[derive(Debug, Clone)]
pub struct StaticHost {
    pub viewer: AccountId,
    pub objects: Vec<MapObject>,
    pub offline: bool,
}

impl StaticHost {
    pub fn new(viewer: AccountId, objects: Vec<MapObject>) -> Self {
        Self {
            viewer,
            objects,
            offline: false,
        }
    }
}

impl GameHost for StaticHost {
    fn all_map_objects(&self) -> Result<Vec<MapObject>> {
        if self.offline {
            return Err(OverlayError::HostUnavailable("game data not loaded".into()));
        }
        Ok(self.objects.clone())
    }

    fn players(&self) -> Vec<AccountId> {
        let players: BTreeSet<AccountId> = self
            .objects
            .iter()
            .filter_map(|o| o.owner.account_id().cloned())
            .collect();
        players.into_iter().collect()
    }

    fn viewer_identity(&self) -> AccountId {
        self.viewer.clone()
    }
}

/// Host with deterministic random map objects scattered over a square world
///
/// The same seed always produces the same map.
#[derive(Debug, Clone)]
pub struct ScatteredHost {
    inner: StaticHost,
}

impl ScatteredHost {
    /// Scatter `count` objects over `[-extent, extent]²`
    ///
    /// Owners are drawn uniformly from `owners`; an empty slice leaves every
    /// object unowned. Roughly one object in `unowned_every` is left unowned
    /// (`0` disables that).
    ///
    /// # Example
    ///
    /// ```
    /// use empire_voronoi::{AccountId, GameHost, ScatteredHost};
    ///
    /// let owners = [AccountId::new("A"), AccountId::new("B")];
    /// let host = ScatteredHost::new(AccountId::new("A"), &owners, 50, 1000.0, 5, 42);
    /// assert_eq!(host.all_map_objects().unwrap().len(), 50);
    /// ```
    pub fn new(
        viewer: AccountId,
        owners: &[AccountId],
        count: usize,
        extent: f64,
        unowned_every: u32,
        seed: u64,
    ) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let objects = (0..count)
            .map(|_| {
                let coords = DVec2::new(
                    rng.gen_range(-extent..=extent),
                    rng.gen_range(-extent..=extent),
                );
                let unowned = owners.is_empty()
                    || (unowned_every > 0 && rng.gen_ratio(1, unowned_every));
                let owner = if unowned {
                    Owner::Unowned
                } else {
                    Owner::Account(owners[rng.gen_range(0..owners.len())].clone())
                };
                let level = rng.gen_range(0..=9);
                let kind = ObjectKind::ALL[rng.gen_range(0..ObjectKind::ALL.len())];
                MapObject::new(owner, coords, level, kind)
            })
            .collect();

        Self {
            inner: StaticHost::new(viewer, objects),
        }
    }

    /// The generated objects
    pub fn objects(&self) -> &[MapObject] {
        &self.inner.objects
    }
}

impl GameHost for ScatteredHost {
    fn all_map_objects(&self) -> Result<Vec<MapObject>> {
        self.inner.all_map_objects()
    }

    fn players(&self) -> Vec<AccountId> {
        self.inner.players()
    }

    fn viewer_identity(&self) -> AccountId {
        self.inner.viewer_identity()
    }
}
