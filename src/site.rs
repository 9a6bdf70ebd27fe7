//! Owner identities and tessellation sites
//!
//! A [`Site`] is one screen-space input point of the Voronoi diagram, tagged
//! with the [`Owner`] of the map object it was projected from.

use std::fmt;

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{OverlayError, Result};
use crate::host::{MapObject, Viewport};

/// The all-zero address the game uses for objects nobody controls
pub const NULL_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// Length of a `0x`-prefixed account address
const ADDRESS_LEN: usize = 42;

/// Identity of a player account
///
/// Host-provided identities are taken as-is through [`AccountId::new`].
/// User-typed input goes through [`AccountId::parse_address`], which enforces
/// the address shape.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId(String);

impl AccountId {
    /// Wrap an identity without validation
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parse a user-supplied account address
    ///
    /// Surrounding whitespace is ignored. The address must start with `0x`
    /// and be exactly 42 characters long.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAddress` if the input doesn't have that shape.
    ///
    /// # Example
    ///
    /// ```
    /// use empire_voronoi::AccountId;
    ///
    /// let id = AccountId::parse_address("0x1234567890abcdef1234567890abcdef12345678").unwrap();
    /// assert_eq!(id.as_str().len(), 42);
    /// assert!(AccountId::parse_address("1234").is_err());
    /// ```
    pub fn parse_address(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() || !trimmed.starts_with("0x") || trimmed.len() != ADDRESS_LEN {
            return Err(OverlayError::InvalidAddress(input.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The identity as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who controls a map object
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Owner {
    /// Nobody controls the object
    Unowned,
    /// A player account controls the object
    Account(AccountId),
}

impl Owner {
    /// Owner for a raw address, mapping [`NULL_ADDRESS`] to `Unowned`
    pub fn from_address(address: &str) -> Self {
        if address == NULL_ADDRESS {
            Owner::Unowned
        } else {
            Owner::Account(AccountId::new(address))
        }
    }

    /// Shorthand for `Owner::Account(AccountId::new(id))`
    pub fn account(id: impl Into<String>) -> Self {
        Owner::Account(AccountId::new(id))
    }

    #[inline]
    pub fn is_unowned(&self) -> bool {
        matches!(self, Owner::Unowned)
    }

    /// The controlling account, if any
    #[inline]
    pub fn account_id(&self) -> Option<&AccountId> {
        match self {
            Owner::Unowned => None,
            Owner::Account(id) => Some(id),
        }
    }
}

/// A screen-space tessellation input point
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    /// Position on the canvas
    pub position: DVec2,
    /// Owner of the object this site was projected from
    pub owner: Owner,
}

impl Site {
    pub fn new(x: f64, y: f64, owner: Owner) -> Self {
        Self {
            position: DVec2::new(x, y),
            owner,
        }
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.position.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.position.y
    }
}

/// Project map objects into screen-space sites
///
/// Sites keep the input order, so `sites[i]` comes from `objects[i]`.
pub fn project_sites<V>(objects: &[MapObject], viewport: &V) -> Vec<Site>
where
    V: Viewport + ?Sized,
{
    objects
        .iter()
        .map(|object| Site {
            position: viewport.world_to_screen(object.coords),
            owner: object.owner.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{IdentityViewport, ObjectKind};

    #[test]
    fn test_parse_address_accepts_well_formed() {
        let addr = "0xabcdefabcdefabcdefabcdefabcdefabcdefabcd";
        let id = AccountId::parse_address(addr).unwrap();
        assert_eq!(id.as_str(), addr);

        let padded = format!("  {}\n", addr);
        assert_eq!(AccountId::parse_address(&padded).unwrap().as_str(), addr);
    }

    #[test]
    fn test_parse_address_rejects_malformed() {
        assert!(AccountId::parse_address("").is_err());
        assert!(AccountId::parse_address("0x1234").is_err());
        // Right length, wrong prefix
        assert!(AccountId::parse_address("1xabcdefabcdefabcdefabcdefabcdefabcdefabcd").is_err());
        // One character too long
        assert!(AccountId::parse_address("0xabcdefabcdefabcdefabcdefabcdefabcdefabcde").is_err());
    }

    #[test]
    fn test_null_address_is_unowned() {
        assert_eq!(Owner::from_address(NULL_ADDRESS), Owner::Unowned);
        assert_eq!(
            Owner::from_address("0x1111111111111111111111111111111111111111"),
            Owner::account("0x1111111111111111111111111111111111111111")
        );
    }

    #[test]
    fn test_unowned_equals_unowned() {
        assert_eq!(Owner::Unowned, Owner::Unowned);
        assert_ne!(Owner::Unowned, Owner::account("A"));
        assert!(Owner::Unowned.account_id().is_none());
    }

    #[test]
    fn test_project_sites_keeps_order_and_owner() {
        let objects = vec![
            MapObject::new(Owner::account("A"), DVec2::new(1.0, 2.0), 1, ObjectKind::Planet),
            MapObject::new(Owner::Unowned, DVec2::new(-3.0, 4.0), 0, ObjectKind::Quasar),
        ];
        let viewport = IdentityViewport;

        let sites = project_sites(&objects, &viewport);

        assert_eq!(sites.len(), 2);
        assert_eq!(sites[0].position, DVec2::new(1.0, 2.0));
        assert_eq!(sites[0].owner, Owner::account("A"));
        assert_eq!(sites[1].owner, Owner::Unowned);
    }
}
