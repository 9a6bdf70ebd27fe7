//! Viewer identity, ally set, and ownership classification

use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{OverlayError, Result};
use crate::site::{AccountId, Owner};

/// How a site's owner relates to the viewer
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OwnershipRelation {
    /// Owned by the viewer
    SelfOwned,
    /// Owned by an account in the ally set
    Ally,
    /// Owned by anybody else
    Other,
    /// Owned by nobody
    Unowned,
}

/// Session state used to classify owners
///
/// Only explicit user actions (adding or removing allies) change the ally
/// set; rendering never does.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Alliance {
    viewer: AccountId,
    allies: BTreeSet<AccountId>,
    known_players: BTreeSet<AccountId>,
}

impl Alliance {
    pub fn new(viewer: AccountId) -> Self {
        Self {
            viewer,
            allies: BTreeSet::new(),
            known_players: BTreeSet::new(),
        }
    }

    #[inline]
    pub fn viewer(&self) -> &AccountId {
        &self.viewer
    }

    /// Classify an owner
    ///
    /// # Example
    ///
    /// ```
    /// use empire_voronoi::{AccountId, Alliance, Owner, OwnershipRelation};
    ///
    /// let alliance = Alliance::new(AccountId::new("A"));
    /// assert_eq!(alliance.relation(&Owner::account("A")), OwnershipRelation::SelfOwned);
    /// assert_eq!(alliance.relation(&Owner::account("B")), OwnershipRelation::Other);
    /// assert_eq!(alliance.relation(&Owner::Unowned), OwnershipRelation::Unowned);
    /// ```
    pub fn relation(&self, owner: &Owner) -> OwnershipRelation {
        match owner {
            Owner::Unowned => OwnershipRelation::Unowned,
            Owner::Account(id) if *id == self.viewer => OwnershipRelation::SelfOwned,
            Owner::Account(id) if self.allies.contains(id) => OwnershipRelation::Ally,
            Owner::Account(_) => OwnershipRelation::Other,
        }
    }

    /// Add an ally from user input
    ///
    /// Returns `true` if the ally set changed.
    ///
    /// # Errors
    ///
    /// - `InvalidAddress` if the input is not a `0x` + 40 character address
    /// - `InvalidAlly` if the address is the viewer's own
    pub fn add_ally(&mut self, address: &str) -> Result<bool> {
        let id = AccountId::parse_address(address)?;
        if id == self.viewer {
            return Err(OverlayError::InvalidAlly(format!(
                "{} is the viewer's own address",
                id
            )));
        }
        Ok(self.allies.insert(id))
    }

    /// Remove an ally; returns `true` if it was present
    pub fn remove_ally(&mut self, address: &str) -> bool {
        self.allies.remove(&AccountId::new(address.trim()))
    }

    pub fn is_ally(&self, id: &AccountId) -> bool {
        self.allies.contains(id)
    }

    /// Allies in sorted order
    pub fn allies(&self) -> impl Iterator<Item = &AccountId> {
        self.allies.iter()
    }

    pub fn ally_count(&self) -> usize {
        self.allies.len()
    }

    /// Remember players seen on the map, skipping the viewer
    pub fn record_players<I>(&mut self, players: I)
    where
        I: IntoIterator<Item = AccountId>,
    {
        for player in players {
            if player != self.viewer {
                self.known_players.insert(player);
            }
        }
    }

    /// Every other player seen so far, sorted
    pub fn known_players(&self) -> impl Iterator<Item = &AccountId> {
        self.known_players.iter()
    }
}
