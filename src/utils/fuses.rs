//! Name wrapper fuses.
//!
//! Fuses are a 32 bit permission mask. The low 16 bits are controlled by the owner of a name
//! ("child" fuses), the high 16 bits by the owner of its parent ("parent" fuses). Bits without a
//! documented meaning are "unnamed" and reserved for future use.

use crate::error::FuseError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Bits owned by the name itself.
pub const CHILD_FUSE_MASK: u32 = 0x0000_ffff;

/// Bits owned by the parent of the name.
pub const PARENT_FUSE_MASK: u32 = 0xffff_0000;

/// Unnamed child fuses, bits 7 to 15.
const UNNAMED_CHILD_MASK: u32 = 0x0000_ff80;

/// Unnamed parent fuses, bits 19 to 31.
const UNNAMED_PARENT_MASK: u32 = 0xfff8_0000;

/// A fuse with documented meaning.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum NamedFuse {
    /// The name can not be unwrapped.
    CannotUnwrap,
    /// No further fuses can be burned.
    CannotBurnFuses,
    /// The name can not be transferred.
    CannotTransfer,
    /// The resolver can not be changed.
    CannotSetResolver,
    /// The TTL can not be changed.
    CannotSetTtl,
    /// No new subnames can be created.
    CannotCreateSubdomain,
    /// No approved operator can be set.
    CannotApprove,
    /// The parent can no longer control the name.
    ParentCannotControl,
    /// The name is a second level `.eth` name. Only burned by the contract.
    IsDotEth,
    /// The owner of the name can extend its expiry.
    CanExtendExpiry,
}

impl NamedFuse {
    /// Returns the fuse's bit.
    pub const fn bit(self) -> u32 {
        match self {
            Self::CannotUnwrap => 1,
            Self::CannotBurnFuses => 2,
            Self::CannotTransfer => 4,
            Self::CannotSetResolver => 8,
            Self::CannotSetTtl => 16,
            Self::CannotCreateSubdomain => 32,
            Self::CannotApprove => 64,
            Self::ParentCannotControl => 0x10000,
            Self::IsDotEth => 0x20000,
            Self::CanExtendExpiry => 0x40000,
        }
    }

    /// Returns the scope that controls this fuse.
    pub const fn scope(self) -> FuseScope {
        if self.bit() & CHILD_FUSE_MASK != 0 { FuseScope::Child } else { FuseScope::Parent }
    }

    /// Returns `true` if callers may request this fuse.
    pub const fn is_user_settable(self) -> bool {
        !matches!(self, Self::IsDotEth)
    }

    /// Looks up the named fuse owning `bit`.
    pub fn from_bit(bit: u32) -> Option<Self> {
        Self::iter().find(|fuse| fuse.bit() == bit)
    }
}

/// Which side of the ownership relation a fuse encoding is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FuseScope {
    /// Fuses burned by the owner of the parent name.
    Parent,
    /// Fuses burned by the owner of the name.
    Child,
}

impl FuseScope {
    /// Bits a raw value of this scope may carry.
    const fn allowed_mask(self) -> u32 {
        match self {
            // the parent relinquishing control is implied by any child fuse
            Self::Child => CHILD_FUSE_MASK | NamedFuse::ParentCannotControl.bit(),
            Self::Parent => PARENT_FUSE_MASK,
        }
    }

    const fn unnamed_mask(self) -> u32 {
        match self {
            Self::Child => UNNAMED_CHILD_MASK,
            Self::Parent => UNNAMED_PARENT_MASK,
        }
    }
}

/// Input to [`encode_fuses`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FuseInput {
    /// A raw fuse value.
    Number {
        /// The value, validated to `1..=u32::MAX`.
        number: u64,
    },
    /// Fuses given by name and by raw unnamed bit.
    Flags {
        /// Named fuses.
        #[serde(default)]
        named: Vec<NamedFuse>,
        /// Unnamed fuse bits, each a single bit of the scope's unnamed range.
        #[serde(default)]
        unnamed: Vec<u32>,
    },
}

impl FuseInput {
    /// Input made of named fuses only.
    pub fn named(named: impl IntoIterator<Item = NamedFuse>) -> Self {
        Self::Flags { named: named.into_iter().collect(), unnamed: Vec::new() }
    }

    /// Input made of unnamed fuse bits only.
    pub fn unnamed(unnamed: impl IntoIterator<Item = u32>) -> Self {
        Self::Flags { named: Vec::new(), unnamed: unnamed.into_iter().collect() }
    }

    /// A raw fuse value.
    pub const fn number(number: u64) -> Self {
        Self::Number { number }
    }
}

/// Encodes fuses for the given scope.
///
/// Whenever named or unnamed input sets any bit, [`NamedFuse::ParentCannotControl`] is set as
/// well: fuses are only enforced once the parent has given up control. Raw numbers are validated
/// but never modified.
pub fn encode_fuses(input: &FuseInput, scope: FuseScope) -> Result<u32, FuseError> {
    match input {
        FuseInput::Number { number } => encode_number(*number, scope),
        FuseInput::Flags { named, unnamed } => {
            let mut fuses = 0u32;

            for &fuse in named {
                if !fuse.is_user_settable() {
                    return Err(FuseError::NotUserSettable(fuse));
                }
                if fuse.scope() != scope {
                    return Err(FuseError::RestrictionNotAllowed { fuse, scope });
                }
                fuses |= fuse.bit();
            }

            for &value in unnamed {
                if let Some(fuse) = NamedFuse::from_bit(value) {
                    return Err(FuseError::NamedFuseInUnnamedList { value, fuse });
                }
                if !value.is_power_of_two() || value & scope.unnamed_mask() == 0 {
                    return Err(FuseError::InvalidUnnamedFuse { value, scope });
                }
                fuses |= value;
            }

            if fuses != 0 {
                fuses |= NamedFuse::ParentCannotControl.bit();
            }
            Ok(fuses)
        }
    }
}

fn encode_number(number: u64, scope: FuseScope) -> Result<u32, FuseError> {
    let maximum = u64::from(u32::MAX);
    let value = u32::try_from(number)
        .ok()
        .filter(|value| *value >= 1)
        .ok_or(FuseError::OutOfRange { value: number, minimum: 1, maximum })?;

    if value & !scope.allowed_mask() != 0 {
        return Err(FuseError::BitsOutsideScope { value: number, scope });
    }
    Ok(value)
}

/// Decoded view of a fuse value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedFuses {
    /// Named parent fuses.
    pub parent: BTreeMap<NamedFuse, bool>,
    /// Named child fuses.
    pub child: BTreeMap<NamedFuse, bool>,
    /// Every bit not covered by a named fuse, keyed by its value.
    pub unnamed: BTreeMap<u32, bool>,
    /// `true` when no fuse is burned.
    pub can_do_everything: bool,
}

impl DecodedFuses {
    /// Returns `true` if `fuse` is burned.
    pub fn is_burned(&self, fuse: NamedFuse) -> bool {
        let map = match fuse.scope() {
            FuseScope::Parent => &self.parent,
            FuseScope::Child => &self.child,
        };
        map.get(&fuse).copied().unwrap_or_default()
    }

    /// Rebuilds the [`FuseInput`] for one scope from the burned fuses.
    ///
    /// If a fuse that can not be requested by name is burned, like [`NamedFuse::IsDotEth`], the
    /// scope's bits are returned as a raw number so that re-encoding keeps them.
    pub fn to_input(&self, scope: FuseScope) -> FuseInput {
        let named = match scope {
            FuseScope::Parent => &self.parent,
            FuseScope::Child => &self.child,
        };
        let burned = named.iter().filter(|(_, burned)| **burned).map(|(fuse, _)| *fuse);
        let unnamed = self
            .unnamed
            .iter()
            .filter(|(bit, burned)| **burned && *bit & scope.unnamed_mask() != 0)
            .map(|(bit, _)| *bit);

        if burned.clone().any(|fuse| !fuse.is_user_settable()) {
            let value = burned.fold(0, |acc, fuse| acc | fuse.bit())
                | unnamed.fold(0, |acc, bit| acc | bit);
            return FuseInput::number(u64::from(value));
        }
        FuseInput::Flags { named: burned.collect(), unnamed: unnamed.collect() }
    }
}

/// Decodes a fuse value into named and unnamed bits.
pub fn decode_fuses(value: u32) -> DecodedFuses {
    let mut parent = BTreeMap::new();
    let mut child = BTreeMap::new();
    for fuse in NamedFuse::iter() {
        let burned = value & fuse.bit() != 0;
        match fuse.scope() {
            FuseScope::Parent => parent.insert(fuse, burned),
            FuseScope::Child => child.insert(fuse, burned),
        };
    }

    let unnamed = (0..32)
        .map(|shift| 1u32 << shift)
        .filter(|bit| bit & (UNNAMED_CHILD_MASK | UNNAMED_PARENT_MASK) != 0)
        .map(|bit| (bit, value & bit != 0))
        .collect();

    DecodedFuses { parent, child, unnamed, can_do_everything: value == 0 }
}
