//! Request payloads and response schemas for the Ragnabot API.
//!
//! # Design
//! Payload structs serialize to the exact field names the backend reads
//! (`itemID`, `dropRate`, `commandList`...). Response schemas only pin down
//! what the client transforms; every other field is kept in an `extra` map
//! and passed through untouched.

use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::embed::{embed_or_blank, Embed};

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ValidatePayload<'a> {
    pub key: Option<&'a str>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct HelpPayload<'a, C> {
    pub command_list: &'a [C],
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ItemEmbedPayload<'a> {
    pub id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<&'a Value>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ItemBrowserPayload<'a, I> {
    pub items: &'a [I],
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct RewardPayload<'a> {
    #[serde(rename = "itemID")]
    pub item_id: u32,
    pub amount: u32,
    pub username: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct MonsterIdPayload {
    pub id: u32,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct MonsterNamePayload<'a> {
    pub name: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct TriviaPayload<'a> {
    pub lang: &'a str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SpawnBossPayload<'a, L> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list: Option<&'a [L]>,
    pub drop_rate: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BossFightEmbedPayload<'a, B> {
    pub boss_data: &'a B,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct GearPayload<'a> {
    pub username: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct CreateAuctionPayload<'a, I> {
    pub item: &'a I,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct AuctionEmbedPayload<'a, A> {
    pub auction: &'a A,
    #[serde(rename = "type")]
    pub kind: AuctionEmbedKind,
}

/// Which auction embed to render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuctionEmbedKind {
    /// Live auction status for the auction channel.
    #[default]
    Info,
    /// Winner announcement for the history channel.
    History,
}

// ---------------------------------------------------------------------------
// Boss fight
// ---------------------------------------------------------------------------

/// A spawned boss and the loot it may drop.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct BossSpawn {
    #[serde(default)]
    pub drops: Vec<BossDrop>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One possible drop, with its embed already built.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct BossDrop {
    #[serde(default, deserialize_with = "embed_or_blank")]
    pub embed: Embed,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A piece of gear a participant can pick before the fight.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct GearOffer {
    #[serde(default, deserialize_with = "embed_or_blank")]
    pub embed: Embed,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Gear offers of one equipment slot (`weapon`, `armor`...).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GearCategory {
    pub slot: String,
    pub offers: Vec<GearOffer>,
}

/// Gear choices grouped by slot, in the order the backend sent them.
///
/// On the wire this is a JSON object mapping slot name to an array of
/// offers; the order of keys is kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GearList {
    pub categories: Vec<GearCategory>,
}

impl GearList {
    pub fn get(&self, slot: &str) -> Option<&[GearOffer]> {
        self.categories
            .iter()
            .find(|category| category.slot == slot)
            .map(|category| category.offers.as_slice())
    }

    pub fn slots(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|category| category.slot.as_str())
    }
}

impl<'de> Deserialize<'de> for GearList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Map::<String, Value>::deserialize(deserializer)?;
        let categories = raw
            .into_iter()
            .map(|(slot, offers)| {
                let offers = Vec::<GearOffer>::deserialize(offers)
                    .map_err(|e| serde::de::Error::custom(format!("gear slot {slot:?}: {e}")))?;
                Ok(GearCategory { slot, offers })
            })
            .collect::<Result<Vec<_>, D::Error>>()?;
        Ok(GearList { categories })
    }
}

impl Serialize for GearList {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for category in &self.categories {
            map.serialize_entry(&category.slot, &category.offers)?;
        }
        map.end()
    }
}
