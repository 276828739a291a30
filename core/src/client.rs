//! Client façade used by bot command handlers.
//!
//! # Design
//! `RagnabotClient` holds the configuration, the dispatcher and the base
//! call options; none of them change after construction, so every method
//! takes `&self` and concurrent calls share nothing mutable. Each operation
//! is one round-trip: build the payload, dispatch, then shape the result
//! into an [`Embed`], an [`EmbedBrowser`] or a typed list. Errors are never
//! caught here; they reach the command handler as-is.

use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use crate::browser::{BrowserContext, EmbedBrowser};
use crate::config::ClientConfig;
use crate::embed::Embed;
use crate::error::ApiError;
use crate::http::Transport;
use crate::manager::ApiManager;
use crate::options::{CallOptions, Endpoint};
use crate::response::RawResponse;
use crate::types::{
    AuctionEmbedKind, AuctionEmbedPayload, BossFightEmbedPayload, BossSpawn, CreateAuctionPayload, GearList,
    GearPayload, HelpPayload, ItemBrowserPayload, ItemEmbedPayload, MonsterIdPayload, MonsterNamePayload,
    RewardPayload, SpawnBossPayload, TriviaPayload, ValidatePayload,
};

/// Username sent when the reward recipient is not known.
pub const UNKNOWN_USERNAME: &str = "Unknown";

/// Trivia language used when none is given.
pub const DEFAULT_LANG: &str = "en";

#[derive(Debug, Clone)]
pub struct RagnabotClient<T> {
    config: ClientConfig,
    rest: ApiManager<T>,
    options: CallOptions,
}

#[cfg(feature = "reqwest")]
impl RagnabotClient<crate::http::ReqwestTransport> {
    /// Client over a default `reqwest` transport.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, crate::http::ReqwestTransport::new())
    }
}

impl<T: Transport> RagnabotClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        let options = config.call_options();
        Self {
            config,
            rest: ApiManager::new(transport),
            options,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn options(&self) -> &CallOptions {
        &self.options
    }

    pub fn rest(&self) -> &ApiManager<T> {
        &self.rest
    }

    /// Check the configured key against the backend.
    ///
    /// Sent without an `Authorization` header since this call is what
    /// establishes trust in the key.
    #[instrument(skip(self))]
    pub async fn validate_config(&self) -> Result<(), ApiError> {
        let payload = ValidatePayload {
            key: self.config.api_key.as_deref(),
        };
        let options = self.options_with(&payload)?.with_auth(false);
        let raw = self.dispatch(Endpoint::Validate, options).await?;
        if raw.is_empty() {
            return Err(ApiError::InvalidApiKey);
        }
        Ok(())
    }

    /// Browser listing the bot's commands.
    #[instrument(skip_all)]
    pub async fn help_browser<C: Serialize>(
        &self,
        commands: &[C],
        context: BrowserContext,
    ) -> Result<EmbedBrowser, ApiError> {
        let payload = HelpPayload {
            command_list: commands,
        };
        let raw = self.call(Endpoint::Help, &payload).await?;
        EmbedBrowser::from_raw(raw, context, Endpoint::Help)
    }

    /// Embed describing an item. Without local `item_data` the backend looks
    /// the item up itself.
    #[instrument(skip(self, item_data))]
    pub async fn item_embed(&self, id: u32, item_data: Option<&Value>) -> Result<Embed, ApiError> {
        let payload = ItemEmbedPayload { id, data: item_data };
        let raw = self.call(Endpoint::ItemEmbed, &payload).await?;
        Embed::from_raw(raw, Endpoint::ItemEmbed)
    }

    /// Browser over the results of an item name search.
    #[instrument(skip_all, fields(count = items.len()))]
    pub async fn item_browser<I: Serialize>(
        &self,
        items: &[I],
        context: BrowserContext,
    ) -> Result<EmbedBrowser, ApiError> {
        let payload = ItemBrowserPayload { items };
        let raw = self.call(Endpoint::ItemBrowser, &payload).await?;
        EmbedBrowser::from_raw(raw, context, Endpoint::ItemBrowser)
    }

    /// Embed announcing a reward; `username` falls back to `"Unknown"`.
    #[instrument(skip(self))]
    pub async fn reward_embed(
        &self,
        item_id: u32,
        amount: u32,
        username: Option<&str>,
    ) -> Result<Embed, ApiError> {
        let payload = RewardPayload {
            item_id,
            amount,
            username: username.unwrap_or(UNKNOWN_USERNAME),
        };
        let raw = self.call(Endpoint::ItemReward, &payload).await?;
        Embed::from_raw(raw, Endpoint::ItemReward)
    }

    /// Browser over the data pages of one monster.
    #[instrument(skip(self, context))]
    pub async fn monster_browser(&self, id: u32, context: BrowserContext) -> Result<EmbedBrowser, ApiError> {
        let raw = self.call(Endpoint::MonsterEmbed, &MonsterIdPayload { id }).await?;
        EmbedBrowser::from_raw(raw, context, Endpoint::MonsterEmbed)
    }

    /// Browser over the monsters whose name matches `name`.
    #[instrument(skip(self, context))]
    pub async fn monster_search_browser(
        &self,
        name: &str,
        context: BrowserContext,
    ) -> Result<EmbedBrowser, ApiError> {
        let raw = self.call(Endpoint::MonsterBrowser, &MonsterNamePayload { name }).await?;
        EmbedBrowser::from_raw(raw, context, Endpoint::MonsterBrowser)
    }

    /// A random trivia question with its answers, as sent by the backend.
    #[instrument(skip(self))]
    pub async fn trivia_question(&self, lang: Option<&str>) -> Result<RawResponse, ApiError> {
        let payload = TriviaPayload {
            lang: lang.unwrap_or(DEFAULT_LANG),
        };
        self.call(Endpoint::TriviaQuestion, &payload).await
    }

    /// Data of a random monster for the disguise event.
    #[instrument(skip(self))]
    pub async fn random_monster(&self) -> Result<RawResponse, ApiError> {
        self.dispatch(Endpoint::DisguiseMonster, self.options.clone()).await
    }

    /// Spawn a boss from `list` (the backend's default list when `None`).
    ///
    /// Every drop's `embed` is turned into an [`Embed`]; drop order and all
    /// other fields are kept. An empty response yields `None`. List entries
    /// are sent as-is, so ids or whole monster records both work.
    #[instrument(skip(self, list))]
    pub async fn spawn_boss<L: Serialize>(
        &self,
        list: Option<&[L]>,
        drop_rate: f64,
    ) -> Result<Option<BossSpawn>, ApiError> {
        let payload = SpawnBossPayload { list, drop_rate };
        let raw = self.call(Endpoint::BossSpawn, &payload).await?;
        raw.decode(Endpoint::BossSpawn)
    }

    /// Embed showing the current state of a boss fight.
    #[instrument(skip_all)]
    pub async fn boss_fight_embed<B: Serialize>(&self, boss_data: &B) -> Result<Embed, ApiError> {
        let payload = BossFightEmbedPayload { boss_data };
        let raw = self.call(Endpoint::BossFightEmbed, &payload).await?;
        Embed::from_raw(raw, Endpoint::BossFightEmbed)
    }

    /// Random gear choices for a participant, grouped by slot.
    #[instrument(skip(self))]
    pub async fn boss_fight_gear_list(&self, username: &str) -> Result<Option<GearList>, ApiError> {
        let raw = self.call(Endpoint::BossFightGear, &GearPayload { username }).await?;
        raw.decode(Endpoint::BossFightGear)
    }

    /// Turn a stored item into an auction object.
    #[instrument(skip_all)]
    pub async fn create_auction<I: Serialize>(&self, item: &I) -> Result<RawResponse, ApiError> {
        self.call(Endpoint::AuctionCreate, &CreateAuctionPayload { item }).await
    }

    /// Embed for the auction channel (`Info`) or the history channel
    /// (`History`).
    #[instrument(skip(self, auction))]
    pub async fn auction_embed<A: Serialize>(
        &self,
        auction: &A,
        kind: AuctionEmbedKind,
    ) -> Result<Embed, ApiError> {
        let payload = AuctionEmbedPayload { auction, kind };
        let raw = self.call(Endpoint::AuctionEmbed, &payload).await?;
        Embed::from_raw(raw, Endpoint::AuctionEmbed)
    }

    async fn call<P: Serialize>(&self, endpoint: Endpoint, payload: &P) -> Result<RawResponse, ApiError> {
        let options = self.options_with(payload)?;
        self.dispatch(endpoint, options).await
    }

    async fn dispatch(&self, endpoint: Endpoint, options: CallOptions) -> Result<RawResponse, ApiError> {
        self.rest
            .request(endpoint.route(), endpoint.name(), options, &self.config)
            .await
    }

    fn options_with<P: Serialize>(&self, payload: &P) -> Result<CallOptions, ApiError> {
        let data = serde_json::to_value(payload).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(self.options.with_data(data))
    }
}
