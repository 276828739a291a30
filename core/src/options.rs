//! Static call options and the route registry.
//!
//! # Design
//! `CallOptions` is a plain value: the client keeps one base copy built at
//! startup and clones it per call with that call's `data` attached. Routes
//! and endpoints form closed enums so a typo in a path segment is a compile
//! error rather than a 404.

use std::fmt;

use serde_json::Value;

/// Default backend root used when no URL is configured.
pub const DEFAULT_API: &str = "http://yggdrasil-ro.me:5346/api";

/// Default API version appended as `/v{version}` for versioned calls.
pub const DEFAULT_VERSION: u32 = 1;

/// Logical grouping of backend operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Monster,
    Item,
    Trivia,
    Disguise,
    BossFight,
    Auction,
    Util,
}

impl Route {
    pub const ALL: [Route; 7] = [
        Route::Monster,
        Route::Item,
        Route::Trivia,
        Route::Disguise,
        Route::BossFight,
        Route::Auction,
        Route::Util,
    ];

    /// The path segment sent on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Route::Monster => "monster",
            Route::Item => "item",
            Route::Trivia => "trivia",
            Route::Disguise => "disguise",
            Route::BossFight => "bossfight",
            Route::Auction => "auction",
            Route::Util => "util",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every route/endpoint pair the client knows how to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Validate,
    Help,
    ItemEmbed,
    ItemBrowser,
    ItemReward,
    MonsterEmbed,
    MonsterBrowser,
    TriviaQuestion,
    DisguiseMonster,
    BossSpawn,
    BossFightEmbed,
    BossFightGear,
    AuctionCreate,
    AuctionEmbed,
}

impl Endpoint {
    pub fn route(self) -> Route {
        match self {
            Endpoint::Validate | Endpoint::Help => Route::Util,
            Endpoint::ItemEmbed | Endpoint::ItemBrowser | Endpoint::ItemReward => Route::Item,
            Endpoint::MonsterEmbed | Endpoint::MonsterBrowser => Route::Monster,
            Endpoint::TriviaQuestion => Route::Trivia,
            Endpoint::DisguiseMonster => Route::Disguise,
            Endpoint::BossSpawn | Endpoint::BossFightEmbed | Endpoint::BossFightGear => {
                Route::BossFight
            }
            Endpoint::AuctionCreate | Endpoint::AuctionEmbed => Route::Auction,
        }
    }

    /// The endpoint segment within its route.
    pub fn name(self) -> &'static str {
        match self {
            Endpoint::Validate => "validate",
            Endpoint::Help => "help",
            Endpoint::ItemEmbed | Endpoint::MonsterEmbed => "embed",
            Endpoint::BossFightEmbed | Endpoint::AuctionEmbed => "embed",
            Endpoint::ItemBrowser | Endpoint::MonsterBrowser => "browser",
            Endpoint::ItemReward => "reward",
            Endpoint::TriviaQuestion => "q",
            Endpoint::DisguiseMonster => "mob",
            Endpoint::BossSpawn => "boss",
            Endpoint::BossFightGear => "gear",
            Endpoint::AuctionCreate => "create",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.route(), self.name())
    }
}

/// Where the backend lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpOptions {
    pub version: u32,
    pub api: String,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION,
            api: DEFAULT_API.to_string(),
        }
    }
}

/// Per-call configuration: authentication, versioning, target and payload.
#[derive(Debug, Clone, PartialEq)]
pub struct CallOptions {
    pub auth: bool,
    pub versioned: bool,
    pub http: HttpOptions,
    pub data: Option<Value>,
}

impl Default for CallOptions {
    fn default() -> Self {
        Self {
            auth: true,
            versioned: true,
            http: HttpOptions::default(),
            data: None,
        }
    }
}

impl CallOptions {
    /// A copy of these options carrying `data` as the call payload.
    pub fn with_data(&self, data: Value) -> Self {
        Self {
            data: Some(data),
            ..self.clone()
        }
    }

    pub fn with_auth(mut self, auth: bool) -> Self {
        self.auth = auth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_are_authenticated_and_versioned() {
        let options = CallOptions::default();
        assert!(options.auth);
        assert!(options.versioned);
        assert_eq!(options.http.version, 1);
        assert_eq!(options.http.api, "http://yggdrasil-ro.me:5346/api");
        assert!(options.data.is_none());
    }

    #[test]
    fn with_data_leaves_base_untouched() {
        let base = CallOptions::default();
        let call = base.with_data(json!({ "id": 1 })).with_auth(false);
        assert!(base.data.is_none());
        assert!(base.auth);
        assert_eq!(call.data, Some(json!({ "id": 1 })));
        assert!(!call.auth);
    }

    #[test]
    fn route_names_are_lowercase_wire_names() {
        let names: Vec<&str> = Route::ALL.iter().map(|r| r.as_str()).collect();
        assert_eq!(
            names,
            ["monster", "item", "trivia", "disguise", "bossfight", "auction", "util"]
        );
    }

    #[test]
    fn endpoints_render_as_route_slash_name() {
        assert_eq!(Endpoint::Validate.to_string(), "util/validate");
        assert_eq!(Endpoint::ItemReward.to_string(), "item/reward");
        assert_eq!(Endpoint::MonsterBrowser.to_string(), "monster/browser");
        assert_eq!(Endpoint::TriviaQuestion.to_string(), "trivia/q");
        assert_eq!(Endpoint::DisguiseMonster.to_string(), "disguise/mob");
        assert_eq!(Endpoint::BossSpawn.to_string(), "bossfight/boss");
        assert_eq!(Endpoint::BossFightGear.to_string(), "bossfight/gear");
        assert_eq!(Endpoint::AuctionEmbed.to_string(), "auction/embed");
    }
}
