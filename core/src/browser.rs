//! Paginated embed browsers.
//!
//! A browser is a list of items, each carrying an embed, split into pages.
//! It is scoped to the message that opened it and the user who asked, so a
//! bot can ignore page-turn reactions from anyone else.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::embed::{embed_or_blank, Embed, EmbedFooter};
use crate::error::ApiError;
use crate::response::RawResponse;

/// One entry of a browser listing.
///
/// Fields other than `embed` are kept verbatim so the bot can use them
/// (item ids, labels, reaction emojis...).
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct BrowserItem {
    #[serde(default, deserialize_with = "embed_or_blank")]
    pub embed: Embed,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BrowserItem {
    pub fn new(embed: Embed) -> Self {
        Self {
            embed,
            extra: Map::new(),
        }
    }
}

/// Where a browser was opened and for whom.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowserContext {
    pub channel_id: Option<String>,
    pub message_id: Option<String>,
    pub user_id: Option<String>,
}

impl BrowserContext {
    pub fn new(message_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            channel_id: None,
            message_id: Some(message_id.into()),
            user_id: Some(user_id.into()),
        }
    }

    pub fn in_channel(mut self, channel_id: impl Into<String>) -> Self {
        self.channel_id = Some(channel_id.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmbedBrowser {
    items: Vec<BrowserItem>,
    context: BrowserContext,
    page_size: usize,
    page: usize,
}

impl EmbedBrowser {
    pub fn new(items: Vec<BrowserItem>, context: BrowserContext) -> Self {
        Self {
            items,
            context,
            page_size: 1,
            page: 0,
        }
    }

    /// Build a browser from a listing response. `Empty` gives an empty
    /// browser; the payload must otherwise be an array of items.
    pub fn from_raw(
        raw: RawResponse,
        context: BrowserContext,
        endpoint: impl ToString,
    ) -> Result<Self, ApiError> {
        let items: Option<Vec<BrowserItem>> = raw.decode(endpoint)?;
        Ok(Self::new(items.unwrap_or_default(), context))
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self.page = self.page.min(self.last_page());
        self
    }

    pub fn items(&self) -> &[BrowserItem] {
        &self.items
    }

    pub fn context(&self) -> &BrowserContext {
        &self.context
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn page_count(&self) -> usize {
        self.items.len().div_ceil(self.page_size)
    }

    /// Zero-based index of the page being shown.
    pub fn current_page(&self) -> usize {
        self.page
    }

    pub fn current_items(&self) -> &[BrowserItem] {
        let start = (self.page * self.page_size).min(self.items.len());
        let end = (start + self.page_size).min(self.items.len());
        &self.items[start..end]
    }

    /// Advance one page. Returns whether the page changed.
    pub fn next_page(&mut self) -> bool {
        self.go_to(self.page + 1)
    }

    /// Go back one page. Returns whether the page changed.
    pub fn previous_page(&mut self) -> bool {
        match self.page.checked_sub(1) {
            Some(page) => self.go_to(page),
            None => false,
        }
    }

    /// Jump to `page`, clamped to the last page.
    pub fn go_to(&mut self, page: usize) -> bool {
        let target = page.min(self.last_page());
        let moved = target != self.page;
        self.page = target;
        moved
    }

    /// Only the requesting user may turn pages of a scoped browser.
    pub fn can_navigate(&self, user_id: &str) -> bool {
        match &self.context.user_id {
            Some(owner) => owner == user_id,
            None => true,
        }
    }

    /// The embeds to display for the current page. When there is more than
    /// one page the last embed gets a `Page x/y` footer.
    pub fn render(&self) -> Vec<Embed> {
        let mut embeds: Vec<Embed> = self.current_items().iter().map(|item| item.embed.clone()).collect();
        let pages = self.page_count();
        if pages > 1 {
            if let Some(last) = embeds.last_mut() {
                let marker = format!("Page {}/{}", self.page + 1, pages);
                match last.footer.as_mut() {
                    Some(footer) if footer.text.is_empty() => footer.text = marker,
                    Some(footer) => footer.text = format!("{} • {marker}", footer.text),
                    None => {
                        last.footer = Some(EmbedFooter {
                            text: marker,
                            icon_url: None,
                        })
                    }
                }
            }
        }
        embeds
    }

    fn last_page(&self) -> usize {
        self.page_count().saturating_sub(1)
    }
}
