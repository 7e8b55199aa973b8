//! Optional message sections: quote of the day, trending topics, and the
//! Wikipedia on-this-day feed.
//!
//! All of these are best-effort. Callers map a fetch error to an omitted
//! block rather than failing the run.

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

use super::SourceClient;
use crate::config::{OnThisDaySettings, QuoteSettings, TrendsSettings};
use crate::constants::extras as limits;
use crate::errors::SourceFetchError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    /// Rendered as `"{quote} - {author}"`
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Trend {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnThisDayEvent {
    pub text: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct QuoteResponse {
    contents: QuoteContents,
}

#[derive(Debug, Deserialize)]
struct QuoteContents {
    quotes: Vec<QuoteBody>,
}

#[derive(Debug, Deserialize)]
struct QuoteBody {
    quote: String,
    author: String,
}

#[derive(Debug, Deserialize)]
struct TrendsPlace {
    trends: Vec<Trend>,
}

#[derive(Debug, Deserialize)]
struct OnThisDayResponse {
    selected: Vec<OnThisDaySelection>,
}

#[derive(Debug, Deserialize)]
struct OnThisDaySelection {
    text: String,
    pages: Vec<OnThisDayPage>,
}

#[derive(Debug, Deserialize)]
struct OnThisDayPage {
    content_urls: ContentUrls,
}

#[derive(Debug, Deserialize)]
struct ContentUrls {
    desktop: DesktopUrls,
}

#[derive(Debug, Deserialize)]
struct DesktopUrls {
    page: String,
}

impl SourceClient {
    pub async fn fetch_quote(&self, settings: &QuoteSettings) -> Result<Quote, SourceFetchError> {
        let response: QuoteResponse = self.get_json(&settings.url, None).await?;
        let body = response.contents.quotes.into_iter().next().ok_or_else(|| {
            SourceFetchError::MalformedResponse {
                url: settings.url.clone(),
                reason: "empty quote list".to_string(),
            }
        })?;

        Ok(Quote {
            text: format!("{} - {}", body.quote, body.author),
        })
    }

    pub async fn fetch_trends(&self, settings: &TrendsSettings) -> Result<Vec<Trend>, SourceFetchError> {
        let places: Vec<TrendsPlace> = self
            .get_json(&settings.url, Some(&settings.bearer_token))
            .await?;
        let place = places
            .into_iter()
            .next()
            .ok_or_else(|| SourceFetchError::MalformedResponse {
                url: settings.url.clone(),
                reason: "empty trends list".to_string(),
            })?;

        Ok(place.trends.into_iter().take(limits::ITEM_LIMIT).collect())
    }

    pub async fn fetch_on_this_day(
        &self,
        settings: &OnThisDaySettings,
        date: NaiveDate,
    ) -> Result<Vec<OnThisDayEvent>, SourceFetchError> {
        let url = on_this_day_url(&settings.url_template, date);
        let response: OnThisDayResponse = self.get_json(&url, None).await?;

        let events = response
            .selected
            .into_iter()
            .take(limits::ITEM_LIMIT)
            .filter_map(|selection| {
                let url = selection
                    .pages
                    .into_iter()
                    .next()
                    .map(|page| page.content_urls.desktop.page)?;
                Some(OnThisDayEvent {
                    text: selection.text,
                    url,
                })
            })
            .collect();

        Ok(events)
    }
}

/// Expand the `{month}`/`{day}` placeholders, zero-padded.
fn on_this_day_url(template: &str, date: NaiveDate) -> String {
    template
        .replace("{month}", &format!("{:02}", date.month()))
        .replace("{day}", &format!("{:02}", date.day()))
}
