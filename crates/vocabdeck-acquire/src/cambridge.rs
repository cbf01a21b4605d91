use crate::audio;
use crate::error::{AudioError, LookupError};
use crate::normalize;
use crate::source::{DefinitionSource, MediaSource};
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use vocabdeck_model::{RawFields, WordRecord};

const ORIGIN: &str = "https://dictionary.cambridge.org";
const LOOKUP_PATH: &str = "dictionary/english/";
const SOURCE_LABEL: &str = "Cambridge";

/// The site refuses requests that don't look like a browser.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Per-request timeout so a stalled server can't hang the whole run.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Cambridge Dictionary scraper.
///
/// Serves both as the [`DefinitionSource`] and as the [`MediaSource`] for
/// the audio URLs it discovers, sharing one HTTP client.
#[derive(Debug, Clone)]
pub struct Cambridge {
    client: reqwest::Client,
    origin: Url,
}

impl Cambridge {
    pub fn new() -> Result<Self, LookupError> {
        let origin = Url::parse(ORIGIN).map_err(|_| LookupError::InvalidUrl(ORIGIN.to_string()))?;
        Ok(Self::with_origin(origin)?)
    }

    /// Point the scraper at a different host (mirrors, test servers).
    pub fn with_origin(origin: Url) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client, origin })
    }

    /// Entry page URL for `word`, lower-cased and percent-encoded as one path segment.
    pub fn lookup_url(&self, word: &str) -> Result<Url, LookupError> {
        let mut url = self
            .origin
            .join(LOOKUP_PATH)
            .map_err(|_| LookupError::InvalidUrl(word.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| LookupError::InvalidUrl(word.to_string()))?
            .pop_if_empty()
            .push(&normalize::normalize_word(word));
        Ok(url)
    }

    /// Value sent as `Referer` on audio requests: the site root.
    pub fn referer(&self) -> &str {
        self.origin.as_str()
    }
}

impl DefinitionSource for Cambridge {
    fn name(&self) -> &str {
        SOURCE_LABEL
    }

    async fn lookup(&self, word: &str) -> Result<WordRecord, LookupError> {
        let url = self.lookup_url(word)?;
        tracing::debug!(url = %url, "Fetching definition page");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status {
                status,
                url: url.to_string(),
            });
        }

        let html = response.text().await?;
        tracing::debug!(word = %word, bytes = html.len(), "Received HTML");

        let fields = parse_entry(&html, &self.origin);
        WordRecord::from_fields(&normalize::normalize_word(word), SOURCE_LABEL, fields)
            .ok_or_else(|| LookupError::NoDefinition(word.to_string()))
    }
}

impl MediaSource for Cambridge {
    async fn download(&self, url: &str) -> Result<Option<Vec<u8>>, AudioError> {
        audio::download(&self.client, url, self.referer()).await
    }
}

/// Extract the first definition, pronunciation, example and audio source
/// from an entry page. Missing elements come back as empty fields.
pub fn parse_entry(html: &str, origin: &Url) -> RawFields {
    let document = Html::parse_document(html);

    let def_sel = Selector::parse("div.def.ddef_d.db").expect("valid selector");
    let pron_sel = Selector::parse("span.pron.dpron").expect("valid selector");
    let examp_sel = Selector::parse("div.examp.dexamp").expect("valid selector");
    let audio_sel = Selector::parse(r#"source[type="audio/mpeg"]"#).expect("valid selector");

    let first_text = |sel: &Selector| {
        document
            .select(sel)
            .next()
            .map(element_text)
            .unwrap_or_default()
    };

    let audio_url = document.select(&audio_sel).next().and_then(|source| {
        let attrs = source.value();
        attrs
            .attr("src")
            .filter(|s| !s.trim().is_empty())
            .or_else(|| attrs.attr("data-src-mp3"))
            .and_then(|raw| absolutize_audio_url(raw, origin))
    });

    RawFields {
        definition: first_text(&def_sel),
        pronunciation: strip_slashes(&first_text(&pron_sel)),
        example: first_text(&examp_sel),
        audio_url,
    }
}

fn element_text(elem: ElementRef) -> String {
    normalize::clean_text(&elem.text().collect::<String>())
}

/// The page wraps IPA in `/.../`; cards add their own delimiters.
fn strip_slashes(ipa: &str) -> String {
    ipa.trim_matches(|c: char| c == '/' || c.is_whitespace()).to_string()
}

/// Resolve an audio reference against the site origin.
///
/// - `//host/x.mp3` gains `https:`
/// - `/media/x.mp3` gains the origin
/// - anything else is returned as-is
pub fn absolutize_audio_url(raw: &str, origin: &Url) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let url = if raw.starts_with("//") {
        format!("https:{raw}")
    } else if raw.starts_with('/') {
        format!("{}{raw}", origin.as_str().trim_end_matches('/'))
    } else {
        raw.to_string()
    };
    Some(url)
}
