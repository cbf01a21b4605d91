use crate::error::AudioError;
use reqwest::header::REFERER;

/// Payloads at or below this many bytes are placeholders, not audio.
pub const MIN_AUDIO_BYTES: usize = 1000;

/// Download pronunciation audio from `url`, sending `referer` as the
/// `Referer` header (the media host rejects requests without it).
///
/// Returns `Ok(None)` for an empty URL without touching the network.
pub async fn download(
    client: &reqwest::Client,
    url: &str,
    referer: &str,
) -> Result<Option<Vec<u8>>, AudioError> {
    let url = url.trim();
    if url.is_empty() {
        return Ok(None);
    }

    let response = client.get(url).header(REFERER, referer).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(AudioError::Status {
            status,
            url: url.to_string(),
        });
    }

    let bytes = response.bytes().await?;
    tracing::debug!(url = %url, bytes = bytes.len(), "Received audio");
    check_payload(bytes.to_vec()).map(Some)
}

/// Reject payloads too small to be real audio.
pub fn check_payload(bytes: Vec<u8>) -> Result<Vec<u8>, AudioError> {
    if bytes.len() <= MIN_AUDIO_BYTES {
        return Err(AudioError::TooSmall { bytes: bytes.len() });
    }
    Ok(bytes)
}
