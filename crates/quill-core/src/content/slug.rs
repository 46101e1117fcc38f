//! Slug derivation and uniqueness probing.
//!
//! A slug is `YYYY-MM-DD-<base>-<suffix>`: the creation date, a sanitized
//! title, and the last six digits of the creation timestamp in milliseconds
//! to keep same-day duplicates of a title apart. The probe loop retries with
//! a counter and a fresh suffix on collision. The probe is check-then-act;
//! the unique index on the slug column catches the race it cannot.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::{DomainError, RepoError};
use crate::ports::PostRepository;

/// Base slugs longer than this are cut off.
const MAX_BASE_LEN: usize = 80;

/// Probe attempts before giving up. The source of truth for collisions is
/// the store's unique constraint; this cap only turns a pathological probe
/// loop into a loud failure.
const MAX_ATTEMPTS: u32 = 1000;

/// Existence probe the generator runs candidates against.
#[async_trait]
pub trait SlugProbe: Send + Sync {
    async fn slug_exists(&self, slug: &str) -> Result<bool, RepoError>;
}

#[async_trait]
impl<R: PostRepository + ?Sized> SlugProbe for R {
    async fn slug_exists(&self, slug: &str) -> Result<bool, RepoError> {
        self.exists_by_slug(slug).await
    }
}

/// Sanitize a title into a URL-safe base slug.
///
/// Lowercases, keeps ASCII alphanumerics and non-ASCII word characters
/// (Hangul and other scripts survive), turns everything else into `-`,
/// collapses runs, trims the ends, and cuts off at [`MAX_BASE_LEN`].
pub fn base_slug(title: &str) -> String {
    let mut out = String::new();
    let mut pending_dash = false;
    for c in title.to_lowercase().chars() {
        let keep = c.is_ascii_alphanumeric() || (!c.is_ascii() && c.is_alphanumeric());
        if keep {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            out.push(c);
            pending_dash = false;
        } else {
            pending_dash = true;
        }
    }
    if out.chars().count() > MAX_BASE_LEN {
        out = out.chars().take(MAX_BASE_LEN).collect();
    }
    if out.is_empty() {
        out.push_str("untitled");
    }
    out
}

/// Last six digits of a millisecond timestamp, zero-padded.
fn millis_suffix(ts: DateTime<Utc>) -> String {
    format!("{:06}", ts.timestamp_millis().rem_euclid(1_000_000))
}

/// Derive a slug for `title` that the probe reports as free.
///
/// The first candidate is fully determined by the title and creation time;
/// each retry appends an incrementing counter and regenerates the suffix
/// from the current clock. Exhausting [`MAX_ATTEMPTS`] is a hard error.
pub async fn ensure_unique_slug<P: SlugProbe + ?Sized>(
    title: &str,
    created_at: DateTime<Utc>,
    probe: &P,
) -> Result<String, DomainError> {
    unique_slug(title, created_at, 0, probe).await
}

/// Derive a replacement slug after the store rejected one the probe thought
/// was free.
///
/// Starts directly in the counter-and-fresh-suffix retry path: the first
/// deterministic candidate is exactly the one the unique constraint just
/// rejected, so re-deriving it would resubmit the same value.
pub async fn regenerate_unique_slug<P: SlugProbe + ?Sized>(
    title: &str,
    created_at: DateTime<Utc>,
    probe: &P,
) -> Result<String, DomainError> {
    unique_slug(title, created_at, 1, probe).await
}

async fn unique_slug<P: SlugProbe + ?Sized>(
    title: &str,
    created_at: DateTime<Utc>,
    start: u32,
    probe: &P,
) -> Result<String, DomainError> {
    let base = base_slug(title);
    let date = created_at.format("%Y-%m-%d");

    let mut counter = start;
    let mut candidate = if counter == 0 {
        format!("{date}-{base}-{}", millis_suffix(created_at))
    } else {
        format!("{date}-{base}-{counter}-{}", millis_suffix(Utc::now()))
    };
    loop {
        if !probe.slug_exists(&candidate).await? {
            return Ok(candidate);
        }
        counter += 1;
        if counter >= MAX_ATTEMPTS {
            return Err(DomainError::SlugExhausted {
                attempts: MAX_ATTEMPTS,
            });
        }
        candidate = format!("{date}-{base}-{counter}-{}", millis_suffix(Utc::now()));
    }
}
