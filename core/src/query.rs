//! Query parameters for the filtered stream connection.
//!
//! # Design
//! `StreamQueryParamsBuilder` is a plain accumulator: every `add_*` call
//! appends one value to its category and returns `&mut Self` for chaining.
//! `build` only borrows the builder, so it can be called again (or the builder
//! extended further) and the same state always renders the same output. Field
//! names are not checked against the API vocabulary.

use url::form_urlencoded;

const EXPANSIONS: &str = "expansions";
const MEDIA_FIELDS: &str = "media.fields";
const PLACE_FIELDS: &str = "place.fields";
const POLL_FIELDS: &str = "poll.fields";
const TWEET_FIELDS: &str = "tweet.fields";
const USER_FIELDS: &str = "user.fields";
const BACKFILL_MINUTES: &str = "backfill_minutes";

/// Accumulates expansions and field selections for the stream request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamQueryParamsBuilder {
    backfill_minutes: u32,
    expansions: Vec<String>,
    media_fields: Vec<String>,
    place_fields: Vec<String>,
    poll_fields: Vec<String>,
    tweet_fields: Vec<String>,
    user_fields: Vec<String>,
}

impl StreamQueryParamsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that a referenced object (e.g. `author_id`,
    /// `attachments.media_keys`) is included inline with each tweet.
    pub fn add_expansion(&mut self, expansion: impl Into<String>) -> &mut Self {
        self.expansions.push(expansion.into());
        self
    }

    /// Media attributes to deliver. Only returned together with the
    /// `attachments.media_keys` expansion.
    pub fn add_media_field(&mut self, media_field: impl Into<String>) -> &mut Self {
        self.media_fields.push(media_field.into());
        self
    }

    /// Place attributes to deliver. Only returned together with the
    /// `geo.place_id` expansion.
    pub fn add_place_field(&mut self, place_field: impl Into<String>) -> &mut Self {
        self.place_fields.push(place_field.into());
        self
    }

    /// Poll attributes to deliver. Only returned together with the
    /// `attachments.poll_ids` expansion.
    pub fn add_poll_field(&mut self, poll_field: impl Into<String>) -> &mut Self {
        self.poll_fields.push(poll_field.into());
        self
    }

    pub fn add_tweet_field(&mut self, tweet_field: impl Into<String>) -> &mut Self {
        self.tweet_fields.push(tweet_field.into());
        self
    }

    /// User attributes to deliver. Needs one of the user expansions such as
    /// `author_id` or `in_reply_to_user_id`.
    pub fn add_user_field(&mut self, user_field: impl Into<String>) -> &mut Self {
        self.user_fields.push(user_field.into());
        self
    }

    /// Minutes of missed data to replay after a disconnection. Zero disables
    /// the parameter. The API's own upper bound is not enforced here.
    pub fn add_backfill_minutes(&mut self, minutes: u32) -> &mut Self {
        self.backfill_minutes = minutes;
        self
    }

    /// Render the accumulated selections. Empty categories are left out.
    pub fn build(&self) -> QueryParams {
        let mut pairs = Vec::new();
        push_joined(&mut pairs, EXPANSIONS, &self.expansions);
        push_joined(&mut pairs, MEDIA_FIELDS, &self.media_fields);
        push_joined(&mut pairs, PLACE_FIELDS, &self.place_fields);
        push_joined(&mut pairs, POLL_FIELDS, &self.poll_fields);
        push_joined(&mut pairs, TWEET_FIELDS, &self.tweet_fields);
        push_joined(&mut pairs, USER_FIELDS, &self.user_fields);

        if self.backfill_minutes > 0 {
            pairs.push((BACKFILL_MINUTES.to_string(), self.backfill_minutes.to_string()));
        }

        QueryParams { pairs }
    }
}

fn push_joined(pairs: &mut Vec<(String, String)>, key: &str, values: &[String]) {
    if !values.is_empty() {
        pairs.push((key.to_string(), values.join(",")));
    }
}

/// Built query parameters, one entry per key, in a fixed category order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// URL-encoded form, e.g. `expansions=author_id&tweet.fields=id%2Ctext`.
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }
}

impl IntoIterator for QueryParams {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}
