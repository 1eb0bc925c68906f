use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use tracing::trace;

use crate::domain::{BookAction, BookMessage, BookUpdate, ControlEvent, ControlKind, FeedMessage};
use crate::error::FeedParseError;

/// Largest price or size accepted on a level
///
/// Keeps depth sums and mid prices far inside `Decimal` range.
pub const MAX_LEVEL_VALUE: Decimal = Decimal::from_parts(0xA764_0000, 0x0DE0_B6B3, 0, false, 0);

/// Top-level shape of every inbound message
///
/// All fields are optional; classification happens after decoding.
#[derive(Debug, Deserialize)]
struct Envelope {
    event: Option<String>,
    code: Option<Value>,
    msg: Option<String>,
    action: Option<String>,
    data: Option<Value>,
}

/// Decode and classify a raw text frame
///
/// Only the envelope is checked here. Book payload shape is validated by
/// [`parse_book_update`] so a connection never drops on a bad payload.
pub fn parse_feed_message(text: &str) -> Result<FeedMessage, FeedParseError> {
    let envelope: Envelope = serde_json::from_str(text)?;

    if let Some(event) = envelope.event {
        return Ok(FeedMessage::Control(ControlEvent {
            kind: ControlKind::from_event(&event),
            code: envelope.code.and_then(value_to_string),
            msg: envelope.msg,
        }));
    }

    match envelope.data {
        Some(data) if has_payload(&data) => Ok(FeedMessage::Book(BookMessage {
            action: BookAction::from_action(envelope.action.as_deref()),
            data,
        })),
        _ => {
            trace!("feed message without event or data");
            Ok(FeedMessage::Ignored)
        }
    }
}

/// Validate a book payload into a ready-to-apply update
///
/// `data` may be an array (first element used) or an object. Both `bids` and
/// `asks` must be present; every level is checked before anything is returned.
pub fn parse_book_update(message: &BookMessage) -> Result<BookUpdate, FeedParseError> {
    let payload = match &message.data {
        Value::Array(items) => items
            .first()
            .ok_or(FeedParseError::InvalidShape("empty data array"))?,
        other => other,
    };
    let payload = payload
        .as_object()
        .ok_or(FeedParseError::InvalidShape("data entry is not an object"))?;

    let bids = payload
        .get("bids")
        .ok_or(FeedParseError::InvalidShape("missing bids"))?;
    let asks = payload
        .get("asks")
        .ok_or(FeedParseError::InvalidShape("missing asks"))?;

    Ok(BookUpdate {
        action: message.action,
        bids: parse_price_levels(bids, "bid")?,
        asks: parse_price_levels(asks, "ask")?,
        timestamp: payload.get("ts").and_then(parse_timestamp),
    })
}

fn has_payload(data: &Value) -> bool {
    match data {
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
        _ => false,
    }
}

fn value_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn parse_price_levels(
    value: &Value,
    side: &'static str,
) -> Result<Vec<(Decimal, Decimal)>, FeedParseError> {
    let arr = value
        .as_array()
        .ok_or(FeedParseError::InvalidShape("levels are not a list"))?;
    let mut levels = Vec::with_capacity(arr.len());

    for (index, item) in arr.iter().enumerate() {
        let invalid = |reason: &str| FeedParseError::InvalidLevel {
            side,
            index,
            reason: reason.to_string(),
        };

        let inner = item.as_array().ok_or_else(|| invalid("not a list"))?;
        if inner.len() < 2 {
            return Err(invalid("expected at least price and size"));
        }

        let price = parse_decimal(&inner[0]).ok_or_else(|| invalid("unparseable price"))?;
        let size = parse_decimal(&inner[1]).ok_or_else(|| invalid("unparseable size"))?;

        if price <= Decimal::ZERO {
            return Err(invalid("price must be positive"));
        }
        if size < Decimal::ZERO {
            return Err(invalid("size must not be negative"));
        }
        if price > MAX_LEVEL_VALUE || size > MAX_LEVEL_VALUE {
            return Err(invalid("value out of range"));
        }

        levels.push((price, size));
    }

    Ok(levels)
}

/// Decimal from a JSON string or number
fn parse_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            Decimal::from_str(s)
                .or_else(|_| Decimal::from_scientific(s))
                .ok()
        }
        Value::Number(n) => {
            let s = n.to_string();
            Decimal::from_str(&s)
                .or_else(|_| Decimal::from_scientific(&s))
                .ok()
        }
        _ => None,
    }
}

/// Epoch milliseconds, as a string or a number
fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    let millis = match value {
        Value::String(s) => s.trim().parse::<i64>().ok()?,
        Value::Number(n) => n.as_i64()?,
        _ => return None,
    };
    DateTime::from_timestamp_millis(millis)
}
