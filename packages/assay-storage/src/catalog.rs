use std::collections::HashMap;

use qdrant_client::qdrant::{PointId, ScoredPoint, Value, point_id::PointIdOptions, value::Kind};

use assay_domain::{Item, ItemId};

pub const ITEM_ID_KEY: &str = "item_id";
pub const NAME_KEY: &str = "name";
pub const URL_KEY: &str = "url";
pub const DURATION_KEY: &str = "duration_minutes";
pub const CATEGORY_LABELS_KEY: &str = "category_labels";
pub const CATEGORY_CODES_KEY: &str = "category_codes";

/// Decodes a catalog item from a point payload. Points without a name or URL are unusable.
pub fn item_from_point(point: &ScoredPoint) -> Option<Item> {
	let payload = &point.payload;
	let Some(url) = payload_string(payload, URL_KEY).filter(|url| !url.trim().is_empty()) else {
		tracing::warn!(point_id = ?point.id, "Catalog point missing url.");

		return None;
	};
	let Some(name) = payload_string(payload, NAME_KEY) else {
		tracing::warn!(%url, "Catalog point missing name.");

		return None;
	};
	let id = payload_item_id(payload, ITEM_ID_KEY)
		.or_else(|| point.id.as_ref().and_then(point_id_to_item_id))
		.unwrap_or_else(|| ItemId::Text(url.clone()));

	Some(Item {
		id,
		name,
		url,
		duration_minutes: payload_f32(payload, DURATION_KEY)
			.filter(|minutes| minutes.is_finite() && *minutes >= 0.0)
			.unwrap_or(0.0),
		category_labels: payload_string_list(payload, CATEGORY_LABELS_KEY),
		category_codes: payload_string_list(payload, CATEGORY_CODES_KEY),
	})
}

pub fn point_id_to_item_id(point_id: &PointId) -> Option<ItemId> {
	match &point_id.point_id_options {
		Some(PointIdOptions::Num(id)) => i64::try_from(*id).ok().map(ItemId::Int),
		Some(PointIdOptions::Uuid(id)) => Some(ItemId::Text(id.clone())),
		None => None,
	}
}

pub fn payload_item_id(payload: &HashMap<String, Value>, key: &str) -> Option<ItemId> {
	let value = payload.get(key)?;

	match &value.kind {
		Some(Kind::IntegerValue(id)) => Some(ItemId::Int(*id)),
		Some(Kind::StringValue(id)) if !id.is_empty() => Some(ItemId::Text(id.clone())),
		_ => None,
	}
}

pub fn payload_string(payload: &HashMap<String, Value>, key: &str) -> Option<String> {
	let value = payload.get(key)?;

	match &value.kind {
		Some(Kind::StringValue(text)) => Some(text.to_string()),
		_ => None,
	}
}

pub fn payload_f32(payload: &HashMap<String, Value>, key: &str) -> Option<f32> {
	let value = payload.get(key)?;

	match &value.kind {
		Some(Kind::DoubleValue(value)) => Some(*value as f32),
		Some(Kind::IntegerValue(value)) => Some(*value as f32),
		_ => None,
	}
}

/// Non-string entries are dropped; a missing or non-list value is an empty list.
pub fn payload_string_list(payload: &HashMap<String, Value>, key: &str) -> Vec<String> {
	let Some(Kind::ListValue(list)) = payload.get(key).and_then(|value| value.kind.as_ref()) else {
		return Vec::new();
	};

	list.values
		.iter()
		.filter_map(|value| match &value.kind {
			Some(Kind::StringValue(text)) => Some(text.to_string()),
			_ => None,
		})
		.collect()
}
