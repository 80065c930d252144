use serde_json::Value;

const SCHEMA_FALLBACK: &str = "{\"skills\": [\"string\"], \"job_level\": \"string\", \"max_duration_minutes\": null, \"role_family\": \"string\"}";

pub fn build_intent_messages(query: &str) -> Vec<Value> {
	let schema = serde_json::json!({
		"skills": ["string"],
		"job_level": "entry | mid | senior",
		"max_duration_minutes": "number | null",
		"role_family": "string"
	});
	let schema_text =
		serde_json::to_string_pretty(&schema).unwrap_or_else(|_| SCHEMA_FALLBACK.to_string());
	let system_prompt = "You extract structured hiring intent from recruiter queries and job descriptions. \
Output must be valid JSON only and must match the provided schema exactly. \
Use null for a duration that the query does not state. Do not add explanations or extra fields.";
	let user_prompt = format!(
		"Return JSON matching this exact schema:\n{schema}\nQuery:\n{query}",
		schema = schema_text,
		query = query
	);

	vec![
		serde_json::json!({ "role": "system", "content": system_prompt }),
		serde_json::json!({ "role": "user", "content": user_prompt }),
	]
}
