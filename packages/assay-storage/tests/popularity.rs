use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use assay_storage::{Error, popularity};

fn temp_path(label: &str) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let mut path = env::temp_dir();

	path.push(format!("assay_popularity_{label}_{nanos}_{}_{ordinal}.json", std::process::id()));

	path
}

#[test]
fn loads_counts_from_file() {
	let path = temp_path("valid");

	fs::write(&path, r#"{ "https://catalog.example/java-8-new": 4 }"#)
		.expect("Failed to write popularity map.");

	let result = popularity::load(&path);

	fs::remove_file(&path).expect("Failed to remove popularity map.");

	let store = result.expect("Popularity map must load.");

	assert_eq!(store.count("https://catalog.example/java-8-new"), 4);
}

#[test]
fn missing_file_yields_empty_store() {
	let store = popularity::load(&temp_path("missing")).expect("Missing file must not fail.");

	assert!(store.is_empty());
}

#[test]
fn malformed_file_is_reported() {
	let path = temp_path("malformed");

	fs::write(&path, "not json").expect("Failed to write popularity map.");

	let result = popularity::load(&path);

	fs::remove_file(&path).expect("Failed to remove popularity map.");

	let err = result.expect_err("Expected parse error.");

	assert!(matches!(err, Error::ParsePopularity { .. }), "Unexpected error: {err}");
}
