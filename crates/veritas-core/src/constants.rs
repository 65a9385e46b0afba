//! Shared constants.

/// `strftime` format of every stored history timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Name of the default configuration file, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "veritas.toml";

/// Verdict labels written to the `analysis` column for image detections.
pub const LABEL_AI_GENERATED: &str = "AI-generated";
pub const LABEL_HUMAN: &str = "Human";

/// Default model ids, tried in order.
pub const DEFAULT_PRIMARY_MODEL: &str = "falconsai/image-detection-fake-vs-real";
pub const DEFAULT_FALLBACK_MODEL: &str = "uclanlp/clip-ai-generated-images";
