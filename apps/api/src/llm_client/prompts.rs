// Cross-cutting prompt fragments used by provider adapters.
// Task prompts live next to the analysis code in analysis/prompts.rs.

/// System instruction for providers without a native JSON output mode.
/// Models still wrap output in code fences now and then, so the gateway
/// strips them regardless.
pub const JSON_ONLY_SYSTEM: &str = "You strictly output JSON only. \
    No markdown formatting, no code blocks (like ```json). \
    Just the raw JSON object.";
