use gate_config::GateConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &GateConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &GateConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();
    let sections = [
        ("ImageKit", "IMAGEKIT", config.imagekit.is_configured(), "PRIVATE_KEY"),
        ("WhatsApp", "WHATSAPP", config.whatsapp.is_configured(), "PHONE_ID"),
        ("API", "API", config.api.is_configured(), "BASE_URL"),
    ];

    sections
        .iter()
        .filter(|(_, section, configured, _)| {
            !configured && has_env_prefix(&env_keys, &format!("GATEPASS_{section}"))
        })
        .map(|(label, section, _, example)| {
            format!(
                "{label} config appears default while GATEPASS_{section}* env vars exist. Use double underscores (example: GATEPASS_{section}__{example})."
            )
        })
        .collect()
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| key.starts_with(prefix))
}
