use super::Config;

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Some(key) =
            non_empty_var("MINDMATE_API_KEY").or_else(|| non_empty_var("LOVABLE_API_KEY"))
        {
            self.llm.api_key = Some(key);
        }

        if let Ok(base_url) = std::env::var("MINDMATE_BASE_URL")
            && !base_url.is_empty()
        {
            self.llm.base_url = base_url;
        }

        if let Ok(model) = std::env::var("MINDMATE_MODEL")
            && !model.is_empty()
        {
            self.llm.model = model;
        }

        if let Ok(port_str) =
            std::env::var("MINDMATE_GATEWAY_PORT").or_else(|_| std::env::var("PORT"))
            && let Ok(port) = port_str.parse::<u16>()
        {
            self.gateway.port = port;
        }

        if let Ok(host) =
            std::env::var("MINDMATE_GATEWAY_HOST").or_else(|_| std::env::var("HOST"))
            && !host.is_empty()
        {
            self.gateway.host = host;
        }

        if let Ok(temp_str) = std::env::var("MINDMATE_TEMPERATURE")
            && let Ok(temp) = temp_str.parse::<f64>()
            && (0.0..=2.0).contains(&temp)
        {
            self.llm.temperature = Some(temp);
        }

        if let Ok(level) = std::env::var("MINDMATE_LOG_LEVEL")
            && !level.is_empty()
        {
            self.observability.log_level = level;
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}
