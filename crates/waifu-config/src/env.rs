use std::sync::OnceLock;

use regex::Regex;

/// Expand `{{ env.VAR }}` placeholders in raw TOML text
///
/// `{{ env.VAR | default("fallback") }}` substitutes the fallback when the
/// variable is unset. Comment lines are left untouched so a commented-out
/// secret never has to exist in the environment.
pub fn expand_env(input: &str) -> Result<String, String> {
    fn re() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        // 1: scoped key, 2: optional default
        RE.get_or_init(|| {
            Regex::new(r#"\{\{\s*([a-zA-Z0-9_.]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#)
                .expect("valid placeholder regex")
        })
    }

    let mut output = String::with_capacity(input.len());

    for (index, line) in input.lines().enumerate() {
        if index > 0 {
            output.push('\n');
        }

        if line.trim_start().starts_with('#') {
            output.push_str(line);
            continue;
        }

        let mut last_end = 0;

        for captures in re().captures_iter(line) {
            let (Some(placeholder), Some(key)) = (captures.get(0), captures.get(1)) else {
                continue;
            };

            output.push_str(&line[last_end..placeholder.start()]);
            output.push_str(&resolve(key.as_str(), captures.get(2).map(|m| m.as_str()))?);
            last_end = placeholder.end();
        }

        output.push_str(&line[last_end..]);
    }

    if input.ends_with('\n') {
        output.push('\n');
    }

    Ok(output)
}

fn resolve(key: &str, default: Option<&str>) -> Result<String, String> {
    let Some(var_name) = key.strip_prefix("env.").filter(|name| !name.is_empty() && !name.contains('.')) else {
        return Err(format!("only variables scoped with 'env.' are supported: `{key}`"));
    };

    match (std::env::var(var_name), default) {
        (Ok(value), _) => Ok(value),
        (Err(_), Some(default)) => Ok(default.to_owned()),
        (Err(_), None) => Err(format!("environment variable not found: `{var_name}`")),
    }
}
