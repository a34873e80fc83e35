use tcore::Capability;
use tutorkit_provider::{BackendConfig, DispatchConfig};

const SAMPLE: &str = r#"
[[providers]]
name = "openai-main"
provider = "openai"
model = "gpt-4o"
api_key = "sk-test"

[[providers]]
name = "gemini-flash"
provider = "gemini"
model = "gemini-2.0-flash"
api_key = "g-test"

[[providers]]
name = "minimax-av"
provider = "minimax"
model = "video-01"
api_key = "mm-test"
group_id = "group-7"

[[providers]]
name = "hume-voice"
provider = "hume"
model = "octave"
api_key = ""

[chains]
chat = ["openai-main", "gemini-flash"]
image = ["openai-main"]
speech = ["minimax-av", "hume-voice"]
video = ["minimax-av"]
"#;

#[test]
fn sample_config_parses_and_validates() {
    let config: DispatchConfig = toml::from_str(SAMPLE).unwrap();
    config.validate().unwrap();

    assert_eq!(config.providers.len(), 4);
    assert_eq!(
        config.chains.for_capability(Capability::Chat),
        ["openai-main", "gemini-flash"]
    );
    assert_eq!(config.chains.for_capability(Capability::Video), ["minimax-av"]);
}

#[test]
fn tagged_entries_carry_backend_specific_fields() {
    let config: DispatchConfig = toml::from_str(SAMPLE).unwrap();

    let openai = config.provider("openai-main").unwrap();
    assert_eq!(openai.kind(), "openai");
    assert_eq!(openai.api_key(), "sk-test");
    assert_eq!(openai.model, "gpt-4o");
    assert!(openai.base_url().is_none());

    let minimax = config.provider("minimax-av").unwrap();
    assert_eq!(minimax.kind(), "minimax");
    match &minimax.backend {
        BackendConfig::MiniMax(settings) => assert_eq!(settings.group_id, "group-7"),
        other => panic!("expected minimax backend, got kind {other:?}"),
    }
}

#[test]
fn blank_api_key_means_unconfigured() {
    let config: DispatchConfig = toml::from_str(SAMPLE).unwrap();

    assert!(config.provider("openai-main").unwrap().configured());
    assert!(!config.provider("hume-voice").unwrap().configured());
}

#[test]
fn whitespace_api_key_means_unconfigured() {
    let text = r#"
[[providers]]
name = "spaced"
provider = "gemini"
model = "gemini-2.0-flash"
api_key = "   "
"#;
    let config: DispatchConfig = toml::from_str(text).unwrap();
    assert!(!config.provider("spaced").unwrap().configured());
}

#[test]
fn base_url_override_is_preserved() {
    let text = r#"
[[providers]]
name = "proxied"
provider = "openai"
model = "gpt-4o"
api_key = "sk"
base_url = "https://proxy.example/v1"
"#;
    let config: DispatchConfig = toml::from_str(text).unwrap();
    assert_eq!(
        config.provider("proxied").unwrap().base_url(),
        Some("https://proxy.example/v1")
    );
}

#[test]
fn duplicate_entry_names_fail_validation() {
    let text = r#"
[[providers]]
name = "twin"
provider = "openai"
model = "gpt-4o"
api_key = "a"

[[providers]]
name = "twin"
provider = "gemini"
model = "gemini-2.0-flash"
api_key = "b"
"#;
    let config: DispatchConfig = toml::from_str(text).unwrap();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("duplicate"));
}

#[test]
fn chain_referencing_unknown_provider_fails_validation() {
    let text = r#"
[[providers]]
name = "real"
provider = "openai"
model = "gpt-4o"
api_key = "a"

[chains]
chat = ["real", "ghost"]
"#;
    let config: DispatchConfig = toml::from_str(text).unwrap();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("ghost"));
}

#[test]
fn unknown_provider_tag_fails_to_parse() {
    let text = r#"
[[providers]]
name = "mystery"
provider = "acme"
model = "m"
api_key = "k"
"#;
    assert!(toml::from_str::<DispatchConfig>(text).is_err());
}

#[test]
fn empty_config_is_valid() {
    let config: DispatchConfig = toml::from_str("").unwrap();
    config.validate().unwrap();
    assert!(config.providers.is_empty());
    assert!(config.chains.for_capability(Capability::Chat).is_empty());
}
