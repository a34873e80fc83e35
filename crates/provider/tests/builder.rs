use compact_str::CompactString;
use reqwest::Client;
use tcore::{Capability, DispatchError, Generate, GenerationRequest, ProviderError};
use tutorkit_provider::{DispatchConfig, Dispatcher, build_provider};

const CONFIG: &str = r#"
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
name = "keyless"
provider = "hume"
model = "octave"
api_key = ""

[chains]
chat = ["gemini-flash", "openai-main"]
speech = ["keyless", "minimax-av"]
video = ["minimax-av"]
"#;

fn names(dispatcher: &Dispatcher<tutorkit_provider::Provider>, capability: Capability) -> Vec<CompactString> {
    dispatcher.chain(capability).map(|e| e.name.clone()).collect()
}

#[test]
fn chains_are_built_in_configured_order() {
    let config: DispatchConfig = toml::from_str(CONFIG).unwrap();
    let dispatcher = Dispatcher::from_config(&config, Client::new()).unwrap();

    assert_eq!(
        names(&dispatcher, Capability::Chat),
        ["gemini-flash", "openai-main"]
    );
    assert_eq!(names(&dispatcher, Capability::Video), ["minimax-av"]);
    assert!(names(&dispatcher, Capability::Image).is_empty());
}

#[test]
fn entries_without_a_key_are_left_out() {
    let config: DispatchConfig = toml::from_str(CONFIG).unwrap();
    let dispatcher = Dispatcher::from_config(&config, Client::new()).unwrap();

    assert_eq!(names(&dispatcher, Capability::Speech), ["minimax-av"]);
}

#[test]
fn multimodal_flag_follows_the_backend_kind() {
    let config: DispatchConfig = toml::from_str(CONFIG).unwrap();
    let dispatcher = Dispatcher::from_config(&config, Client::new()).unwrap();

    for entry in dispatcher.chain(Capability::Chat) {
        assert!(entry.multimodal, "{} should accept images", entry.name);
    }
    for entry in dispatcher.chain(Capability::Speech) {
        assert!(!entry.multimodal, "{} is not a vision backend", entry.name);
    }
}

#[test]
fn bad_chain_surfaces_as_a_configuration_error() {
    let text = r#"
[[providers]]
name = "real"
provider = "openai"
model = "gpt-4o"
api_key = "sk"

[chains]
chat = ["real", "ghost"]
"#;
    let config: DispatchConfig = toml::from_str(text).unwrap();
    let err = Dispatcher::from_config(&config, Client::new()).unwrap_err();
    assert!(matches!(
        err,
        DispatchError::Configuration(ProviderError::Configuration(_))
    ));
}

#[test]
fn building_an_unconfigured_provider_fails() {
    let config: DispatchConfig = toml::from_str(CONFIG).unwrap();
    let keyless = config.provider("keyless").unwrap();

    let err = build_provider(keyless, Client::new()).unwrap_err();
    assert!(matches!(err, ProviderError::Configuration(_)));
}

#[tokio::test]
async fn capability_outside_the_backend_is_a_configuration_error() {
    let config: DispatchConfig = toml::from_str(CONFIG).unwrap();
    let gemini = build_provider(config.provider("gemini-flash").unwrap(), Client::new()).unwrap();

    let request = GenerationRequest::new(Capability::Video, "a sunrise timelapse");
    let err = gemini.send(&request).await.unwrap_err();
    assert!(matches!(err, ProviderError::Configuration(_)));
}
