use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use tcore::ProviderError;
use tutorkit_provider::HttpTransport;

#[test]
fn bearer_transport_sets_the_authorization_header() {
    let transport = HttpTransport::bearer(Client::new(), "sk-secret").unwrap();
    let headers = transport.headers();

    assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer sk-secret");
    assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
    assert_eq!(headers.get(ACCEPT).unwrap(), "application/json");
    assert!(transport.query().is_empty());
}

#[test]
fn custom_header_transport_carries_the_named_header() {
    let transport = HttpTransport::header(Client::new(), "X-Hume-Api-Key", "hk-1").unwrap();
    let headers = transport.headers();

    assert_eq!(headers.get("x-hume-api-key").unwrap(), "hk-1");
    assert!(headers.get(AUTHORIZATION).is_none());
}

#[test]
fn query_key_transport_authenticates_in_the_query_string() {
    let transport = HttpTransport::query_key(Client::new(), "key", "g-1");

    assert_eq!(
        transport.query(),
        [("key".to_owned(), "g-1".to_owned())]
    );
    assert!(transport.headers().get(AUTHORIZATION).is_none());
}

#[test]
fn control_characters_in_a_key_are_a_configuration_error() {
    let err = HttpTransport::bearer(Client::new(), "bad\nkey").unwrap_err();
    assert!(matches!(err, ProviderError::Configuration(_)));
}

#[test]
fn invalid_header_name_is_a_configuration_error() {
    let err = HttpTransport::header(Client::new(), "not a header", "v").unwrap_err();
    assert!(matches!(err, ProviderError::Configuration(_)));
}
