use litreview::client_wrapper::{ClientWrapper, Message, Role};
use litreview::clients::groq;
use litreview::clients::http_pool::is_pooled;
use litreview::clients::openai_compatible::OpenAICompatibleClient;
use litreview::clients::build_client;
use litreview::init_logger;
use litreview::session::ParticipantSession;
use litreview::ModelConfig;
use std::sync::Arc;

#[test]
fn test_factory_carries_model_and_capabilities() {
    let config = groq::model_config("gsk_test", groq::Model::Llama31_8bInstant);
    let client = build_client(&config);

    assert_eq!(client.model_name(), "llama-3.1-8b-instant");
    let info = client.model_info().unwrap();
    assert!(!info.vision);
    assert!(info.function_calling);
    assert!(info.json_output);
    assert_eq!(info.family, "llama3");
}

#[tokio::test]
async fn test_clients_for_one_endpoint_share_a_pooled_connection() {
    let config = ModelConfig {
        endpoint: "https://pool-check.example/openai/v1/".to_string(),
        ..ModelConfig::default()
    };
    let first = OpenAICompatibleClient::new(&config);
    let second = OpenAICompatibleClient::new(&config);

    assert_eq!(first.endpoint(), "https://pool-check.example/openai/v1");
    assert_eq!(first.endpoint(), second.endpoint());
    assert!(is_pooled("https://pool-check.example/openai/v1"));
    // nothing was sent yet
    assert!(first.get_last_usage().await.is_none());
}

#[tokio::test]
#[ignore]
async fn test_groq_client_live() {
    init_logger();

    let secret_key = std::env::var("GROQ_API_KEY").expect("GROQ_API_KEY not set");
    let client = Arc::new(OpenAICompatibleClient::new(&groq::model_config(
        &secret_key,
        groq::Model::Llama33_70bVersatile,
    )));
    let mut session = ParticipantSession::new(client.clone(), "You are terse.", 8_192);
    session.inject_message(Role::User, "What is the capital of France? One word.");

    let reply: Message = session.generate().await.unwrap();
    log::info!("reply: {}", reply.content);

    assert!(reply.content.to_lowercase().contains("paris"));
    assert!(session.token_usage().total_tokens > 0);
    assert!(client.get_last_usage().await.is_some());
}
