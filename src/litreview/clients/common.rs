use crate::litreview::client_wrapper::{ClientError, Message, TokenUsage};
use openai_rust::chat;
use openai_rust2 as openai_rust;
use tokio::sync::Mutex;

/// Convert our messages into the format expected by openai_rust.
pub fn to_chat_messages(messages: &[Message]) -> Vec<chat::Message> {
    messages
        .iter()
        .map(|msg| chat::Message {
            role: msg.role.as_str().to_owned(),
            content: msg.content.to_string(),
        })
        .collect()
}

/// Send a chat request, record its usage, and return the assistant's content.
pub async fn send_and_track(
    api: &openai_rust::Client,
    model: &str,
    formatted_msgs: Vec<chat::Message>,
    url_path: Option<String>,
    usage_slot: &Mutex<Option<TokenUsage>>,
) -> Result<String, ClientError> {
    let chat_arguments = chat::ChatArguments::new(model, formatted_msgs);

    match api.create_chat(chat_arguments, url_path).await {
        Ok(response) => {
            let usage = TokenUsage {
                input_tokens: response.usage.prompt_tokens as usize,
                output_tokens: response.usage.completion_tokens as usize,
                total_tokens: response.usage.total_tokens as usize,
            };

            // Store it for get_last_usage()
            *usage_slot.lock().await = Some(usage);

            match response.choices.first() {
                Some(choice) => Ok(choice.message.content.clone()),
                None => Err("chat completion returned no choices".into()),
            }
        }
        Err(err) => {
            log::error!(
                "litreview::clients::common::send_and_track(...): API Error: {}",
                err
            );
            Err(format!("chat completion request failed: {}", err).into())
        }
    }
}
