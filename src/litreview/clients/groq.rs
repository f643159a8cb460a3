//! Groq model catalogue.
//!
//! Groq serves open-weight models behind an OpenAI compatible API, so the wire client is
//! [`OpenAICompatibleClient`](crate::clients::openai_compatible::OpenAICompatibleClient);
//! this module only maps typed model names to identifiers and fills in their capabilities.

use crate::litreview::config::{ModelConfig, ModelInfo, DEFAULT_ENDPOINT};

// Production models listed by the Groq API
#[allow(non_camel_case_types)]
pub enum Model {
    Llama33_70bVersatile, // default for every participant
    Llama31_8bInstant,
    Llama4Scout17b16e,
    Llama4Maverick17b128e,
    Gemma2_9b,
}

pub fn model_to_string(model: Model) -> String {
    match model {
        Model::Llama33_70bVersatile => "llama-3.3-70b-versatile".to_string(),
        Model::Llama31_8bInstant => "llama-3.1-8b-instant".to_string(),
        Model::Llama4Scout17b16e => "meta-llama/llama-4-scout-17b-16e-instruct".to_string(),
        Model::Llama4Maverick17b128e => {
            "meta-llama/llama-4-maverick-17b-128e-instruct".to_string()
        }
        Model::Gemma2_9b => "gemma2-9b-it".to_string(),
    }
}

fn model_info(model: &Model) -> ModelInfo {
    match model {
        Model::Llama4Scout17b16e | Model::Llama4Maverick17b128e => ModelInfo {
            vision: true,
            function_calling: true,
            json_output: true,
            family: "llama4".to_string(),
        },
        Model::Gemma2_9b => ModelInfo {
            vision: false,
            function_calling: false,
            json_output: true,
            family: "gemma2".to_string(),
        },
        Model::Llama33_70bVersatile | Model::Llama31_8bInstant => ModelInfo::default(),
    }
}

/// A [`ModelConfig`] pointing at Groq for `model`.
pub fn model_config(api_key: &str, model: Model) -> ModelConfig {
    let info = model_info(&model);
    ModelConfig {
        endpoint: DEFAULT_ENDPOINT.to_string(),
        api_key: api_key.to_string(),
        model: model_to_string(model),
        info,
    }
}
