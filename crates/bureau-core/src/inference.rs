use async_trait::async_trait;

use crate::error::Result;

/// A generative model that reads a document and answers an instruction with free-form text.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    async fn infer(&self, instruction: &str, document: &[u8], mime_type: &str) -> Result<String>;

    /// Model identifier, for logs and health output.
    fn model(&self) -> &str;
}
